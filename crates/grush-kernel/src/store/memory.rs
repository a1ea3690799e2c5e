//! In-process graph store over plain maps.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{GraphStore, Post, StoreError, User, DELETED_USER};

#[derive(Debug, Clone)]
struct UserRow {
    name: String,
}

#[derive(Debug, Clone)]
struct PostRow {
    author: u64,
    title: String,
    contents: String,
}

/// In-memory [`GraphStore`].
///
/// Ids are `u{n}` / `p{n}` with numeric keys internally, so listing
/// returns entities in creation order. Edges are plain sets of
/// (user, post) and (follower, followed) pairs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: BTreeMap<u64, UserRow>,
    posts: BTreeMap<u64, PostRow>,
    likes: BTreeSet<(u64, u64)>,
    follows: BTreeSet<(u64, u64)>,
    next_user: u64,
    next_post: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a small demo graph: three users, a few posts, some edges.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store
            .try_seed()
            .expect("seed graph references only entities it just created");
        store
    }

    fn try_seed(&mut self) -> Result<(), StoreError> {
        let ana = self.create_user("ana")?.id;
        let bruno = self.create_user("bruno")?.id;
        let carla = self.create_user("carla")?.id;
        let p1 = self.create_post(&ana, "hello", "first post here")?.id;
        let p2 = self.create_post(&bruno, "graphs", "everything is a graph")?.id;
        self.create_post(&carla, "lunch", "who is around?")?;
        self.add_like(&bruno, &p1)?;
        self.add_like(&carla, &p1)?;
        self.add_like(&ana, &p2)?;
        self.add_follow(&bruno, &ana)?;
        self.add_follow(&carla, &ana)?;
        self.add_follow(&ana, &bruno)?;
        Ok(())
    }

    fn user_key(&self, id: &str) -> Result<u64, StoreError> {
        parse_id(id, 'u')
            .filter(|key| self.users.contains_key(key))
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    fn post_key(&self, id: &str) -> Result<u64, StoreError> {
        parse_id(id, 'p')
            .filter(|key| self.posts.contains_key(key))
            .ok_or_else(|| StoreError::not_found("post", id))
    }

    fn user_at(&self, key: u64) -> User {
        User {
            id: format!("u{key}"),
            name: self.users[&key].name.clone(),
        }
    }

    fn post_at(&self, key: u64) -> Post {
        let row = &self.posts[&key];
        let author = match self.users.get(&row.author) {
            Some(user) => user.name.clone(),
            None => DELETED_USER.to_string(),
        };
        Post {
            id: format!("p{key}"),
            author,
            title: row.title.clone(),
            contents: row.contents.clone(),
            likes: self.likes.iter().filter(|(_, p)| *p == key).count() as i64,
        }
    }
}

fn parse_id(id: &str, prefix: char) -> Option<u64> {
    id.strip_prefix(prefix).and_then(|n| n.parse().ok())
}

impl GraphStore for MemoryStore {
    fn create_user(&mut self, name: &str) -> Result<User, StoreError> {
        if self.users.values().any(|u| u.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        self.next_user += 1;
        let key = self.next_user;
        self.users.insert(
            key,
            UserRow {
                name: name.to_string(),
            },
        );
        debug!(id = %format!("u{key}"), name, "created user");
        Ok(self.user_at(key))
    }

    fn get_user(&self, id: &str) -> Result<User, StoreError> {
        Ok(self.user_at(self.user_key(id)?))
    }

    fn get_user_by_name(&self, name: &str) -> Result<User, StoreError> {
        self.users
            .iter()
            .find(|(_, row)| row.name == name)
            .map(|(key, _)| self.user_at(*key))
            .ok_or_else(|| StoreError::not_found("user", name))
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.keys().map(|key| self.user_at(*key)).collect())
    }

    fn update_user(&mut self, id: &str, name: &str) -> Result<User, StoreError> {
        let key = self.user_key(id)?;
        if self
            .users
            .iter()
            .any(|(other, row)| *other != key && row.name == name)
        {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let row = self
            .users
            .get_mut(&key)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        row.name = name.to_string();
        Ok(self.user_at(key))
    }

    fn delete_user(&mut self, id: &str) -> Result<(), StoreError> {
        let key = self.user_key(id)?;
        self.users.remove(&key);
        // Detach: likes and follow edges go with the user. Posts stay and
        // resolve their author to the reserved deleted name.
        self.likes.retain(|(user, _)| *user != key);
        self.follows
            .retain(|(from, to)| *from != key && *to != key);
        debug!(id, "deleted user");
        Ok(())
    }

    fn create_post(
        &mut self,
        author_id: &str,
        title: &str,
        contents: &str,
    ) -> Result<Post, StoreError> {
        let author = self.user_key(author_id)?;
        self.next_post += 1;
        let key = self.next_post;
        self.posts.insert(
            key,
            PostRow {
                author,
                title: title.to_string(),
                contents: contents.to_string(),
            },
        );
        debug!(id = %format!("p{key}"), author_id, "created post");
        Ok(self.post_at(key))
    }

    fn get_post(&self, id: &str) -> Result<Post, StoreError> {
        Ok(self.post_at(self.post_key(id)?))
    }

    fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.keys().map(|key| self.post_at(*key)).collect())
    }

    fn posts_of(&self, author_id: &str) -> Result<Vec<Post>, StoreError> {
        let author = self.user_key(author_id)?;
        Ok(self
            .posts
            .iter()
            .filter(|(_, row)| row.author == author)
            .map(|(key, _)| self.post_at(*key))
            .collect())
    }

    fn update_post(
        &mut self,
        id: &str,
        title: &str,
        contents: &str,
    ) -> Result<Post, StoreError> {
        let key = self.post_key(id)?;
        let row = self
            .posts
            .get_mut(&key)
            .ok_or_else(|| StoreError::not_found("post", id))?;
        row.title = title.to_string();
        row.contents = contents.to_string();
        Ok(self.post_at(key))
    }

    fn delete_post(&mut self, id: &str) -> Result<(), StoreError> {
        let key = self.post_key(id)?;
        self.posts.remove(&key);
        self.likes.retain(|(_, post)| *post != key);
        debug!(id, "deleted post");
        Ok(())
    }

    fn add_like(&mut self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        let user = self.user_key(user_id)?;
        let post = self.post_key(post_id)?;
        self.likes.insert((user, post));
        Ok(())
    }

    fn likes_of(&self, post_id: &str) -> Result<Vec<User>, StoreError> {
        let post = self.post_key(post_id)?;
        Ok(self
            .likes
            .iter()
            .filter(|(_, p)| *p == post)
            .map(|(user, _)| self.user_at(*user))
            .collect())
    }

    fn liked_by(&self, user_id: &str) -> Result<Vec<Post>, StoreError> {
        let user = self.user_key(user_id)?;
        Ok(self
            .likes
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, post)| self.post_at(*post))
            .collect())
    }

    fn add_follow(&mut self, user_id: &str, other_id: &str) -> Result<(), StoreError> {
        let from = self.user_key(user_id)?;
        let to = self.user_key(other_id)?;
        self.follows.insert((from, to));
        Ok(())
    }

    fn follows_of(&self, user_id: &str) -> Result<Vec<User>, StoreError> {
        let user = self.user_key(user_id)?;
        Ok(self
            .follows
            .iter()
            .filter(|(from, _)| *from == user)
            .map(|(_, to)| self.user_at(*to))
            .collect())
    }

    fn followers_of(&self, user_id: &str) -> Result<Vec<User>, StoreError> {
        let user = self.user_key(user_id)?;
        Ok(self
            .follows
            .iter()
            .filter(|(_, to)| *to == user)
            .map(|(from, _)| self.user_at(*from))
            .collect())
    }
}
