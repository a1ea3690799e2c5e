//! The graph store boundary.
//!
//! Commands talk to the social graph through the [`GraphStore`] trait:
//! synchronous request/response calls over users, posts, and the like and
//! follow edges. Ids are opaque strings minted by the store; callers never
//! construct them. The bundled [`MemoryStore`] is the REPL default and the
//! test double, not a storage engine.

mod memory;

pub use memory::MemoryStore;

use grush_types::{Record, Value};
use thiserror::Error;

/// Reserved author name reported for posts whose author was deleted.
pub const DELETED_USER: &str = "`deleted`";

/// Errors from the graph store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No entity of this kind with this id (or name, for name lookups).
    #[error("no {kind} '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// A user with this name already exists.
    #[error("user '{0}' already exists")]
    DuplicateName(String),

    /// Backend failure (connection, protocol, corruption).
    #[error("store backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// A user node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn to_record(&self) -> Record {
        Record::new()
            .field("id", Value::String(self.id.clone()))
            .field("name", Value::String(self.name.clone()))
    }
}

/// A post node, with the author resolved to a name and the like count
/// already aggregated. A deleted author reports [`DELETED_USER`].
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub title: String,
    pub contents: String,
    pub likes: i64,
}

impl Post {
    pub fn to_record(&self) -> Record {
        Record::new()
            .field("id", Value::String(self.id.clone()))
            .field("author", Value::String(self.author.clone()))
            .field("title", Value::String(self.title.clone()))
            .field("contents", Value::String(self.contents.clone()))
            .field("likes", Value::Int(self.likes))
    }
}

/// The external graph collaborator.
///
/// All calls block until the store answers. Write calls take `&mut self`;
/// an error leaves the store unchanged for that call.
pub trait GraphStore {
    // Users.
    fn create_user(&mut self, name: &str) -> Result<User, StoreError>;
    fn get_user(&self, id: &str) -> Result<User, StoreError>;
    fn get_user_by_name(&self, name: &str) -> Result<User, StoreError>;
    fn list_users(&self) -> Result<Vec<User>, StoreError>;
    fn update_user(&mut self, id: &str, name: &str) -> Result<User, StoreError>;
    fn delete_user(&mut self, id: &str) -> Result<(), StoreError>;

    // Posts.
    fn create_post(
        &mut self,
        author_id: &str,
        title: &str,
        contents: &str,
    ) -> Result<Post, StoreError>;
    fn get_post(&self, id: &str) -> Result<Post, StoreError>;
    fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    fn posts_of(&self, author_id: &str) -> Result<Vec<Post>, StoreError>;
    fn update_post(&mut self, id: &str, title: &str, contents: &str)
        -> Result<Post, StoreError>;
    fn delete_post(&mut self, id: &str) -> Result<(), StoreError>;

    // Edges.
    fn add_like(&mut self, user_id: &str, post_id: &str) -> Result<(), StoreError>;
    fn likes_of(&self, post_id: &str) -> Result<Vec<User>, StoreError>;
    fn liked_by(&self, user_id: &str) -> Result<Vec<Post>, StoreError>;
    fn add_follow(&mut self, user_id: &str, other_id: &str) -> Result<(), StoreError>;
    fn follows_of(&self, user_id: &str) -> Result<Vec<User>, StoreError>;
    fn followers_of(&self, user_id: &str) -> Result<Vec<User>, StoreError>;
}
