//! Built-in commands.
//!
//! Each command is a unit struct implementing [`Command`](crate::registry::Command);
//! registration is one `register` call per command in [`register_all`].
//! Adding a command means adding a struct and a line here, nothing else.

mod data;
mod help;
mod post;
mod session;
mod social;
mod user;

use anyhow::{bail, Result};

use crate::registry::{CommandRegistry, ExecContext};

/// Register the full built-in command set.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Box::new(data::Set));
    registry.register(Box::new(data::Vars));
    registry.register(Box::new(data::Echo));
    registry.register(Box::new(data::Field));
    registry.register(Box::new(data::Idx));
    registry.register(Box::new(data::Key));
    registry.register(Box::new(help::Help));
    registry.register(Box::new(session::Login));
    registry.register(Box::new(session::Logout));
    registry.register(Box::new(user::CreateUser));
    registry.register(Box::new(user::GetUser));
    registry.register(Box::new(user::GetUserByName));
    registry.register(Box::new(user::ViewUsers));
    registry.register(Box::new(user::UpdateUser));
    registry.register(Box::new(user::DeleteUser));
    registry.register(Box::new(post::CreatePost));
    registry.register(Box::new(post::GetPost));
    registry.register(Box::new(post::ViewPosts));
    registry.register(Box::new(post::ViewPostsOf));
    registry.register(Box::new(post::UpdatePost));
    registry.register(Box::new(post::DeletePost));
    registry.register(Box::new(social::Like));
    registry.register(Box::new(social::LikesOf));
    registry.register(Box::new(social::LikedBy));
    registry.register(Box::new(social::Follow));
    registry.register(Box::new(social::ViewFollows));
    registry.register(Box::new(social::ViewFollowers));
}

/// Resolve a user-id argument, honoring the `me` / empty-string shortcut
/// for the logged-in user.
fn resolve_user_id(id: &str, ctx: &ExecContext<'_>) -> Result<String> {
    if id.is_empty() || id == "me" {
        match ctx.session.current_user() {
            Some(user) => Ok(user.id.clone()),
            None => bail!("not logged in: log in first or pass an explicit user id"),
        }
    } else {
        Ok(id.to_string())
    }
}
