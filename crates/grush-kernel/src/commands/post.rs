//! Post commands.

use anyhow::Result;
use grush_types::{CommandSchema, ParamSchema, ParamType, Value};

use super::resolve_user_id;
use crate::registry::{Command, CommandArgs, ExecContext};

/// `create_post author title contents`
pub struct CreatePost;

impl Command for CreatePost {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("create_post", "Create a post")
            .param(ParamSchema::required("author", ParamType::Str, "author id, or 'me'"))
            .param(ParamSchema::required("title", ParamType::Str, "post title"))
            .param(ParamSchema::required("contents", ParamType::Str, "post body"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let author = resolve_user_id(args.str("author")?, ctx)?;
        let post = ctx
            .store
            .create_post(&author, args.str("title")?, args.str("contents")?)?;
        Ok(Value::Record(post.to_record()))
    }
}

/// `get_post postid`
pub struct GetPost;

impl Command for GetPost {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get_post", "Look up a post by id")
            .param(ParamSchema::required("postid", ParamType::Str, "post id"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let post = ctx.store.get_post(args.str("postid")?)?;
        Ok(Value::Record(post.to_record()))
    }
}

/// `view_posts`
pub struct ViewPosts;

impl Command for ViewPosts {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("view_posts", "List all posts")
    }

    fn execute(&self, _args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let posts = ctx.store.list_posts()?;
        Ok(Value::List(posts.iter().map(|p| p.to_record()).collect()))
    }
}

/// `view_posts_of [id]`: defaults to the logged-in user.
pub struct ViewPostsOf;

impl Command for ViewPostsOf {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("view_posts_of", "List a user's posts").param(ParamSchema::optional(
            "id",
            ParamType::Str,
            Value::String(String::new()),
            "author id, or 'me'",
        ))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        let posts = ctx.store.posts_of(&id)?;
        Ok(Value::List(posts.iter().map(|p| p.to_record()).collect()))
    }
}

/// `update_post postid title contents`
pub struct UpdatePost;

impl Command for UpdatePost {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("update_post", "Edit a post")
            .param(ParamSchema::required("postid", ParamType::Str, "post id"))
            .param(ParamSchema::required("title", ParamType::Str, "new title"))
            .param(ParamSchema::required("contents", ParamType::Str, "new body"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let post = ctx.store.update_post(
            args.str("postid")?,
            args.str("title")?,
            args.str("contents")?,
        )?;
        Ok(Value::Record(post.to_record()))
    }
}

/// `delete_post postid`
pub struct DeletePost;

impl Command for DeletePost {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("delete_post", "Delete a post")
            .param(ParamSchema::required("postid", ParamType::Str, "post id"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        ctx.store.delete_post(args.str("postid")?)?;
        Ok(Value::Null)
    }
}
