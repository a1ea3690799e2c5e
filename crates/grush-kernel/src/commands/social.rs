//! Like and follow commands.

use anyhow::Result;
use grush_types::{CommandSchema, ParamSchema, ParamType, Value};

use super::resolve_user_id;
use crate::registry::{Command, CommandArgs, ExecContext};

/// `like userid postid`
pub struct Like;

impl Command for Like {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("like", "Like a post")
            .param(ParamSchema::required("userid", ParamType::Str, "user id, or 'me'"))
            .param(ParamSchema::required("postid", ParamType::Str, "post id"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let userid = resolve_user_id(args.str("userid")?, ctx)?;
        let postid = args.str("postid")?;
        ctx.store.add_like(&userid, postid)?;
        let post = ctx.store.get_post(postid)?;
        Ok(Value::Record(post.to_record()))
    }
}

/// `likes_of postid`: who liked this post.
pub struct LikesOf;

impl Command for LikesOf {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("likes_of", "List users who liked a post")
            .param(ParamSchema::required("postid", ParamType::Str, "post id"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let users = ctx.store.likes_of(args.str("postid")?)?;
        Ok(Value::List(users.iter().map(|u| u.to_record()).collect()))
    }
}

/// `liked_by userid`: posts this user liked.
pub struct LikedBy;

impl Command for LikedBy {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("liked_by", "List posts a user liked")
            .param(ParamSchema::required("userid", ParamType::Str, "user id, or 'me'"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let userid = resolve_user_id(args.str("userid")?, ctx)?;
        let posts = ctx.store.liked_by(&userid)?;
        Ok(Value::List(posts.iter().map(|p| p.to_record()).collect()))
    }
}

/// `follow userid otherid`
pub struct Follow;

impl Command for Follow {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("follow", "Follow a user")
            .param(ParamSchema::required("userid", ParamType::Str, "follower id, or 'me'"))
            .param(ParamSchema::required("otherid", ParamType::Str, "user to follow"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let userid = resolve_user_id(args.str("userid")?, ctx)?;
        ctx.store.add_follow(&userid, args.str("otherid")?)?;
        let other = ctx.store.get_user(args.str("otherid")?)?;
        Ok(Value::Record(other.to_record()))
    }
}

/// `view_follows [id]`: who this user follows.
pub struct ViewFollows;

impl Command for ViewFollows {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("view_follows", "List users someone follows").param(
            ParamSchema::optional(
                "id",
                ParamType::Str,
                Value::String(String::new()),
                "user id, or 'me'",
            ),
        )
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        let users = ctx.store.follows_of(&id)?;
        Ok(Value::List(users.iter().map(|u| u.to_record()).collect()))
    }
}

/// `view_followers [id]`: who follows this user.
pub struct ViewFollowers;

impl Command for ViewFollowers {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("view_followers", "List someone's followers").param(
            ParamSchema::optional(
                "id",
                ParamType::Str,
                Value::String(String::new()),
                "user id, or 'me'",
            ),
        )
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        let users = ctx.store.followers_of(&id)?;
        Ok(Value::List(users.iter().map(|u| u.to_record()).collect()))
    }
}
