//! User commands.

use anyhow::Result;
use grush_types::{CommandSchema, ParamSchema, ParamType, Value};

use super::resolve_user_id;
use crate::registry::{Command, CommandArgs, ExecContext};

/// `create_user name`
pub struct CreateUser;

impl Command for CreateUser {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("create_user", "Create a user")
            .param(ParamSchema::required("name", ParamType::Str, "unique user name"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let user = ctx.store.create_user(args.str("name")?)?;
        Ok(Value::Record(user.to_record()))
    }
}

/// `get_user id`: `me` or an empty id means the logged-in user.
pub struct GetUser;

impl Command for GetUser {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get_user", "Look up a user by id")
            .param(ParamSchema::required("id", ParamType::Str, "user id, or 'me'"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        let user = ctx.store.get_user(&id)?;
        Ok(Value::Record(user.to_record()))
    }
}

/// `get_user_by_name name`
pub struct GetUserByName;

impl Command for GetUserByName {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get_user_by_name", "Look up a user by name")
            .param(ParamSchema::required("name", ParamType::Str, "user name"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let user = ctx.store.get_user_by_name(args.str("name")?)?;
        Ok(Value::Record(user.to_record()))
    }
}

/// `view_users`
pub struct ViewUsers;

impl Command for ViewUsers {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("view_users", "List all users")
    }

    fn execute(&self, _args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let users = ctx.store.list_users()?;
        Ok(Value::List(users.iter().map(|u| u.to_record()).collect()))
    }
}

/// `update_user id name`
pub struct UpdateUser;

impl Command for UpdateUser {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("update_user", "Rename a user")
            .param(ParamSchema::required("id", ParamType::Str, "user id, or 'me'"))
            .param(ParamSchema::required("name", ParamType::Str, "new name"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        let user = ctx.store.update_user(&id, args.str("name")?)?;
        // Keep the login record in step with the rename.
        if ctx.session.current_user().is_some_and(|u| u.id == user.id) {
            ctx.session.login(user.clone());
        }
        Ok(Value::Record(user.to_record()))
    }
}

/// `delete_user id`: the user's posts survive with a deleted author.
pub struct DeleteUser;

impl Command for DeleteUser {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("delete_user", "Delete a user")
            .param(ParamSchema::required("id", ParamType::Str, "user id, or 'me'"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = resolve_user_id(args.str("id")?, ctx)?;
        ctx.store.delete_user(&id)?;
        if ctx.session.current_user().is_some_and(|u| u.id == id) {
            ctx.session.logout();
        }
        Ok(Value::Null)
    }
}
