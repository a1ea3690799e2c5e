//! Login and logout.

use anyhow::{bail, Result};
use grush_types::{CommandSchema, ParamSchema, ParamType, Value};

use crate::registry::{Command, CommandArgs, ExecContext};

/// `login id=... | login name=...`: select the current user.
///
/// Takes effect immediately, even if a later stage of the same line
/// fails; login is not a variable binding.
pub struct Login;

impl Command for Login {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("login", "Log in as a user")
            .param(ParamSchema::optional(
                "id",
                ParamType::Str,
                Value::String(String::new()),
                "user id",
            ))
            .param(ParamSchema::optional(
                "name",
                ParamType::Str,
                Value::String(String::new()),
                "user name",
            ))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let id = args.str("id")?;
        let name = args.str("name")?;
        let user = if !name.is_empty() {
            ctx.store.get_user_by_name(name)?
        } else if !id.is_empty() {
            ctx.store.get_user(id)?
        } else {
            bail!("login needs an id or a name");
        };
        let record = user.to_record();
        ctx.session.login(user);
        Ok(Value::Record(record))
    }
}

/// `logout`: clear the current user; returns who was logged in.
pub struct Logout;

impl Command for Logout {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("logout", "Log out")
    }

    fn execute(&self, _args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        Ok(match ctx.session.logout() {
            Some(user) => Value::Record(user.to_record()),
            None => Value::Null,
        })
    }
}
