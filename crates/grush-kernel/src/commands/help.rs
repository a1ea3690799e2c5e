//! The help command, rendered from registered schemas.

use anyhow::{bail, Result};
use grush_types::{CommandSchema, ParamSchema, ParamType, Value};

use crate::help;
use crate::registry::{Command, CommandArgs, ExecContext};

/// `help [command]`: overview of every command, or detail for one.
pub struct Help;

impl Command for Help {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("help", "Show available commands").param(ParamSchema::optional(
            "command",
            ParamType::Str,
            Value::String(String::new()),
            "command to describe",
        ))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let name = args.str("command")?;
        let text = if name.is_empty() {
            help::overview(ctx.registry.schemas())
        } else {
            match ctx.registry.schema(name) {
                Some(schema) => help::detail(schema),
                None => bail!("unknown command: '{name}'"),
            }
        };
        Ok(Value::String(text))
    }
}
