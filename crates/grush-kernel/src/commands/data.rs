//! Variable and value-shaping commands: set, vars, echo, field, idx, key.

use anyhow::{bail, Result};
use grush_types::{CommandSchema, ParamSchema, ParamType, Record, Value};

use crate::registry::{Command, CommandArgs, ExecContext};

/// `set name value`: bind a variable.
///
/// The binding lands in the pending list, so a later failure in the same
/// line discards it. Same-line `$name` references already see it.
pub struct Set;

impl Command for Set {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("set", "Bind a variable")
            .param(ParamSchema::required("name", ParamType::Str, "variable name"))
            .param(ParamSchema::required("value", ParamType::Any, "value to store"))
    }

    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let name = args.str("name")?;
        let value = args.value("value")?.clone();
        ctx.pending.push((name.to_string(), value.clone()));
        Ok(value)
    }
}

/// `vars`: list the committed variables.
pub struct Vars;

impl Command for Vars {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("vars", "List variables")
    }

    fn execute(&self, _args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value> {
        let records = ctx
            .session
            .vars()
            .map(|(name, value)| {
                Record::new()
                    .field("name", Value::String(name.to_string()))
                    .field("value", value.clone())
            })
            .collect();
        Ok(Value::List(records))
    }
}

/// `echo value`: return the value unchanged.
pub struct Echo;

impl Command for Echo {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("echo", "Print a value")
            .param(ParamSchema::required("value", ParamType::Any, "value to print"))
    }

    fn execute(&self, args: &CommandArgs, _ctx: &mut ExecContext<'_>) -> Result<Value> {
        Ok(args.value("value")?.clone())
    }
}

/// `field value name`: extract one field of a record. A missing field
/// is an error; use `key` for a forgiving lookup.
pub struct Field;

impl Command for Field {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("field", "Extract a record field")
            .param(ParamSchema::required("value", ParamType::Any, "record to read"))
            .param(ParamSchema::required("name", ParamType::Str, "field name"))
    }

    fn execute(&self, args: &CommandArgs, _ctx: &mut ExecContext<'_>) -> Result<Value> {
        let name = args.str("name")?;
        match args.value("value")? {
            Value::Record(record) => match record.get(name) {
                Some(value) => Ok(value.clone()),
                None => bail!("record has no field '{name}'"),
            },
            other => bail!("'field' needs a record, got {}", other.type_name()),
        }
    }
}

/// `idx value index`: pick one record out of a list. Negative indexes
/// count from the end.
pub struct Idx;

impl Command for Idx {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("idx", "Pick a list element")
            .param(ParamSchema::required("value", ParamType::Any, "list to index"))
            .param(ParamSchema::required("index", ParamType::Int, "position, negative from end"))
    }

    fn execute(&self, args: &CommandArgs, _ctx: &mut ExecContext<'_>) -> Result<Value> {
        let index = args.int("index")?;
        match args.value("value")? {
            Value::List(records) => {
                let len = records.len() as i64;
                let at = if index < 0 { len + index } else { index };
                if at < 0 || at >= len {
                    bail!("index {index} out of range for list of {len}");
                }
                Ok(Value::Record(records[at as usize].clone()))
            }
            other => bail!("'idx' needs a list, got {}", other.type_name()),
        }
    }
}

/// `key value name`: walk nested records along a dotted path. A missing
/// step yields null instead of failing.
pub struct Key;

impl Command for Key {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("key", "Walk a dotted path through nested records")
            .param(ParamSchema::required("value", ParamType::Any, "record to walk"))
            .param(ParamSchema::required("name", ParamType::Str, "dotted field path"))
    }

    fn execute(&self, args: &CommandArgs, _ctx: &mut ExecContext<'_>) -> Result<Value> {
        let mut current = args.value("value")?.clone();
        for step in args.str("name")?.split('.') {
            current = match current {
                Value::Record(record) => record.get(step).cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            };
        }
        Ok(current)
    }
}
