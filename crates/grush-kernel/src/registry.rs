//! Command registry.
//!
//! Commands are registered explicitly at startup, one `register` call per
//! command. There is no runtime discovery: the registry is the single
//! source of truth for what exists and what its interface is, and `help`
//! renders straight from the registered schemas.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use grush_types::{CommandSchema, Value};

use crate::error::ShellError;
use crate::session::Session;
use crate::store::GraphStore;

/// Arguments after binding and evaluation: one value per declared
/// parameter, every one present. Handlers never see wrong arity.
#[derive(Debug, Default)]
pub struct CommandArgs {
    values: Vec<(String, Value)>,
}

impl CommandArgs {
    pub fn new(values: Vec<(String, Value)>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// The value bound to `name`; binding guarantees presence for every
    /// declared parameter, so a miss is a handler bug.
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| anyhow!("no argument bound to '{name}'"))
    }

    pub fn str(&self, name: &str) -> Result<&str> {
        match self.value(name)? {
            Value::String(s) => Ok(s),
            other => Err(anyhow!("argument '{name}' is {}, not a string", other.type_name())),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        match self.value(name)? {
            Value::Int(i) => Ok(*i),
            other => Err(anyhow!("argument '{name}' is {}, not an int", other.type_name())),
        }
    }
}

/// What a handler gets to work with while executing one stage.
///
/// `pending` collects the variable bindings of the current line; the
/// executor commits them to the session only if the whole line succeeds.
pub struct ExecContext<'a> {
    pub store: &'a mut dyn GraphStore,
    pub session: &'a mut Session,
    pub pending: &'a mut Vec<(String, Value)>,
    pub registry: &'a CommandRegistry,
}

/// A registered command.
pub trait Command {
    /// The command's interface; `schema().name` is the registration key.
    fn schema(&self) -> CommandSchema;

    /// Run with fully bound arguments. Errors surface to the user as
    /// `error: command failed: ...` and abort the line.
    fn execute(&self, args: &CommandArgs, ctx: &mut ExecContext<'_>) -> Result<Value>;
}

/// Name → command mapping, with schemas cached at registration.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    schemas: BTreeMap<String, CommandSchema>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its schema name. Last registration wins.
    pub fn register(&mut self, command: Box<dyn Command>) {
        let schema = command.schema();
        self.schemas.insert(schema.name.clone(), schema.clone());
        self.commands.insert(schema.name, command);
    }

    pub fn lookup(&self, name: &str) -> Result<&dyn Command, ShellError> {
        self.commands
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))
    }

    pub fn schema(&self, name: &str) -> Option<&CommandSchema> {
        self.schemas.get(name)
    }

    /// All schemas, sorted by command name.
    pub fn schemas(&self) -> impl Iterator<Item = &CommandSchema> {
        self.schemas.values()
    }
}
