//! The shell executor.
//!
//! Runs one line at a time: parse into a pipeline, then bind, resolve,
//! and invoke each stage left to right, feeding each stage's result into
//! the next. Variable bindings made by `set` stages are collected in a
//! pending list and committed to the session, together with the
//! last-result slot, only once the whole line has succeeded. A failed
//! line therefore leaves the value store untouched; external effects of
//! stages that already ran are final.

use grush_types::{CommandSchema, Value};
use tracing::debug;

use crate::ast::{Arg, Expr, Stage};
use crate::commands;
use crate::error::ShellError;
use crate::eval;
use crate::parser::parse_line;
use crate::registry::{CommandArgs, CommandRegistry, ExecContext};
use crate::session::Session;
use crate::store::GraphStore;

/// The interactive shell: registry, session, and the store collaborator.
pub struct Shell<S: GraphStore> {
    registry: CommandRegistry,
    session: Session,
    store: S,
}

/// A parameter slot after binding, before evaluation.
enum Bound {
    Expr(Expr),
    Default(Value),
}

impl<S: GraphStore> Shell<S> {
    /// Create a shell with the full built-in command set registered.
    pub fn new(store: S) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            registry,
            session: Session::new(),
            store,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute one line and return its result.
    pub fn eval_line(&mut self, line: &str) -> Result<Value, ShellError> {
        let pipeline = parse_line(line)?;
        let Self {
            registry,
            session,
            store,
        } = self;

        let mut pending: Vec<(String, Value)> = Vec::new();
        let mut piped: Option<Value> = None;

        for (index, stage) in pipeline.stages.iter().enumerate() {
            let schema = registry
                .schema(&stage.command)
                .ok_or_else(|| ShellError::UnknownCommand(stage.command.clone()))?;
            debug!(command = %stage.command, stage = index, "executing stage");

            let slots = bind(stage, schema, index > 0)?;

            // Resolve every slot before touching the handler, so binding
            // and evaluation errors never reach a command.
            let mut values = Vec::with_capacity(slots.len());
            for (param, bound) in schema.params.iter().zip(slots) {
                let value = match bound {
                    Bound::Expr(expr) => {
                        eval::resolve(&expr, param, session, &pending, piped.as_ref())?
                    }
                    Bound::Default(value) => value,
                };
                values.push((param.name.clone(), value));
            }
            let args = CommandArgs::new(values);

            let command = registry.lookup(&stage.command)?;
            let mut ctx = ExecContext {
                store: &mut *store,
                session: &mut *session,
                pending: &mut pending,
                registry: &*registry,
            };
            let result = command.execute(&args, &mut ctx).map_err(ShellError::Command)?;
            piped = Some(result);
        }

        // Commit point: the line succeeded.
        let result = piped.unwrap_or(Value::Null);
        for (name, value) in pending {
            session.set_var(name, value);
        }
        session.set_last_result(result.clone());
        Ok(result)
    }
}

/// Bind a stage's arguments to the schema's parameter slots.
///
/// Named arguments bind first; positional arguments then fill the
/// parameters still unbound, in declared order. A piped stage with no
/// explicit `_` binds the piped value to the first parameter left
/// unbound; with no parameter free the dangling piped value is an arity
/// error, never a silent drop. Defaults fill the rest; a required
/// parameter still unbound fails before the handler is ever invoked.
fn bind(stage: &Stage, schema: &CommandSchema, is_piped: bool) -> Result<Vec<Bound>, ShellError> {
    let mut slots: Vec<Option<Expr>> = vec![None; schema.params.len()];
    let mut named = vec![false; schema.params.len()];

    for arg in &stage.args {
        if let Arg::Named { name, expr } = arg {
            let index =
                schema
                    .param_index(name)
                    .ok_or_else(|| ShellError::UnknownParameter {
                        command: stage.command.clone(),
                        param: name.clone(),
                    })?;
            if slots[index].is_some() {
                return Err(ShellError::DuplicateBinding {
                    command: stage.command.clone(),
                    param: name.clone(),
                });
            }
            slots[index] = Some(expr.clone());
            named[index] = true;
        }
    }

    for arg in &stage.args {
        if let Arg::Positional(expr) = arg {
            match slots.iter().position(Option::is_none) {
                Some(index) => slots[index] = Some(expr.clone()),
                None => {
                    // Surplus positional: when a parameter was taken by
                    // name the positional stream was displaced onto it,
                    // otherwise the stage simply has too many arguments.
                    if let Some(index) = named.iter().position(|n| *n) {
                        return Err(ShellError::DuplicateBinding {
                            command: stage.command.clone(),
                            param: schema.params[index].name.clone(),
                        });
                    }
                    return Err(ShellError::UnexpectedArgument {
                        command: stage.command.clone(),
                        arg: expr.to_string(),
                    });
                }
            }
        }
    }

    let has_placeholder = stage.args.iter().any(|arg| {
        matches!(
            arg,
            Arg::Positional(Expr::Piped) | Arg::Named { expr: Expr::Piped, .. }
        )
    });
    if is_piped && !has_placeholder {
        match slots.iter().position(Option::is_none) {
            Some(index) => slots[index] = Some(Expr::Piped),
            None => {
                return Err(ShellError::UnexpectedArgument {
                    command: stage.command.clone(),
                    arg: "piped value".to_string(),
                })
            }
        }
    }

    schema
        .params
        .iter()
        .zip(slots)
        .map(|(param, slot)| match slot {
            Some(expr) => Ok(Bound::Expr(expr)),
            None => match &param.default {
                Some(default) if !param.required => Ok(Bound::Default(default.clone())),
                _ => Err(ShellError::MissingArgument {
                    command: stage.command.clone(),
                    param: param.name.clone(),
                }),
            },
        })
        .collect()
}
