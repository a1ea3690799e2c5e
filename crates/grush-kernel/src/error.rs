//! The shell error taxonomy.
//!
//! Every failure a line can produce is one of these variants. An error
//! aborts only the current line: the session is never committed for a
//! failed line, and the REPL keeps reading.

use grush_types::ParamType;
use thiserror::Error;

/// Errors produced while parsing, binding, or executing a command line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed input line (unterminated quote, empty command, stray `=`).
    #[error("parse error: {0}")]
    Parse(String),

    /// No registered command with this name.
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    /// A named argument that matches no declared parameter.
    #[error("unknown parameter '{param}' for '{command}'")]
    UnknownParameter { command: String, param: String },

    /// A required parameter left unbound after named/positional binding
    /// and default application.
    #[error("missing required argument '{param}' for '{command}'")]
    MissingArgument { command: String, param: String },

    /// The same parameter supplied more than once (repeated key, or a
    /// surplus positional re-targeting a name-bound parameter).
    #[error("parameter '{param}' of '{command}' bound more than once")]
    DuplicateBinding { command: String, param: String },

    /// A positional argument with no parameter left to bind.
    #[error("unexpected extra argument '{arg}' for '{command}'")]
    UnexpectedArgument { command: String, arg: String },

    /// `$name` where `name` was never set.
    #[error("undefined variable '${0}'")]
    UndefinedVariable(String),

    /// `_` in the first pipeline stage, where nothing has been piped.
    #[error("no piped value: '_' is only meaningful after a '|'")]
    NoPipedValue,

    /// An argument that cannot be converted to the parameter's declared type.
    #[error("invalid value for '{param}': cannot convert {found} to {expected}")]
    TypeCoercion {
        param: String,
        expected: ParamType,
        found: String,
    },

    /// A handler failure, wrapping the underlying cause (including store
    /// errors). Never retried.
    #[error("command failed: {0}")]
    Command(#[source] anyhow::Error),
}
