//! AST for grush command lines.
//!
//! The grammar is deliberately flat: a line is a pipeline of stages, a
//! stage is a command name plus arguments, and each argument value is one
//! of a handful of expression forms. There are no nested expressions.

use std::fmt;

use grush_types::Value;

/// An argument value before evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A typed literal from the lexer: quoted string, int, float, bool.
    Literal(Value),
    /// An unquoted word, coerced against the parameter's declared type
    /// at binding time.
    Bare(String),
    /// A `$name` variable reference.
    Var(String),
    /// The `_` placeholder for the previous stage's result.
    Piped,
}

/// One argument of a stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Bound by position against the command's parameter order.
    Positional(Expr),
    /// Bound by parameter name: `name=value`.
    Named { name: String, expr: Expr },
}

/// One command invocation within a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub command: String,
    pub args: Vec<Arg>,
}

/// A full line: one or more stages joined by `|`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

// Display re-serializes to parseable source. String literals are always
// re-quoted, escaping only the quote character to mirror the lexer's
// unescape, so quoted content survives a parse/print cycle unchanged.

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Value::String(s)) => {
                write!(f, "\"{}\"", s.replace('"', "\\\""))
            }
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Bare(word) => write!(f, "{word}"),
            Expr::Var(name) => write!(f, "${name}"),
            Expr::Piped => write!(f, "_"),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Positional(expr) => write!(f, "{expr}"),
            Arg::Named { name, expr } => write!(f, "{name}={expr}"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for stage in &self.stages {
            if !first {
                write!(f, " | ")?;
            }
            first = false;
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
