//! Parser for grush command lines.
//!
//! Takes the token stream from [`crate::lexer`] and produces a
//! [`Pipeline`]. The grammar is flat enough that a hand-written scan over
//! the tokens is clearer than a combinator stack:
//!
//! ```text
//! line     := stage ('|' stage)*
//! stage    := WORD arg*
//! arg      := WORD '=' expr | expr
//! expr     := STR | INT | FLOAT | BOOL | VAR | '_' | WORD
//! ```

use crate::ast::{Arg, Expr, Pipeline, Stage};
use crate::error::ShellError;
use crate::lexer::{tokenize, Token};

/// Parse one input line into a pipeline.
pub fn parse_line(line: &str) -> Result<Pipeline, ShellError> {
    let tokens = tokenize(line)?;
    parse_tokens(&tokens)
}

fn parse_tokens(tokens: &[Token]) -> Result<Pipeline, ShellError> {
    if tokens.is_empty() {
        return Err(ShellError::Parse("empty input".into()));
    }

    let mut stages = Vec::new();
    for group in tokens.split(|t| *t == Token::Pipe) {
        stages.push(parse_stage(group)?);
    }
    Ok(Pipeline { stages })
}

fn parse_stage(tokens: &[Token]) -> Result<Stage, ShellError> {
    let mut iter = tokens.iter().peekable();

    let command = match iter.next() {
        Some(Token::Word(name)) => name.clone(),
        Some(other) => {
            return Err(ShellError::Parse(format!(
                "expected command name, found {}",
                describe(other)
            )))
        }
        None => return Err(ShellError::Parse("empty command in pipeline".into())),
    };

    let mut args = Vec::new();
    while let Some(token) = iter.next() {
        // `word = value` binds by name; any other shape is positional.
        if let Token::Word(name) = token {
            if iter.peek() == Some(&&Token::Eq) {
                iter.next();
                let expr = match iter.next() {
                    Some(value) => expr_from(value)?,
                    None => {
                        return Err(ShellError::Parse(format!(
                            "missing value after '{name}='"
                        )))
                    }
                };
                args.push(Arg::Named {
                    name: name.clone(),
                    expr,
                });
                continue;
            }
        }
        args.push(Arg::Positional(expr_from(token)?));
    }

    Ok(Stage { command, args })
}

fn expr_from(token: &Token) -> Result<Expr, ShellError> {
    Ok(match token {
        Token::Str(s) => Expr::Literal(grush_types::Value::String(s.clone())),
        Token::Int(i) => Expr::Literal(grush_types::Value::Int(*i)),
        Token::Float(x) => Expr::Literal(grush_types::Value::Float(*x)),
        Token::Bool(b) => Expr::Literal(grush_types::Value::Bool(*b)),
        Token::Var(name) => Expr::Var(name.clone()),
        Token::Word(w) if w == "_" => Expr::Piped,
        Token::Word(w) => Expr::Bare(w.clone()),
        Token::Eq => return Err(ShellError::Parse("unexpected '='".into())),
        Token::Pipe => unreachable!("stages are split on '|'"),
    })
}

fn describe(token: &Token) -> String {
    match token {
        Token::Pipe => "'|'".into(),
        Token::Eq => "'='".into(),
        Token::Str(s) => format!("string \"{s}\""),
        Token::Var(name) => format!("'${name}'"),
        Token::Int(i) => format!("'{i}'"),
        Token::Float(x) => format!("'{x}'"),
        Token::Bool(b) => format!("'{b}'"),
        Token::Word(w) => format!("'{w}'"),
    }
}
