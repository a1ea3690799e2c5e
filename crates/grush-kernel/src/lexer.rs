//! Lexer for grush command lines.
//!
//! Converts one input line into a stream of tokens using the logos lexer
//! generator. The token set is small: the pipe delimiter, `=` for named
//! arguments, quoted strings, `$name` variable references, numeric and
//! boolean literals, and bare words.
//!
//! Quoting: single and double quotes both delimit atomic string tokens;
//! whitespace inside quotes is preserved verbatim, and escaping is limited
//! to the quote character itself (`\"` inside double quotes, `\'` inside
//! single quotes).

use std::fmt;

use logos::Logos;

use crate::error::ShellError;

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    InvalidNumber,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter => write!(f, "unexpected character"),
            LexError::UnterminatedString => write!(f, "unterminated string"),
            LexError::InvalidNumber => write!(f, "invalid number"),
        }
    }
}

/// Tokens produced by the grush lexer.
///
/// Tokens that carry semantic values (strings, numbers, words) include the
/// parsed value directly, so the parser never re-inspects raw source text.
/// Explicit priorities disambiguate overlaps: a bare `true` is a boolean,
/// `3.14` is a float, and anything longer wins as a word.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// Pipeline delimiter.
    #[token("|")]
    Pipe,

    /// Named-argument separator: `key=value`.
    #[token("=")]
    Eq,

    /// Quoted string; value is the content with quotes removed and the
    /// quote-character escape processed.
    #[regex(r#""([^"\\]|\\.)*""#, lex_double_quoted)]
    #[regex(r"'([^'\\]|\\.)*'", lex_single_quoted)]
    Str(String),

    /// Variable reference: `$name`.
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", lex_var)]
    Var(String),

    /// Integer literal.
    #[regex(r"-?[0-9]+", lex_int, priority = 4)]
    Int(i64),

    /// Float literal.
    #[regex(r"-?[0-9]+\.[0-9]+", lex_float, priority = 5)]
    Float(f64),

    /// Boolean literal.
    #[token("true", |_| true, priority = 5)]
    #[token("false", |_| false, priority = 5)]
    Bool(bool),

    /// Bare word: command names, ids, unquoted argument text, and the
    /// piped-value placeholder `_`.
    #[regex(r#"[^\s|=$'"][^\s|=]*"#, lex_word, priority = 1)]
    Word(String),
}

fn lex_double_quoted(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1], '"')
}

fn lex_single_quoted(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1], '\'')
}

fn lex_var(lex: &mut logos::Lexer<Token>) -> String {
    lex.slice()[1..].to_string()
}

fn lex_int(lex: &mut logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::InvalidNumber)
}

fn lex_float(lex: &mut logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse().map_err(|_| LexError::InvalidNumber)
}

fn lex_word(lex: &mut logos::Lexer<Token>) -> String {
    lex.slice().to_string()
}

/// Process the quote-character escape; any other backslash stays literal.
fn unescape(inner: &str, quote: char) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(q) if q == quote => out.push(q),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Tokenize one input line.
///
/// A lone quote character means the string it opened never closed, which
/// is reported as an unterminated string rather than a stray character.
pub fn tokenize(line: &str) -> Result<Vec<Token>, ShellError> {
    let mut tokens = Vec::new();
    let mut lex = Token::lexer(line);
    while let Some(item) = lex.next() {
        match item {
            Ok(token) => tokens.push(token),
            Err(err) => {
                let slice = lex.slice();
                let err = if slice.starts_with('"') || slice.starts_with('\'') {
                    LexError::UnterminatedString
                } else {
                    err
                };
                return Err(ShellError::Parse(format!("{err} at '{slice}'")));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_whitespace_is_preserved() {
        let tokens = tokenize(r#"create_post "a b" 'c  d'"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("create_post".into()),
                Token::Str("a b".into()),
                Token::Str("c  d".into()),
            ]
        );
    }

    #[test]
    fn escaped_quote_inside_string() {
        let tokens = tokenize(r#"echo "say \"hi\"""#).unwrap();
        assert_eq!(tokens[1], Token::Str(r#"say "hi""#.into()));
    }

    #[test]
    fn backslash_before_other_chars_is_literal() {
        let tokens = tokenize(r#"echo "a\nb""#).unwrap();
        assert_eq!(tokens[1], Token::Str(r"a\nb".into()));
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let err = tokenize(r#"echo "open"#).unwrap_err();
        assert!(err.to_string().contains("unterminated string"), "{err}");
    }

    #[test]
    fn bool_beats_word_but_longer_word_wins() {
        assert_eq!(tokenize("true").unwrap(), vec![Token::Bool(true)]);
        assert_eq!(
            tokenize("truthy").unwrap(),
            vec![Token::Word("truthy".into())]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            tokenize("idx _ -3").unwrap(),
            vec![
                Token::Word("idx".into()),
                Token::Word("_".into()),
                Token::Int(-3),
            ]
        );
        assert_eq!(tokenize("3.14").unwrap(), vec![Token::Float(3.14)]);
    }

    #[test]
    fn named_argument_splits_on_eq() {
        assert_eq!(
            tokenize("login name=Bob").unwrap(),
            vec![
                Token::Word("login".into()),
                Token::Word("name".into()),
                Token::Eq,
                Token::Word("Bob".into()),
            ]
        );
    }
}
