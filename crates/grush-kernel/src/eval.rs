//! Argument evaluation.
//!
//! Resolves one bound expression to a runtime [`Value`], coerced against
//! the declared parameter type. Resolution is side-effect free: variable
//! lookups see the pending `set` bindings of the current line first, then
//! the session's value store, and an undefined variable fails the line
//! before any handler or store call happens.

use grush_types::{ParamSchema, ParamType, Value};

use crate::ast::Expr;
use crate::error::ShellError;
use crate::session::Session;

/// Resolve one expression bound to `param`.
pub fn resolve(
    expr: &Expr,
    param: &ParamSchema,
    session: &Session,
    pending: &[(String, Value)],
    piped: Option<&Value>,
) -> Result<Value, ShellError> {
    match expr {
        Expr::Piped => {
            let value = piped.cloned().ok_or(ShellError::NoPipedValue)?;
            coerce(value, param)
        }
        Expr::Var(name) => {
            let value = pending
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v)
                .or_else(|| session.get_var(name))
                .cloned()
                .ok_or_else(|| ShellError::UndefinedVariable(name.clone()))?;
            coerce(value, param)
        }
        Expr::Literal(value) => coerce(value.clone(), param),
        Expr::Bare(word) => coerce_bare(word, param),
    }
}

/// Lenient coercion for already-typed values. Quoted strings are never
/// re-parsed as numbers; the only permitted conversions are the Int to
/// Float widening and stringification of scalars.
fn coerce(value: Value, param: &ParamSchema) -> Result<Value, ShellError> {
    match (param.param_type, value) {
        (ParamType::Any, value) => Ok(value),
        (ParamType::Str, Value::String(s)) => Ok(Value::String(s)),
        (ParamType::Str, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (ParamType::Str, Value::Int(i)) => Ok(Value::String(i.to_string())),
        (ParamType::Str, Value::Float(x)) => Ok(Value::String(Value::Float(x).to_string())),
        (ParamType::Int, Value::Int(i)) => Ok(Value::Int(i)),
        (ParamType::Float, Value::Float(x)) => Ok(Value::Float(x)),
        (ParamType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (ParamType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
        (_, value) => Err(ShellError::TypeCoercion {
            param: param.name.clone(),
            expected: param.param_type,
            found: value.type_name().to_string(),
        }),
    }
}

/// Coerce an unquoted word against the declared type. `Any` infers the
/// narrowest literal reading, falling back to a plain string.
fn coerce_bare(word: &str, param: &ParamSchema) -> Result<Value, ShellError> {
    let fail = || ShellError::TypeCoercion {
        param: param.name.clone(),
        expected: param.param_type,
        found: format!("'{word}'"),
    };
    match param.param_type {
        ParamType::Str => Ok(Value::String(word.to_string())),
        ParamType::Int => word.parse().map(Value::Int).map_err(|_| fail()),
        ParamType::Float => word.parse().map(Value::Float).map_err(|_| fail()),
        ParamType::Bool => match word {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        ParamType::Any => Ok(infer(word)),
    }
}

fn infer(word: &str) -> Value {
    if let Ok(i) = word.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(x) = word.parse::<f64>() {
        return Value::Float(x);
    }
    match word {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn param(param_type: ParamType) -> ParamSchema {
        ParamSchema::required("x", param_type, "")
    }

    fn empty_session() -> Session {
        Session::new()
    }

    #[test]
    fn piped_without_input_fails() {
        let session = empty_session();
        let err = resolve(&Expr::Piped, &param(ParamType::Any), &session, &[], None)
            .unwrap_err();
        assert!(matches!(err, ShellError::NoPipedValue));
    }

    #[test]
    fn var_prefers_pending_over_session() {
        let mut session = empty_session();
        session.set_var("a", Value::Int(1));
        let pending = vec![("a".to_string(), Value::Int(2))];
        let value = resolve(
            &Expr::Var("a".into()),
            &param(ParamType::Any),
            &session,
            &pending,
            None,
        )
        .unwrap();
        assert_eq!(value, Value::Int(2));
    }

    #[test]
    fn undefined_var_fails() {
        let session = empty_session();
        let err = resolve(
            &Expr::Var("missing".into()),
            &param(ParamType::Any),
            &session,
            &[],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::UndefinedVariable(name) if name == "missing"));
    }

    #[rstest]
    #[case("7", ParamType::Int, Value::Int(7))]
    #[case("7", ParamType::Float, Value::Float(7.0))]
    #[case("7", ParamType::Str, Value::String("7".into()))]
    #[case("true", ParamType::Bool, Value::Bool(true))]
    #[case("7", ParamType::Any, Value::Int(7))]
    #[case("1.5", ParamType::Any, Value::Float(1.5))]
    #[case("false", ParamType::Any, Value::Bool(false))]
    #[case("bob", ParamType::Any, Value::String("bob".into()))]
    fn bare_word_coercion(
        #[case] word: &str,
        #[case] param_type: ParamType,
        #[case] expected: Value,
    ) {
        let session = empty_session();
        let value = resolve(
            &Expr::Bare(word.into()),
            &param(param_type),
            &session,
            &[],
            None,
        )
        .unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn bare_word_failing_int_coercion() {
        let session = empty_session();
        let err = resolve(
            &Expr::Bare("bob".into()),
            &param(ParamType::Int),
            &session,
            &[],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::TypeCoercion { .. }), "{err}");
    }

    #[test]
    fn quoted_string_is_never_reparsed_as_number() {
        let session = empty_session();
        let err = resolve(
            &Expr::Literal(Value::String("7".into())),
            &param(ParamType::Int),
            &session,
            &[],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::TypeCoercion { .. }), "{err}");
    }

    #[test]
    fn int_widens_to_float() {
        let session = empty_session();
        let value = resolve(
            &Expr::Literal(Value::Int(3)),
            &param(ParamType::Float),
            &session,
            &[],
            None,
        )
        .unwrap();
        assert_eq!(value, Value::Float(3.0));
    }

    #[test]
    fn scalar_stringifies_for_str_param() {
        let session = empty_session();
        let value = resolve(
            &Expr::Literal(Value::Int(42)),
            &param(ParamType::Str),
            &session,
            &[],
            None,
        )
        .unwrap();
        assert_eq!(value, Value::String("42".into()));
    }
}
