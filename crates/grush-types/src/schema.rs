//! Command schemas: the static descriptors the registry hands the executor.

use std::fmt;

use crate::value::Value;

/// Declared type of a command parameter.
///
/// A closed set: argument coercion is a fixed table of typed parsers, not
/// duck typing. `Any` accepts whatever the evaluator produced unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
    Any,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Str => write!(f, "string"),
            ParamType::Int => write!(f, "int"),
            ParamType::Float => write!(f, "float"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Any => write!(f, "any"),
        }
    }
}

/// Schema for a single command parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name, usable as `name=value`.
    pub name: String,
    /// Declared type, drives coercion of bare tokens.
    pub param_type: ParamType,
    /// Whether the parameter must be bound.
    pub required: bool,
    /// Default value applied when an optional parameter is unbound.
    pub default: Option<Value>,
    /// Description for help text.
    pub description: String,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            default: None,
            description: description.into(),
        }
    }

    /// Create an optional parameter with a default value.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        default: Value,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            default: Some(default),
            description: description.into(),
        }
    }
}

/// Schema describing a command's interface.
///
/// One of these per registered command; the executor binds arguments
/// against it and `help` renders it.
#[derive(Debug, Clone)]
pub struct CommandSchema {
    /// Command name, unique within the registry.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions in declared (positional) order.
    pub params: Vec<ParamSchema>,
}

impl CommandSchema {
    /// Create a new command schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a parameter's declared index by name.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// One-line signature, e.g. `create_post(author: string, title: string)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.required {
                    format!("{}: {}", p.name, p.param_type)
                } else {
                    format!("[{}: {}]", p.name, p.param_type)
                }
            })
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_marks_optional_params() {
        let schema = CommandSchema::new("login", "Log in")
            .param(ParamSchema::optional(
                "id",
                ParamType::Str,
                Value::String(String::new()),
                "user id",
            ))
            .param(ParamSchema::required("name", ParamType::Str, "user name"));
        assert_eq!(schema.signature(), "login([id: string], name: string)");
    }

    #[test]
    fn param_index_finds_declared_position() {
        let schema = CommandSchema::new("like", "Like a post")
            .param(ParamSchema::required("userid", ParamType::Str, ""))
            .param(ParamSchema::required("postid", ParamType::Str, ""));
        assert_eq!(schema.param_index("postid"), Some(1));
        assert_eq!(schema.param_index("missing"), None);
    }
}
