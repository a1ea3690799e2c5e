//! Help text rendered from command schemas.

use grush_types::CommandSchema;

/// One line per command: signature plus short description.
pub fn overview<'a>(schemas: impl Iterator<Item = &'a CommandSchema>) -> String {
    let entries: Vec<(String, &str)> = schemas
        .map(|s| (s.signature(), s.description.as_str()))
        .collect();
    let width = entries.iter().map(|(sig, _)| sig.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (sig, description) in entries {
        if !out.is_empty() {
            out.push('\n');
        }
        if description.is_empty() {
            out.push_str(&sig);
        } else {
            out.push_str(&format!("{sig:<width$}  {description}"));
        }
    }
    out
}

/// Full detail for one command: signature, description, per-parameter lines.
pub fn detail(schema: &CommandSchema) -> String {
    let mut out = schema.signature();
    if !schema.description.is_empty() {
        out.push_str(&format!("\n  {}", schema.description));
    }
    for param in &schema.params {
        let requirement = if param.required {
            "required".to_string()
        } else {
            match &param.default {
                Some(default) => format!("default: {default}"),
                None => "optional".to_string(),
            }
        };
        out.push_str(&format!(
            "\n  {}: {} ({requirement})",
            param.name, param.param_type
        ));
        if !param.description.is_empty() {
            out.push_str(&format!(" - {}", param.description));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grush_types::{ParamSchema, ParamType, Value};

    fn sample() -> CommandSchema {
        CommandSchema::new("login", "Log in as a user")
            .param(ParamSchema::optional(
                "name",
                ParamType::Str,
                Value::String(String::new()),
                "user name",
            ))
    }

    #[test]
    fn overview_aligns_signatures() {
        let schemas = vec![
            CommandSchema::new("vars", "List variables"),
            sample(),
        ];
        let text = overview(schemas.iter());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("vars()"));
        assert!(lines[0].contains("List variables"));
        assert!(lines[1].starts_with("login([name: string])"));
    }

    #[test]
    fn detail_lists_parameters() {
        let text = detail(&sample());
        assert!(text.contains("Log in as a user"));
        assert!(text.contains("name: string (default: )"));
        assert!(text.contains("- user name"));
    }
}
