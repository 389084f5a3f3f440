//! Action templates with `{field}` placeholders.
//!
//! A template is parsed once into literal and field segments. Rendering is a
//! single pass: substituted values are copied as-is and never rescanned, and
//! placeholders without a value are kept literally (`{name}`).
//!
//! ```
//! use module_panel::template::ActionTemplate;
//! use serde_json::json;
//!
//! let row = json!({"id": 42}).as_object().unwrap().clone();
//! let template = ActionTemplate::parse("timer delete {id} {missing}");
//! assert_eq!(template.render(&row), "timer delete 42 {missing}");
//! ```

use serde_json::{Map, Value};

use crate::command::AdminCommand;
use crate::error::{PanelError, Result};
use crate::view::value_text;

/// Something placeholders can be resolved against.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<String>;
}

impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<String> {
        self.get(name).map(value_text)
    }
}

/// Row values layered over a row action's declared attributes.
///
/// Row values win when both define the same name.
pub struct RowContext<'a> {
    pub row: &'a Map<String, Value>,
    pub attributes: &'a Map<String, Value>,
}

impl FieldSource for RowContext<'_> {
    fn field(&self, name: &str) -> Option<String> {
        self.row.field(name).or_else(|| self.attributes.field(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed action template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    source: String,
    segments: Vec<Segment>,
}

fn is_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| !c.is_whitespace() && c != '{' && c != '}')
}

/// Split off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text, ""),
    }
}

impl ActionTemplate {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) if is_field_name(&after[..close]) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(after[..close].to_string()));
                    rest = &after[close + 1..];
                }
                _ => {
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    pub fn render(&self, source: &dyn FieldSource) -> String {
        let mut out = String::with_capacity(self.source.len());
        render_into(&mut out, &self.segments, source);
        out
    }

    /// Bind the template into an admin command.
    ///
    /// The module and trigger words must be literal template text; values
    /// are only substituted into the parameters. One separator after the
    /// trigger is dropped, the rest of the parameters is kept as written.
    pub fn bind(&self, source: &dyn FieldSource) -> Result<AdminCommand> {
        let (lead, tail) = match self.segments.split_first() {
            Some((Segment::Literal(text), tail)) => (text.as_str(), tail),
            _ => ("", self.segments.as_slice()),
        };

        let (module, after_module) = split_word(lead.trim_start());
        if module.is_empty() || (after_module.is_empty() && !tail.is_empty()) {
            return Err(PanelError::template(
                &self.source,
                "module name must be literal text",
            ));
        }

        let after_module = after_module.trim_start();
        if after_module.is_empty() {
            let reason = if tail.is_empty() {
                "expected `<module> <trigger>`"
            } else {
                "trigger must be literal text"
            };
            return Err(PanelError::template(&self.source, reason));
        }

        let (trigger, params_lead) = split_word(after_module);
        if params_lead.is_empty() && !tail.is_empty() {
            return Err(PanelError::template(
                &self.source,
                "trigger must be literal text",
            ));
        }

        let mut params = params_lead.chars().skip(1).collect::<String>();
        render_into(&mut params, tail, source);
        Ok(AdminCommand::new(module, trigger, params))
    }
}

fn render_into(out: &mut String, segments: &[Segment], source: &dyn FieldSource) {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field(name) => match source.field(name) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_substitutes_field() {
        let t = ActionTemplate::parse("timer delete {id}");
        assert_eq!(t.render(&row(json!({"id": 42}))), "timer delete 42");
    }

    #[test]
    fn test_unmatched_placeholder_stays_literal() {
        let t = ActionTemplate::parse("timer delete {id} {name}");
        assert_eq!(t.render(&row(json!({"id": 1}))), "timer delete 1 {name}");
    }

    #[test]
    fn test_repeated_placeholder() {
        let t = ActionTemplate::parse("{a}-{a}");
        assert_eq!(t.render(&row(json!({"a": "x"}))), "x-x");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let t = ActionTemplate::parse("alias set {name}");
        let r = row(json!({"name": "{secret}", "secret": "leak"}));
        assert_eq!(t.render(&r), "alias set {secret}");
    }

    #[test]
    fn test_invalid_braces_stay_literal() {
        let values = row(json!({"": 1, " y": 2, "open": 3}));
        let t = ActionTemplate::parse("x {} { y} {open");
        assert_eq!(t.render(&values), "x {} { y} {open");

        let t = ActionTemplate::parse("{{id}}");
        assert_eq!(t.render(&row(json!({"id": 7}))), "{7}");
    }

    #[test]
    fn test_row_context_prefers_row_values() {
        let r = row(json!({"id": 3}));
        let attrs = row(json!({"id": 99, "scope": "global"}));
        let ctx = RowContext {
            row: &r,
            attributes: &attrs,
        };
        let t = ActionTemplate::parse("perm set {id} {scope}");
        assert_eq!(t.render(&ctx), "perm set 3 global");
    }

    #[test]
    fn test_bind_substitutes_params_only() {
        let t = ActionTemplate::parse("timer delete {id}");
        let cmd = t.bind(&row(json!({"id": 42}))).unwrap();
        assert_eq!(cmd.module, "timer");
        assert_eq!(cmd.trigger, "delete");
        assert_eq!(cmd.params, "42");
        assert_eq!(cmd.to_string(), "timer delete 42");
    }

    #[test]
    fn test_bind_value_cannot_change_trigger() {
        let t = ActionTemplate::parse("alias remove {name}");
        let cmd = t.bind(&row(json!({"name": "x; account delete"}))).unwrap();
        assert_eq!(cmd.module, "alias");
        assert_eq!(cmd.trigger, "remove");
        assert_eq!(cmd.params, "x; account delete");
    }

    #[test]
    fn test_bind_keeps_padded_values() {
        let t = ActionTemplate::parse("alias set {n}");
        let cmd = t.bind(&row(json!({"n": "  hi  "}))).unwrap();
        assert_eq!(cmd.params, "  hi  ");
        assert_eq!(cmd.to_string(), "alias set   hi  ");
        assert_eq!(cmd.to_string(), t.render(&row(json!({"n": "  hi  "}))));
    }

    #[test]
    fn test_bind_without_params() {
        let cmd = ActionTemplate::parse("  raffle draw ").bind(&row(json!({}))).unwrap();
        assert_eq!(cmd.to_string(), "raffle draw");
    }

    #[test]
    fn test_bind_rejects_placeholder_in_head() {
        for source in ["{module} delete 1", "timer {trigger} 1", "timer{x} delete", "timer del{x}", "timer"] {
            let err = ActionTemplate::parse(source).bind(&row(json!({}))).unwrap_err();
            assert!(matches!(err, PanelError::Template { .. }), "{source}");
        }
    }
}
