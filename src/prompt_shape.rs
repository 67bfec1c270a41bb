//! Decoding of the loosely-typed `content.prompt` field of a log record.
//!
//! Upstream providers log prompts as a JSON message array, a single message
//! object, or a bare JSON scalar. Everything is resolved into one
//! [`PromptShape`] up front so the playground can apply it in a single pass,
//! and a decode failure never leaves a half-applied conversation behind.

use crate::constants::ROLE_SYSTEM;
use crate::log_record::json_kind;
use crate::types::*;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptShape {
    /// Bare string, number or boolean, already stringified
    Scalar(String),
    /// One message object
    Object(PromptEntry),
    /// Ordered message array
    Sequence(Vec<PromptEntry>),
}

/// A logged message with its content flattened to a string.
///
/// `role` is kept verbatim; `None` means the entry had no role field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEntry {
    pub role: Option<String>,
    pub content: String,
}

impl PromptEntry {
    pub fn is_system(&self) -> bool {
        self.role.as_deref() == Some(ROLE_SYSTEM)
    }
}

/// Decodes a raw prompt string into a [`PromptShape`].
///
/// Errors on malformed JSON, on `null`, on array elements that are not
/// objects and on non-string role fields.
pub fn decode_prompt(raw: &str) -> Result<PromptShape> {
    let value: Value = serde_json::from_str(raw)?;
    classify(value)
}

fn classify(value: Value) -> Result<PromptShape> {
    match value {
        Value::Array(items) => {
            let entries = items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(map) => entry_from_map(map),
                    other => Err(DeckError::MalformedPrompt(format!(
                        "entry {} is a {}, expected an object",
                        idx,
                        json_kind(&other)
                    ))
                    .into()),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(PromptShape::Sequence(entries))
        }
        Value::Object(map) => Ok(PromptShape::Object(entry_from_map(map)?)),
        Value::String(s) => Ok(PromptShape::Scalar(s)),
        Value::Number(n) => Ok(PromptShape::Scalar(n.to_string())),
        Value::Bool(b) => Ok(PromptShape::Scalar(b.to_string())),
        Value::Null => Err(DeckError::MalformedPrompt("prompt decodes to null".to_string()).into()),
    }
}

fn entry_from_map(mut map: Map<String, Value>) -> Result<PromptEntry> {
    let role = match map.remove("role") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            return Err(DeckError::MalformedPrompt(format!(
                "role is a {}, expected a string",
                json_kind(&other)
            ))
            .into())
        }
    };

    let content = match map.remove("content") {
        None => String::new(),
        Some(Value::String(s)) => s,
        // Structured content (parts arrays, numbers, null) is kept as its JSON text.
        Some(other) => serde_json::to_string(&other)?,
    };

    Ok(PromptEntry { role, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: &str, content: &str) -> PromptEntry {
        PromptEntry {
            role: Some(role.to_string()),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_sequence_keeps_order_and_roles() {
        let shape =
            decode_prompt(r#"[{"role":"system","content":"S"},{"role":"user","content":"U"}]"#)
                .unwrap();
        assert_eq!(
            shape,
            PromptShape::Sequence(vec![entry("system", "S"), entry("user", "U")])
        );
    }

    #[test]
    fn test_structured_content_is_stringified() {
        let shape = decode_prompt(
            r#"{"role":"user","content":[{"type":"text","text":"hi"}]}"#,
        )
        .unwrap();
        assert_eq!(
            shape,
            PromptShape::Object(entry("user", r#"[{"text":"hi","type":"text"}]"#))
        );

        let shape = decode_prompt(r#"{"role":"user","content":123}"#).unwrap();
        assert_eq!(shape, PromptShape::Object(entry("user", "123")));
    }

    #[test]
    fn test_missing_role_and_content() {
        let shape = decode_prompt(r#"{"text":"ignored"}"#).unwrap();
        assert_eq!(
            shape,
            PromptShape::Object(PromptEntry {
                role: None,
                content: String::new(),
            })
        );
    }

    #[test]
    fn test_scalars_are_stringified() {
        assert_eq!(
            decode_prompt(r#""just text""#).unwrap(),
            PromptShape::Scalar("just text".to_string())
        );
        assert_eq!(decode_prompt("42").unwrap(), PromptShape::Scalar("42".to_string()));
        assert_eq!(decode_prompt("1.5").unwrap(), PromptShape::Scalar("1.5".to_string()));
        assert_eq!(decode_prompt("false").unwrap(), PromptShape::Scalar("false".to_string()));
    }

    #[test]
    fn test_rejections() {
        for raw in [
            "not json",
            "{\"role\":",
            "null",
            "[1, 2]",
            r#"[{"role":"user","content":"a"}, null]"#,
            r#"{"role":7,"content":"x"}"#,
        ] {
            assert!(decode_prompt(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_system_detection() {
        assert!(entry("system", "x").is_system());
        assert!(!entry("System", "x").is_system());
        assert!(!PromptEntry { role: None, content: String::new() }.is_system());
    }
}
