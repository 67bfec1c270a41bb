use crate::types::*;
use serde::{Deserialize, Serialize};

/// One proxied request/response cycle as served by the logs API.
///
/// Only `provider`, `model` and `content` feed the playground; the rest is
/// carried so a full row deserialises without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalLogRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub latency: Option<f64>,
    #[serde(default)]
    pub is_streaming: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub content: Option<LogContent>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogContent {
    /// JSON-encoded prompt of unknown shape
    #[serde(default)]
    pub prompt: Option<String>,
    /// Literal response text, never parsed
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub file_path: String,
    pub file_type: String,
}

impl HistoricalLogRecord {
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(DeckError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            ))
            .into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `"{provider}/{model}"` when both halves are present and non-empty.
    pub fn composite_model(&self) -> Option<String> {
        let provider = non_empty(self.provider.as_deref())?;
        let model = non_empty(self.model.as_deref())?;
        Some(format!("{}/{}", provider, model))
    }

    /// Raw prompt text; `None` only when the field is null or missing.
    pub fn prompt(&self) -> Option<&str> {
        self.content.as_ref()?.prompt.as_deref()
    }

    /// Literal response text; `None` only when the field is null or missing.
    pub fn response(&self) -> Option<&str> {
        self.content.as_ref()?.response.as_deref()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_dashboard_row_deserialises() {
        let raw = r#"{
            "id": 17,
            "request_id": "req-abc",
            "timestamp": "2025-01-04T10:00:00",
            "date": "2025-01-04",
            "provider": "openai",
            "endpoint": "/v1/chat/completions",
            "model": "gpt-4",
            "prompt_tokens": 12,
            "completion_tokens": 30,
            "total_tokens": 42,
            "status_code": 200,
            "latency": 1.25,
            "is_streaming": true,
            "ip_address": null,
            "metadata": {"user": "ops"},
            "content": {"prompt": "[]", "response": "ok", "error": null},
            "media": [{"file_path": "media/a.png", "file_type": "image/png"}]
        }"#;
        let record = HistoricalLogRecord::from_json(raw).unwrap();
        assert_eq!(record.id, Some(17));
        assert_eq!(record.total_tokens, 42);
        assert_eq!(record.composite_model().as_deref(), Some("openai/gpt-4"));
        assert_eq!(record.prompt(), Some("[]"));
        assert_eq!(record.response(), Some("ok"));
        assert_eq!(record.media.len(), 1);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let record = HistoricalLogRecord::from_json("{}").unwrap();
        assert_eq!(record.composite_model(), None);
        assert_eq!(record.prompt(), None);
        assert_eq!(record.response(), None);
    }

    #[test]
    fn test_composite_model_requires_both_halves() {
        let record = HistoricalLogRecord {
            provider: Some("anthropic".to_string()),
            model: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(record.composite_model(), None);
    }

    #[test]
    fn test_empty_content_fields_are_present() {
        let record =
            HistoricalLogRecord::from_json(r#"{"content":{"prompt":"","response":""}}"#).unwrap();
        assert_eq!(record.prompt(), Some(""));
        assert_eq!(record.response(), Some(""));

        let record =
            HistoricalLogRecord::from_json(r#"{"content":{"prompt":null}}"#).unwrap();
        assert_eq!(record.prompt(), None);
        assert_eq!(record.response(), None);
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        let err = match HistoricalLogRecord::from_json("[1, 2]") {
            Ok(_) => panic!("array accepted as a record"),
            Err(e) => e,
        };
        assert!(matches!(err.inner, DeckError::InvalidRecord(_)));
    }
}
