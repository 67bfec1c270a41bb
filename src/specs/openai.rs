use crate::types::{Message, Role};
use serde::{Deserialize, Serialize};

/// --- OPENAI-COMPATIBLE CHAT COMPLETION BODY ---
///
/// What a playground conversation replays as. Roles are sent verbatim, so
/// a replayed log keeps whatever role taxonomy its provider used.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayRequest {
    pub model: String,
    pub messages: Vec<ReplayMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ReplayMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.clone(),
            content: msg.content.clone(),
        }
    }
}

impl ReplayRequest {
    pub fn new(
        model: &str,
        system_prompt: &str,
        turns: &[Message],
        temperature: f64,
        stream: bool,
    ) -> Self {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        if !system_prompt.trim().is_empty() {
            messages.push(ReplayMessage {
                role: Role::System,
                content: system_prompt.to_string(),
            });
        }
        messages.extend(turns.iter().map(ReplayMessage::from));

        Self {
            model: model.to_string(),
            messages,
            temperature: Some(temperature),
            stream: Some(stream),
        }
    }
}
