use crate::constants::{DEFAULT_STREAMING, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE};
use crate::log_record::HistoricalLogRecord;
use crate::logging::preview;
use crate::prompt_shape::{decode_prompt, PromptEntry, PromptShape};
use crate::router::{Navigator, NullNavigator, Route};
use crate::specs::openai::ReplayRequest;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Editable state of a playground session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// `provider/model`; empty means unset
    pub model: String,
    pub system_prompt: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub streaming_enabled: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            model: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            messages: Vec::new(),
            temperature: DEFAULT_TEMPERATURE,
            streaming_enabled: DEFAULT_STREAMING,
        }
    }
}

impl ConversationState {
    pub fn replay_request(&self) -> ReplayRequest {
        ReplayRequest::new(
            &self.model,
            &self.system_prompt,
            &self.messages,
            self.temperature,
            self.streaming_enabled,
        )
    }
}

/// Owns the playground conversation and rebuilds it from logged requests.
///
/// Single owner, no interior mutability: every mutator runs to completion
/// before the next one can observe the state.
pub struct ConversationStore {
    state: ConversationState,
    navigator: Arc<dyn Navigator>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(Arc::new(NullNavigator))
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ConversationStore {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: ConversationState::default(),
            navigator,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Direct access for editor bindings.
    pub fn state_mut(&mut self) -> &mut ConversationState {
        &mut self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.state.model = model.into();
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.state.system_prompt = prompt.into();
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.state.temperature = temperature;
    }

    pub fn set_streaming_enabled(&mut self, enabled: bool) {
        self.state.streaming_enabled = enabled;
    }

    pub fn append_message(&mut self, role: TurnRole, content: impl Into<String>) {
        self.state.messages.push(Message::new(role, content));
    }

    /// Out-of-range indices are ignored.
    pub fn update_message(&mut self, index: usize, content: impl Into<String>) {
        if let Some(msg) = self.state.messages.get_mut(index) {
            msg.content = content.into();
        }
    }

    /// Out-of-range indices are ignored.
    pub fn remove_message(&mut self, index: usize) {
        if index < self.state.messages.len() {
            self.state.messages.remove(index);
        }
    }

    /// Drops every turn. Model, system prompt and sampling settings stay.
    pub fn clear(&mut self) {
        self.state.messages.clear();
    }

    /// Replaces the conversation with the one reconstructed from `record`
    /// and asks the app to show the playground.
    ///
    /// Never fails: a prompt that cannot be decoded is replayed as a single
    /// user message holding the raw text.
    pub fn load_from_log(&mut self, record: &HistoricalLogRecord) {
        self.clear();

        if let Some(model) = record.composite_model() {
            self.state.model = model;
        }

        if let Some(raw) = record.prompt() {
            match decode_prompt(raw) {
                Ok(shape) => self.apply_prompt(shape),
                Err(e) => {
                    tracing::warn!(
                        target: "playground",
                        log_id = ?record.id,
                        error = %e.inner,
                        prompt = %preview(raw),
                        "prompt is not a recognised message shape, loading it as plain text"
                    );
                    self.state.messages.push(Message::user(raw));
                }
            }
        }

        if let Some(response) = record.response() {
            self.state.messages.push(Message::assistant(response));
        }

        tracing::info!(
            target: "playground",
            log_id = ?record.id,
            model = %self.state.model,
            messages = self.state.messages.len(),
            "loaded log into playground"
        );

        self.navigator.navigate(Route::Playground);
    }

    fn apply_prompt(&mut self, shape: PromptShape) {
        match shape {
            PromptShape::Sequence(entries) => {
                for entry in entries {
                    self.apply_entry(entry);
                }
            }
            PromptShape::Object(entry) => self.apply_entry(entry),
            PromptShape::Scalar(text) => self.state.messages.push(Message::user(text)),
        }
    }

    /// System entries overwrite the standing prompt (last one wins); any
    /// other role, known or not, becomes a turn.
    fn apply_entry(&mut self, entry: PromptEntry) {
        if entry.is_system() {
            self.state.system_prompt = entry.content;
            return;
        }

        let role = match entry.role {
            Some(role) => Role::from(role),
            None => Role::User,
        };
        self.state.messages.push(Message {
            role,
            content: entry.content,
        });
    }
}
