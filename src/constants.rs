/// Placeholder system prompt a fresh playground session starts with
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling defaults for a fresh playground session
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_STREAMING: bool = true;

/// Toasts expire on their own after this long
pub const TOAST_TTL_MS: u64 = 3000;

/// Logging defaults
pub const DEFAULT_LOG_FILTER: &str = "promptdeck=info";
pub const LOG_FILE_PREFIX: &str = "promptdeck.log";
pub const LOG_PREVIEW_CHARS: usize = 120;

/// Persisted theme preference
pub const DEFAULT_THEME_FILE: &str = ".promptdeck-theme.json";

/// Role tags as they appear in logged prompts
pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
