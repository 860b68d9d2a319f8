//! Runtime configuration for the chat layer

use std::time::Duration;

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Default model request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a chat session and its backend
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model identifier passed to the backend
    pub model: String,

    /// Credential for the model service
    pub api_key: String,

    /// Cap on retained conversation turns
    pub max_history: usize,

    /// Model request timeout
    pub request_timeout: Duration,
}

impl ChatConfig {
    /// Create a config with the given credential and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_history: crate::session::DEFAULT_MAX_HISTORY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
