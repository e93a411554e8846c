use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    pub role: String,
    pub content: String,
}

impl AiMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request parameters sent with every completion.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for AiConfig {
    /// The fixed parameters the chat endpoint always uses.
    fn default() -> Self {
        Self {
            model: "openai/gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: Some(1000),
        }
    }
}

/// Everything that can go wrong talking to a completion endpoint.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("LLM API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error("LLM response could not be parsed: {0}")]
    MalformedPayload(String),

    /// The payload parsed but held no completion text.
    #[error("LLM response contained no completion")]
    MissingContent,
}
