use super::models::{AiConfig, AiError, AiMessage};
use async_trait::async_trait;

/// Shown whenever the completion endpoint fails outright.
pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error while processing your request. Please check the server logs for details.";

/// Shown when the endpoint answered but produced no text.
pub const EMPTY_COMPLETION_REPLY: &str = "No response generated from the AI model.";

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Sends a single chat completion request and returns the raw text of the
    /// first choice. Exactly one attempt; no retries.
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, AiError>;
}

// Lets the service hold a trait object chosen at startup.
#[async_trait]
impl AiProvider for Box<dyn AiProvider> {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, AiError> {
        (**self).chat_complete(messages, config).await
    }
}

/// Turns a prompt into conversational text.
///
/// Provider failures never escape this service: they are logged and replaced
/// by a fixed reply so the chat UI always has something to render.
pub struct AiService<P: AiProvider> {
    provider: P,
    config: AiConfig,
}

impl<P: AiProvider> AiService<P> {
    pub fn new(provider: P, config: AiConfig) -> Self {
        Self { provider, config }
    }

    pub async fn reply(&self, prompt: &str) -> String {
        let messages = [AiMessage::user(prompt)];

        match self.provider.chat_complete(&messages, &self.config).await {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    EMPTY_COMPLETION_REPLY.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Err(AiError::MissingContent) => {
                tracing::warn!(model = %self.config.model, "LLM returned no completion");
                EMPTY_COMPLETION_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!(model = %self.config.model, error = %e, "LLM call failed");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}
