use crate::core::ai::{AiConfig, AiError, AiMessage, AiProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// OpenRouter asks callers to identify themselves with these headers.
const APP_REFERER: &str = "http://localhost:3000";
const APP_TITLE: &str = "PersonalChatBot";

/// Talks to any OpenAI-compatible chat-completion endpoint such as OpenRouter.
pub struct OpenRouterClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl AiProvider for OpenRouterClient {
    async fn chat_complete(
        &self,
        messages: &[AiMessage],
        config: &AiConfig,
    ) -> Result<String, AiError> {
        let payload = json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::MalformedPayload(e.to_string()))?;

        // Extract content
        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .filter(|s| !s.is_empty())
            .ok_or(AiError::MissingContent)?;

        Ok(content.trim().to_string())
    }
}
