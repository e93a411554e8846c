use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to chat server failed: {0}")]
    Request(String),

    #[error("chat server answered with status {0}")]
    Status(u16),
}

/// Anything that can deliver one message and bring back a reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    reply: Option<String>,
}

/// POSTs messages to a running server's `/api/chat`.
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/chat", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ChatTransport for ChatClient {
    async fn send(&self, message: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let body: ReplyBody = response
            .json()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        // A missing reply is left empty; the session decides what to show.
        Ok(body.reply.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_support::{app, full_config, Fakes};

    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn round_trip_through_the_real_router() {
        let fakes = Fakes::new("Hello world", Ok("The doc says hello."));
        let url = serve(app(full_config(), &fakes)).await;

        let reply = ChatClient::new(&url).send("world").await.unwrap();
        assert_eq!(reply, "The doc says hello.");
        assert!(fakes.last_prompt().contains("Hello world"));
    }

    #[tokio::test]
    async fn server_error_status_is_an_error() {
        let fakes = Fakes::new("doc", Ok("reply"));
        let mut config = full_config();
        config.google.document_id = None;
        let url = serve(app(config, &fakes)).await;

        assert!(matches!(
            ChatClient::new(&url).send("hi").await,
            Err(ClientError::Status(500))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        assert!(matches!(
            ChatClient::new("http://127.0.0.1:1").send("hi").await,
            Err(ClientError::Request(_))
        ));
    }
}
