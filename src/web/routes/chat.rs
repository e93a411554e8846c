//! `POST /api/chat` - answer one question from the configured document.
//!
//! Configuration is checked before anything leaves the process: the LLM
//! settings first, then the Google settings. After that, upstream failures
//! come back as conversational text inside a normal 200 reply.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::web::error::{method_not_allowed, ApiError};
use crate::web::state::AppState;

pub const LLM_NOT_CONFIGURED: &str =
    "GPT-OSS API not configured. Please check your environment variables.";
pub const DOCS_NOT_CONFIGURED: &str =
    "Google Docs integration not configured. Please check your Google credentials.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(post_chat).fallback(method_not_allowed))
}

pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = payload
        .ok()
        .and_then(|Json(body)| body.message)
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    if !state.config.llm.is_configured() {
        return Err(ApiError::NotConfigured(LLM_NOT_CONFIGURED.to_string()));
    }
    if !state.config.google.is_configured() {
        return Err(ApiError::NotConfigured(DOCS_NOT_CONFIGURED.to_string()));
    }

    tracing::info!(message_chars = message.chars().count(), "Chat request received");

    let reply = state
        .chat
        .answer(&message)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(ChatResponse { reply }))
}
