//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::core::ai::{AiConfig, AiProvider, AiService};
use crate::core::chat::ChatService;
use crate::core::documents::{DocumentSearch, DocumentSource, SharingHints};
use crate::infra::ai::OpenRouterClient;
use crate::infra::google_docs::GoogleDriveClient;

/// The chat service with its external dependencies chosen at startup.
pub type DynChatService = ChatService<Box<dyn DocumentSource>, Box<dyn AiProvider>>;

/// State shared across all HTTP handlers. Read-only after startup.
pub struct AppState {
    /// Environment-derived configuration.
    pub config: Arc<Config>,
    pub chat: DynChatService,
}

impl AppState {
    pub fn new(config: Arc<Config>, chat: DynChatService) -> Self {
        Self { config, chat }
    }

    /// Wires the production Google Drive loader and LLM client.
    pub fn from_config(config: Arc<Config>) -> Self {
        let hints = SharingHints {
            document_id: config
                .google
                .document_id
                .as_deref()
                .map(GoogleDriveClient::resolve_file_id)
                .unwrap_or_default(),
            service_account_email: config.google.client_email.clone().unwrap_or_default(),
        };
        let drive: Box<dyn DocumentSource> = Box::new(GoogleDriveClient::from_settings(&config.google));
        let llm: Box<dyn AiProvider> = Box::new(OpenRouterClient::new(
            config.llm.api_url.clone().unwrap_or_default(),
            config.llm.api_key.clone().unwrap_or_default(),
        ));

        let chat = ChatService::new(
            DocumentSearch::new(drive, hints),
            AiService::new(llm, AiConfig::default()),
        );

        Self::new(config, chat)
    }
}
