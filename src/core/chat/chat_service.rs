// This is the chat module - it ties document search and the LLM together.
// It has no HTTP code in it: the web layer validates the request and decides
// status codes, this module only turns a question into a reply.

use crate::core::ai::{AiProvider, AiService};
use crate::core::documents::{DocumentSearch, DocumentSource, LoaderError};

/// Wraps the search result and the user's question in fixed instructions.
pub fn build_prompt(document_context: &str, message: &str) -> String {
    format!(
        "You are a helpful AI assistant that can answer questions based on documents from the user's Google Drive.

Document content from Google Drive:
{document_context}

User question: {message}

Please provide a helpful and accurate response based on the Google Drive documents above. If the documents contain relevant information, use it to answer the question. If not, let the user know that the information isn't available in their documents."
    )
}

pub struct ChatService<S: DocumentSource, P: AiProvider> {
    search: DocumentSearch<S>,
    ai: AiService<P>,
}

impl<S: DocumentSource, P: AiProvider> ChatService<S, P> {
    pub fn new(search: DocumentSearch<S>, ai: AiService<P>) -> Self {
        Self { search, ai }
    }

    /// Answers one question.
    ///
    /// Upstream failures are already folded into text by the search and AI
    /// services; an `Err` here means the service itself is misconfigured.
    pub async fn answer(&self, message: &str) -> Result<String, LoaderError> {
        let document_context = self.search.search(message).await?;
        let prompt = build_prompt(&document_context, message);

        tracing::debug!(prompt_chars = prompt.chars().count(), "Forwarding prompt to LLM");

        Ok(self.ai.reply(&prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ai::{AiConfig, AiError, AiMessage, APOLOGY_REPLY};
    use crate::core::documents::{DocumentRecord, SharingHints};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StaticDocument(&'static str);

    #[async_trait]
    impl DocumentSource for StaticDocument {
        async fn load(&self) -> Result<DocumentRecord, LoaderError> {
            Ok(DocumentRecord::new(
                self.0.to_string(),
                Some("Handbook".to_string()),
                "doc".to_string(),
                "text/plain".to_string(),
            ))
        }
    }

    struct Unconfigured;

    #[async_trait]
    impl DocumentSource for Unconfigured {
        async fn load(&self) -> Result<DocumentRecord, LoaderError> {
            Err(LoaderError::NotConfigured("no document id".into()))
        }
    }

    /// Captures the prompt and echoes a fixed answer (or fails).
    #[derive(Clone, Default)]
    struct RecordingProvider {
        prompts: Arc<Mutex<Vec<String>>>,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl AiProvider for RecordingProvider {
        async fn chat_complete(
            &self,
            messages: &[AiMessage],
            _config: &AiConfig,
        ) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            if self.fail {
                Err(AiError::Status {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok("Vacation is 25 days.".to_string())
            }
        }
    }

    fn service<S: DocumentSource>(
        source: S,
        provider: RecordingProvider,
    ) -> ChatService<S, RecordingProvider> {
        ChatService::new(
            DocumentSearch::new(source, SharingHints::default()),
            AiService::new(provider, AiConfig::default()),
        )
    }

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_prompt("Source: Handbook\nVacation: 25 days", "How much vacation?");
        assert!(prompt.starts_with("You are a helpful AI assistant"));
        assert!(prompt.contains("Document content from Google Drive:\nSource: Handbook\nVacation: 25 days\n"));
        assert!(prompt.contains("User question: How much vacation?"));
    }

    #[tokio::test]
    async fn answer_forwards_search_result_to_model() {
        let provider = RecordingProvider::default();
        let chat = service(StaticDocument("Vacation: 25 days"), provider.clone());

        let reply = chat.answer("vacation").await.unwrap();

        assert_eq!(reply, "Vacation is 25 days.");
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Source: Handbook\nVacation: 25 days"));
        assert!(prompts[0].contains("User question: vacation"));
    }

    #[tokio::test]
    async fn model_failure_still_yields_a_reply() {
        let provider = RecordingProvider {
            fail: true,
            ..Default::default()
        };
        let chat = service(StaticDocument("anything"), provider);

        assert_eq!(chat.answer("hi").await.unwrap(), APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn misconfigured_source_skips_the_model() {
        let provider = RecordingProvider::default();
        let chat = service(Unconfigured, provider.clone());

        assert!(chat.answer("hi").await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
