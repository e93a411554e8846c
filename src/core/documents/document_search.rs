// =============================================================================
// DOCUMENT SEARCH
// =============================================================================
//
// Naive keyword filtering over the one configured document. Every search
// reloads the document and does a linear, case-insensitive substring scan;
// there is no index and nothing is cached between requests.
//
// Loader failures are turned into explanatory text instead of errors, so the
// chat flow always has *something* to hand to the model. Only a missing
// configuration (which the HTTP layer is supposed to catch first) escapes as
// an error.

use super::document_models::{DocumentRecord, LoaderError};
use async_trait::async_trait;

/// How many characters of a document to show when nothing matched.
pub const PREVIEW_CHARS: usize = 1000;

/// Where document content comes from (Google Drive in production).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Loads the single configured document.
    async fn load(&self) -> Result<DocumentRecord, LoaderError>;
}

#[async_trait]
impl DocumentSource for Box<dyn DocumentSource> {
    async fn load(&self) -> Result<DocumentRecord, LoaderError> {
        (**self).load().await
    }
}

/// Details woven into failure messages so users know what to fix.
#[derive(Debug, Clone, Default)]
pub struct SharingHints {
    pub document_id: String,
    pub service_account_email: String,
}

pub struct DocumentSearch<S: DocumentSource> {
    source: S,
    hints: SharingHints,
}

impl<S: DocumentSource> DocumentSearch<S> {
    pub fn new(source: S, hints: SharingHints) -> Self {
        Self { source, hints }
    }

    /// Loads the document and filters it against `query`.
    ///
    /// Returns text suitable for embedding in a prompt, including when the
    /// load itself failed.
    pub async fn search(&self, query: &str) -> Result<String, LoaderError> {
        match self.source.load().await {
            Ok(document) => {
                tracing::info!(
                    source = %document.source,
                    file_id = %document.file_id,
                    mime_type = %document.mime_type,
                    chars = document.content.chars().count(),
                    "Loaded document for search"
                );
                Ok(filter_document(&document, query))
            }
            Err(e @ LoaderError::NotConfigured(_)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status(), "Error searching Google documents");
                Ok(describe_failure(&e, &self.hints))
            }
        }
    }
}

/// Case-insensitive substring filter over one document.
pub fn filter_document(document: &DocumentRecord, query: &str) -> String {
    let haystack = document.content.to_lowercase();
    let needle = query.to_lowercase();

    if haystack.contains(&needle) {
        return format!("Source: {}\n{}", document.source, document.content);
    }

    format!(
        "No direct matches found for \"{}\". Here's what's available in your Google Drive:\n\nSource: {}\n{}",
        query,
        document.source,
        preview(&document.content)
    )
}

/// First `PREVIEW_CHARS` characters, with an ellipsis when cut short.
fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let mut head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        head.push_str("...");
    }
    head
}

/// Turns a loader failure into guidance for the user.
pub fn describe_failure(error: &LoaderError, hints: &SharingHints) -> String {
    match error {
        LoaderError::Retrieval { status: 404, .. } => format!(
            "Google Docs Error: The document with ID {} was not found or is not accessible to the service account. Please check:\n\
             1. The document ID is correct\n\
             2. The document is shared with {}\n\
             3. The service account has proper permissions",
            hints.document_id, hints.service_account_email
        ),
        LoaderError::Retrieval { status: 403, .. } => format!(
            "Google Docs Error: Access denied. Please ensure the Google Drive document is shared with the service account email: {}",
            hints.service_account_email
        ),
        LoaderError::KeyFormat(_) => "Google Docs Error: Authentication issue with the private key format. Please check your GOOGLE_PRIVATE_KEY environment variable formatting.".to_string(),
        other => format!(
            "Error accessing Google Docs: {}. Please check your Google Drive configuration and ensure the document is shared with your service account.",
            other
        ),
    }
}
