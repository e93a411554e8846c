use thiserror::Error;

/// Mime type Google uses for native Docs files (must be exported, not downloaded).
pub const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// Substituted when a document has no extractable text.
pub const EMPTY_DOCUMENT_PLACEHOLDER: &str =
    "This document appears to be empty or the content could not be extracted.";

/// Label used when the file metadata has no name.
pub const UNKNOWN_SOURCE: &str = "Unknown document";

/// One loaded document. Built fresh per request and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub content: String,
    /// Human-readable label (the file name).
    pub source: String,
    pub file_id: String,
    pub mime_type: String,
}

impl DocumentRecord {
    /// Builds a record, substituting the placeholder for blank content.
    pub fn new(
        content: String,
        source: Option<String>,
        file_id: String,
        mime_type: String,
    ) -> Self {
        let content = if content.trim().is_empty() {
            EMPTY_DOCUMENT_PLACEHOLDER.to_string()
        } else {
            content
        };

        Self {
            content,
            source: source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            file_id,
            mime_type,
        }
    }
}

/// Failures while loading the configured document.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Credentials or document id were never provided.
    #[error("document source is not configured: {0}")]
    NotConfigured(String),

    /// The private key could not be parsed as an RSA PEM key.
    #[error("private key could not be decoded: {0}")]
    KeyFormat(String),

    /// The token endpoint refused us, or returned no token.
    #[error("Google authentication failed: {0}")]
    Auth(String),

    /// Drive answered with a non-success status.
    #[error("Google Drive API error while {stage}: {status}")]
    Retrieval { stage: &'static str, status: u16 },

    /// Network or decoding failure talking to Google.
    #[error("Google Drive request failed: {0}")]
    Transport(String),
}

impl LoaderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            LoaderError::Retrieval { status, .. } => Some(*status),
            _ => None,
        }
    }
}
