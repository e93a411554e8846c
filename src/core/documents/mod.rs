pub mod document_models;
pub mod document_search;

pub use document_models::{DocumentRecord, LoaderError, GOOGLE_DOC_MIME_TYPE};
pub use document_search::{DocumentSearch, DocumentSource, SharingHints};
