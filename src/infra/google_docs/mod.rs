// =============================================================================
// GOOGLE DOCS MODULE
// =============================================================================
//
// Integration with Google Drive for the chat flow.
//
// **Architecture:**
// This module lives in the infra layer because it handles external I/O
// (HTTP requests to Google APIs). The core layer only knows about
// `DocumentSource` - it doesn't care where the text comes from.
//
// **Usage:**
// ```ignore
// let drive = GoogleDriveClient::from_settings(&config.google);
// let search = DocumentSearch::new(drive, hints);
// let context = search.search("vacation policy").await?;
// ```

pub mod google_docs_client;

#[cfg(test)]
pub mod fake_google;

pub use google_docs_client::GoogleDriveClient;
