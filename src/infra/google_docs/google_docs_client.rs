// =============================================================================
// GOOGLE DRIVE CLIENT WITH SERVICE ACCOUNT AUTHENTICATION
// =============================================================================
//
// This module loads the text of ONE Google Drive file for the chat flow.
//
// **Flow per request (nothing is cached):**
// 1. Sign a JWT with the service account's private key and exchange it for
//    an access token (OAuth2 JWT-bearer grant).
// 2. Fetch the file's metadata (`id,name,mimeType`) from Drive v3.
// 3. Native Google Docs are exported as `text/plain`; anything else is
//    downloaded as-is with `alt=media`.
//
// **Setup Instructions for the Service Account:**
//
// 1. Go to Google Cloud Console: https://console.cloud.google.com/
// 2. Enable the Google Drive API (and the Google Docs API)
// 3. Create a Service Account under "APIs & Services" > "Credentials"
// 4. Create a JSON key and copy `client_email` and `private_key` out of it
// 5. Share the document with the service account email ("Viewer" is enough)
// 6. Set environment variables:
//    - `GOOGLE_CLIENT_EMAIL` - The service account email
//    - `GOOGLE_PRIVATE_KEY`  - The PEM private key
//    - `GOOGLE_FOLDER_ID`    - The document ID or its share URL

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::GoogleSettings;
use crate::core::documents::{DocumentRecord, DocumentSource, LoaderError, GOOGLE_DOC_MIME_TYPE};

/// Read-only access is all we ever need.
const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/documents.readonly",
];

fn transport(e: reqwest::Error) -> LoaderError {
    LoaderError::Transport(e.to_string())
}

// =============================================================================
// SERVICE ACCOUNT AUTHENTICATION
// =============================================================================

/// Anything that can hand out a bearer token for the Drive API.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, LoaderError>;
}

/// JWT claims for Google OAuth2.
#[derive(Debug, Serialize)]
struct JwtClaims {
    /// Issuer (service account email).
    iss: String,

    /// Space-separated scopes.
    scope: String,

    /// Audience (token endpoint).
    aud: String,

    /// Issued at (Unix timestamp).
    iat: u64,

    /// Expiration (Unix timestamp, max 1 hour from iat).
    exp: u64,
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

/// Exchanges a signed JWT for an access token on every call.
pub struct ServiceAccountAuth {
    client_email: String,
    private_key: String,
    token_uri: String,
    client: Client,
}

impl ServiceAccountAuth {
    pub fn new(client_email: String, private_key: String, token_uri: String) -> Self {
        Self {
            client_email,
            private_key,
            token_uri,
            client: Client::new(),
        }
    }

    fn signed_assertion(&self) -> Result<String, LoaderError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| LoaderError::Auth(e.to_string()))?
            .as_secs();

        let claims = JwtClaims {
            iss: self.client_email.clone(),
            scope: SCOPES.join(" "),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| LoaderError::KeyFormat(e.to_string()))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| LoaderError::KeyFormat(e.to_string()))
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, LoaderError> {
        let jwt = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LoaderError::Auth(format!(
                "Token exchange failed ({}): {}",
                status, text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(transport)?;
        if token.access_token.is_empty() {
            return Err(LoaderError::Auth("Failed to get access token".to_string()));
        }

        tracing::debug!(client_email = %self.client_email, "Authenticated with Google APIs");
        Ok(token.access_token)
    }
}

// =============================================================================
// GOOGLE DRIVE API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    id: Option<String>,
    name: Option<String>,
    mime_type: Option<String>,
}

// =============================================================================
// GOOGLE DRIVE CLIENT
// =============================================================================

/// Loads the single configured Drive file.
pub struct GoogleDriveClient {
    client: Client,
    api_base: String,
    file_id: Option<String>,
    auth: Option<Box<dyn AccessTokenSource>>,
}

impl GoogleDriveClient {
    pub fn new(
        api_base: impl Into<String>,
        file_id: Option<String>,
        auth: Option<Box<dyn AccessTokenSource>>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            file_id,
            auth,
        }
    }

    /// Wires up the client from configuration. Missing pieces are reported
    /// when a load is attempted, not here.
    pub fn from_settings(settings: &GoogleSettings) -> Self {
        let auth = match (&settings.client_email, &settings.private_key) {
            (Some(email), Some(key)) => Some(Box::new(ServiceAccountAuth::new(
                email.clone(),
                key.clone(),
                settings.token_uri.clone(),
            )) as Box<dyn AccessTokenSource>),
            _ => None,
        };

        let file_id = settings.document_id.as_deref().map(Self::resolve_file_id);

        Self::new(settings.drive_api_base.clone(), file_id, auth)
    }

    /// The id to ask Drive for. Values that don't parse are passed through
    /// trimmed, so a bad id surfaces as Drive's 404 rather than a local error.
    pub fn resolve_file_id(raw: &str) -> String {
        Self::extract_file_id(raw).unwrap_or_else(|| raw.trim().to_string())
    }

    /// Extracts the file ID from a Drive or Docs URL, or accepts a bare ID.
    pub fn extract_file_id(url_or_id: &str) -> Option<String> {
        let url_or_id = url_or_id.trim();

        if url_or_id.contains("google.com") {
            for marker in ["/document/d/", "/file/d/", "/folders/"] {
                if let Some(start) = url_or_id.find(marker) {
                    let after = &url_or_id[start + marker.len()..];
                    let end = after.find(|c: char| c == '/' || c == '?' || c == '#').unwrap_or(after.len());
                    let id = &after[..end];
                    if !id.is_empty() {
                        return Some(id.to_string());
                    }
                }
            }
            if let Some(start) = url_or_id.find("id=") {
                let after = &url_or_id[start + 3..];
                let end = after.find('&').unwrap_or(after.len());
                if end > 0 {
                    return Some(after[..end].to_string());
                }
            }
        } else if !url_or_id.is_empty() && !url_or_id.contains('/') && !url_or_id.contains(' ') {
            return Some(url_or_id.to_string());
        }
        None
    }

    async fn get_checked(
        &self,
        url: &str,
        query: &[(&str, &str)],
        token: &str,
        stage: &'static str,
    ) -> Result<reqwest::Response, LoaderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(stage, status = status.as_u16(), "Google Drive API error");
            return Err(LoaderError::Retrieval {
                stage,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn fetch_metadata(&self, file_id: &str, token: &str) -> Result<FileMetadata, LoaderError> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        self.get_checked(&url, &[("fields", "id,name,mimeType")], token, "fetching metadata")
            .await?
            .json()
            .await
            .map_err(transport)
    }

    async fn fetch_content(
        &self,
        file_id: &str,
        mime_type: &str,
        token: &str,
    ) -> Result<String, LoaderError> {
        let response = if mime_type == GOOGLE_DOC_MIME_TYPE {
            let url = format!("{}/files/{}/export", self.api_base, file_id);
            self.get_checked(&url, &[("mimeType", "text/plain")], token, "exporting document")
                .await?
        } else {
            let url = format!("{}/files/{}", self.api_base, file_id);
            self.get_checked(&url, &[("alt", "media")], token, "downloading file")
                .await?
        };

        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl DocumentSource for GoogleDriveClient {
    async fn load(&self) -> Result<DocumentRecord, LoaderError> {
        let file_id = self.file_id.as_deref().ok_or_else(|| {
            LoaderError::NotConfigured("GOOGLE_FOLDER_ID is missing".to_string())
        })?;
        let auth = self.auth.as_ref().ok_or_else(|| {
            LoaderError::NotConfigured(
                "GOOGLE_CLIENT_EMAIL and GOOGLE_PRIVATE_KEY are required".to_string(),
            )
        })?;

        tracing::info!(file_id, "Loading Google Drive file");

        let token = auth.access_token().await?;
        let metadata = self.fetch_metadata(file_id, &token).await?;
        let mime_type = metadata.mime_type.unwrap_or_default();
        let content = self.fetch_content(file_id, &mime_type, &token).await?;

        let record = DocumentRecord::new(
            content,
            metadata.name,
            metadata.id.unwrap_or_else(|| file_id.to_string()),
            mime_type,
        );

        tracing::info!(
            source = %record.source,
            chars = record.content.chars().count(),
            "Loaded Google Drive file"
        );

        Ok(record)
    }
}
