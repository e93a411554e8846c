//! `GET /` - the browser chat page.

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::web::error::method_not_allowed;
use crate::web::state::AppState;

const CHAT_PAGE: &str = include_str!("../../../static/index.html");

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(chat_page).fallback(method_not_allowed))
}

pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

#[cfg(test)]
mod tests {
    use crate::web::test_support::{app, full_config, send_raw, Fakes};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn page_posts_to_chat_endpoint() {
        let fakes = Fakes::new("doc", Ok("reply"));
        let (status, body) = send_raw(app(full_config(), &fakes), Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("fetch('/api/chat'"));
        assert!(body.contains("Thinking..."));
        assert!(body.contains("Welcome! Ask me anything about the documents in your Google Drive."));
    }
}
