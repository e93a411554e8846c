// Web layer - HTTP routes, shared state and the JSON error type.
// Handlers validate requests and pick status codes; the actual work is
// delegated to `core::chat`.

#[path = "error.rs"]
pub mod error;

#[path = "state.rs"]
pub mod state;

#[path = "routes/chat.rs"]
pub mod chat;

#[path = "routes/diagnostics.rs"]
pub mod diagnostics;

#[path = "routes/page.rs"]
pub mod page;

#[cfg(test)]
#[path = "test_support.rs"]
pub mod test_support;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Builds the complete application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(page::router())
        .merge(chat::router())
        .merge(diagnostics::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
