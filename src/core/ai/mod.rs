pub mod ai_service;
pub mod models;

pub use ai_service::{AiProvider, AiService};
#[allow(unused_imports)]
pub use ai_service::{APOLOGY_REPLY, EMPTY_COMPLETION_REPLY};
pub use models::{AiConfig, AiError, AiMessage};
