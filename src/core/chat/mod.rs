pub mod chat_service;
pub mod chat_session;

pub use chat_service::ChatService;
pub use chat_session::{ChatSession, Role};
