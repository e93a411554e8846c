// The core module contains all business logic.
// Each feature gets its own submodule. Nothing in here knows about HTTP
// frameworks or Google's wire formats; those live in `web/` and `infra/`.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "chat/mod.rs"]
pub mod chat;

#[path = "documents/mod.rs"]
pub mod documents;
