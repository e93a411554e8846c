// Client layer - a terminal front end for the chat server.
// It follows the same session rules as the browser page.

#[path = "chat_client.rs"]
pub mod chat_client;

#[path = "terminal.rs"]
pub mod terminal;

pub use chat_client::ChatClient;
pub use terminal::run_terminal;
