// The client side of a conversation: an in-memory list of turns plus a
// two-state machine (idle / awaiting reply). Both the terminal client and
// the browser page follow these rules; nothing here is ever persisted.

use serde::{Deserialize, Serialize};

/// Shown when the server answered without any reply text.
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I could not process your request.";

/// Shown when the request failed or the server returned an error status.
pub const REQUEST_FAILED_REPLY: &str =
    "Sorry, there was an error processing your request. Please check your configuration.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[allow(dead_code)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while a reply is pending (the "Thinking..." indicator).
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// Starts a send. Returns the message to POST, or `None` when the input
    /// is blank or a reply is still pending.
    ///
    /// The user turn is appended immediately, before any network call.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() || self.is_loading() {
            return None;
        }

        let message = input.to_string();
        self.messages.push(ChatMessage {
            role: Role::User,
            text: message.clone(),
        });
        self.state = SessionState::AwaitingReply;
        Some(message)
    }

    /// Completes the pending send with the server's outcome and returns to idle.
    /// Ignored when nothing is pending.
    pub fn finish_send<E>(&mut self, outcome: Result<String, E>) {
        if !self.is_loading() {
            return;
        }

        let text = match outcome {
            Ok(reply) if !reply.is_empty() => reply,
            Ok(_) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(_) => REQUEST_FAILED_REPLY.to_string(),
        };

        self.messages.push(ChatMessage {
            role: Role::Assistant,
            text,
        });
        self.state = SessionState::Idle;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_exchanges_alternate_roles() {
        let mut session = ChatSession::new();
        assert!(!session.is_loading());

        let first = session.begin_send("What is in the doc?").unwrap();
        assert_eq!(first, "What is in the doc?");
        assert!(session.is_loading());
        session.finish_send::<()>(Ok("A handbook.".to_string()));
        assert!(!session.is_loading());

        session.begin_send("Anything about vacation?").unwrap();
        assert!(session.is_loading());
        session.finish_send::<()>(Ok("25 days.".to_string()));
        assert!(!session.is_loading());

        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = ChatSession::new();
        assert_eq!(session.begin_send("   "), None);
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn second_send_is_blocked_while_awaiting() {
        let mut session = ChatSession::new();
        session.begin_send("first").unwrap();
        assert_eq!(session.begin_send("second"), None);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn failures_and_empty_replies_use_fixed_text() {
        let mut session = ChatSession::new();
        session.begin_send("one").unwrap();
        session.finish_send(Err("connection refused"));
        session.begin_send("two").unwrap();
        session.finish_send::<()>(Ok(String::new()));

        assert_eq!(session.messages()[1].text, REQUEST_FAILED_REPLY);
        assert_eq!(session.messages()[3].text, EMPTY_REPLY_FALLBACK);
    }

    #[test]
    fn stray_reply_without_pending_send_is_dropped() {
        let mut session = ChatSession::new();
        session.finish_send::<()>(Ok("unexpected".to_string()));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn roles_serialize_lowercase() {
        let message = ChatMessage {
            role: Role::Assistant,
            text: "hi".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
