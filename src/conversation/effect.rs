//! Effects produced by state transitions

use super::state::Role;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { role: Role, text: String },

    /// Send the wire request to the proxy
    SendRequest { message: String },
}

impl Effect {
    #[must_use]
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn append_assistant(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}
