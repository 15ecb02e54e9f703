//! Chat message entity.

use super::value_object::Username;

/// Display name attached to messages the server produces itself.
pub const SYSTEM_USERNAME: &str = "stock-bot";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Submitted by a room member; `username` is the sender's join-time name.
    User,
    /// Produced by the server, e.g. a stock quote reply.
    System,
}

/// A message flowing through a room's mailbox.
///
/// Immutable once constructed. There is no id or timestamp: the order in
/// which messages enter a room's mailbox is the only ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    origin: MessageOrigin,
    username: Username,
    text: String,
}

impl ChatMessage {
    /// Message authored by a member.
    pub fn from_user(username: Username, text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::User,
            username,
            text: text.into(),
        }
    }

    /// Message authored by the server.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::System,
            username: Username::new(SYSTEM_USERNAME),
            text: text.into(),
        }
    }

    pub fn origin(&self) -> MessageOrigin {
        self.origin
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_system(&self) -> bool {
        self.origin == MessageOrigin::System
    }
}
