//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message in a conversation.
///
/// Provider request and response bodies in this pipeline are plain UTF-8
/// text, so message content is a single string rather than a multimodal
/// block list.
///
/// # Examples
///
/// ```
/// use fresco_core::{Message, Role};
///
/// let message = Message::user("Hello!");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
