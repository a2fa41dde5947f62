use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::types::{Message, MessageMetadata, Role};

/// The persisted conversation as returned by `GET /api/conversation`.
///
/// The backend also returns `files` and `search_history`; only the message
/// list is replayed.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    /// Messages in the order the backend stored them.
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// One entry of the persisted conversation.
///
/// Chat messages are identified by `role`; uploaded files additionally carry
/// `type: "file"`, which takes precedence.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Backend identifier of the entry.
    #[serde(default)]
    pub id: Option<String>,

    /// `user` or `assistant`.
    #[serde(default)]
    pub role: Option<String>,

    /// `text` or `file`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// The message text.
    #[serde(default)]
    pub content: String,

    /// When the backend stored the entry.
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_lenient")]
    pub timestamp: Option<PrimitiveDateTime>,

    /// Search results or file details.
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
}

impl HistoryEntry {
    /// Classifies the entry, or returns `None` for entries that are not displayed.
    pub fn display_role(&self) -> Option<Role> {
        if self.kind.as_deref() == Some("file") {
            return Some(Role::File);
        }
        match self.role.as_deref() {
            Some("user") => Some(Role::User),
            Some("assistant") => Some(Role::Assistant),
            Some("file") => Some(Role::File),
            _ => None,
        }
    }

    /// Converts the entry into a displayable message.
    pub fn into_message(self) -> Option<Message> {
        let role = self.display_role()?;
        Some(Message::new(
            role,
            self.content,
            self.timestamp,
            self.metadata.unwrap_or_default(),
        ))
    }
}
