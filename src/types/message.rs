use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::types::{MessageMetadata, SearchResult};

/// Who a displayed message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the user.
    User,
    /// A reply produced by the assistant.
    Assistant,
    /// A file the user uploaded into the conversation.
    File,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::File => "file",
        }
    }
}

/// A message in the displayed conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who the message belongs to.
    pub role: Role,

    /// The message text. Assistant content is markdown.
    pub content: String,

    /// When the message was produced, if known.
    pub timestamp: Option<PrimitiveDateTime>,

    /// Search results or file details attached to the message.
    pub metadata: MessageMetadata,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        role: Role,
        content: impl Into<String>,
        timestamp: Option<PrimitiveDateTime>,
        metadata: MessageMetadata,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
            metadata,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>, timestamp: Option<PrimitiveDateTime>) -> Self {
        Self::new(Role::User, content, timestamp, MessageMetadata::new())
    }

    /// Creates an assistant reply with the search results that informed it.
    pub fn assistant(
        content: impl Into<String>,
        search_results: Vec<SearchResult>,
        timestamp: Option<PrimitiveDateTime>,
    ) -> Self {
        Self::new(
            Role::Assistant,
            content,
            timestamp,
            MessageMetadata::with_search_results(search_results),
        )
    }

    /// Creates the message shown after a file upload.
    pub fn file(
        filename: impl Into<String>,
        file_content: impl Into<String>,
        timestamp: Option<PrimitiveDateTime>,
    ) -> Self {
        let filename = filename.into();
        Self::new(
            Role::File,
            format!("Uploaded file: {filename}"),
            timestamp,
            MessageMetadata::with_file(filename, file_content),
        )
    }

    /// Returns the search results attached to this message.
    pub fn search_results(&self) -> &[SearchResult] {
        &self.metadata.search_results
    }
}
