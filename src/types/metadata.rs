use serde::{Deserialize, Serialize};

use crate::types::SearchResult;

/// Metadata attached to a conversation message.
///
/// Assistant replies may carry the search results that informed them; file
/// messages carry the uploaded file's name and extracted text.  The backend
/// stores more keys than these (token usage, mime type, ...), which are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageMetadata {
    /// Search results used to produce an assistant reply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_results: Vec<SearchResult>,

    /// Name of an uploaded file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Text extracted from an uploaded file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,

    /// Thinking mode the message was produced under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_mode: Option<String>,
}

impl MessageMetadata {
    /// Creates a new empty MessageMetadata instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata carrying search results.
    pub fn with_search_results(search_results: Vec<SearchResult>) -> Self {
        Self {
            search_results,
            ..Self::default()
        }
    }

    /// Creates metadata describing an uploaded file.
    pub fn with_file<S1: Into<String>, S2: Into<String>>(filename: S1, file_content: S2) -> Self {
        Self {
            filename: Some(filename.into()),
            file_content: Some(file_content.into()),
            ..Self::default()
        }
    }

    /// Returns the filename and content when both are present.
    pub fn file(&self) -> Option<(&str, &str)> {
        match (&self.filename, &self.file_content) {
            (Some(name), Some(content)) => Some((name, content)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_serialization() {
        let metadata = MessageMetadata::new();
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn deserialization_ignores_unknown_keys() {
        let json = serde_json::json!({
            "search_used": true,
            "search_results": [{"title": "T", "url": "https://t.example", "snippet": "s"}],
            "thinking_mode": "normal",
            "token_usage": null
        });
        let metadata: MessageMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(metadata.search_results.len(), 1);
        assert_eq!(metadata.thinking_mode.as_deref(), Some("normal"));
        assert!(metadata.file().is_none());
    }

    #[test]
    fn file_requires_name_and_content() {
        let metadata = MessageMetadata::with_file("notes.txt", "hello");
        assert_eq!(metadata.file(), Some(("notes.txt", "hello")));

        let metadata = MessageMetadata {
            filename: Some("notes.txt".to_string()),
            ..MessageMetadata::default()
        };
        assert!(metadata.file().is_none());
    }
}
