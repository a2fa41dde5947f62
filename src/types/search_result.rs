use serde::{Deserialize, Serialize};

/// A single web search hit attached to an assistant reply.
///
/// Search results are display-only: the client never edits them after they
/// arrive from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// The title of the web page.
    pub title: String,

    /// The URL of the web page.
    pub url: String,

    /// A short excerpt of the page.
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    /// Creates a new SearchResult.
    pub fn new<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        title: S1,
        url: S2,
        snippet: S3,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization() {
        let json = r#"{"title":"Rust","url":"https://www.rust-lang.org/","snippet":"Fast"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.title, "Rust");
        assert_eq!(result.url, "https://www.rust-lang.org/");
        assert_eq!(result.snippet, "Fast");
    }

    #[test]
    fn missing_snippet_defaults_to_empty() {
        let json = r#"{"title":"Rust","url":"https://www.rust-lang.org/"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(result.snippet.is_empty());
    }
}
