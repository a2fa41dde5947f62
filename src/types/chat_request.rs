use serde::{Deserialize, Serialize};

use crate::types::ThinkingMode;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message, trimmed.
    pub message: String,

    /// Whether the backend should run a web search first.
    pub use_search: bool,

    /// The web search query; empty when search is off.
    pub search_query: String,

    /// Forwarded verbatim to the backend.
    pub thinking_mode: ThinkingMode,
}

impl ChatRequest {
    /// Builds a request.
    ///
    /// With search enabled, a blank `search_query` falls back to the message
    /// itself.  With search disabled the query is always empty.
    pub fn new(
        message: impl Into<String>,
        use_search: bool,
        search_query: Option<&str>,
        thinking_mode: ThinkingMode,
    ) -> Self {
        let message = message.into().trim().to_string();
        let search_query = if use_search {
            match search_query.map(str::trim).filter(|q| !q.is_empty()) {
                Some(query) => query.to_string(),
                None => message.clone(),
            }
        } else {
            String::new()
        };
        Self {
            message,
            use_search,
            search_query,
            thinking_mode,
        }
    }
}
