use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::types::SearchResult;

/// Successful body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// The assistant's reply, as markdown.
    pub response: String,

    /// Search results used for the reply.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub search_results: Vec<SearchResult>,

    /// Backend identifier of the stored reply.
    #[serde(default)]
    pub message_id: Option<String>,

    /// When the backend stored the reply.
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_lenient")]
    pub timestamp: Option<PrimitiveDateTime>,

    /// Thinking mode the reply was produced under.
    #[serde(default)]
    pub thinking_mode: Option<String>,

    /// Output tokens spent on the reply.
    #[serde(default)]
    pub token_usage: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SearchResult>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<SearchResult>>::deserialize(deserializer)?.unwrap_or_default())
}
