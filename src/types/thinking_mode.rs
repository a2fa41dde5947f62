use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Modes the backend is known to understand.
pub const KNOWN_THINKING_MODES: &[&str] = &[
    "normal",
    "deep_analysis",
    "research_synthesis",
    "strategic_thinking",
    "creative_exploration",
];

/// The thinking mode forwarded with every chat request.
///
/// The client never interprets the value; any string is passed through to the
/// backend unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThinkingMode(String);

impl ThinkingMode {
    /// Creates a thinking mode from any string.
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    /// The plain mode that asks for no extended thinking.
    pub fn normal() -> Self {
        Self("normal".to_string())
    }

    /// Returns the mode as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the backend is known to recognize this mode.
    pub fn is_known(&self) -> bool {
        KNOWN_THINKING_MODES.contains(&self.0.as_str())
    }
}

impl Default for ThinkingMode {
    fn default() -> Self {
        Self::normal()
    }
}

impl fmt::Display for ThinkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ThinkingMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}
