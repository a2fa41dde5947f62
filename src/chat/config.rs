//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::types::ThinkingMode;
use crate::view::{ERROR_NOTICE_LIFETIME, SUCCESS_NOTICE_LIFETIME};

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the webchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the chat backend.
    #[arrrg(optional, "Backend URL (default: http://localhost:5000/)", "URL")]
    pub base_url: Option<String>,

    /// Directory exported conversations are written to.
    #[arrrg(optional, "Directory for exported conversations (default: .)", "DIR")]
    pub export_dir: Option<String>,

    /// Thinking mode forwarded with each message.
    #[arrrg(optional, "Thinking mode (default: normal)", "MODE")]
    pub thinking_mode: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECS")]
    pub timeout: Option<u64>,

    /// Start with web search enabled.
    #[arrrg(flag, "Enable web search for messages")]
    pub search: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log requests to stderr.
    #[arrrg(flag, "Log requests and failures to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the chat backend.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// Directory exported conversations are written to.
    pub export_dir: PathBuf,

    /// Thinking mode the session starts with.
    pub thinking_mode: ThinkingMode,

    /// Whether web search starts enabled.
    pub search_enabled: bool,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log requests at debug level.
    pub verbose: bool,

    /// How long error notifications stay visible.
    pub error_lifetime: Duration,

    /// How long success notifications stay visible.
    pub success_lifetime: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Backend: http://localhost:5000/
    /// - Timeout: 60 seconds
    /// - Export directory: current directory
    /// - Thinking mode: normal
    /// - Search: disabled
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            export_dir: PathBuf::from("."),
            thinking_mode: ThinkingMode::normal(),
            search_enabled: false,
            use_color: true,
            verbose: false,
            error_lifetime: ERROR_NOTICE_LIFETIME,
            success_lifetime: SUCCESS_NOTICE_LIFETIME,
        }
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the export directory.
    pub fn with_export_dir(mut self, export_dir: impl Into<PathBuf>) -> Self {
        self.export_dir = export_dir.into();
        self
    }

    /// Sets the initial thinking mode.
    pub fn with_thinking_mode(mut self, thinking_mode: ThinkingMode) -> Self {
        self.thinking_mode = thinking_mode;
        self
    }

    /// Sets whether web search starts enabled.
    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets verbose logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Sets the notification lifetimes for errors and successes.
    pub fn with_notice_lifetimes(mut self, error: Duration, success: Duration) -> Self {
        self.error_lifetime = error;
        self.success_lifetime = success;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let defaults = ChatConfig::new();
        ChatConfig {
            base_url: args.base_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            export_dir: args
                .export_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            thinking_mode: args
                .thinking_mode
                .map(ThinkingMode::new)
                .unwrap_or(defaults.thinking_mode),
            search_enabled: args.search,
            use_color: !args.no_color,
            verbose: args.verbose,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.base_url, "http://localhost:5000/");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.thinking_mode, ThinkingMode::normal());
        assert!(!config.search_enabled);
        assert!(config.use_color);
        assert!(!config.verbose);
        assert_eq!(config.error_lifetime, Duration::from_secs(5));
        assert_eq!(config.success_lifetime, Duration::from_secs(3));
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.use_color);
        assert!(!config.search_enabled);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://chat.internal:8080/".to_string()),
            export_dir: Some("/tmp/exports".to_string()),
            thinking_mode: Some("deep_analysis".to_string()),
            timeout: Some(120),
            search: true,
            no_color: true,
            verbose: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, "http://chat.internal:8080/");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.thinking_mode.as_str(), "deep_analysis");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.search_enabled);
        assert!(!config.use_color);
        assert!(config.verbose);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://127.0.0.1:5001/")
            .with_timeout(Duration::from_secs(5))
            .with_export_dir("exports")
            .with_thinking_mode(ThinkingMode::new("creative_exploration"))
            .with_search(true)
            .without_color()
            .with_verbose(true)
            .with_notice_lifetimes(Duration::from_secs(1), Duration::from_secs(2));

        assert_eq!(config.base_url, "http://127.0.0.1:5001/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.export_dir, PathBuf::from("exports"));
        assert_eq!(config.thinking_mode.as_str(), "creative_exploration");
        assert!(config.search_enabled);
        assert!(!config.use_color);
        assert!(config.verbose);
        assert_eq!(config.error_lifetime, Duration::from_secs(1));
        assert_eq!(config.success_lifetime, Duration::from_secs(2));
    }
}
