//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the backend.

use crate::types::KNOWN_THINKING_MODES;

/// A parsed chat command.
///
/// These commands control the chat session and are never sent as messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Flip web search on or off.
    ToggleSearch,

    /// Turn web search on or off explicitly.
    Search(bool),

    /// Set or clear the web search query override.
    /// `None` clears the override so the message itself is searched.
    SearchQuery(Option<String>),

    /// Change the thinking mode.
    Thinking(String),

    /// Upload a file into the conversation.
    Upload(String),

    /// Export the conversation to a JSON file.
    Export,

    /// Clear the conversation on the backend (asks for confirmation).
    Clear,

    /// Reload the conversation history from the backend.
    History,

    /// Display session state (search, thinking mode, message count).
    Status,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use webchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/thinking deep_analysis").is_some());
/// assert!(parse_command("Hello, Claude!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let body = &input[1..];
    let (command, argument) = match body.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim())),
        None => (body, None),
    };
    let command = command.to_lowercase();
    let argument = argument.filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "search" => match argument {
            None => ChatCommand::ToggleSearch,
            Some(arg) => match parse_on_off(arg) {
                Some(value) => ChatCommand::Search(value),
                None => ChatCommand::Invalid("/search expects 'on' or 'off'".to_string()),
            },
        },
        "query" => ChatCommand::SearchQuery(argument.map(|s| s.to_string())),
        "thinking" => match argument {
            Some(mode) if mode.contains(char::is_whitespace) => {
                ChatCommand::Invalid("/thinking expects a single mode name".to_string())
            }
            Some(mode) => ChatCommand::Thinking(mode.to_string()),
            None => ChatCommand::Invalid(format!(
                "/thinking requires a mode ({})",
                KNOWN_THINKING_MODES.join(", ")
            )),
        },
        "upload" => parse_upload_command(argument),
        "export" => ChatCommand::Export,
        "clear" => ChatCommand::Clear,
        "history" | "reload" => ChatCommand::History,
        "status" | "stats" => ChatCommand::Status,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_upload_command(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("/upload requires a file path".to_string());
    };
    // A quoted path may contain spaces; an unquoted one is a single word.
    if let Some(quoted) = arg.strip_prefix('"') {
        return match quoted.strip_suffix('"') {
            Some(path) if !path.is_empty() && !path.contains('"') => {
                ChatCommand::Upload(path.to_string())
            }
            _ => ChatCommand::Invalid("/upload has an unterminated quoted path".to_string()),
        };
    }
    if arg.contains(char::is_whitespace) {
        return ChatCommand::Invalid(
            "/upload takes exactly one file (quote paths containing spaces)".to_string(),
        );
    }
    ChatCommand::Upload(arg.to_string())
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /search [on|off]       Toggle web search (or set it explicitly)
  /query [text]          Search for <text> instead of the message (no argument clears it)
  /thinking <mode>       Set thinking mode: normal, deep_analysis, research_synthesis,
                         strategic_thinking, creative_exploration
  /upload <path>         Upload a file into the conversation
  /export                Save the conversation as claude-conversation-<date>.json
  /clear                 Clear the conversation (asks for confirmation)
  /history               Reload the conversation from the server
  /status                Show search, thinking mode, and message count
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_search() {
        assert_eq!(parse_command("/search"), Some(ChatCommand::ToggleSearch));
        assert_eq!(parse_command("/search on"), Some(ChatCommand::Search(true)));
        assert_eq!(parse_command("/search OFF"), Some(ChatCommand::Search(false)));
        assert!(matches!(
            parse_command("/search maybe"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("expects")
        ));
    }

    #[test]
    fn parse_query() {
        assert_eq!(
            parse_command("/query rust 2024 edition"),
            Some(ChatCommand::SearchQuery(Some(
                "rust 2024 edition".to_string()
            )))
        );
        assert_eq!(parse_command("/query"), Some(ChatCommand::SearchQuery(None)));
    }

    #[test]
    fn parse_thinking() {
        assert_eq!(
            parse_command("/thinking deep_analysis"),
            Some(ChatCommand::Thinking("deep_analysis".to_string()))
        );
        assert_eq!(
            parse_command("/thinking my_custom_mode"),
            Some(ChatCommand::Thinking("my_custom_mode".to_string()))
        );
        assert!(matches!(
            parse_command("/thinking"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("requires")
        ));
        assert!(matches!(
            parse_command("/thinking deep analysis"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_upload() {
        assert_eq!(
            parse_command("/upload notes.txt"),
            Some(ChatCommand::Upload("notes.txt".to_string()))
        );
        assert_eq!(
            parse_command(r#"/upload "My Documents/report.pdf""#),
            Some(ChatCommand::Upload("My Documents/report.pdf".to_string()))
        );
        assert!(matches!(
            parse_command("/upload"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("requires")
        ));
        assert!(matches!(
            parse_command("/upload a.txt b.txt"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("exactly one")
        ));
        assert!(matches!(
            parse_command(r#"/upload "unterminated"#),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn tab_separates_argument() {
        assert_eq!(
            parse_command("/upload\tnotes.txt"),
            Some(ChatCommand::Upload("notes.txt".to_string()))
        );
        assert_eq!(
            parse_command("/thinking\t deep_analysis"),
            Some(ChatCommand::Thinking("deep_analysis".to_string()))
        );
    }

    #[test]
    fn parse_misc() {
        assert_eq!(parse_command("/export"), Some(ChatCommand::Export));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/reload"), Some(ChatCommand::History));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Status));
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/model claude"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello, Claude!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/upload"));
        assert!(help.contains("/export"));
    }
}
