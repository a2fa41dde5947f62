//! Text rendering of the conversation view.
//!
//! Every function here is pure with respect to its inputs: it turns view
//! state into a `String` and leaves printing to the caller.  ANSI styling is
//! optional so output can be piped.

use std::borrow::Cow;
use std::fmt::Write;

use crate::types::{Message, Role, SearchResult};
use crate::utils::time::format_clock;
use crate::view::{Notification, NotificationKind, ViewModel};

/// Number of characters of a file shown in its preview.
pub const PREVIEW_CHARS: usize = 200;

/// Heading of the empty-conversation placeholder.
pub const PLACEHOLDER_TITLE: &str = "Hello!";

/// Body of the empty-conversation placeholder.
pub const PLACEHOLDER_BODY: &str = "Start a conversation with Claude by typing a message below. \
You can also upload files and enable web search.";

/// ANSI escape code for bold text (used for labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for times and snippets).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for files).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for the assistant and successes).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for search results).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Whether to emit ANSI styling.
    pub use_color: bool,
}

impl RenderOptions {
    /// Options with the given color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { use_color: true }
    }
}

/// Shortens file content to its first [`PREVIEW_CHARS`] characters.
///
/// Longer content gets a trailing `...`; content within the limit is returned
/// unchanged.
pub fn truncate_preview(content: &str) -> Cow<'_, str> {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &content[..cut])),
        None => Cow::Borrowed(content),
    }
}

/// Renders the whole view: placeholder or messages, then the loading line and notifications.
pub fn render_view(view: &ViewModel, options: RenderOptions) -> String {
    let mut out = String::new();
    if view.shows_placeholder() {
        out.push_str(&render_placeholder(options));
    } else {
        for message in view.messages() {
            out.push_str(&render_message(message, options));
        }
    }
    if view.is_loading() {
        out.push_str(&render_loading(options));
    }
    for notification in view.notifications() {
        out.push_str(&render_notification(notification, options));
    }
    out
}

/// Renders the empty-conversation placeholder.
pub fn render_placeholder(options: RenderOptions) -> String {
    let title = paint(PLACEHOLDER_TITLE, ANSI_BOLD, options);
    format!("{title}\n{PLACEHOLDER_BODY}\n")
}

/// Renders the line shown while a request is in flight.
pub fn render_loading(options: RenderOptions) -> String {
    format!("{}\n", paint("Claude is thinking...", ANSI_DIM, options))
}

/// Renders one message with its label, time, content, and attachments.
pub fn render_message(message: &Message, options: RenderOptions) -> String {
    let (label, color) = match message.role {
        Role::User => ("You", ANSI_CYAN),
        Role::Assistant => ("Claude", ANSI_GREEN),
        Role::File => ("File", ANSI_YELLOW),
    };

    let mut out = String::new();
    let label = paint(label, color, options);
    match &message.timestamp {
        Some(timestamp) => {
            let clock = paint(&format_clock(timestamp), ANSI_DIM, options);
            let _ = writeln!(out, "{label} {clock}");
        }
        None => {
            let _ = writeln!(out, "{label}");
        }
    }
    push_indented(&mut out, &message.content, "  ");

    if message.role == Role::File {
        if let Some((filename, file_content)) = message.metadata.file() {
            let _ = writeln!(out, "  [{}]", paint(filename, ANSI_BOLD, options));
            push_indented(&mut out, &truncate_preview(file_content), "  | ");
        }
    }

    if !message.search_results().is_empty() {
        out.push_str(&render_search_results(message.search_results(), options));
    }
    out.push('\n');
    out
}

/// Renders the search results attached to an assistant reply.
pub fn render_search_results(results: &[SearchResult], options: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", paint("Search results used:", ANSI_MAGENTA, options));
    for (index, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "    {}. {} <{}>",
            index + 1,
            paint(&result.title, ANSI_BOLD, options),
            result.url
        );
        if !result.snippet.is_empty() {
            let _ = writeln!(out, "       {}", paint(&result.snippet, ANSI_DIM, options));
        }
    }
    out
}

/// Renders a transient notification.
pub fn render_notification(notification: &Notification, options: RenderOptions) -> String {
    match notification.kind {
        NotificationKind::Error => {
            let text = format!("Error: {}", notification.message);
            format!("{}\n", paint(&text, ANSI_RED, options))
        }
        NotificationKind::Success => {
            format!("{}\n", paint(&notification.message, ANSI_GREEN, options))
        }
    }
}

fn paint(text: &str, style: &str, options: RenderOptions) -> String {
    if options.use_color {
        format!("{style}{text}{ANSI_RESET}")
    } else {
        text.to_string()
    }
}

fn push_indented(out: &mut String, text: &str, indent: &str) {
    for line in text.lines() {
        out.push_str(indent);
        out.push_str(line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use time::macros::datetime;

    const PLAIN: RenderOptions = RenderOptions { use_color: false };

    #[test]
    fn short_preview_is_unchanged() {
        let content = "a".repeat(PREVIEW_CHARS);
        assert!(matches!(truncate_preview(&content), Cow::Borrowed(_)));
        assert_eq!(truncate_preview(&content), content);
    }

    #[test]
    fn long_preview_is_truncated() {
        let content = "b".repeat(PREVIEW_CHARS + 1);
        let preview = truncate_preview(&content);
        assert_eq!(preview.len(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..PREVIEW_CHARS], &content[..PREVIEW_CHARS]);
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let content = "é".repeat(PREVIEW_CHARS + 10);
        let preview = truncate_preview(&content);
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn placeholder_when_empty() {
        let view = ViewModel::new();
        let out = render_view(&view, PLAIN);
        assert!(out.starts_with(PLACEHOLDER_TITLE));
        assert!(out.contains("upload files"));
    }

    #[test]
    fn user_message_with_time() {
        let message = Message::user("hello", Some(datetime!(2025-06-01 14:03:22)));
        assert_eq!(render_message(&message, PLAIN), "You 14:03:22\n  hello\n\n");
    }

    #[test]
    fn assistant_message_with_search_results() {
        let message = Message::assistant(
            "Here you go.",
            vec![
                SearchResult::new("Rust", "https://www.rust-lang.org/", "Fast and safe"),
                SearchResult::new("Crates", "https://crates.io/", ""),
            ],
            None,
        );
        let out = render_message(&message, PLAIN);
        assert_eq!(
            out,
            concat!(
                "Claude\n",
                "  Here you go.\n",
                "  Search results used:\n",
                "    1. Rust <https://www.rust-lang.org/>\n",
                "       Fast and safe\n",
                "    2. Crates <https://crates.io/>\n",
                "\n",
            )
        );
    }

    #[test]
    fn file_message_shows_truncated_preview() {
        let content = "x".repeat(250);
        let message = Message::file("big.txt", content, None);
        let out = render_message(&message, PLAIN);
        assert!(out.contains("Uploaded file: big.txt"));
        assert!(out.contains("[big.txt]"));
        let preview_line = out.lines().find(|l| l.starts_with("  | ")).unwrap();
        assert_eq!(preview_line, format!("  | {}...", "x".repeat(200)));
    }

    #[test]
    fn notifications_render_by_kind() {
        let mut view = ViewModel::new();
        let now = Instant::now();
        view.notify(
            NotificationKind::Error,
            "Failed to send message",
            Duration::from_secs(5),
            now,
        );
        view.notify(
            NotificationKind::Success,
            "Conversation cleared successfully!",
            Duration::from_secs(3),
            now,
        );
        let out = render_view(&view, PLAIN);
        assert!(out.contains("Error: Failed to send message\n"));
        assert!(out.contains("Conversation cleared successfully!\n"));
    }

    #[test]
    fn loading_line() {
        let mut view = ViewModel::new();
        view.push(Message::user("hi", None));
        view.set_loading(true);
        let out = render_view(&view, PLAIN);
        assert!(out.ends_with("Claude is thinking...\n"));
    }

    #[test]
    fn color_wraps_labels() {
        let message = Message::user("hi", None);
        let out = render_message(&message, RenderOptions::with_color(true));
        assert!(out.starts_with(&format!("{ANSI_CYAN}You{ANSI_RESET}")));
    }
}
