//! Interactive terminal client for a Claude chat backend.
//!
//! This binary provides a REPL over the backend's chat, upload, export, and
//! clear endpoints.  The conversation held by the server is replayed on
//! startup.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default http://localhost:5000/
//! webchat
//!
//! # Point at another backend and start with web search enabled
//! webchat --base-url http://chat.example.com/ --search
//!
//! # Disable colors (useful for piping output)
//! webchat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/search [on|off]` - Toggle web search
//! - `/upload <path>` - Upload a file
//! - `/export` - Save the conversation as JSON
//! - `/clear` - Clear the conversation
//! - `/help` - Show all commands
//! - `/quit` - Exit the application

use std::time::Instant;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use webchat::chat::{
    ChatArgs, ChatClient, ChatCommand, ChatConfig, ClientState, Outcome, RenderOptions, help_text,
    parse_command, render_loading, render_message, render_notification, render_view,
};
use webchat::view::ViewModel;
use webchat::{Backend, ThinkingMode};

/// Main entry point for the webchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("webchat [OPTIONS]");
    let config = ChatConfig::from(args);
    init_logging(config.verbose);

    let backend = Backend::with_options(Some(&config.base_url), Some(config.timeout))?;
    let mut screen = Screen::new(RenderOptions::with_color(config.use_color));
    let mut client = ChatClient::new(backend, config);
    let mut rl = DefaultEditor::new()?;

    println!("Claude Chat (server: {})", client.api().base_url());
    println!("Type /help for commands, /quit to exit\n");

    let _ = client.load_history().await;
    screen.redraw(client.view());

    loop {
        client.dismiss_expired_notifications(Instant::now());

        let readline = rl.readline(&prompt(client.state()));

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::ToggleSearch => {
                            let enabled = client.toggle_search();
                            print_info(&format!("Web search {}.", on_off(enabled)));
                        }
                        ChatCommand::Search(enabled) => {
                            client.set_search_enabled(enabled);
                            print_info(&format!("Web search {}.", on_off(enabled)));
                        }
                        ChatCommand::SearchQuery(query) => {
                            client.set_search_query(query.clone());
                            match query {
                                Some(q) => print_info(&format!("Next search query: {q}")),
                                None => print_info(
                                    "Search query cleared; messages are searched as typed.",
                                ),
                            }
                        }
                        ChatCommand::Thinking(mode) => {
                            let mode = ThinkingMode::new(mode);
                            if !mode.is_known() {
                                print_info(&format!(
                                    "'{mode}' is not a known thinking mode; sending it anyway."
                                ));
                            }
                            print_info(&format!("Thinking mode set to {mode}"));
                            client.set_thinking_mode(mode);
                        }
                        ChatCommand::Upload(path) => {
                            print_info(&format!("Uploading {path}..."));
                            let _ = client.upload_path(path).await;
                            screen.update(client.view());
                        }
                        ChatCommand::Export => {
                            print_info("Exporting conversation...");
                            let _ = client.export_conversation().await;
                            screen.update(client.view());
                        }
                        ChatCommand::Clear => {
                            let mut confirm = |prompt: &str| {
                                rl.readline(&format!("{prompt} [y/N] "))
                                    .map(|answer| {
                                        matches!(
                                            answer.trim().to_lowercase().as_str(),
                                            "y" | "yes"
                                        )
                                    })
                                    .unwrap_or(false)
                            };
                            match client.clear_conversation(&mut confirm).await {
                                Outcome::Completed => screen.redraw(client.view()),
                                Outcome::Skipped(_) => print_info("Clear cancelled."),
                                Outcome::Failed(_) | Outcome::Inert => screen.update(client.view()),
                            }
                        }
                        ChatCommand::History => match client.load_history().await {
                            Outcome::Completed => screen.redraw(client.view()),
                            _ => screen.update(client.view()),
                        },
                        ChatCommand::Status => {
                            print_status(&client);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            eprintln!("Error: {message}");
                        }
                    }
                    continue;
                }

                // Regular message - show it and the loading line, then send
                match client.begin_submission(line) {
                    Ok(request) => {
                        screen.update(client.view());
                        let _ = client.finish_submission(request).await;
                        screen.update(client.view());
                    }
                    Err(Outcome::Inert) => print_info("A request is already in flight."),
                    Err(_) => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Input error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Prints view changes incrementally.
///
/// The view model is declarative; the terminal is append-only.  `Screen`
/// remembers how much of the view has been printed and emits the rest.
struct Screen {
    options: RenderOptions,
    printed_messages: usize,
    last_notification: u64,
}

impl Screen {
    fn new(options: RenderOptions) -> Self {
        Self {
            options,
            printed_messages: 0,
            last_notification: 0,
        }
    }

    fn redraw(&mut self, view: &ViewModel) {
        print!("{}", render_view(view, self.options));
        self.printed_messages = view.messages().len();
        self.mark_notifications(view);
    }

    fn update(&mut self, view: &ViewModel) {
        if view.messages().len() < self.printed_messages {
            self.redraw(view);
            return;
        }
        for message in &view.messages()[self.printed_messages..] {
            print!("{}", render_message(message, self.options));
        }
        self.printed_messages = view.messages().len();
        if view.is_loading() {
            print!("{}", render_loading(self.options));
        }
        for notification in view.notifications() {
            if notification.id > self.last_notification {
                print!("{}", render_notification(notification, self.options));
            }
        }
        self.mark_notifications(view);
    }

    fn mark_notifications(&mut self, view: &ViewModel) {
        if let Some(last) = view.notifications().last() {
            self.last_notification = self.last_notification.max(last.id);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn prompt(state: &ClientState) -> String {
    if state.search_enabled {
        "You [search]: ".to_string()
    } else {
        "You: ".to_string()
    }
}

fn print_info(info: &str) {
    println!("{info}");
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn print_status(client: &ChatClient<Backend>) {
    let state = client.state();
    let config = client.config();
    println!("    Session Status:");
    println!("      Server: {}", client.api().base_url());
    println!("      Messages: {}", client.view().messages().len());
    println!("      Web search: {}", on_off(state.search_enabled));
    match state.search_query.as_deref() {
        Some(query) => println!("      Search query: {query}"),
        None => println!("      Search query: (message text)"),
    }
    println!("      Thinking mode: {}", state.thinking_mode);
    println!("      Export directory: {}", config.export_dir.display());
}
