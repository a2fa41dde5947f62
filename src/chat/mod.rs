//! Interactive chat client for a Claude chat backend.
//!
//! This module provides the pieces the `webchat` REPL is built from:
//!
//! - [`ChatClient`]: owns the message list and UI state and talks to the backend
//! - [`ChatConfig`] / [`ChatArgs`]: command-line arguments and resolved settings
//! - [`parse_command`]: slash commands for controlling the session
//!
//! # Architecture
//!
//! The client never prints.  It updates a [`ViewModel`](crate::view::ViewModel)
//! that the caller renders with [`crate::render`], so the whole flow can be
//! exercised against a fake [`ChatApi`](crate::client::ChatApi) in tests.

mod commands;
mod config;
mod session;

pub use crate::render::{
    RenderOptions, render_loading, render_message, render_notification, render_view,
};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_BASE_URL};
pub use session::{CLEAR_PROMPT, ChatClient, ClientState, Confirm, Outcome, export_file_name};
