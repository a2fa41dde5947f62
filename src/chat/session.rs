//! Core chat session management.
//!
//! This module provides [`ChatClient`], which owns the view model and the
//! transient UI state and turns user actions into backend calls.  Failures
//! never escape: each one becomes a notification in the view.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::chat::config::ChatConfig;
use crate::client::ChatApi;
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_HISTORY_ENTRIES, SESSION_INERT_SUBMISSIONS, SESSION_NOTIFICATIONS, SESSION_SUBMISSIONS,
    SESSION_UPLOADS,
};
use crate::types::{ChatRequest, FileUpload, Message, ThinkingMode, UploadResponse};
use crate::utils::time::{format_date, now, today_utc};
use crate::view::{NotificationKind, ViewModel};

/// Prompt shown before clearing the conversation.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the conversation?";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns true if the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What happened to a user action.
#[derive(Debug, Clone)]
#[must_use]
pub enum Outcome {
    /// The request succeeded and the view was updated.
    Completed,
    /// Another request was in flight; nothing happened.
    Inert,
    /// A precondition failed before any request was sent.
    Skipped(Error),
    /// The request failed; an error notification was posted.
    Failed(Error),
}

impl Outcome {
    /// Returns true if the action completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    /// Returns the error behind a skipped or failed action.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Skipped(err) | Outcome::Failed(err) => Some(err),
            Outcome::Completed | Outcome::Inert => None,
        }
    }
}

/// Transient UI state owned by the running session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// Whether messages are sent with web search.
    pub search_enabled: bool,
    /// Overrides the search query for the next search-enabled message.
    pub search_query: Option<String>,
    /// Forwarded with every message.
    pub thinking_mode: ThinkingMode,
    /// The file chosen for the next upload.
    pub pending_upload: Option<PathBuf>,
    /// Set while a chat submission or upload is in flight.
    pub is_submitting: bool,
}

/// The chat client: UI state, the rendered message list, and the backend.
pub struct ChatClient<A: ChatApi> {
    api: A,
    config: ChatConfig,
    state: ClientState,
    view: ViewModel,
}

impl<A: ChatApi> ChatClient<A> {
    /// Creates a client showing the empty placeholder.
    pub fn new(api: A, config: ChatConfig) -> Self {
        let state = ClientState {
            search_enabled: config.search_enabled,
            thinking_mode: config.thinking_mode.clone(),
            ..ClientState::default()
        };
        Self {
            api,
            config,
            state,
            view: ViewModel::new(),
        }
    }

    /// The view model to render.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// The transient UI state.
    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// The backend this client talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Flips web search and returns the new setting.
    pub fn toggle_search(&mut self) -> bool {
        self.state.search_enabled = !self.state.search_enabled;
        self.state.search_enabled
    }

    /// Turns web search on or off.
    pub fn set_search_enabled(&mut self, enabled: bool) {
        self.state.search_enabled = enabled;
    }

    /// Sets or clears the search query override.
    pub fn set_search_query(&mut self, query: Option<String>) {
        self.state.search_query = query.filter(|q| !q.trim().is_empty());
    }

    /// Changes the thinking mode forwarded with messages.
    pub fn set_thinking_mode(&mut self, mode: ThinkingMode) {
        self.state.thinking_mode = mode;
    }

    /// Chooses the file for the next upload.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        self.state.pending_upload = Some(path.into());
    }

    /// Forgets the chosen file.
    pub fn clear_selection(&mut self) {
        self.state.pending_upload = None;
    }

    /// Removes notifications whose lifetime has elapsed at `now`.
    pub fn dismiss_expired_notifications(&mut self, now: Instant) -> usize {
        self.view.dismiss_expired(now)
    }

    /// Builds the request `submit_message` would send for `text`.
    pub fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest::new(
            text,
            self.state.search_enabled,
            self.state.search_query.as_deref(),
            self.state.thinking_mode.clone(),
        )
    }

    /// Sends a message.
    ///
    /// The user entry is shown before the backend answers and stays even if the
    /// request fails.  On success the assistant reply follows it; on failure
    /// an error notification is posted instead.
    pub async fn submit_message(&mut self, text: &str) -> Outcome {
        match self.begin_submission(text) {
            Ok(request) => self.finish_submission(request).await,
            Err(outcome) => outcome,
        }
    }

    /// First half of [`submit_message`](Self::submit_message).
    ///
    /// Checks the guards, shows the user entry, and marks the request in
    /// flight so the caller can render the loading state before awaiting
    /// [`finish_submission`](Self::finish_submission).  Returns the outcome
    /// directly when nothing will be sent.
    pub fn begin_submission(&mut self, text: &str) -> std::result::Result<ChatRequest, Outcome> {
        if self.state.is_submitting {
            SESSION_INERT_SUBMISSIONS.click();
            return Err(Outcome::Inert);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(Outcome::Skipped(Error::EmptyInput));
        }

        SESSION_SUBMISSIONS.click();
        let request = self.build_request(text);
        self.view.push(Message::user(text, Some(now())));
        self.begin_request();
        Ok(request)
    }

    /// Sends a request prepared by [`begin_submission`](Self::begin_submission).
    pub async fn finish_submission(&mut self, request: ChatRequest) -> Outcome {
        let result = self.api.send_chat(&request).await;
        self.end_request();

        match result {
            Ok(response) => {
                let timestamp = response.timestamp.unwrap_or_else(now);
                self.view.push(Message::assistant(
                    response.response,
                    response.search_results,
                    Some(timestamp),
                ));
                if request.use_search {
                    self.state.search_query = None;
                }
                Outcome::Completed
            }
            Err(err) => self.fail(err),
        }
    }

    /// Uploads the selected file.
    ///
    /// The selection is cleared and input re-enabled however the upload ends.
    pub async fn upload_file(&mut self) -> Outcome {
        if self.state.is_submitting {
            SESSION_INERT_SUBMISSIONS.click();
            return Outcome::Inert;
        }
        let Some(path) = self.state.pending_upload.clone() else {
            return Outcome::Skipped(Error::validation(
                "no file selected",
                Some("file".to_string()),
            ));
        };

        SESSION_UPLOADS.click();
        self.begin_request();
        let result = self.read_and_upload(&path).await;
        self.end_request();
        self.state.pending_upload = None;

        match result {
            Ok(response) => {
                tracing::debug!(
                    filename = %response.filename,
                    size = ?response.size,
                    "file uploaded"
                );
                let notice = format!("File \"{}\" uploaded successfully!", response.filename);
                self.view.push(Message::file(
                    response.filename,
                    response.content_preview,
                    Some(now()),
                ));
                self.succeed(notice);
                Outcome::Completed
            }
            Err(err) => self.fail(err),
        }
    }

    /// Selects `path` and uploads it.
    pub async fn upload_path(&mut self, path: impl Into<PathBuf>) -> Outcome {
        if self.state.is_submitting {
            SESSION_INERT_SUBMISSIONS.click();
            return Outcome::Inert;
        }
        self.select_file(path);
        self.upload_file().await
    }

    /// Fetches the persisted conversation and replays it into the view.
    ///
    /// The displayed list is replaced by the fetched one, in fetch order.  On
    /// failure the view is left as it was.
    pub async fn load_history(&mut self) -> Outcome {
        match self.api.conversation().await {
            Ok(conversation) => {
                let total = conversation.messages.len();
                let messages: Vec<Message> = conversation
                    .messages
                    .into_iter()
                    .filter_map(|entry| entry.into_message())
                    .collect();
                if messages.len() < total {
                    tracing::debug!(
                        skipped = total - messages.len(),
                        "history entries without a displayable role"
                    );
                }
                SESSION_HISTORY_ENTRIES.count(messages.len() as u64);
                self.view.replace(messages);
                Outcome::Completed
            }
            Err(err) => {
                let err = with_notice(err, "Failed to load conversation");
                self.fail(err)
            }
        }
    }

    /// Downloads the conversation and writes it to the export directory.
    ///
    /// The file is `claude-conversation-<YYYY-MM-DD>.json`, dated in UTC.
    pub async fn export_conversation(&mut self) -> Outcome {
        match self.write_export().await {
            Ok(path) => {
                self.succeed(format!(
                    "Conversation exported successfully to {}",
                    path.display()
                ));
                Outcome::Completed
            }
            Err(err) => {
                let err = with_notice(err, "Failed to export conversation");
                self.fail(err)
            }
        }
    }

    /// Clears the conversation after the user confirms.
    ///
    /// Nothing is sent if the user declines.  The view is reset only after the
    /// backend acknowledges.
    pub async fn clear_conversation(&mut self, confirm: &mut dyn Confirm) -> Outcome {
        if !confirm.confirm(CLEAR_PROMPT) {
            return Outcome::Skipped(Error::cancelled("clear declined"));
        }
        match self.api.clear().await {
            Ok(()) => {
                self.view.reset();
                self.succeed("Conversation cleared successfully!");
                Outcome::Completed
            }
            Err(err) => {
                let err = with_notice(err, "Failed to clear conversation");
                self.fail(err)
            }
        }
    }

    async fn read_and_upload(&self, path: &Path) -> Result<UploadResponse> {
        let upload = FileUpload::read(path).await?;
        self.api.upload(upload).await
    }

    async fn write_export(&self) -> Result<PathBuf> {
        let document = self.api.export().await?;
        let path = self.config.export_dir.join(export_file_name(today_utc()));
        let body = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|err| Error::io(format!("failed to write {}", path.display()), err))?;
        Ok(path)
    }

    fn begin_request(&mut self) {
        self.state.is_submitting = true;
        self.view.set_loading(true);
    }

    fn end_request(&mut self) {
        self.state.is_submitting = false;
        self.view.set_loading(false);
    }

    fn succeed(&mut self, message: impl Into<String>) {
        SESSION_NOTIFICATIONS.click();
        self.view.notify(
            NotificationKind::Success,
            message,
            self.config.success_lifetime,
            Instant::now(),
        );
    }

    fn fail(&mut self, err: Error) -> Outcome {
        SESSION_NOTIFICATIONS.click();
        tracing::warn!(error = %err, "action failed");
        self.view.notify(
            NotificationKind::Error,
            err.notice(),
            self.config.error_lifetime,
            Instant::now(),
        );
        Outcome::Failed(err)
    }
}

/// File name for a conversation exported on `date`.
pub fn export_file_name(date: time::Date) -> String {
    format!("claude-conversation-{}.json", format_date(date))
}

// Export, clear, and history failures always read the same to the user; the
// underlying error is kept for logging.
fn with_notice(err: Error, notice: &str) -> Error {
    match err {
        Error::Api { status_code, .. } => Error::api(status_code, notice),
        Error::BadRequest { .. } => Error::bad_request(notice),
        Error::NotFound { .. } => Error::not_found(notice),
        Error::InternalServer { .. } => Error::internal_server(notice),
        Error::ServiceUnavailable { .. } => Error::service_unavailable(notice),
        Error::Timeout { duration, .. } => Error::timeout(notice, duration),
        Error::Connection { source, .. } => Error::Connection {
            message: notice.to_string(),
            source,
        },
        Error::HttpClient { source, .. } => Error::HttpClient {
            message: notice.to_string(),
            source,
        },
        Error::Serialization { source, .. } => Error::Serialization {
            message: notice.to_string(),
            source,
        },
        Error::Io { source, .. } => Error::Io {
            message: notice.to_string(),
            source,
        },
        other => other,
    }
}
