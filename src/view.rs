//! Declarative view model for the conversation display.
//!
//! The view model is plain data: the ordered message list, the transient
//! notifications, and whether a request is in flight.  Rendering it is the job
//! of [`crate::render`]; nothing here touches a terminal.

use std::time::{Duration, Instant};

use crate::types::Message;

/// How long error notifications stay visible.
pub const ERROR_NOTICE_LIFETIME: Duration = Duration::from_secs(5);

/// How long success notifications stay visible.
pub const SUCCESS_NOTICE_LIFETIME: Duration = Duration::from_secs(3);

/// The flavor of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Something failed.
    Error,
    /// Something succeeded.
    Success,
}

/// A message shown to the user for a fixed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic identifier, unique within a view model.
    pub id: u64,
    /// Error or success.
    pub kind: NotificationKind,
    /// The text to show.
    pub message: String,
    /// When the notification was posted.
    pub posted_at: Instant,
    /// How long it stays visible.
    pub lifetime: Duration,
}

impl Notification {
    /// Returns true once the notification's lifetime has elapsed at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.lifetime
    }
}

/// State of the rendered conversation.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    messages: Vec<Message>,
    notifications: Vec<Notification>,
    next_notification_id: u64,
    loading: bool,
}

impl ViewModel {
    /// Creates an empty view showing the placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true when the empty-conversation placeholder should be shown.
    pub fn shows_placeholder(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a message to the end of the list.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the whole list, keeping the given order.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Drops every message, returning the view to the placeholder.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Active notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Posts a notification and returns its id.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        lifetime: Duration,
        now: Instant,
    ) -> u64 {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notifications.push(Notification {
            id,
            kind,
            message: message.into(),
            posted_at: now,
            lifetime,
        });
        id
    }

    /// Removes notifications whose lifetime has elapsed, returning how many went away.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired(now));
        before - self.notifications.len()
    }

    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Shows or hides the loading indicator.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
