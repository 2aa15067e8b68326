//! User-visible notifications.
//!
//! The store reports load results and successful adds through a [`Notifier`].
//! Delivery is fire-and-forget: a notifier never fails and never blocks the caller.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::trace;

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational
    Normal,
    /// Something failed
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Short heading, e.g. "Success"
    pub title: String,
    /// One-sentence body
    pub description: String,
    /// Normal or error
    pub severity: Severity,
    /// When the notification was raised
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a normal-severity notification stamped with the current time.
    #[must_use]
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Normal)
    }

    /// Creates an error notification stamped with the current time.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }

    fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            raised_at: Utc::now(),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Delivers `notification`. Must not block or fail.
    fn notify(&self, notification: Notification);
}

/// Forwards notifications over an unbounded channel to whoever renders them.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end its notifications arrive on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // A closed receiver means nobody is rendering; dropping is fine.
        if let Err(e) = self.sender.send(notification) {
            trace!("Notification dropped, receiver closed: {:?}", e.0.title);
        }
    }
}
