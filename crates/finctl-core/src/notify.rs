//! Transient user notifications.
//!
//! Failed HTTP calls surface to the user as short-lived, dismissible messages.
//! The core only produces them; front ends decide how to render them.

use std::time::Duration;
use tracing::warn;

/// How long a notification stays visible unless configured otherwise.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// Label of the dismiss action.
pub const DISMISS_LABEL: &str = "Close";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub action: &'static str,
    pub duration: Duration,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: DISMISS_LABEL,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Receives notifications for display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that writes to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        warn!(action = notification.action, "{}", notification.message);
    }
}
