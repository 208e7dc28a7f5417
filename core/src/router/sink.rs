//! Outbound capabilities the router forwards to.
//!
//! The host adapter provides implementations; the core only sees these traits.

use thiserror::Error;

use crate::notify::NotificationIntent;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("notification sink unavailable: {0}")]
    Notification(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Renders notification intents (the overlay)
pub trait NotificationSink {
    fn send(&mut self, intent: &NotificationIntent) -> Result<(), SinkError>;
}

/// Receives the next waypoint name
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), SinkError>;
}
