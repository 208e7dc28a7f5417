//! Host-side sinks: console/JSON overlay stand-ins and the system clipboard.

use std::io::Write;

use arboard::Clipboard;
use copilot_core::notify::NotificationIntent;
use copilot_core::router::{ClipboardSink, NotificationSink, SinkError};

/// Prints intents to stdout, as text or one JSON object per line
pub struct ConsoleOverlay {
    json: bool,
}

impl ConsoleOverlay {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl NotificationSink for ConsoleOverlay {
    fn send(&mut self, intent: &NotificationIntent) -> Result<(), SinkError> {
        let line = if self.json {
            serde_json::to_string(intent).map_err(|e| SinkError::Notification(e.to_string()))?
        } else {
            format!("[{} {}] {}", intent.id, intent.size.as_str(), intent.text)
        };
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line).map_err(|e| SinkError::Notification(e.to_string()))?;
        out.flush().map_err(|e| SinkError::Notification(e.to_string()))
    }
}

/// System clipboard through `arboard`, or nothing when unavailable
pub enum SystemClipboard {
    Available(Clipboard),
    Disabled,
}

impl SystemClipboard {
    pub fn open(enabled: bool) -> Self {
        if !enabled {
            return Self::Disabled;
        }
        match Clipboard::new() {
            Ok(cb) => Self::Available(cb),
            Err(e) => {
                tracing::warn!(error = %e, "System clipboard unavailable, next waypoint will not be copied");
                Self::Disabled
            }
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), SinkError> {
        match self {
            Self::Available(cb) => cb
                .set_text(text)
                .map_err(|e| SinkError::Clipboard(e.to_string())),
            Self::Disabled => Ok(()),
        }
    }
}
