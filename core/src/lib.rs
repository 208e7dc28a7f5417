pub mod context;
pub mod journal;
pub mod notify;
pub mod route;
pub mod router;
pub mod tracking;

// Re-exports for convenience
pub use context::AppConfig;
pub use journal::{InvalidEventError, JournalEvent};
pub use notify::{NotificationIntent, NotificationPolicy};
pub use route::{FormatError, Route, Waypoint};
pub use router::{ClipboardSink, Dispatch, EventRouter, NotificationSink, SinkError};
pub use tracking::{Advance, NextWaypoint, Position, ProgressTracker};
