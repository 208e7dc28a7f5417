//! Route progress tracking
//!
//! ```text
//!   Arrived { system }           reload(path)
//!          │                          │
//!          ▼                          ▼
//! ┌──────────────────────────────────────────────┐
//! │ ProgressTracker                              │
//! │   Option<TrackedRoute { route, index }>      │
//! └──────────────────────────────────────────────┘
//!          │
//!          ▼
//!   Advance::Position / Advance::NoMatch
//! ```
//!
//! The route and the current index live in one value, so a reload swaps
//! both at once and nothing can observe a fresh route with a stale index.

mod progress;

pub use progress::{Advance, NextWaypoint, Position, ProgressTracker};
