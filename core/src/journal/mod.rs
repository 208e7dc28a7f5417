//! Game journal events
//!
//! The journal is a newline-delimited JSON log. Only the handful of event
//! kinds that move the ship between systems are classified; everything else
//! is carried as [`JournalEvent::Other`] and ignored downstream.

mod event;
pub mod reader;

pub use event::{ArrivalSource, InvalidEventError, JournalEvent, JumpType, TimedEvent, parse_line, parse_record};
