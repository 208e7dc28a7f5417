//! Notification decisions
//!
//! [`NotificationPolicy`] is a pure function from a journal event and the
//! tracker's answer to a list of [`NotificationIntent`]s. It knows nothing
//! about how the overlay draws them.

mod intent;
mod policy;


pub use intent::{NotificationIntent, channel};
pub use policy::NotificationPolicy;
