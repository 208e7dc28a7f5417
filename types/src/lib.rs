//! Shared configuration types for Route Copilot.
//!
//! These types are loaded from the user's config file and consumed by the
//! notification policy in `copilot-core`.

pub mod formatting;
mod notification;

pub use notification::{
    HAZARD_NEUTRON_STAR, NotificationSettings, NotificationStyle, Placement, TextSize,
};
