use copilot_types::{NotificationStyle, TextSize};
use serde::{Deserialize, Serialize};

/// Overlay channel ids. The overlay replaces a visible message when a new
/// one arrives on the same channel.
pub mod channel {
    pub const HAZARD: &str = "neutron-warning";
    pub const JUMP: &str = "jump";
    pub const ARRIVAL: &str = "arrival";
    pub const REFUEL: &str = "refuel";
    pub const NEXT_WAYPOINT: &str = "next-waypoint";
}

/// Request to show a transient message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub id: String,
    pub text: String,
    pub color: String,
    pub x: i32,
    pub y: i32,
    pub ttl_secs: u32,
    pub size: TextSize,
}

impl NotificationIntent {
    pub fn styled(id: &str, text: String, style: &NotificationStyle) -> Self {
        Self {
            id: id.to_string(),
            text,
            color: style.color.clone(),
            x: style.placement.x,
            y: style.placement.y,
            ttl_secs: style.ttl_secs,
            size: style.size,
        }
    }
}
