//! Notification appearance settings
//!
//! Every notification kind carries its own [`NotificationStyle`]; the defaults
//! match the overlay layout the plugin has always shipped with.

use serde::{Deserialize, Serialize};

/// Star class reported by the journal for neutron stars.
pub const HAZARD_NEUTRON_STAR: &str = "N";

// ═══════════════════════════════════════════════════════════════════════════
// Styles
// ═══════════════════════════════════════════════════════════════════════════

/// Text size requested from the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSize {
    #[default]
    Small,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }
}

/// Screen position of a message, in overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How a single notification kind is displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStyle {
    /// Hex color, `#rrggbb`
    pub color: String,
    pub placement: Placement,
    pub ttl_secs: u32,
    #[serde(default)]
    pub size: TextSize,
}

impl NotificationStyle {
    pub fn new(color: &str, placement: Placement, ttl_secs: u32, size: TextSize) -> Self {
        Self {
            color: color.to_string(),
            placement,
            ttl_secs,
            size,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════════════

/// Notification settings section of the app config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Star classes that trigger the hazard warning when jumping into them
    #[serde(default = "default_hazardous_star_classes")]
    pub hazardous_star_classes: Vec<String>,

    /// Show a "Jumping to ..." message at every hyperspace jump
    #[serde(default)]
    pub announce_jumps: bool,

    /// Show an "Arrived at ..." message after every jump
    #[serde(default)]
    pub announce_arrivals: bool,

    /// Swap `.` and `,` in displayed numbers
    #[serde(default)]
    pub european_numbers: bool,

    #[serde(default = "default_hazard_style")]
    pub hazard: NotificationStyle,

    #[serde(default = "default_jump_style")]
    pub jump: NotificationStyle,

    #[serde(default = "default_arrival_style")]
    pub arrival: NotificationStyle,

    #[serde(default = "default_refuel_style")]
    pub refuel: NotificationStyle,

    #[serde(default = "default_next_waypoint_style")]
    pub next_waypoint: NotificationStyle,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            hazardous_star_classes: default_hazardous_star_classes(),
            announce_jumps: false,
            announce_arrivals: false,
            european_numbers: false,
            hazard: default_hazard_style(),
            jump: default_jump_style(),
            arrival: default_arrival_style(),
            refuel: default_refuel_style(),
            next_waypoint: default_next_waypoint_style(),
        }
    }
}

impl NotificationSettings {
    /// Whether jumping into a star of this class warrants a warning
    pub fn is_hazardous(&self, star_class: &str) -> bool {
        self.hazardous_star_classes
            .iter()
            .any(|class| class == star_class)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_hazardous_star_classes() -> Vec<String> {
    vec![HAZARD_NEUTRON_STAR.to_string()]
}

fn default_hazard_style() -> NotificationStyle {
    NotificationStyle::new("#ff3b30", Placement::new(520, 80), 5, TextSize::Large) // Red
}

fn default_jump_style() -> NotificationStyle {
    NotificationStyle::new("#aaf9ff", Placement::new(520, 120), 3, TextSize::Large) // Cyan
}

fn default_arrival_style() -> NotificationStyle {
    NotificationStyle::new("#aaf9ff", Placement::new(520, 120), 3, TextSize::Large) // Cyan
}

fn default_refuel_style() -> NotificationStyle {
    NotificationStyle::new("#ff9f0a", Placement::new(520, 160), 20, TextSize::Large) // Orange
}

fn default_next_waypoint_style() -> NotificationStyle {
    NotificationStyle::new("#aaf9ff", Placement::new(520, 200), 10, TextSize::Small) // Cyan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_uses_defaults() {
        let settings: NotificationSettings = toml::from_str("").unwrap();
        assert_eq!(settings, NotificationSettings::default());
        assert!(settings.is_hazardous("N"));
        assert!(!settings.is_hazardous("K"));
    }

    #[test]
    fn test_text_size_names_match_serde() {
        for size in [TextSize::Small, TextSize::Large] {
            let style: NotificationStyle = toml::from_str(&format!(
                "color = \"#000000\"\nplacement = {{ x = 0, y = 0 }}\nttl_secs = 1\nsize = \"{}\"\n",
                size.as_str()
            ))
            .unwrap();
            assert_eq!(style.size, size);
        }
    }

    #[test]
    fn test_parse_partial_settings() {
        let toml = r##"
hazardous_star_classes = ["N", "DA"]
announce_jumps = true

[refuel]
color = "#ffffff"
placement = { x = 10, y = 20 }
ttl_secs = 30
size = "small"
"##;

        let settings: NotificationSettings = toml::from_str(toml).unwrap();
        assert!(settings.announce_jumps);
        assert!(!settings.announce_arrivals);
        assert_eq!(settings.arrival.placement, Placement::new(520, 120));
        assert!(settings.is_hazardous("DA"));
        assert_eq!(settings.refuel.color, "#ffffff");
        assert_eq!(settings.refuel.placement, Placement::new(10, 20));
        assert_eq!(settings.refuel.ttl_secs, 30);
        assert_eq!(settings.refuel.size, TextSize::Small);
        // Untouched sections keep their defaults
        assert_eq!(settings.hazard.ttl_secs, 5);
        assert_eq!(settings.hazard.size, TextSize::Large);
    }
}
