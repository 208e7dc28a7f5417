use copilot_types::NotificationSettings;
use copilot_types::formatting::{format_distance, format_percent};

use super::intent::{NotificationIntent, channel};
use crate::journal::{ArrivalSource, JournalEvent, JumpType};
use crate::tracking::{Advance, NextWaypoint, Position};

/// Decides which messages an event deserves.
#[derive(Debug, Clone, Default)]
pub struct NotificationPolicy {
    settings: NotificationSettings,
}

impl NotificationPolicy {
    pub fn new(settings: NotificationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Intents for one event, in display priority order.
    ///
    /// `advance` is the tracker's answer for arrival events and is ignored
    /// for every other kind.
    pub fn evaluate(&self, event: &JournalEvent, advance: Option<&Advance>) -> Vec<NotificationIntent> {
        let mut intents = Vec::new();

        match event {
            JournalEvent::JumpStarted {
                jump_type: JumpType::Hyperspace,
                target_system,
                star_class,
            } => {
                intents.extend(self.hazard_warning(target_system.as_deref(), star_class.as_deref()));
                intents.extend(self.jump_announcement(target_system.as_deref()));
            }
            JournalEvent::Arrived { system, source } => {
                if let Some(Advance::Position(pos)) = advance {
                    intents.extend(self.refuel_reminder(pos));
                    intents.push(self.next_waypoint(pos));
                }
                intents.extend(self.arrival_announcement(system, *source));
            }
            _ => {}
        }

        intents
    }

    fn hazard_warning(&self, target: Option<&str>, star_class: Option<&str>) -> Option<NotificationIntent> {
        let class = star_class?;
        if !self.settings.is_hazardous(class) {
            return None;
        }
        let text = match target {
            Some(system) => format!("Warning: {} is a class {} star, throttle down", system, class),
            None => format!("Warning: jumping into a class {} star, throttle down", class),
        };
        Some(NotificationIntent::styled(channel::HAZARD, text, &self.settings.hazard))
    }

    fn jump_announcement(&self, target: Option<&str>) -> Option<NotificationIntent> {
        if !self.settings.announce_jumps {
            return None;
        }
        let text = format!("Jumping to {}", target?);
        Some(NotificationIntent::styled(channel::JUMP, text, &self.settings.jump))
    }

    /// Location events fire at game load, so only real jumps are announced
    fn arrival_announcement(&self, system: &str, source: ArrivalSource) -> Option<NotificationIntent> {
        if !self.settings.announce_arrivals || source == ArrivalSource::Location {
            return None;
        }
        Some(NotificationIntent::styled(
            channel::ARRIVAL,
            format!("Arrived at {}", system),
            &self.settings.arrival,
        ))
    }

    fn refuel_reminder(&self, pos: &Position) -> Option<NotificationIntent> {
        pos.refuel_required.then(|| {
            NotificationIntent::styled(
                channel::REFUEL,
                format!("Refuel at {} before jumping", pos.system),
                &self.settings.refuel,
            )
        })
    }

    fn next_waypoint(&self, pos: &Position) -> NotificationIntent {
        let eu = self.settings.european_numbers;
        let text = match &pos.next {
            NextWaypoint::System(next) => format!(
                "Next: {} | {} remaining | {} complete",
                next,
                format_distance(pos.distance_remaining, eu),
                format_percent(pos.progress_percent, eu),
            ),
            NextWaypoint::RouteComplete => format!("Route complete: arrived at {}", pos.system),
        };
        NotificationIntent::styled(channel::NEXT_WAYPOINT, text, &self.settings.next_waypoint)
    }
}
