//! Event routing
//!
//! The [`EventRouter`] is the single entry point the host adapter calls. It
//! owns the tracker, the policy and the outbound sinks, so no state lives
//! outside it. Events are handled one at a time to completion.

mod sink;

#[cfg(test)]
mod router_tests;

pub use sink::{ClipboardSink, NotificationSink, SinkError};

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::journal::{self, InvalidEventError, JournalEvent, TimedEvent};
use crate::notify::{NotificationIntent, NotificationPolicy};
use crate::route::FormatError;
use crate::tracking::{Advance, NextWaypoint, ProgressTracker};

/// Outcome of handling one well-formed event
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub event: JournalEvent,
    /// Tracker answer, present for arrival events only
    pub advance: Option<Advance>,
    pub intents: Vec<NotificationIntent>,
    /// System name placed on the clipboard, if any
    pub clipboard: Option<String>,
}

/// Dispatches journal events to the tracker and policy, then to the sinks.
pub struct EventRouter<N, C> {
    tracker: ProgressTracker,
    policy: NotificationPolicy,
    notifier: N,
    clipboard: C,
    route_path: Option<PathBuf>,
}

impl<N: NotificationSink, C: ClipboardSink> EventRouter<N, C> {
    pub fn new(tracker: ProgressTracker, policy: NotificationPolicy, notifier: N, clipboard: C) -> Self {
        Self {
            tracker,
            policy,
            notifier,
            clipboard,
            route_path: None,
        }
    }

    /// Load the route at startup. A failure leaves the tracker unloaded and
    /// is returned for reporting; later reloads use the same path.
    pub fn load_route(&mut self, path: &Path) -> Result<(), FormatError> {
        self.route_path = Some(path.to_path_buf());
        match self.tracker.reload(path) {
            Ok(()) => {
                self.log_route_loaded(path);
                Ok(())
            }
            Err(e) => {
                self.tracker.unload();
                Err(e)
            }
        }
    }

    /// Re-read the route from the startup path.
    /// On failure the previous route stays active.
    pub fn reload_route(&mut self) -> Result<(), FormatError> {
        let Some(path) = self.route_path.clone() else {
            return Err(FormatError::NoRouteFile);
        };
        self.tracker.reload(&path)?;
        self.log_route_loaded(&path);
        Ok(())
    }

    /// Handle one structured journal record.
    pub fn handle(&mut self, record: &Value) -> Result<Dispatch, InvalidEventError> {
        let event = journal::parse_record(record)?;
        Ok(self.dispatch(event))
    }

    /// Handle one raw journal line, logging and dropping malformed ones.
    pub fn handle_line(&mut self, line: &str) -> Option<Dispatch> {
        match journal::parse_line(line) {
            Ok(event) => Some(self.dispatch(event)),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed journal event");
                None
            }
        }
    }

    /// Update the tracker from past journal lines without notifying.
    /// Returns how many arrivals matched the route.
    pub fn prime<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> usize {
        let mut matched = 0;
        for line in lines {
            let Ok(TimedEvent {
                event: JournalEvent::Arrived { system, .. },
                ..
            }) = journal::parse_line(line)
            else {
                continue;
            };
            if let Advance::Position(_) = self.tracker.observe_arrival(&system) {
                matched += 1;
            }
        }
        if let Some(pos) = self.tracker.snapshot() {
            tracing::info!(system = %pos.system, index = pos.index, "Resumed route position from journal");
        }
        matched
    }

    fn dispatch(&mut self, timed: TimedEvent) -> Dispatch {
        let TimedEvent { timestamp, event } = timed;

        tracing::trace!(kind = event.kind_name(), ?timestamp, "Journal event");

        let advance = match &event {
            JournalEvent::Arrived { system, .. } => Some(self.observe(system)),
            JournalEvent::Other { .. } => None,
            JournalEvent::JumpStarted { target_system, .. } => {
                if let Some(target) = target_system {
                    tracing::debug!(?timestamp, target = %target, "Hyperspace jump started");
                }
                None
            }
        };

        let intents = self.policy.evaluate(&event, advance.as_ref());
        for intent in &intents {
            if let Err(e) = self.notifier.send(intent) {
                tracing::warn!(error = %e, channel = %intent.id, "Failed to send notification");
            }
        }

        let clipboard = match &advance {
            Some(Advance::Position(pos)) => pos.next.system().map(str::to_string),
            _ => None,
        };
        if let Some(next) = &clipboard
            && let Err(e) = self.clipboard.set_text(next)
        {
            tracing::warn!(error = %e, "Failed to copy next waypoint to clipboard");
        }

        Dispatch {
            event,
            advance,
            intents,
            clipboard,
        }
    }

    fn observe(&mut self, system: &str) -> Advance {
        let advance = self.tracker.observe_arrival(system);
        match &advance {
            Advance::Position(pos) => match &pos.next {
                NextWaypoint::System(next) => tracing::info!(
                    system = %pos.system,
                    next = %next,
                    remaining_ly = pos.distance_remaining,
                    progress_pct = pos.progress_percent,
                    "Arrived at waypoint {}/{}",
                    pos.index + 1,
                    self.tracker.route().map_or(0, |r| r.len()),
                ),
                NextWaypoint::RouteComplete => {
                    tracing::info!(system = %pos.system, "Route complete")
                }
            },
            Advance::NoMatch => tracing::debug!(system = %system, "System not on route"),
        }
        advance
    }

    fn log_route_loaded(&self, path: &Path) {
        if let Some(route) = self.tracker.route() {
            tracing::info!(
                path = %path.display(),
                waypoints = route.len(),
                total_ly = route.total_distance(),
                destination = %route.destination().system_name,
                "Route loaded"
            );
        }
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn policy(&self) -> &NotificationPolicy {
        &self.policy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn route_path(&self) -> Option<&Path> {
        self.route_path.as_deref()
    }
}
