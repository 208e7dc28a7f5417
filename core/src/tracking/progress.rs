use std::path::Path;

use crate::route::{self, FormatError, Route};

/// What follows the waypoint the ship just reached
#[derive(Debug, Clone, PartialEq)]
pub enum NextWaypoint {
    System(String),
    /// The current waypoint is the last entry of the route
    RouteComplete,
}

impl NextWaypoint {
    pub fn system(&self) -> Option<&str> {
        match self {
            Self::System(name) => Some(name),
            Self::RouteComplete => None,
        }
    }
}

/// Position on the route after a matched arrival
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub index: usize,
    pub system: String,
    pub refuel_required: bool,
    pub distance_remaining: f64,
    pub total_distance: f64,
    pub progress_percent: f64,
    pub next: NextWaypoint,
}

/// Result of observing an arrival
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Position(Position),
    /// System is not on the route, or no route is loaded
    NoMatch,
}

#[derive(Debug, Clone)]
struct TrackedRoute {
    route: Route,
    current_index: Option<usize>,
}

impl TrackedRoute {
    fn position_at(&self, index: usize) -> Position {
        let waypoint = &self.route.waypoints()[index];
        let total_distance = self.route.total_distance();
        let progress_percent = if total_distance == 0.0 {
            100.0
        } else {
            (1.0 - waypoint.distance_remaining / total_distance) * 100.0
        };
        let next = match self.route.get(index + 1) {
            Some(wp) => NextWaypoint::System(wp.system_name.clone()),
            None => NextWaypoint::RouteComplete,
        };

        Position {
            index,
            system: waypoint.system_name.clone(),
            refuel_required: waypoint.refuel_required,
            distance_remaining: waypoint.distance_remaining,
            total_distance,
            progress_percent,
            next,
        }
    }
}

/// Current position along the loaded route.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    tracked: Option<TrackedRoute>,
}

impl ProgressTracker {
    /// Tracker with no route loaded
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(route: Route) -> Self {
        let mut tracker = Self::new();
        tracker.install(route);
        tracker
    }

    /// Match an arrival against the route, moving the current index on a hit.
    pub fn observe_arrival(&mut self, system_name: &str) -> Advance {
        let Some(tracked) = self.tracked.as_mut() else {
            return Advance::NoMatch;
        };
        let Some(index) = tracked.route.lookup(system_name) else {
            return Advance::NoMatch;
        };

        tracked.current_index = Some(index);
        Advance::Position(tracked.position_at(index))
    }

    /// Parse `path` and replace the route, clearing the current index.
    /// On error the previous route and index are kept.
    pub fn reload(&mut self, path: &Path) -> Result<(), FormatError> {
        let route = route::load_file(path)?;
        self.install(route);
        Ok(())
    }

    /// Replace the route with an already-parsed one, clearing the current index.
    pub fn install(&mut self, route: Route) {
        self.tracked = Some(TrackedRoute {
            route,
            current_index: None,
        });
    }

    /// Drop the route, returning to the unloaded state.
    pub fn unload(&mut self) {
        self.tracked = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.tracked.is_some()
    }

    pub fn route(&self) -> Option<&Route> {
        self.tracked.as_ref().map(|t| &t.route)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.tracked.as_ref().and_then(|t| t.current_index)
    }

    /// Position for the current index, without observing anything
    pub fn snapshot(&self) -> Option<Position> {
        let tracked = self.tracked.as_ref()?;
        tracked.current_index.map(|i| tracked.position_at(i))
    }

    /// Waypoints left after the current one
    pub fn remaining_jumps(&self) -> Option<usize> {
        let tracked = self.tracked.as_ref()?;
        let index = tracked.current_index?;
        Some(tracked.route.len() - 1 - index)
    }
}
