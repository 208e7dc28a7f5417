//! Route table
//!
//! A route is the ordered list of waypoints exported by a route planner.
//! It is parsed once and never mutated; a refresh builds a new [`Route`].

mod table;

pub use table::{FormatError, Route, Waypoint, load, load_file};
