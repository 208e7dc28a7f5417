use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

const COL_SYSTEM_NAME: &str = "System Name";
const COL_DISTANCE_REMAINING: &str = "Distance Remaining";
const COL_REFUEL: &str = "Refuel";

/// One stop along the route
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub system_name: String,
    /// Light years left to the destination once this waypoint is reached
    pub distance_remaining: f64,
    pub refuel_required: bool,
}

/// Ordered, non-empty list of waypoints. Index 0 is the starting system.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// Build a route from already-validated waypoints.
    /// Returns `FormatError::Empty` for an empty list.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, FormatError> {
        if waypoints.is_empty() {
            return Err(FormatError::Empty);
        }
        Ok(Self { waypoints })
    }

    /// First index whose system name equals `system_name`.
    ///
    /// Repeated systems always resolve to their first occurrence, so a route
    /// that loops back through a system reports the earlier position.
    pub fn lookup(&self, system_name: &str) -> Option<usize> {
        self.waypoints
            .iter()
            .position(|wp| wp.system_name == system_name)
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Distance from the first waypoint to the destination
    pub fn total_distance(&self) -> f64 {
        self.waypoints[0].distance_remaining
    }

    pub fn destination(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }
}

/// Errors produced while parsing a route source
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("route source has no header row")]
    MissingHeader,

    #[error("route header is missing the \"{0}\" column")]
    MissingColumn(&'static str),

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid distance \"{value}\"")]
    InvalidDistance { line: u64, value: String },

    #[error("line {line}: distance remaining increases along the route")]
    NotMonotonic { line: u64 },

    #[error("line {line}: final waypoint has {distance} ly remaining, expected 0")]
    UnfinishedRoute { line: u64, distance: f64 },

    #[error("route source contains no waypoints")]
    Empty,

    #[error("no route file configured")]
    NoRouteFile,

    #[error("failed to read route {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed route source: {0}")]
    Csv(#[from] csv::Error),
}

/// Open, read fully and close a route file.
pub fn load_file(path: &Path) -> Result<Route, FormatError> {
    let file = File::open(path).map_err(|e| FormatError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load(BufReader::new(file))
}

/// Parse a route from a quoted, comma-separated source with a header row.
pub fn load<R: Read>(source: R) -> Result<Route, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(FormatError::MissingHeader);
    }

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(FormatError::MissingColumn(name))
    };
    let name_col = column(COL_SYSTEM_NAME)?;
    let distance_col = column(COL_DISTANCE_REMAINING)?;
    let refuel_col = column(COL_REFUEL)?;

    let mut waypoints = Vec::new();
    let mut previous_distance = f64::INFINITY;
    let mut last_line = 0;

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != headers.len() {
            return Err(FormatError::FieldCount {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let raw_distance = record[distance_col].trim();
        let distance_remaining = raw_distance
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| FormatError::InvalidDistance {
                line,
                value: raw_distance.to_string(),
            })?;

        if distance_remaining > previous_distance {
            return Err(FormatError::NotMonotonic { line });
        }
        previous_distance = distance_remaining;
        last_line = line;

        waypoints.push(Waypoint {
            system_name: record[name_col].to_string(),
            distance_remaining,
            refuel_required: record[refuel_col].trim().eq_ignore_ascii_case("yes"),
        });
    }

    // The destination is where the remaining distance reaches zero
    if !waypoints.is_empty() && previous_distance != 0.0 {
        return Err(FormatError::UnfinishedRoute {
            line: last_line,
            distance: previous_distance,
        });
    }

    Route::new(waypoints)
}
