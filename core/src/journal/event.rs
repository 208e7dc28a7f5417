use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Kind of jump announced by a `StartJump` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpType {
    Hyperspace,
    Supercruise,
    Other(String),
}

impl JumpType {
    fn from_journal(s: &str) -> Self {
        match s {
            "Hyperspace" => Self::Hyperspace,
            "Supercruise" => Self::Supercruise,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Which journal event placed the ship in a system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalSource {
    /// `FSDJump`: arrived after a hyperspace jump
    Jump,
    /// `Location`: written at game load and after respawn
    Location,
    /// `CarrierJump`: docked on a fleet carrier that jumped
    CarrierJump,
}

/// A journal record reduced to what route tracking cares about
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    JumpStarted {
        jump_type: JumpType,
        /// Only present for hyperspace jumps
        target_system: Option<String>,
        /// Primary star class of the target system, hyperspace only
        star_class: Option<String>,
    },
    Arrived {
        system: String,
        source: ArrivalSource,
    },
    Other {
        kind: String,
    },
}

impl JournalEvent {
    pub fn kind_name(&self) -> &str {
        match self {
            Self::JumpStarted { .. } => "StartJump",
            Self::Arrived {
                source: ArrivalSource::Jump,
                ..
            } => "FSDJump",
            Self::Arrived {
                source: ArrivalSource::Location,
                ..
            } => "Location",
            Self::Arrived {
                source: ArrivalSource::CarrierJump,
                ..
            } => "CarrierJump",
            Self::Other { kind } => kind,
        }
    }
}

/// Journal event with its (optional) timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub event: JournalEvent,
}

/// A journal record that cannot be classified
#[derive(Debug, Error)]
pub enum InvalidEventError {
    #[error("journal line is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("journal record is not a JSON object")]
    NotAnObject,

    #[error("{event} event is missing required field \"{field}\"")]
    MissingField { event: String, field: &'static str },

    #[error("{event} event has a non-string \"{field}\" field")]
    InvalidField { event: String, field: &'static str },
}

/// Parse one raw journal line.
pub fn parse_line(line: &str) -> Result<TimedEvent, InvalidEventError> {
    let value: Value = serde_json::from_str(line.trim())?;
    parse_record(&value)
}

/// Classify a structured journal record.
pub fn parse_record(record: &Value) -> Result<TimedEvent, InvalidEventError> {
    let obj = record.as_object().ok_or(InvalidEventError::NotAnObject)?;

    let kind = match obj.get("event") {
        Some(Value::String(s)) => s.as_str(),
        Some(_) => {
            return Err(InvalidEventError::InvalidField {
                event: "<unknown>".to_string(),
                field: "event",
            });
        }
        None => {
            return Err(InvalidEventError::MissingField {
                event: "<unknown>".to_string(),
                field: "event",
            });
        }
    };

    let timestamp = parse_timestamp(obj, kind);

    let event = match kind {
        "StartJump" => {
            let jump_type = JumpType::from_journal(required_str(obj, kind, "JumpType")?);
            let (target_system, star_class) = if jump_type == JumpType::Hyperspace {
                (
                    Some(required_str(obj, kind, "StarSystem")?.to_string()),
                    optional_str(obj, kind, "StarClass")?.map(str::to_string),
                )
            } else {
                (None, None)
            };
            JournalEvent::JumpStarted {
                jump_type,
                target_system,
                star_class,
            }
        }
        "FSDJump" => arrived(obj, kind, ArrivalSource::Jump)?,
        "Location" => arrived(obj, kind, ArrivalSource::Location)?,
        "CarrierJump" => arrived(obj, kind, ArrivalSource::CarrierJump)?,
        other => JournalEvent::Other {
            kind: other.to_string(),
        },
    };

    Ok(TimedEvent { timestamp, event })
}

/// Timestamps only feed log lines, so a bad one never rejects the record.
fn parse_timestamp(obj: &Map<String, Value>, kind: &str) -> Option<DateTime<Utc>> {
    let raw = obj.get("timestamp")?;
    let parsed = raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc));
    if parsed.is_none() && !raw.is_null() {
        tracing::debug!(kind = %kind, timestamp = %raw, "Ignoring unparseable journal timestamp");
    }
    parsed
}

fn arrived(
    obj: &Map<String, Value>,
    kind: &str,
    source: ArrivalSource,
) -> Result<JournalEvent, InvalidEventError> {
    Ok(JournalEvent::Arrived {
        system: required_str(obj, kind, "StarSystem")?.to_string(),
        source,
    })
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    kind: &str,
    field: &'static str,
) -> Result<&'a str, InvalidEventError> {
    optional_str(obj, kind, field)?.ok_or_else(|| InvalidEventError::MissingField {
        event: kind.to_string(),
        field,
    })
}

fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    kind: &str,
    field: &'static str,
) -> Result<Option<&'a str>, InvalidEventError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(InvalidEventError::InvalidField {
            event: kind.to_string(),
            field,
        }),
    }
}
