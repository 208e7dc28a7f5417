//! Tests for the event router
//!
//! Drives the router with journal records the way the host adapter does and
//! checks what reaches the sinks.

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

use super::*;
use crate::notify::channel;
use crate::route;

const SAMPLE: &str = "\"System Name\",\"Distance Remaining\",\"Refuel\"\n\
                      \"Alpha\",\"100.0\",\"No\"\n\
                      \"Beta\",\"40.0\",\"Yes\"\n\
                      \"Gamma\",\"0.0\",\"No\"\n";

type TestRouter = EventRouter<RecordingNotifier, RecordingClipboard>;

fn route_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn make_router() -> TestRouter {
    let tracker = ProgressTracker::with_route(route::load(SAMPLE.as_bytes()).unwrap());
    EventRouter::new(
        tracker,
        NotificationPolicy::default(),
        RecordingNotifier::default(),
        RecordingClipboard::default(),
    )
}

fn fsd_jump(system: &str) -> Value {
    json!({ "timestamp": "2025-01-04T18:22:41Z", "event": "FSDJump", "StarSystem": system })
}

/// Collects intents in memory
#[derive(Debug, Default)]
struct RecordingNotifier {
    sent: Vec<NotificationIntent>,
}

impl NotificationSink for RecordingNotifier {
    fn send(&mut self, intent: &NotificationIntent) -> Result<(), SinkError> {
        self.sent.push(intent.clone());
        Ok(())
    }
}

/// Remembers every clipboard write in memory.
#[derive(Debug, Default)]
struct RecordingClipboard {
    history: Vec<String>,
}

impl RecordingClipboard {
    fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.history.push(text.to_string());
        Ok(())
    }
}

/// Discards clipboard writes.
#[derive(Debug, Default, Clone, Copy)]
struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Notifier that always fails
struct BrokenOverlay;

impl NotificationSink for BrokenOverlay {
    fn send(&mut self, _intent: &NotificationIntent) -> Result<(), SinkError> {
        Err(SinkError::Notification("overlay not running".to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arrivals
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_arrival_notifies_and_copies_next_system() {
    let mut router = make_router();
    let dispatch = router.handle(&fsd_jump("Beta")).unwrap();

    let ids: Vec<_> = dispatch.intents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![channel::REFUEL, channel::NEXT_WAYPOINT]);
    assert_eq!(dispatch.clipboard.as_deref(), Some("Gamma"));

    assert_eq!(router.notifier().sent, dispatch.intents);
    assert_eq!(router.clipboard().last(), Some("Gamma"));
    assert_eq!(router.tracker().current_index(), Some(1));
}

#[test]
fn test_location_event_counts_as_arrival() {
    let mut router = make_router();
    let record = json!({ "event": "Location", "StarSystem": "Alpha", "Docked": false });
    let dispatch = router.handle(&record).unwrap();

    assert_eq!(dispatch.intents.len(), 1);
    assert_eq!(router.clipboard().last(), Some("Beta"));
}

#[test]
fn test_destination_reports_completion_without_clipboard() {
    let mut router = make_router();
    let dispatch = router.handle(&fsd_jump("Gamma")).unwrap();

    assert_eq!(dispatch.intents.len(), 1);
    assert_eq!(dispatch.intents[0].text, "Route complete: arrived at Gamma");
    assert_eq!(dispatch.clipboard, None);
    assert!(router.clipboard().history.is_empty());
}

#[test]
fn test_off_route_arrival_changes_nothing() {
    let mut router = make_router();
    router.handle(&fsd_jump("Alpha")).unwrap();
    let sent_before = router.notifier().sent.len();

    let dispatch = router.handle(&fsd_jump("Sol")).unwrap();

    assert_eq!(dispatch.advance, Some(Advance::NoMatch));
    assert!(dispatch.intents.is_empty());
    assert_eq!(router.notifier().sent.len(), sent_before);
    assert_eq!(router.tracker().current_index(), Some(0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Jumps and other events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_neutron_jump_warning() {
    let mut router = make_router();
    let record = json!({
        "event": "StartJump",
        "JumpType": "Hyperspace",
        "StarSystem": "Gamma",
        "StarClass": "N"
    });
    let dispatch = router.handle(&record).unwrap();

    assert_eq!(dispatch.intents.len(), 1);
    assert_eq!(dispatch.intents[0].id, "neutron-warning");
    assert_eq!(dispatch.advance, None);
    assert_eq!(dispatch.clipboard, None);
}

#[test]
fn test_unknown_events_are_ignored() {
    let mut router = make_router();
    let dispatch = router.handle(&json!({ "event": "FuelScoop", "Scooped": 5.0 })).unwrap();

    assert!(dispatch.intents.is_empty());
    assert!(router.notifier().sent.is_empty());
}

#[test]
fn test_malformed_event_rejected_then_processing_continues() {
    let mut router = make_router();

    assert!(matches!(
        router.handle(&json!({ "event": "FSDJump" })),
        Err(InvalidEventError::MissingField { .. })
    ));
    assert!(router.handle_line("{ not json").is_none());

    let dispatch = router.handle_line(r#"{"event":"FSDJump","StarSystem":"Beta"}"#);
    assert!(dispatch.is_some());
    assert_eq!(router.tracker().current_index(), Some(1));
}

#[test]
fn test_bad_timestamp_does_not_drop_event() {
    let mut router = make_router();
    let record = json!({ "timestamp": "2025-01-04 18:22:41", "event": "FSDJump", "StarSystem": "Beta" });
    let dispatch = router.handle(&record).unwrap();

    assert!(matches!(dispatch.advance, Some(Advance::Position(_))));
    assert_eq!(router.tracker().current_index(), Some(1));

    let dispatch = router.handle(&json!({ "timestamp": 12345, "event": "Music" })).unwrap();
    assert_eq!(
        dispatch.event,
        JournalEvent::Other {
            kind: "Music".to_string()
        }
    );
    assert!(dispatch.intents.is_empty());
}

#[test]
fn test_sink_failure_does_not_fail_event() {
    let tracker = ProgressTracker::with_route(route::load(SAMPLE.as_bytes()).unwrap());
    let mut router = EventRouter::new(tracker, NotificationPolicy::default(), BrokenOverlay, NoClipboard);

    let dispatch = router.handle(&fsd_jump("Beta")).unwrap();
    assert_eq!(dispatch.intents.len(), 2);
    assert_eq!(router.tracker().current_index(), Some(1));
}

// ─────────────────────────────────────────────────────────────────────────────
// Route loading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reload_resets_position() {
    let file = route_file(SAMPLE);
    let mut router = EventRouter::new(
        ProgressTracker::new(),
        NotificationPolicy::default(),
        RecordingNotifier::default(),
        RecordingClipboard::default(),
    );
    router.load_route(file.path()).unwrap();
    router.handle(&fsd_jump("Beta")).unwrap();
    assert_eq!(router.tracker().current_index(), Some(1));

    router.reload_route().unwrap();
    assert_eq!(router.tracker().current_index(), None);
    assert!(router.tracker().is_loaded());
}

#[test]
fn test_failed_startup_load_leaves_tracker_unloaded() {
    let file = route_file("System Name,Distance Remaining,Refuel\nAlpha,far,No\n");
    let mut router = make_router();

    assert!(router.load_route(file.path()).is_err());
    assert!(!router.tracker().is_loaded());

    // Events still flow; nothing matches
    let dispatch = router.handle(&fsd_jump("Alpha")).unwrap();
    assert_eq!(dispatch.advance, Some(Advance::NoMatch));
    assert!(dispatch.intents.is_empty());
}

#[test]
fn test_reload_without_path() {
    let mut router = make_router();
    assert!(matches!(router.reload_route(), Err(FormatError::NoRouteFile)));
    assert!(router.tracker().is_loaded());
}

#[test]
fn test_prime_restores_position_silently() {
    let mut router = make_router();
    let lines = [
        r#"{"event":"Fileheader","gameversion":"4.0"}"#,
        r#"{"event":"Location","StarSystem":"Alpha"}"#,
        "garbage",
        r#"{"event":"FSDJump","StarSystem":"Beta"}"#,
        r#"{"event":"FSDJump","StarSystem":"Sol"}"#,
    ];

    assert_eq!(router.prime(lines), 2);
    assert_eq!(router.tracker().current_index(), Some(1));
    assert!(router.notifier().sent.is_empty());
    assert!(router.clipboard().history.is_empty());
}
