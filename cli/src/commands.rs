use copilot_core::context::AppConfig;
use copilot_core::router::EventRouter;
use copilot_core::tracking::NextWaypoint;
use copilot_types::formatting::{format_distance, format_percent};

use crate::sinks::{ConsoleOverlay, SystemClipboard};

pub type CliRouter = EventRouter<ConsoleOverlay, SystemClipboard>;

/// Re-read the route file from disk.
pub fn reload(router: &mut CliRouter) {
    match router.reload_route() {
        Ok(()) => {
            let len = router.tracker().route().map_or(0, |r| r.len());
            println!("Route reloaded: {} waypoints", len);
        }
        Err(e) => {
            tracing::error!(error = %e, "Route reload failed");
            println!("Route reload failed, keeping previous route: {}", e);
        }
    }
}

pub fn show_status(router: &CliRouter) {
    let tracker = router.tracker();
    let eu = router.policy().settings().european_numbers;

    let Some(route) = tracker.route() else {
        println!("No route loaded");
        return;
    };
    let Some(pos) = tracker.snapshot() else {
        println!(
            "Route loaded ({} waypoints, {}), not on route yet",
            route.len(),
            format_distance(route.total_distance(), eu)
        );
        return;
    };

    println!("Current:   {} ({}/{})", pos.system, pos.index + 1, route.len());
    match &pos.next {
        NextWaypoint::System(next) => println!("Next:      {}", next),
        NextWaypoint::RouteComplete => println!("Next:      route complete"),
    }
    println!("Remaining: {}", format_distance(pos.distance_remaining, eu));
    println!("Progress:  {}", format_percent(pos.progress_percent, eu));
    if let Some(jumps) = tracker.remaining_jumps() {
        println!("Waypoints left: {}", jumps);
    }
    if pos.refuel_required {
        println!("Refuel required here");
    }
}

/// List the route, marking the current waypoint
pub fn show_route(router: &CliRouter) {
    let tracker = router.tracker();
    let Some(route) = tracker.route() else {
        println!("No route loaded");
        return;
    };
    let eu = router.policy().settings().european_numbers;
    let current = tracker.current_index();

    for (i, wp) in route.waypoints().iter().enumerate() {
        let marker = if Some(i) == current { ">" } else { " " };
        let refuel = if wp.refuel_required { "  [refuel]" } else { "" };
        println!(
            "{} {:>4}  {:<32} {:>14}{}",
            marker,
            i + 1,
            wp.system_name,
            format_distance(wp.distance_remaining, eu),
            refuel
        );
    }
}

pub fn show_config(config: &AppConfig) {
    match AppConfig::default_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file: unavailable ({})", e),
    }
    match &config.route_path {
        Some(path) => println!("Route:       {}", path.display()),
        None => println!("Route:       (not set)"),
    }
    println!("Journals:    {}", config.journal_directory.display());
    println!(
        "Hazard star classes: {}",
        config.notifications.hazardous_star_classes.join(", ")
    );
    println!("Announce jumps: {}", config.notifications.announce_jumps);
    println!("Announce arrivals: {}", config.notifications.announce_arrivals);
}

/// Write the active settings to the default config location
pub fn save_config(config: &AppConfig) {
    match config.store().and_then(|()| AppConfig::default_path()) {
        Ok(path) => println!("Config saved to {}", path.display()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save config");
            println!("Failed to save config: {}", e);
        }
    }
}

pub fn exit() {
    println!("quitting...");
}
