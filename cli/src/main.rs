use copilot_cli::commands::{self, CliRouter};
use copilot_cli::journal_feed;
use copilot_cli::logging::init_logging;
use copilot_cli::readline;
use copilot_cli::sinks::{ConsoleOverlay, SystemClipboard};
use copilot_core::context::AppConfig;
use copilot_core::notify::NotificationPolicy;
use copilot_core::router::EventRouter;
use copilot_core::tracking::ProgressTracker;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(version, about = "Follow a plotted route through the game journal")]
struct Args {
    /// Route CSV (overrides the config file)
    #[arg(short, long)]
    route: Option<PathBuf>,

    /// Journal file, or directory to pick the newest journal from
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// Explicit config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Restore the route position from the journal's existing lines
    #[arg(long)]
    replay: bool,

    /// Print notifications as JSON lines
    #[arg(long)]
    json: bool,

    /// Do not copy the next waypoint to the clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Write logs to a daily-rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_dir.as_deref());

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .map_err(|e| e.to_string())?;

    let mut router: CliRouter = EventRouter::new(
        ProgressTracker::new(),
        NotificationPolicy::new(config.notifications.clone()),
        ConsoleOverlay::new(args.json),
        SystemClipboard::open(!args.no_clipboard),
    );

    match args.route.as_ref().or(config.route_path.as_ref()) {
        Some(path) => {
            if let Err(e) = router.load_route(path) {
                tracing::error!(error = %e, "Failed to load route");
                println!("Failed to load route, use `reload` once it is fixed: {}", e);
            }
        }
        None => println!("Warning: no route file configured, pass --route"),
    }

    let (journal_tx, mut journal_rx) = mpsc::channel::<String>(256);
    let journal_path = args.journal.unwrap_or_else(|| config.journal_directory.clone());
    let _tail_task = journal_feed::resolve_journal(&journal_path)
        .and_then(|journal| journal_feed::start_feed(journal, args.replay, &mut router, journal_tx));

    // stdin blocks, so it gets its own thread
    let (command_tx, mut command_rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        loop {
            let line = match readline() {
                Ok(line) => line,
                Err(e) => {
                    println!("{}", e);
                    "exit".to_string()
                }
            };
            let quit = line.trim() == "exit";
            if command_tx.blocking_send(line).is_err() || quit {
                break;
            }
        }
    });

    // All events and commands are handled on this task, one at a time
    loop {
        tokio::select! {
            Some(line) = journal_rx.recv() => {
                router.handle_line(&line);
            }
            Some(line) = command_rx.recv() => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match respond(line, &mut router, &config) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(err) => println!("{err}"),
                }
            }
            else => break,
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-read the route file
    Reload,
    /// Show the current position on the route
    Status,
    /// List every waypoint
    Route,
    Config,
    /// Write the active settings to the default config file
    SaveConfig,
    Exit,
}

fn respond(line: &str, router: &mut CliRouter, config: &AppConfig) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "copilot".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Reload) => commands::reload(router),
        Some(Commands::Status) => commands::show_status(router),
        Some(Commands::Route) => commands::show_route(router),
        Some(Commands::Config) => commands::show_config(config),
        Some(Commands::SaveConfig) => commands::save_config(config),
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
