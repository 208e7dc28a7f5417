//! Connects the game journal to the router's input channel.

use std::path::{Path, PathBuf};

use copilot_core::journal::reader::{latest_journal, read_journal_file, tail_journal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::CliRouter;

/// Resolve a journal file from a file or directory path.
pub fn resolve_journal(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if !path.exists() {
        println!("Warning: journal path {} does not exist", path.display());
        return None;
    }
    match latest_journal(path) {
        Ok(Some(journal)) => Some(journal),
        Ok(None) => {
            println!("Warning: no Journal.*.log files in {}", path.display());
            None
        }
        Err(e) => {
            println!("Failed to read journal directory {}: {}", path.display(), e);
            None
        }
    }
}

/// Start tailing `journal`. With `replay`, existing lines first restore the
/// route position (without notifications); otherwise only new lines count.
pub fn start_feed(
    journal: PathBuf,
    replay: bool,
    router: &mut CliRouter,
    tx: mpsc::Sender<String>,
) -> Option<JoinHandle<()>> {
    let start_byte = if replay {
        match read_journal_file(&journal) {
            Ok((lines, offset)) => {
                let matched = router.prime(lines.iter().map(String::as_str));
                tracing::info!(lines = lines.len(), matched, "Replayed journal");
                offset
            }
            Err(e) => {
                println!("Failed to read journal {}: {}", journal.display(), e);
                return None;
            }
        }
    } else {
        match std::fs::metadata(&journal) {
            Ok(meta) => meta.len(),
            Err(e) => {
                println!("Failed to open journal {}: {}", journal.display(), e);
                return None;
            }
        }
    };

    println!("Following journal: {}", journal.display());

    Some(tokio::spawn(async move {
        if let Err(e) = tail_journal(&journal, start_byte, tx).await {
            tracing::error!(error = %e, path = %journal.display(), "Journal tail stopped");
        }
    }))
}
