//! Journal file discovery, catch-up reads and tailing.

use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs;
use std::io::{Result, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

const JOURNAL_PREFIX: &str = "Journal.";
const JOURNAL_EXTENSION: &str = "log";
const TAIL_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default journal directory used by the game on Windows.
pub fn default_journal_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("Saved Games")
            .join("Frontier Developments")
            .join("Elite Dangerous")
    })
}

fn is_journal_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(JOURNAL_PREFIX));
    name_matches && path.extension().is_some_and(|ext| ext == JOURNAL_EXTENSION)
}

/// Most recently modified `Journal.*.log` in `dir`.
pub fn latest_journal(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if !is_journal_file(&path) {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Read every complete line of an existing journal.
/// Returns the lines and the byte offset to resume tailing from.
pub fn read_journal_file<P: AsRef<Path>>(path: P) -> Result<(Vec<String>, u64)> {
    let file = fs::File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok((Vec::new(), 0));
    }

    // SAFETY: the game only appends to journals; we never hold slices past this call.
    let mmap = unsafe { Mmap::map(&file)? };
    let bytes = mmap.as_ref();

    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        if end > start {
            let line = String::from_utf8_lossy(&bytes[start..end]);
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        start = end + 1;
    }

    // A trailing partial line is picked up by the tail once it is terminated
    Ok((lines, start as u64))
}

/// Follow a journal from `start_byte`, sending each completed line on `tx`.
/// Returns when the receiver is dropped or the file can no longer be read.
pub async fn tail_journal<P: AsRef<Path>>(
    path: P,
    start_byte: u64,
    tx: mpsc::Sender<String>,
) -> Result<()> {
    let file = File::open(&path).await?;
    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(start_byte)).await?;

    let mut line = String::new();

    loop {
        match reader.read_line(&mut line).await {
            Ok(0) => sleep(TAIL_POLL_INTERVAL).await,
            Ok(_) => {
                if !line.ends_with('\n') {
                    // Partial write; keep the fragment and wait for the rest
                    continue;
                }
                let complete = line.trim_end().to_string();
                line.clear();
                if complete.is_empty() {
                    continue;
                }
                if tx.send(complete).await.is_err() {
                    tracing::debug!("Journal receiver closed, stopping tail");
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error reading journal line");
                return Err(e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_journal_file_skips_partial_tail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Journal.2025-01-04T182200.01.log");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            "{{\"event\":\"Fileheader\"}}\r\n\n{{\"event\":\"Location\",\"StarSystem\":\"Sol\"}}\n{{\"event\":\"FSD"
        )
        .unwrap();

        let (lines, offset) = read_journal_file(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "{\"event\":\"Fileheader\"}");
        assert!(lines[1].contains("Sol"));

        let full_len = fs::metadata(&path).unwrap().len();
        assert_eq!(full_len - offset, "{\"event\":\"FSD".len() as u64);
    }

    #[test]
    fn test_read_empty_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Journal.empty.01.log");
        fs::File::create(&path).unwrap();

        let (lines, offset) = read_journal_file(&path).unwrap();
        assert!(lines.is_empty());
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_latest_journal_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Status.json"), "{}").unwrap();
        fs::write(dir.path().join("Journal.notes.txt"), "").unwrap();
        assert_eq!(latest_journal(dir.path()).unwrap(), None);

        let journal = dir.path().join("Journal.2025-01-04T182200.01.log");
        fs::write(&journal, "").unwrap();
        assert_eq!(latest_journal(dir.path()).unwrap(), Some(journal));
    }

    #[tokio::test]
    async fn test_tail_sends_appended_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Journal.tail.01.log");
        fs::write(&path, "{\"event\":\"Fileheader\"}\n").unwrap();
        let start = fs::metadata(&path).unwrap().len();

        let (tx, mut rx) = mpsc::channel(8);
        let tail_path = path.clone();
        let handle = tokio::spawn(async move { tail_journal(tail_path, start, tx).await });

        {
            let mut f = fs::OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(f, "{{\"event\":\"FSDJump\",\"StarSystem\":\"Beta\"}}").unwrap();
        }

        let line = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(line.contains("Beta"));

        drop(rx);
        handle.abort();
    }
}
