#![warn(missing_docs)]
//! Test surfaces for container interaction: conservation ledgers, stack
//! invariant checks, click logs and golden snapshots.

mod ledger;
mod snapshot;

use anyhow::Result;
use mdinventory_container::{ClickEvent, ClickOutcome};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use ledger::*;
pub use snapshot::*;

/// One replayed click, as written to a click log.
#[derive(Debug, Serialize)]
pub struct ClickRecord {
    /// Zero-based position in the replayed sequence.
    pub step: usize,
    /// The click that was applied.
    pub event: ClickEvent,
    /// Whether it changed anything.
    pub outcome: ClickOutcome,
}

/// A sink that writes newline-delimited JSON click records to disk.
pub struct ClickLog {
    file: File,
}

impl ClickLog {
    /// Create a new log at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Append a record to the log.
    pub fn write(&mut self, record: &ClickRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn click_log_writes_one_line_per_record() {
        let path = std::env::temp_dir().join(format!(
            "click-log-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut log = ClickLog::create(&path).expect("log create");
        for step in 0..3 {
            log.write(&ClickRecord {
                step,
                event: ClickEvent::left(step),
                outcome: ClickOutcome::Unchanged,
            })
            .expect("write succeeds");
        }
        drop(log);

        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("\"Unchanged\""));
        let _ = fs::remove_file(&path);
    }
}
