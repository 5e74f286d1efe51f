//! Log writer
//!
//! Appends one CSV line per reading. The file handle is scoped to each
//! write (open, append, close) so no handle is ever held across loop
//! iterations and a crash loses at most the line being written.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::io::AsyncWriteExt;

use super::{daily_log_name, sweep_log_name};
use crate::reading::Reading;

/// Where a writer gets its filename from
enum Naming {
    /// Re-derived from the current date on every write, so a run that
    /// crosses midnight rolls over to the next day's file.
    Daily,
    /// Snapshot taken when the run started; a sweep stays in one file
    /// even across midnight.
    Fixed(String),
}

/// Appends readings to a date-derived log file
pub struct LogWriter {
    dir: PathBuf,
    naming: Naming,
}

impl LogWriter {
    /// Writer for monitor runs: `DD_MM_YY.txt`, name re-derived per write.
    pub fn daily(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            naming: Naming::Daily,
        }
    }

    /// Writer for sweep runs: `resultsDD_MM_YY.txt`, named for the day
    /// the sweep started.
    pub fn sweep(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            naming: Naming::Fixed(sweep_log_name(Local::now().date_naive())),
        }
    }

    /// The path the next append would go to.
    pub fn current_path(&self) -> PathBuf {
        let name = match &self.naming {
            Naming::Daily => daily_log_name(Local::now().date_naive()),
            Naming::Fixed(name) => name.clone(),
        };
        self.dir.join(name)
    }

    /// Append one reading as a CSV line, creating the file if needed.
    pub async fn append(&self, reading: &Reading) -> io::Result<()> {
        append_line(&self.current_path(), &reading.to_csv()).await
    }
}

async fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    Ok(())
}
