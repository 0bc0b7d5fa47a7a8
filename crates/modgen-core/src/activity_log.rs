//! Append-only generation log (`module.log`)

use chrono::{Local, SecondsFormat};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Appends one timestamped line per generation event. Never reads or rotates the file.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[<timestamp>] <message>` to the log
    pub async fn append(&self, message: &str) -> std::io::Result<()> {
        let line = format_line(&Local::now().to_rfc3339_opts(SecondsFormat::Secs, false), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

fn format_line(timestamp: &str, message: &str) -> String {
    format!("[{}] {}\n", timestamp, message)
}
