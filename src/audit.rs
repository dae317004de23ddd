// Audit log — one line per completed moderation decision.
//
// The format is the contract other tooling greps for, so it stays fixed:
//   Content Type: <kind>, Identifier: <identifier>, Action: <action>
// Logging is best-effort from the caller's point of view; the dispatcher
// decides what to do when an append fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::verdict::ContentKind;

/// Sink for moderation decisions.
#[async_trait]
pub trait ModerationLog: Send + Sync {
    /// Append one decision line.
    async fn record(&self, kind: ContentKind, identifier: &str, action: &str) -> Result<()>;

    /// The most recent `limit` lines, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<String>>;
}

/// Render one decision in the fixed log-line format.
pub fn format_entry(kind: ContentKind, identifier: &str, action: &str) -> String {
    format!("Content Type: {kind}, Identifier: {identifier}, Action: {action}")
}

/// Append-only log file on local disk.
pub struct FileModerationLog {
    path: PathBuf,
}

impl FileModerationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModerationLog for FileModerationLog {
    async fn record(&self, kind: ContentKind, identifier: &str, action: &str) -> Result<()> {
        let line = format!("{}\n", format_entry(kind, identifier, action));
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open log file {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read log file {}", self.path.display()))
            }
        };
        let lines: Vec<&str> = raw.lines().filter(|line| !line.is_empty()).collect();
        let start = lines.len().saturating_sub(limit);
        Ok(lines[start..].iter().map(|line| line.to_string()).collect())
    }
}

/// In-memory log, for tests and one-off runs that should not touch disk.
#[derive(Default)]
pub struct MemoryModerationLog {
    entries: Mutex<Vec<String>>,
}

impl MemoryModerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line recorded so far, oldest first.
    pub async fn entries(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl ModerationLog for MemoryModerationLog {
    async fn record(&self, kind: ContentKind, identifier: &str, action: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .push(format_entry(kind, identifier, action));
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<String>> {
        let entries = self.entries.lock().await;
        let start = entries.len().saturating_sub(limit);
        Ok(entries[start..].to_vec())
    }
}
