// Community guidelines — the per-content-type banned phrase lists and the
// store that keeps the active set consistent under concurrent readers.
//
// The active set lives behind an `Arc` that is swapped wholesale: a
// moderation call snapshots the pointer once and works against that set for
// its entire duration, so a concurrent replace can never show it a mix of
// old and new phrases.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::verdict::ContentKind;

/// Banned phrase lists, one ordered list per content type.
///
/// Keys missing from a stored file deserialize to empty lists, so a
/// partially written record still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineSet {
    pub text: Vec<String>,
    pub image: Vec<String>,
    pub video: Vec<String>,
}

impl GuidelineSet {
    /// The phrase list consulted for the given content type.
    pub fn for_kind(&self, kind: ContentKind) -> &[String] {
        match kind {
            ContentKind::Text => &self.text,
            ContentKind::Image => &self.image,
            ContentKind::Video => &self.video,
        }
    }
}

/// Owns the active guideline set and its file-backed persistence.
pub struct GuidelineStore {
    path: PathBuf,
    current: RwLock<Arc<GuidelineSet>>,
}

impl GuidelineStore {
    /// Load the store from `path`. Never fails: a missing file means no
    /// guidelines have been configured yet, and an unreadable or malformed
    /// one degrades to an empty set rather than blocking moderation.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let set = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<GuidelineSet>(&raw) {
                Ok(set) => set,
                Err(error) => {
                    warn!(
                        error = %error,
                        path = %path.display(),
                        "guideline file is malformed; starting with an empty set"
                    );
                    GuidelineSet::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => GuidelineSet::default(),
            Err(error) => {
                warn!(
                    error = %error,
                    path = %path.display(),
                    "guideline file is unreadable; starting with an empty set"
                );
                GuidelineSet::default()
            }
        };

        Self {
            path,
            current: RwLock::new(Arc::new(set)),
        }
    }

    /// The complete current set. Callers hold the snapshot for the length
    /// of one moderation pass so replacements cannot tear it.
    pub async fn snapshot(&self) -> Arc<GuidelineSet> {
        self.current.read().await.clone()
    }

    /// Replace the entire set: persist, then swap the active pointer, with
    /// the write lock held across both steps so concurrent replacements
    /// land in memory in the order they land on disk. On a persist failure
    /// the active set is left untouched.
    pub async fn replace(&self, set: GuidelineSet) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(&set).context("failed to serialize guidelines")?;

        let mut current = self.current.write().await;
        tokio::fs::write(&self.path, serialized)
            .await
            .with_context(|| format!("failed to write guidelines to {}", self.path.display()))?;
        *current = Arc::new(set);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
