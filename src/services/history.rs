//! History store — persisted mirror of the bounded edit history.
//!
//! DESIGN
//! ======
//! The session controller owns the in-memory list; this store is a passive
//! mirror with no mutation authority of its own. Every save rewrites the
//! whole blob (write-to-temp + rename, so a crash never leaves a torn file).
//! Load failures degrade to an empty history instead of surfacing an error.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

/// Maximum number of records retained in history.
pub const HISTORY_CAPACITY: usize = 10;

pub const DEFAULT_HISTORY_PATH: &str = "promptpatch_history.json";

// =============================================================================
// EDIT RECORD
// =============================================================================

/// One completed edit. Immutable once created; destroyed only by explicit
/// deletion or eviction past [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub id: Uuid,
    pub original: String,
    pub instruction: String,
    pub modified: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

impl EditRecord {
    /// Build a record with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(original: String, instruction: String, modified: String) -> Self {
        Self { id: Uuid::new_v4(), original, instruction, modified, timestamp: now_ms() }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// STORE
// =============================================================================

/// File-backed store for the serialized history list.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build a store from `HISTORY_PATH`, defaulting to
    /// `./promptpatch_history.json`.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var("HISTORY_PATH").unwrap_or_else(|_| DEFAULT_HISTORY_PATH.into());
        Self::new(path)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history, newest first.
    ///
    /// A missing file is an empty history; unparseable content is swallowed
    /// with a warning and also treated as empty. Lists longer than the
    /// capacity (hand-edited files) are truncated on load.
    #[must_use]
    pub fn load(&self) -> Vec<EditRecord> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "history read failed; starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<EditRecord>>(&raw) {
            Ok(mut records) => {
                records.truncate(HISTORY_CAPACITY);
                records
            }
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "history unparseable; starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full list, replacing prior content entirely. Best-effort:
    /// failures are logged, never propagated.
    pub fn save(&self, records: &[EditRecord]) {
        if let Err(e) = self.try_save(records) {
            error!(error = %e, path = %self.path.display(), count = records.len(), "history save failed");
        }
    }

    fn try_save(&self, records: &[EditRecord]) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
