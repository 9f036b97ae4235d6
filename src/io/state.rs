use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session state (written to .state.json in the storage directory).
/// Best-effort on both ends: unreadable state is ignored, a failed write is
/// reported but never blocks a commit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    /// Storage mode last used ("local", "global", or "custom").
    #[serde(default)]
    pub storage_mode: String,
    /// When the lists were last committed to disk.
    #[serde(default)]
    pub last_commit: Option<DateTime<Utc>>,
}

/// Read .state.json from the storage directory.
pub fn read_session_state(dir: &Path) -> Option<SessionState> {
    let path = dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the storage directory.
pub fn write_session_state(dir: &Path, state: &SessionState) -> Result<(), std::io::Error> {
    let path = dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
