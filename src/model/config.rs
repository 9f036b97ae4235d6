use serde::{Deserialize, Serialize};

/// What happens to the remaining keys after a priority item is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactionPolicy {
    /// Decrement every key above the removed one, closing the integer gap.
    #[default]
    CloseGap,
    /// Leave the remaining keys alone.
    KeepGaps,
}

/// Retry behavior when a manually reassigned key collides with an occupied
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReassignPolicy {
    /// Re-solicit the same item until the key is free or the user keeps it.
    #[default]
    RetryUntilValid,
    /// One rejection moves on to the next item, key unchanged.
    SkipOnReject,
}

/// User configuration, read from `todo.toml` in the storage directory.
/// Missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    /// ANSI colors in the session shell.
    pub color: bool,
    pub compact_on_remove: CompactionPolicy,
    pub reassign_retry: ReassignPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            color: true,
            compact_on_remove: CompactionPolicy::CloseGap,
            reassign_retry: ReassignPolicy::RetryUntilValid,
        }
    }
}
