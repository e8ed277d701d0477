//! Observable save state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the controller currently is in its save cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    /// No edits since mount or since the last save settled.
    #[default]
    Idle,
    /// Edits buffered; waiting for the debounce window to elapse.
    Pending,
    /// A persist call is in flight.
    Saving,
    /// The last persist succeeded.
    Saved,
    /// The last persist failed; buffered edits are retained.
    Error,
}

impl SaveStatus {
    /// Whether a persist call is currently in flight.
    #[must_use]
    pub fn is_saving(self) -> bool {
        matches!(self, Self::Saving)
    }
}

/// Snapshot of the controller state, read synchronously by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveState {
    /// Current save cycle position.
    pub status: SaveStatus,
    /// When the last successful persist settled, if any.
    pub last_saved: Option<DateTime<Utc>>,
    /// True whenever the most recently registered content has not yet
    /// been confirmed persisted.
    pub has_unsaved_changes: bool,
}

impl Default for AutosaveState {
    fn default() -> Self {
        Self {
            status: SaveStatus::Idle,
            last_saved: None,
            has_unsaved_changes: false,
        }
    }
}
