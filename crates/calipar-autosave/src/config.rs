//! Autosave configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_delay_ms() -> u64 {
    2000
}

fn default_enabled() -> bool {
    true
}

/// Tuning knobs for one autosave controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Debounce window in milliseconds: a persist attempt starts this long
    /// after the *last* registered change.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// When false, changes are buffered but never auto-persisted; an
    /// explicit `save_now` is the only way to flush them.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl AutosaveConfig {
    /// Config with the given debounce window, autosave enabled.
    #[must_use]
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    /// Config that never auto-persists (read-only or non-draft documents).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The debounce window as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            enabled: default_enabled(),
        }
    }
}
