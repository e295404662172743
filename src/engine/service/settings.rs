use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub const MIN_REFRESH_INTERVAL_MS: u64 = 1_000;
pub const MAX_REFRESH_INTERVAL_MS: u64 = 10_000;

/// Operator-adjustable settings. Feature toggles are carried for display
/// collaborators and never interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub refresh_interval_ms: u64,
    pub features: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsChange {
    pub interval_changed: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("refresh interval {0}ms must be between 1000 and 10000ms")]
    RefreshIntervalOutOfRange(u64),
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_REFRESH_INTERVAL_MS..=MAX_REFRESH_INTERVAL_MS).contains(&self.refresh_interval_ms)
        {
            return Err(SettingsError::RefreshIntervalOutOfRange(
                self.refresh_interval_ms,
            ));
        }
        Ok(())
    }
}
