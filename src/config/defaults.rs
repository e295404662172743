use std::collections::BTreeMap;

use super::schema::{Config, Summary};

pub(super) fn default_refresh_interval_ms() -> u64 {
    2000
}

pub(super) fn default_history_capacity() -> usize {
    20
}

pub(super) fn default_alert_capacity() -> usize {
    50
}

pub(super) fn default_profile() -> String {
    "bof".to_string()
}

pub(super) fn default_summary_enabled() -> bool {
    true
}

pub(super) fn default_summary_interval_secs() -> u64 {
    300
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            enabled: default_summary_enabled(),
            interval_secs: default_summary_interval_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            history_capacity: default_history_capacity(),
            alert_capacity: default_alert_capacity(),
            seed: None,
            profile: default_profile(),
            metrics: Vec::new(),
            summary: Summary::default(),
            features: BTreeMap::new(),
        }
    }
}
