use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::{MetricDefinition, Settings};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_alert_capacity")]
    pub alert_capacity: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            refresh_interval_ms: self.refresh_interval_ms,
            features: self.features.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    #[serde(default = "default_summary_enabled")]
    pub enabled: bool,
    #[serde(default = "default_summary_interval_secs")]
    pub interval_secs: u64,
}

/// The part of the configuration that a running process picks up on reload.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub settings: Settings,
    pub metrics: Vec<MetricDefinition>,
}

impl RuntimeConfig {
    pub fn from_config(config: &Config) -> Result<Self, super::ConfigError> {
        Ok(Self {
            settings: config.settings(),
            metrics: config.resolved_metrics()?,
        })
    }
}
