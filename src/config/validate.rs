use thiserror::Error;

use crate::engine::{DefinitionError, MAX_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS};

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
    #[error("invalid metric definition: {0}")]
    Definition(#[from] DefinitionError),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_REFRESH_INTERVAL_MS..=MAX_REFRESH_INTERVAL_MS).contains(&self.refresh_interval_ms)
        {
            return Err(ConfigError::Validation(format!(
                "refresh_interval_ms must be between {} and {}",
                MIN_REFRESH_INTERVAL_MS, MAX_REFRESH_INTERVAL_MS
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Validation(
                "history_capacity must be greater than 0".to_string(),
            ));
        }
        if self.alert_capacity == 0 {
            return Err(ConfigError::Validation(
                "alert_capacity must be greater than 0".to_string(),
            ));
        }
        if self.summary.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "summary.interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.metrics.is_empty() && self.profile.trim().is_empty() {
            return Err(ConfigError::Validation(
                "profile must not be empty when no metrics are configured".to_string(),
            ));
        }

        let metrics = self.resolved_metrics()?;
        if metrics.is_empty() {
            return Err(ConfigError::Validation(
                "at least one metric must be configured".to_string(),
            ));
        }
        Ok(())
    }
}
