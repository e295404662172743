use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use thiserror::Error;
use tokio::sync::{Notify, watch};

use crate::config::{Config, ConfigError, RuntimeConfig};
use crate::engine::{
    AlertSink, DefinitionError, DisplaySink, Engine, EngineState, JsonDisplaySink, LogAlertSink,
    SeededSource, Settings, SettingsChange, SettingsError, SharedEngine, SyncReport,
    apply_definitions, update_settings,
};

#[derive(Debug, Error)]
pub enum RuntimeUpdateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub config_path: String,
    pub engine: SharedEngine,
    pub alert_sink: Arc<dyn AlertSink>,
    pub display_sink: Arc<dyn DisplaySink>,
    pub runtime_update_notify: Arc<Notify>,
    pub shutdown: watch::Receiver<bool>,
}

impl AppContext {
    pub fn new(
        config: Config,
        config_path: impl Into<String>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self, ConfigError> {
        Self::with_sinks(
            config,
            config_path,
            shutdown,
            Arc::new(LogAlertSink),
            Arc::new(JsonDisplaySink),
        )
    }

    pub fn with_sinks(
        config: Config,
        config_path: impl Into<String>,
        shutdown: watch::Receiver<bool>,
        alert_sink: Arc<dyn AlertSink>,
        display_sink: Arc<dyn DisplaySink>,
    ) -> Result<Self, ConfigError> {
        let metrics = config.resolved_metrics()?;
        let engine = Engine::new(
            metrics,
            config.history_capacity,
            Box::new(SeededSource::from_optional_seed(config.seed)),
            Utc::now(),
            ChronoDuration::milliseconds(config.refresh_interval_ms as i64),
        )?;
        let engine = EngineState::new(engine, config.alert_capacity, config.settings()).into_shared();

        Ok(Self {
            config,
            config_path: config_path.into(),
            engine,
            alert_sink,
            display_sink,
            runtime_update_notify: Arc::new(Notify::new()),
            shutdown,
        })
    }

    /// Applies new settings and wakes the tick job when its interval changed.
    pub async fn update_settings(&self, settings: Settings) -> Result<SettingsChange, SettingsError> {
        let change = update_settings(&self.engine, settings).await?;
        if change.interval_changed {
            self.runtime_update_notify.notify_one();
        }
        Ok(change)
    }

    /// Settings are validated before the metric set is touched, and metrics
    /// added by the reload are backdated at the incoming refresh interval.
    pub async fn update_runtime_config(
        &self,
        runtime_config: RuntimeConfig,
    ) -> Result<SyncReport, RuntimeUpdateError> {
        runtime_config.settings.validate()?;
        let report = apply_definitions(
            &self.engine,
            &runtime_config.metrics,
            ChronoDuration::milliseconds(runtime_config.settings.refresh_interval_ms as i64),
            Utc::now(),
            self.alert_sink.as_ref(),
        )
        .await?;
        self.update_settings(runtime_config.settings).await?;
        Ok(report)
    }
}
