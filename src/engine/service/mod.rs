mod commands;
mod settings;
mod sink;
mod snapshot;
mod tick;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{feed::AlertFeed, simulator::Engine};

pub use commands::{
    acknowledge_alert, apply_definitions, dismiss_alert, update_settings, update_thresholds,
};
pub use settings::{
    MAX_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS, Settings, SettingsChange, SettingsError,
};
#[cfg(test)]
pub(crate) use sink::RecordingSink;
pub use sink::{AlertSink, DisplaySink, JsonDisplaySink, LogAlertSink};
pub use snapshot::{DashboardSnapshot, dashboard_snapshot, metric_summaries, refresh_interval};
pub use tick::{TickReport, run_tick};

/// Everything a tick or an operator command mutates, guarded by one lock.
pub struct EngineState {
    pub(crate) engine: Engine,
    pub(crate) alerts: AlertFeed,
    pub(crate) settings: Settings,
    pub(crate) tick_count: u64,
    pub(crate) last_tick: Option<DateTime<Utc>>,
}

impl EngineState {
    pub fn new(engine: Engine, alert_capacity: usize, settings: Settings) -> Self {
        Self {
            engine,
            alerts: AlertFeed::with_capacity(alert_capacity),
            settings,
            tick_count: 0,
            last_tick: None,
        }
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }
}

pub type SharedEngine = Arc<Mutex<EngineState>>;
