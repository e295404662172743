mod alert;
mod definition;
mod feed;
mod history;
mod service;
mod simulator;
mod source;
mod state;
mod status;
mod summary;
mod view;

pub use alert::{Alert, AlertId, AlertIdGenerator, AlertSeverity, derive_alert};
pub use definition::{DefinitionError, MetricDefinition, validate_definitions};
pub use feed::AlertFeed;
pub use history::{HistorySample, MetricHistory};
pub use service::{
    AlertSink, DashboardSnapshot, DisplaySink, EngineState, JsonDisplaySink, LogAlertSink,
    MAX_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS, Settings, SettingsChange, SettingsError,
    SharedEngine, TickReport, acknowledge_alert, apply_definitions, dashboard_snapshot,
    dismiss_alert, metric_summaries, refresh_interval, run_tick, update_settings,
    update_thresholds,
};
pub use simulator::{Engine, SyncReport, ThresholdUpdate, advance, initialize};
pub use source::{SeededSource, ValueSource, generate_value};
pub use state::MetricState;
pub use status::{MetricStatus, classify};
pub use summary::MetricSummary;
pub use view::MetricView;

#[cfg(test)]
pub(crate) use service::RecordingSink;
