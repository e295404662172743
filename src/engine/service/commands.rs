use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::engine::{
    definition::{DefinitionError, MetricDefinition},
    simulator::{SyncReport, ThresholdUpdate},
};

use super::{
    SharedEngine,
    settings::{Settings, SettingsChange, SettingsError},
    sink::AlertSink,
};

/// Returns whether the alert was still in the feed.
pub async fn acknowledge_alert(state: &SharedEngine, alert_id: &str) -> bool {
    let mut state = state.lock().await;
    let found = state.alerts.acknowledge(alert_id);
    if !found {
        log::debug!("alert_acknowledge_ignored id={} reason=not_found", alert_id);
    }
    found
}

/// Returns whether the alert was removed.
pub async fn dismiss_alert(state: &SharedEngine, alert_id: &str) -> bool {
    let mut state = state.lock().await;
    let removed = state.alerts.dismiss(alert_id);
    if !removed {
        log::debug!("alert_dismiss_ignored id={} reason=not_found", alert_id);
    }
    removed
}

pub async fn update_thresholds(
    state: &SharedEngine,
    metric_id: &str,
    warning: f64,
    danger: f64,
    alert_sink: &dyn AlertSink,
) -> Result<ThresholdUpdate, DefinitionError> {
    let update = {
        let mut state = state.lock().await;
        let update = state
            .engine
            .update_thresholds(metric_id, warning, danger, Utc::now())?;
        if let ThresholdUpdate::Applied(Some(alert)) = &update {
            state.alerts.push(alert.clone());
        }
        update
    };

    match &update {
        ThresholdUpdate::UnknownMetric => {
            log::debug!("thresholds_update_ignored metric={} reason=not_found", metric_id);
        }
        ThresholdUpdate::Applied(alert) => {
            log::info!(
                "thresholds_updated metric={} warning={} danger={}",
                metric_id,
                warning,
                danger
            );
            if let Some(alert) = alert {
                alert_sink.deliver(alert);
            }
        }
    }

    Ok(update)
}

pub async fn update_settings(
    state: &SharedEngine,
    settings: Settings,
) -> Result<SettingsChange, SettingsError> {
    settings.validate()?;
    let mut state = state.lock().await;
    let interval_changed = state.settings.refresh_interval_ms != settings.refresh_interval_ms;
    state.settings = settings;
    Ok(SettingsChange { interval_changed })
}

/// Reconciles the running metric set with reloaded definitions. New metrics
/// are backdated at `sample_interval`, which should be the interval the tick
/// job runs at once the reload completes.
pub async fn apply_definitions(
    state: &SharedEngine,
    definitions: &[MetricDefinition],
    sample_interval: ChronoDuration,
    now: DateTime<Utc>,
    alert_sink: &dyn AlertSink,
) -> Result<SyncReport, DefinitionError> {
    let report = {
        let mut state = state.lock().await;
        let report = state
            .engine
            .sync_definitions(definitions, now, sample_interval)?;
        for alert in &report.alerts {
            state.alerts.push(alert.clone());
        }
        report
    };

    for alert in &report.alerts {
        alert_sink.deliver(alert);
    }
    Ok(report)
}
