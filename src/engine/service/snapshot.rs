use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Duration;

use crate::engine::{alert::Alert, summary::MetricSummary, view::MetricView};

use super::{EngineState, SharedEngine, settings::Settings};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub tick_count: u64,
    pub last_tick: Option<DateTime<Utc>>,
    pub settings: Settings,
    pub metrics: Vec<MetricView>,
    pub alerts: Vec<Alert>,
    pub unacknowledged_alerts: usize,
}

impl EngineState {
    pub(crate) fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot {
            generated_at: now,
            tick_count: self.tick_count,
            last_tick: self.last_tick,
            settings: self.settings.clone(),
            metrics: self.engine.snapshot(),
            alerts: self.alerts.iter().cloned().collect(),
            unacknowledged_alerts: self.alerts.unacknowledged_count(),
        }
    }
}

pub async fn dashboard_snapshot(state: &SharedEngine) -> DashboardSnapshot {
    let state = state.lock().await;
    state.dashboard(Utc::now())
}

pub async fn metric_summaries(state: &SharedEngine) -> Vec<(String, MetricSummary)> {
    let state = state.lock().await;
    state
        .engine
        .snapshot()
        .into_iter()
        .filter_map(|view| view.summary.map(|summary| (view.id, summary)))
        .collect()
}

pub async fn refresh_interval(state: &SharedEngine) -> Duration {
    let state = state.lock().await;
    Duration::from_millis(state.settings.refresh_interval_ms)
}
