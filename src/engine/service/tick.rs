use chrono::{DateTime, Utc};

use crate::engine::alert::{Alert, AlertSeverity};

use super::{
    SharedEngine,
    sink::{AlertSink, DisplaySink},
};

#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub alerts: Vec<Alert>,
}

/// Advances every metric under the engine lock, then hands the results to the
/// sinks once the lock is released.
pub async fn run_tick(
    state: &SharedEngine,
    now: DateTime<Utc>,
    alert_sink: &dyn AlertSink,
    display_sink: &dyn DisplaySink,
) -> TickReport {
    let (tick, alerts, snapshot) = {
        let mut state = state.lock().await;
        let alerts = state.engine.tick(now);
        for alert in &alerts {
            state.alerts.push(alert.clone());
        }
        state.tick_count += 1;
        state.last_tick = Some(now);

        let critical = alerts
            .iter()
            .filter(|alert| alert.severity() == AlertSeverity::Critical)
            .count();
        tracing::info!(
            target: "engine",
            module = "engine",
            tick = state.tick_count,
            metrics = state.engine.len(),
            alerts = alerts.len(),
            critical_alerts = critical,
            feed_len = state.alerts.len(),
            unacknowledged = state.alerts.unacknowledged_count(),
            "engine_tick"
        );

        (state.tick_count, alerts, state.dashboard(now))
    };

    for alert in &alerts {
        alert_sink.deliver(alert);
    }
    display_sink.publish(&snapshot);

    TickReport { tick, alerts }
}
