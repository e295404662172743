use crate::engine::alert::{Alert, AlertSeverity};

use super::snapshot::DashboardSnapshot;

/// Receives alerts raised by a tick, after the engine lock is released.
pub trait AlertSink: Send + Sync {
    fn deliver(&self, alert: &Alert);
}

/// Receives the read model after every tick.
pub trait DisplaySink: Send + Sync {
    fn publish(&self, snapshot: &DashboardSnapshot);
}

pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn deliver(&self, alert: &Alert) {
        match alert.severity() {
            AlertSeverity::Critical => log::error!(
                "alert_raised id={} metric={} severity={} message={}",
                alert.id(),
                alert.metric_id(),
                alert.severity(),
                alert.message()
            ),
            _ => log::warn!(
                "alert_raised id={} metric={} severity={} message={}",
                alert.id(),
                alert.metric_id(),
                alert.severity(),
                alert.message()
            ),
        }
    }
}

pub struct JsonDisplaySink;

impl DisplaySink for JsonDisplaySink {
    fn publish(&self, snapshot: &DashboardSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(payload) => tracing::debug!(
                target: "display",
                module = "display",
                tick = snapshot.tick_count,
                payload = %payload,
                "dashboard_snapshot"
            ),
            Err(error) => log::warn!("display_snapshot_encode_failed error={}", error),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    alerts: std::sync::Mutex<Vec<Alert>>,
    snapshots: std::sync::Mutex<Vec<DashboardSnapshot>>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().expect("sink lock").clone()
    }

    pub(crate) fn snapshots(&self) -> Vec<DashboardSnapshot> {
        self.snapshots.lock().expect("sink lock").clone()
    }
}

#[cfg(test)]
impl AlertSink for RecordingSink {
    fn deliver(&self, alert: &Alert) {
        self.alerts.lock().expect("sink lock").push(alert.clone());
    }
}

#[cfg(test)]
impl DisplaySink for RecordingSink {
    fn publish(&self, snapshot: &DashboardSnapshot) {
        self.snapshots
            .lock()
            .expect("sink lock")
            .push(snapshot.clone());
    }
}
