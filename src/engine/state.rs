use chrono::{DateTime, Utc};

use super::{
    history::{HistorySample, MetricHistory},
    status::{MetricStatus, classify},
};

/// Live state of one metric. `status` is only ever written together with
/// `current_value`, so the two cannot drift apart.
#[derive(Debug, Clone)]
pub struct MetricState {
    current_value: f64,
    status: MetricStatus,
    last_updated: DateTime<Utc>,
    history: MetricHistory,
}

impl MetricState {
    pub(crate) fn new(history: MetricHistory, latest: HistorySample) -> Self {
        Self {
            current_value: latest.value,
            status: latest.status,
            last_updated: latest.timestamp,
            history,
        }
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn status(&self) -> MetricStatus {
        self.status
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn history(&self) -> &MetricHistory {
        &self.history
    }

    pub(crate) fn record(&mut self, sample: HistorySample) {
        self.current_value = sample.value;
        self.status = sample.status;
        self.last_updated = sample.timestamp;
        self.history.push(sample);
    }

    /// Re-derives the current status after a threshold change. History keeps
    /// the status each sample was recorded with.
    pub(crate) fn reclassify(&mut self, warning: f64, danger: f64) {
        self.status = classify(self.current_value, warning, danger);
    }
}
