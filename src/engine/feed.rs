use std::collections::VecDeque;

use super::alert::Alert;

/// Bounded alert list, newest first. Pushing past capacity silently drops the
/// oldest entry, so lookups by id must tolerate missing alerts.
#[derive(Debug)]
pub struct AlertFeed {
    alerts: VecDeque<Alert>,
    capacity: usize,
}

impl AlertFeed {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    /// Returns whether an alert with this id was present.
    pub fn acknowledge(&mut self, alert_id: &str) -> bool {
        match self
            .alerts
            .iter_mut()
            .find(|alert| alert.id().as_str() == alert_id)
        {
            Some(alert) => {
                alert.acknowledge();
                true
            }
            None => false,
        }
    }

    /// Returns whether an alert with this id was removed.
    pub fn dismiss(&mut self, alert_id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id().as_str() != alert_id);
        self.alerts.len() != before
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|alert| !alert.is_acknowledged())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }
}
