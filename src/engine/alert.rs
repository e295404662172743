use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{definition::MetricDefinition, status::MetricStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Never produced by status transitions; available to external producers
    /// sharing the alert feed.
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    fn from_status(status: MetricStatus) -> Option<Self> {
        match status {
            MetricStatus::Normal => None,
            MetricStatus::Warning => Some(AlertSeverity::Warning),
            MetricStatus::Critical => Some(AlertSeverity::Critical),
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues `<millis>-<metric>-<sequence>` ids. The sequence alone keeps ids
/// unique within the process even if the clock stalls or steps backwards.
#[derive(Debug, Default)]
pub struct AlertIdGenerator {
    next_sequence: u64,
}

impl AlertIdGenerator {
    pub fn next_id(&mut self, metric_id: &str, now: DateTime<Utc>) -> AlertId {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        AlertId(format!(
            "{}-{}-{}",
            now.timestamp_millis(),
            metric_id,
            sequence
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    id: AlertId,
    severity: AlertSeverity,
    message: String,
    timestamp: DateTime<Utc>,
    metric_id: String,
    acknowledged: bool,
}

impl Alert {
    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn severity(&self) -> AlertSeverity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn metric_id(&self) -> &str {
        &self.metric_id
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// One-way: an acknowledged alert never reverts.
    pub(crate) fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}

/// Alerts fire only when a metric enters Warning or Critical from a different
/// status. Sustained states and recoveries to Normal stay silent.
pub fn derive_alert(
    new_status: MetricStatus,
    previous_status: MetricStatus,
    value: f64,
    definition: &MetricDefinition,
    now: DateTime<Utc>,
    ids: &mut AlertIdGenerator,
) -> Option<Alert> {
    if new_status == previous_status {
        return None;
    }
    let severity = AlertSeverity::from_status(new_status)?;

    let message = match severity {
        AlertSeverity::Critical => format!(
            "{} has reached CRITICAL level: {:.1}{}",
            definition.name, value, definition.unit
        ),
        _ => format!(
            "{} has exceeded WARNING threshold: {:.1}{}",
            definition.name, value, definition.unit
        ),
    };

    Some(Alert {
        id: ids.next_id(&definition.id, now),
        severity,
        message,
        timestamp: now,
        metric_id: definition.id.clone(),
        acknowledged: false,
    })
}

#[cfg(test)]
pub(crate) fn sample_alert(ids: &mut AlertIdGenerator, metric_id: &str) -> Alert {
    let definition = crate::engine::definition::sample_definition(metric_id);
    derive_alert(
        MetricStatus::Warning,
        MetricStatus::Normal,
        1685.0,
        &definition,
        Utc::now(),
        ids,
    )
    .expect("normal to warning always alerts")
}
