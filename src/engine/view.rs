use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    definition::MetricDefinition, history::HistorySample, state::MetricState,
    status::MetricStatus, summary::MetricSummary,
};

/// Read model handed to display collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub value: f64,
    pub status: MetricStatus,
    pub min: f64,
    pub max: f64,
    pub warning: f64,
    pub danger: f64,
    pub last_updated: DateTime<Utc>,
    pub history: Vec<HistorySample>,
    pub summary: Option<MetricSummary>,
}

impl MetricView {
    pub(crate) fn new(definition: &MetricDefinition, state: &MetricState) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            unit: definition.unit.clone(),
            value: state.current_value(),
            status: state.status(),
            min: definition.min,
            max: definition.max,
            warning: definition.warning,
            danger: definition.danger,
            last_updated: state.last_updated(),
            history: state.history().to_vec(),
            summary: MetricSummary::from_history(state.history()),
        }
    }
}
