use std::collections::HashMap;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use super::{
    alert::{Alert, AlertIdGenerator, derive_alert},
    definition::{DefinitionError, MetricDefinition, validate_definitions},
    history::{HistorySample, MetricHistory},
    source::{ValueSource, generate_value},
    state::MetricState,
    status::classify,
    view::MetricView,
};

/// Cold-start state for every definition: `capacity` independent draws,
/// spaced `sample_interval` apart and ending at `now`.
pub fn initialize(
    definitions: &[MetricDefinition],
    now: DateTime<Utc>,
    sample_interval: ChronoDuration,
    capacity: usize,
    source: &mut dyn ValueSource,
) -> HashMap<String, MetricState> {
    definitions
        .iter()
        .map(|definition| {
            let state = initialize_metric(definition, now, sample_interval, capacity, source);
            (definition.id.clone(), state)
        })
        .collect()
}

fn initialize_metric(
    definition: &MetricDefinition,
    now: DateTime<Utc>,
    sample_interval: ChronoDuration,
    capacity: usize,
    source: &mut dyn ValueSource,
) -> MetricState {
    let mut history = MetricHistory::with_capacity(capacity);

    let mut timestamps = Vec::with_capacity(history.capacity());
    let mut timestamp = now;
    for _ in 0..history.capacity() {
        timestamps.push(timestamp);
        timestamp = timestamp - sample_interval;
    }
    timestamps.reverse();

    let mut latest = None;
    for timestamp in timestamps {
        let value = generate_value(definition, source);
        let sample = HistorySample {
            timestamp,
            value,
            status: classify(value, definition.warning, definition.danger),
        };
        history.push(sample);
        latest = Some(sample);
    }

    // Capacity is at least one, so a sample always exists.
    let latest = latest.unwrap_or(HistorySample {
        timestamp: now,
        value: definition.base,
        status: classify(definition.base, definition.warning, definition.danger),
    });
    MetricState::new(history, latest)
}

/// One tick for one metric. Returns the alert raised by the status transition,
/// if any.
pub fn advance(
    state: &mut MetricState,
    definition: &MetricDefinition,
    now: DateTime<Utc>,
    source: &mut dyn ValueSource,
    ids: &mut AlertIdGenerator,
) -> Option<Alert> {
    let previous_status = state.status();
    let value = generate_value(definition, source);
    let status = classify(value, definition.warning, definition.danger);

    state.record(HistorySample {
        timestamp: now,
        value,
        status,
    });

    derive_alert(status, previous_status, value, definition, now, ids)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdUpdate {
    UnknownMetric,
    /// Carries the alert raised when the retuned thresholds move the current
    /// value into Warning or Critical. This alert is deliberate and comes from
    /// the operator's change, not from a tick: the live status must always
    /// match the current value, and a silent escalation would hide it.
    Applied(Option<Alert>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub retuned: Vec<String>,
    pub rebuilt: Vec<String>,
    pub alerts: Vec<Alert>,
}

pub struct Engine {
    definitions: Vec<MetricDefinition>,
    states: HashMap<String, MetricState>,
    capacity: usize,
    source: Box<dyn ValueSource>,
    alert_ids: AlertIdGenerator,
}

impl Engine {
    pub fn new(
        definitions: Vec<MetricDefinition>,
        capacity: usize,
        mut source: Box<dyn ValueSource>,
        now: DateTime<Utc>,
        sample_interval: ChronoDuration,
    ) -> Result<Self, DefinitionError> {
        validate_definitions(&definitions)?;
        let states = initialize(
            &definitions,
            now,
            sample_interval,
            capacity,
            source.as_mut(),
        );

        Ok(Self {
            definitions,
            states,
            capacity,
            source,
            alert_ids: AlertIdGenerator::default(),
        })
    }

    /// Advances every metric once, in definition order.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for definition in &self.definitions {
            let Some(state) = self.states.get_mut(&definition.id) else {
                continue;
            };
            if let Some(alert) = advance(
                state,
                definition,
                now,
                self.source.as_mut(),
                &mut self.alert_ids,
            ) {
                alerts.push(alert);
            }
        }
        alerts
    }

    /// Unknown ids are a no-op. Recorded history keeps its original statuses;
    /// only the live status is re-derived.
    pub fn update_thresholds(
        &mut self,
        metric_id: &str,
        warning: f64,
        danger: f64,
        now: DateTime<Utc>,
    ) -> Result<ThresholdUpdate, DefinitionError> {
        let Some(definition) = self
            .definitions
            .iter_mut()
            .find(|definition| definition.id == metric_id)
        else {
            return Ok(ThresholdUpdate::UnknownMetric);
        };
        definition.set_thresholds(warning, danger)?;

        let Some(state) = self.states.get_mut(metric_id) else {
            return Ok(ThresholdUpdate::Applied(None));
        };
        let previous_status = state.status();
        state.reclassify(warning, danger);

        Ok(ThresholdUpdate::Applied(derive_alert(
            state.status(),
            previous_status,
            state.current_value(),
            definition,
            now,
            &mut self.alert_ids,
        )))
    }

    pub fn add_metric(
        &mut self,
        definition: MetricDefinition,
        now: DateTime<Utc>,
        sample_interval: ChronoDuration,
    ) -> Result<(), DefinitionError> {
        definition.validate()?;
        if self.definition(&definition.id).is_some() {
            return Err(DefinitionError::DuplicateId(definition.id));
        }

        let state = initialize_metric(
            &definition,
            now,
            sample_interval,
            self.capacity,
            self.source.as_mut(),
        );
        self.states.insert(definition.id.clone(), state);
        self.definitions.push(definition);
        Ok(())
    }

    pub fn remove_metric(&mut self, metric_id: &str) -> bool {
        let before = self.definitions.len();
        self.definitions.retain(|definition| definition.id != metric_id);
        self.states.remove(metric_id);
        self.definitions.len() != before
    }

    /// Reconciles the metric set with a freshly loaded one. Incoming
    /// definitions are validated as a whole before anything changes, so a
    /// rejected set leaves the engine as it was.
    ///
    /// Surviving ids keep their history when only thresholds, name or unit
    /// changed. A changed range, base or variance restarts the metric from a
    /// fresh backdated history.
    pub fn sync_definitions(
        &mut self,
        definitions: &[MetricDefinition],
        now: DateTime<Utc>,
        sample_interval: ChronoDuration,
    ) -> Result<SyncReport, DefinitionError> {
        validate_definitions(definitions)?;
        let mut report = SyncReport::default();

        let previous_definitions = std::mem::take(&mut self.definitions);
        let mut previous_states = std::mem::take(&mut self.states);
        report.removed = previous_definitions
            .iter()
            .filter(|current| !definitions.iter().any(|next| next.id == current.id))
            .map(|current| current.id.clone())
            .collect();

        let mut states = HashMap::with_capacity(definitions.len());
        for next in definitions {
            let current = previous_definitions
                .iter()
                .find(|current| current.id == next.id);
            let kept = match (current, previous_states.remove(&next.id)) {
                (Some(current), Some(state)) if current.same_walk(next) => Some((current, state)),
                _ => None,
            };

            let state = match kept {
                Some((current, mut state)) => {
                    if current.warning != next.warning || current.danger != next.danger {
                        let previous_status = state.status();
                        state.reclassify(next.warning, next.danger);
                        report.alerts.extend(derive_alert(
                            state.status(),
                            previous_status,
                            state.current_value(),
                            next,
                            now,
                            &mut self.alert_ids,
                        ));
                        report.retuned.push(next.id.clone());
                    }
                    state
                }
                None => {
                    if current.is_some() {
                        report.rebuilt.push(next.id.clone());
                    } else {
                        report.added.push(next.id.clone());
                    }
                    initialize_metric(
                        next,
                        now,
                        sample_interval,
                        self.capacity,
                        self.source.as_mut(),
                    )
                }
            };
            states.insert(next.id.clone(), state);
        }

        self.definitions = definitions.to_vec();
        self.states = states;
        Ok(report)
    }

    pub fn definition(&self, metric_id: &str) -> Option<&MetricDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id == metric_id)
    }

    pub fn state(&self, metric_id: &str) -> Option<&MetricState> {
        self.states.get(metric_id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn snapshot(&self) -> Vec<MetricView> {
        self.definitions
            .iter()
            .filter_map(|definition| {
                self.states
                    .get(&definition.id)
                    .map(|state| MetricView::new(definition, state))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
