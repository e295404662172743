use chrono::{Duration as ChronoDuration, Utc};

use crate::engine::{
    alert::{AlertIdGenerator, AlertSeverity},
    definition::{DefinitionError, MetricDefinition, sample_definition},
    source::{ScriptedSource, SeededSource},
    status::{MetricStatus, classify},
};

use super::{Engine, ThresholdUpdate, advance, initialize};

fn scripted(definition: &MetricDefinition, values: &[f64]) -> ScriptedSource {
    ScriptedSource::new(
        values
            .iter()
            .map(|value| ScriptedSource::draw_for(definition, *value))
            .collect(),
    )
}

fn scripted_engine(definition: MetricDefinition, capacity: usize, values: &[f64]) -> Engine {
    let source = scripted(&definition, values);
    Engine::new(
        vec![definition],
        capacity,
        Box::new(source),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definition should be valid")
}

#[test]
fn initialize_backdates_independent_samples() {
    let definition = sample_definition("temp");
    let now = Utc::now();
    let interval = ChronoDuration::seconds(2);
    let mut source = scripted(&definition, &[1650.0, 1685.0, 1695.0, 1660.0]);

    let states = initialize(&[definition], now, interval, 4, &mut source);
    let state = states.get("temp").expect("state for temp");
    let history = state.history().to_vec();

    assert_eq!(history.len(), 4);
    assert_eq!(history[0].timestamp, now - ChronoDuration::seconds(6));
    assert_eq!(history[3].timestamp, now);
    for pair in history.windows(2) {
        assert_eq!(pair[1].timestamp - pair[0].timestamp, interval);
    }

    let statuses: Vec<_> = history.iter().map(|sample| sample.status).collect();
    assert_eq!(
        statuses,
        vec![
            MetricStatus::Normal,
            MetricStatus::Warning,
            MetricStatus::Critical,
            MetricStatus::Normal
        ]
    );
    assert_eq!(state.status(), MetricStatus::Normal);
    assert!((state.current_value() - 1660.0).abs() < 1e-9);
    assert_eq!(state.last_updated(), now);
}

#[test]
fn alerts_fire_on_entering_trouble_only() {
    let definition = sample_definition("temp");
    let mut source = scripted(
        &definition,
        &[1650.0, 1650.0, 1650.0, 1685.0, 1686.0, 1695.0, 1650.0],
    );
    let now = Utc::now();
    let mut states = initialize(
        std::slice::from_ref(&definition),
        now,
        ChronoDuration::seconds(2),
        2,
        &mut source,
    );
    let state = states.get_mut("temp").expect("state for temp");
    let mut ids = AlertIdGenerator::default();

    let emitted: Vec<Option<AlertSeverity>> = (1..=5)
        .map(|step| {
            advance(
                state,
                &definition,
                now + ChronoDuration::seconds(2 * step),
                &mut source,
                &mut ids,
            )
            .map(|alert| alert.severity())
        })
        .collect();

    assert_eq!(
        emitted,
        vec![
            None,
            Some(AlertSeverity::Warning),
            None,
            Some(AlertSeverity::Critical),
            None
        ]
    );
    assert_eq!(state.status(), MetricStatus::Normal);
}

#[test]
fn history_never_exceeds_capacity() {
    let mut engine = Engine::new(
        vec![sample_definition("temp")],
        5,
        Box::new(SeededSource::from_seed(11)),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definition should be valid");
    let start = Utc::now();

    for step in 1..=12 {
        engine.tick(start + ChronoDuration::seconds(2 * step));
        let state = engine.state("temp").expect("state for temp");
        assert_eq!(state.history().len(), 5);
        assert!(state.history().len() <= state.history().capacity());
    }
}

#[test]
fn status_always_matches_current_value() {
    let definition = sample_definition("temp");
    let mut engine = Engine::new(
        vec![definition.clone()],
        20,
        Box::new(SeededSource::from_seed(3)),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definition should be valid");

    for _ in 0..200 {
        engine.tick(Utc::now());
        let state = engine.state("temp").expect("state for temp");
        assert_eq!(
            state.status(),
            classify(state.current_value(), definition.warning, definition.danger)
        );
    }
}

#[test]
fn different_seeds_diverge_but_keep_shape() {
    let definitions = vec![sample_definition("temp"), {
        let mut co = sample_definition("co");
        co.name = "Off-gas CO".to_string();
        co
    }];
    let now = Utc::now();
    let build = |seed| {
        Engine::new(
            definitions.clone(),
            20,
            Box::new(SeededSource::from_seed(seed)),
            now,
            ChronoDuration::seconds(2),
        )
        .expect("definitions should be valid")
    };
    let mut first = build(1);
    let mut second = build(2);

    for step in 1..=30 {
        let at = now + ChronoDuration::seconds(2 * step);
        first.tick(at);
        second.tick(at);
    }

    let first_view = first.snapshot();
    let second_view = second.snapshot();
    assert_eq!(first_view.len(), second_view.len());

    let mut any_difference = false;
    for (left, right) in first_view.iter().zip(&second_view) {
        assert_eq!(left.history.len(), right.history.len());
        for sample in left.history.iter().chain(&right.history) {
            assert_eq!(sample.status, classify(sample.value, left.warning, left.danger));
        }
        any_difference |= left
            .history
            .iter()
            .zip(&right.history)
            .any(|(a, b)| a.value != b.value);
    }
    assert!(any_difference);
}

#[test]
fn threshold_update_applies_forward_only() {
    let definition = sample_definition("temp");
    let mut engine = scripted_engine(definition, 3, &[1675.0]);
    let now = Utc::now();

    let before: Vec<_> = engine
        .state("temp")
        .expect("state for temp")
        .history()
        .to_vec();
    assert!(before.iter().all(|sample| sample.status == MetricStatus::Normal));

    let update = engine
        .update_thresholds("temp", 1660.0, 1670.0, now)
        .expect("ordered thresholds should apply");
    let alert = match update {
        ThresholdUpdate::Applied(Some(alert)) => alert,
        other => panic!("retune into critical should alert, got {other:?}"),
    };
    assert_eq!(alert.severity(), AlertSeverity::Critical);

    let state = engine.state("temp").expect("state for temp");
    assert_eq!(state.status(), MetricStatus::Critical);
    assert_eq!(state.history().to_vec(), before);

    let alerts = engine.tick(now + ChronoDuration::seconds(2));
    assert!(alerts.is_empty());
    let latest = engine
        .state("temp")
        .and_then(|state| state.history().latest().copied())
        .expect("latest sample");
    assert_eq!(latest.status, MetricStatus::Critical);
    assert_eq!(engine.definition("temp").map(|d| d.danger), Some(1670.0));
}

#[test]
fn threshold_update_rejects_bad_pairs_and_ignores_unknown_ids() {
    let mut engine = scripted_engine(sample_definition("temp"), 3, &[1650.0]);
    let now = Utc::now();

    assert_eq!(
        engine.update_thresholds("missing", 1660.0, 1670.0, now),
        Ok(ThresholdUpdate::UnknownMetric)
    );
    assert!(matches!(
        engine.update_thresholds("temp", 1690.0, 1680.0, now),
        Err(DefinitionError::InvertedThresholds { .. })
    ));
    assert_eq!(engine.definition("temp").map(|d| d.warning), Some(1680.0));
}

#[test]
fn sync_adds_removes_and_retunes() {
    let mut engine = Engine::new(
        vec![sample_definition("temp"), sample_definition("co")],
        4,
        Box::new(SeededSource::from_seed(5)),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definitions should be valid");

    let mut retuned = sample_definition("temp");
    retuned.warning = 1610.0;
    retuned.danger = 1620.0;
    let incoming = vec![retuned, sample_definition("o2")];

    let report = engine
        .sync_definitions(&incoming, Utc::now(), ChronoDuration::seconds(2))
        .expect("incoming definitions should be valid");

    assert_eq!(report.removed, vec!["co".to_string()]);
    assert_eq!(report.added, vec!["o2".to_string()]);
    assert_eq!(report.retuned, vec!["temp".to_string()]);
    assert_eq!(engine.len(), 2);
    assert!(engine.state("co").is_none());
    assert_eq!(
        engine.state("o2").map(|state| state.history().len()),
        Some(4)
    );
    assert_eq!(engine.definition("temp").map(|d| d.warning), Some(1610.0));
}

#[test]
fn sync_replaces_metric_whose_range_changed() {
    let mut engine = Engine::new(
        vec![sample_definition("temp"), sample_definition("co")],
        4,
        Box::new(SeededSource::from_seed(9)),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definitions should be valid");

    let mut rescaled = sample_definition("temp");
    rescaled.min = 0.0;
    rescaled.max = 100.0;
    rescaled.warning = 50.0;
    rescaled.danger = 60.0;
    rescaled.base = 30.0;
    rescaled.variance = 10.0;
    let incoming = vec![rescaled.clone(), sample_definition("o2")];

    let report = engine
        .sync_definitions(&incoming, Utc::now(), ChronoDuration::seconds(2))
        .expect("rescaled definition should be accepted");

    assert_eq!(report.removed, vec!["co".to_string()]);
    assert_eq!(report.added, vec!["o2".to_string()]);
    assert_eq!(report.rebuilt, vec!["temp".to_string()]);
    assert!(report.retuned.is_empty());
    assert_eq!(engine.definition("temp"), Some(&rescaled));
    let state = engine.state("temp").expect("temp should still run");
    assert_eq!(state.history().len(), 4);
    assert!(
        state
            .history()
            .iter()
            .all(|sample| (0.0..=100.0).contains(&sample.value))
    );
    assert!(engine.state("co").is_none());
    assert!(engine.state("o2").is_some());
}

#[test]
fn rejected_sync_leaves_engine_untouched() {
    let mut engine = Engine::new(
        vec![sample_definition("temp"), sample_definition("co")],
        4,
        Box::new(SeededSource::from_seed(9)),
        Utc::now(),
        ChronoDuration::seconds(2),
    )
    .expect("definitions should be valid");
    let before = engine.snapshot();

    let mut broken = sample_definition("o2");
    broken.warning = 1695.0;
    let result = engine.sync_definitions(
        &[sample_definition("temp"), broken],
        Utc::now(),
        ChronoDuration::seconds(2),
    );

    assert!(matches!(
        result,
        Err(DefinitionError::InvertedThresholds { .. })
    ));
    assert_eq!(engine.len(), 2);
    assert!(engine.state("co").is_some());
    assert!(engine.state("o2").is_none());
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn add_and_remove_single_metrics() {
    let mut engine = scripted_engine(sample_definition("temp"), 3, &[1650.0]);
    let now = Utc::now();

    engine
        .add_metric(sample_definition("co"), now, ChronoDuration::seconds(2))
        .expect("new metric should be accepted");
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.state("co").map(|state| state.last_updated()), Some(now));
    assert_eq!(
        engine.add_metric(sample_definition("co"), now, ChronoDuration::seconds(2)),
        Err(DefinitionError::DuplicateId("co".to_string()))
    );

    assert!(engine.remove_metric("temp"));
    assert!(!engine.remove_metric("temp"));
    assert!(engine.state("temp").is_none());
    assert_eq!(engine.len(), 1);
}

#[test]
fn engine_rejects_invalid_definitions() {
    let mut inverted = sample_definition("temp");
    inverted.warning = 1695.0;

    let result = Engine::new(
        vec![inverted],
        4,
        Box::new(SeededSource::from_seed(1)),
        Utc::now(),
        ChronoDuration::seconds(2),
    );
    assert!(matches!(
        result,
        Err(DefinitionError::InvertedThresholds { .. })
    ));
}
