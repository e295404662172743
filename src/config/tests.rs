use std::fs;

use tempfile::tempdir;

use super::{Config, ConfigError, RuntimeConfig, load_config, load_config_or_default};

const EXPLICIT_METRICS: &str = r#"refresh_interval_ms = 3000
history_capacity = 10
alert_capacity = 25
seed = 99

[summary]
enabled = false
interval_secs = 60

[features]
sound = true
dark_mode = false

[[metrics]]
id = "temperature"
name = "Bath Temperature"
unit = "°C"
min = 1600.0
max = 1700.0
warning = 1680.0
danger = 1690.0
base = 1660.0
variance = 60.0
"#;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("plantsim.toml");
    fs::write(&path, contents).expect("config should be written");
    (dir, path)
}

#[test]
fn empty_file_uses_defaults_and_bof_profile() {
    let (_dir, path) = write_config("");
    let config = load_config(&path).expect("defaults should validate");

    assert_eq!(config.refresh_interval_ms, 2000);
    assert_eq!(config.history_capacity, 20);
    assert_eq!(config.alert_capacity, 50);
    assert!(config.summary.enabled);

    let metrics = config.resolved_metrics().expect("preset should resolve");
    assert!(metrics.iter().any(|metric| metric.id == "temperature"));
}

#[test]
fn explicit_metrics_override_profile() {
    let (_dir, path) = write_config(EXPLICIT_METRICS);
    let config = load_config(&path).expect("explicit config should validate");

    assert_eq!(config.seed, Some(99));
    assert_eq!(config.features.get("sound"), Some(&true));

    let runtime = RuntimeConfig::from_config(&config).expect("runtime config");
    assert_eq!(runtime.settings.refresh_interval_ms, 3000);
    assert_eq!(runtime.metrics.len(), 1);
    assert_eq!(runtime.metrics[0].danger, 1690.0);
}

#[test]
fn inverted_thresholds_are_rejected() {
    let contents = EXPLICIT_METRICS.replace("danger = 1690.0", "danger = 1670.0");
    let (_dir, path) = write_config(&contents);

    assert!(matches!(
        load_config(&path),
        Err(ConfigError::Definition(_))
    ));
}

#[test]
fn refresh_interval_must_stay_in_range() {
    let (_dir, path) = write_config("refresh_interval_ms = 500\n");
    assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));

    let (_dir, path) = write_config("refresh_interval_ms = 20000\n");
    assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));
}

#[test]
fn unknown_profile_is_rejected() {
    let (_dir, path) = write_config("profile = \"foundry\"\n");
    let error = load_config(&path).expect_err("unknown profile should fail");
    assert!(error.to_string().contains("unknown profile foundry"));
}

#[test]
fn malformed_toml_reports_parse_error() {
    let (_dir, path) = write_config("refresh_interval_ms = \"fast\"\n");
    assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir should be created");
    let path = dir.path().join("absent.toml");

    assert!(matches!(load_config(&path), Err(ConfigError::Read { .. })));
    let config = load_config_or_default(&path).expect("defaults should be used");
    assert_eq!(config.profile, Config::default().profile);
}

#[test]
fn every_profile_resolves() {
    for profile in super::presets::KNOWN_PROFILES {
        let config = Config {
            profile: profile.to_string(),
            ..Config::default()
        };
        let metrics = config
            .resolved_metrics()
            .unwrap_or_else(|error| panic!("profile {profile} should resolve: {error}"));
        assert!(!metrics.is_empty());
    }
}

#[test]
fn rul_profile_models_a_pump_that_can_reach_danger() {
    let config = Config {
        profile: "rul".to_string(),
        ..Config::default()
    };
    let metrics = config.resolved_metrics().expect("rul preset should resolve");

    let ids: Vec<_> = metrics.iter().map(|metric| metric.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "vibration_velocity",
            "bearing_temperature",
            "motor_current",
            "discharge_pressure",
            "ambient_temperature",
        ]
    );
    for metric in &metrics {
        let peak = (metric.base + metric.variance / 2.0).min(metric.max);
        assert!(peak >= metric.danger, "{} never reaches danger", metric.id);
    }
}
