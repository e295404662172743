use crate::engine::{MetricDefinition, validate_definitions};

use super::{schema::Config, validate::ConfigError};

pub(super) const KNOWN_PROFILES: [&str; 3] = ["bof", "building", "rul"];

impl Config {
    /// Explicit `[[metrics]]` entries win; otherwise the named profile supplies
    /// the metric set. Either way the result is validated.
    pub fn resolved_metrics(&self) -> Result<Vec<MetricDefinition>, ConfigError> {
        let metrics = if self.metrics.is_empty() {
            profile_metrics(self.profile.trim()).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "unknown profile {} (expected one of: {})",
                    self.profile,
                    KNOWN_PROFILES.join(", ")
                ))
            })?
        } else {
            self.metrics.clone()
        };
        validate_definitions(&metrics)?;
        Ok(metrics)
    }
}

fn profile_metrics(profile: &str) -> Option<Vec<MetricDefinition>> {
    match profile {
        "bof" => Some(bof_metrics()),
        "building" => Some(building_metrics()),
        "rul" => Some(rul_metrics()),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn metric(
    id: &str,
    name: &str,
    unit: &str,
    min: f64,
    max: f64,
    warning: f64,
    danger: f64,
    base: f64,
    variance: f64,
) -> MetricDefinition {
    MetricDefinition {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        min,
        max,
        warning,
        danger,
        base,
        variance,
    }
}

// Basic oxygen furnace heat: bath temperature, lance oxygen and off-gas.
fn bof_metrics() -> Vec<MetricDefinition> {
    vec![
        metric("temperature", "Bath Temperature", "°C", 1600.0, 1700.0, 1680.0, 1690.0, 1660.0, 60.0),
        metric("oxygen_flow", "Oxygen Flow", " Nm³/h", 40000.0, 60000.0, 55000.0, 58000.0, 50000.0, 10000.0),
        metric("lance_height", "Lance Height", " m", 1.0, 3.0, 2.6, 2.8, 2.0, 1.2),
        metric("off_gas_co", "Off-gas CO", "%", 0.0, 100.0, 75.0, 85.0, 65.0, 30.0),
        metric("carbon_content", "Carbon Content", "%", 0.02, 0.2, 0.15, 0.18, 0.08, 0.1),
    ]
}

fn building_metrics() -> Vec<MetricDefinition> {
    vec![
        metric("zone_temperature", "Zone Temperature", "°C", 15.0, 35.0, 27.0, 30.0, 23.0, 8.0),
        metric("humidity", "Relative Humidity", "%", 20.0, 80.0, 60.0, 70.0, 45.0, 25.0),
        metric("co2", "CO2 Concentration", " ppm", 350.0, 2000.0, 1000.0, 1500.0, 700.0, 700.0),
        metric("power", "HVAC Power Draw", " kW", 0.0, 500.0, 350.0, 450.0, 250.0, 200.0),
        metric("chiller_supply", "Chiller Supply Temperature", "°C", 4.0, 14.0, 9.0, 11.0, 7.0, 4.0),
    ]
}

// Centrifugal pump feeding a bearing remaining-useful-life dashboard.
// Vibration thresholds follow the ISO 10816 class II zone boundaries.
fn rul_metrics() -> Vec<MetricDefinition> {
    vec![
        metric("vibration_velocity", "Vibration Velocity", " mm/s", 0.0, 50.0, 7.1, 11.2, 5.0, 14.0),
        metric("bearing_temperature", "Bearing Temperature", "°C", 20.0, 120.0, 80.0, 95.0, 60.0, 80.0),
        metric("motor_current", "Motor Current", " A", 0.0, 150.0, 100.0, 115.0, 75.0, 90.0),
        metric("discharge_pressure", "Discharge Pressure", " bar", 0.0, 30.0, 20.0, 24.0, 15.0, 20.0),
        metric("ambient_temperature", "Ambient Temperature", "°C", 10.0, 40.0, 32.0, 36.0, 25.0, 24.0),
    ]
}
