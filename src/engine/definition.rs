use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static description of one simulated metric. A running metric changes its
/// thresholds through [`MetricDefinition::set_thresholds`]; anything else is
/// replaced wholesale by a config reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub warning: f64,
    pub danger: f64,
    pub base: f64,
    pub variance: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("metric id must not be empty")]
    EmptyId,
    #[error("duplicate metric id {0}")]
    DuplicateId(String),
    #[error("metric {id}: range [{min}, {max}] is empty or not finite")]
    InvalidRange { id: String, min: f64, max: f64 },
    #[error("metric {id}: warning {warning} must be below danger {danger}")]
    InvertedThresholds {
        id: String,
        warning: f64,
        danger: f64,
    },
    #[error("metric {id}: thresholds {warning}/{danger} fall outside [{min}, {max}]")]
    ThresholdsOutOfRange {
        id: String,
        warning: f64,
        danger: f64,
        min: f64,
        max: f64,
    },
    #[error("metric {id}: base value {base} falls outside [{min}, {max}]")]
    BaseOutOfRange {
        id: String,
        base: f64,
        min: f64,
        max: f64,
    },
    #[error("metric {id}: variance {variance} must be finite and non-negative")]
    InvalidVariance { id: String, variance: f64 },
}

impl MetricDefinition {
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.trim().is_empty() {
            return Err(DefinitionError::EmptyId);
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(DefinitionError::InvalidRange {
                id: self.id.clone(),
                min: self.min,
                max: self.max,
            });
        }
        self.check_thresholds(self.warning, self.danger)?;
        if !self.base.is_finite() || !(self.min..=self.max).contains(&self.base) {
            return Err(DefinitionError::BaseOutOfRange {
                id: self.id.clone(),
                base: self.base,
                min: self.min,
                max: self.max,
            });
        }
        if !self.variance.is_finite() || self.variance.is_sign_negative() {
            return Err(DefinitionError::InvalidVariance {
                id: self.id.clone(),
                variance: self.variance,
            });
        }
        Ok(())
    }

    /// Replaces both thresholds, leaving the definition untouched on error.
    pub fn set_thresholds(&mut self, warning: f64, danger: f64) -> Result<(), DefinitionError> {
        self.check_thresholds(warning, danger)?;
        self.warning = warning;
        self.danger = danger;
        Ok(())
    }

    /// Whether `other` draws from the same random walk: same range, base and
    /// variance. Thresholds, name and unit may differ.
    pub(crate) fn same_walk(&self, other: &MetricDefinition) -> bool {
        self.min == other.min
            && self.max == other.max
            && self.base == other.base
            && self.variance == other.variance
    }

    fn check_thresholds(&self, warning: f64, danger: f64) -> Result<(), DefinitionError> {
        let range = self.min..=self.max;
        if !range.contains(&warning) || !range.contains(&danger) {
            return Err(DefinitionError::ThresholdsOutOfRange {
                id: self.id.clone(),
                warning,
                danger,
                min: self.min,
                max: self.max,
            });
        }
        if warning >= danger {
            return Err(DefinitionError::InvertedThresholds {
                id: self.id.clone(),
                warning,
                danger,
            });
        }
        Ok(())
    }
}

pub fn validate_definitions(definitions: &[MetricDefinition]) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for definition in definitions {
        definition.validate()?;
        if !seen.insert(definition.id.as_str()) {
            return Err(DefinitionError::DuplicateId(definition.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_definition(id: &str) -> MetricDefinition {
    MetricDefinition {
        id: id.to_string(),
        name: "Hot Metal Temperature".to_string(),
        unit: "°C".to_string(),
        min: 1600.0,
        max: 1700.0,
        warning: 1680.0,
        danger: 1690.0,
        base: 1650.0,
        variance: 100.0,
    }
}
