use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetricStatus::Normal => "normal",
            MetricStatus::Warning => "warning",
            MetricStatus::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Boundary values fall into the higher band. Critical is checked first, so an
/// inverted threshold pair degrades to a two-band classification instead of
/// failing.
pub fn classify(value: f64, warning: f64, danger: f64) -> MetricStatus {
    if value >= danger {
        MetricStatus::Critical
    } else if value >= warning {
        MetricStatus::Warning
    } else {
        MetricStatus::Normal
    }
}
