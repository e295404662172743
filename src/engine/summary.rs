use serde::Serialize;

use super::{history::MetricHistory, status::MetricStatus};

/// Aggregate view of the samples currently held in a metric's history window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub sample_count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub normal_samples: usize,
    pub warning_samples: usize,
    pub critical_samples: usize,
}

impl MetricSummary {
    pub fn from_history(history: &MetricHistory) -> Option<Self> {
        let mut samples = history.iter();
        let first = samples.next()?;

        let mut summary = MetricSummary {
            sample_count: 0,
            min: first.value,
            max: first.value,
            mean: 0.0,
            normal_samples: 0,
            warning_samples: 0,
            critical_samples: 0,
        };
        let mut sum = 0.0;

        for sample in std::iter::once(first).chain(samples) {
            summary.sample_count += 1;
            sum += sample.value;
            summary.min = summary.min.min(sample.value);
            summary.max = summary.max.max(sample.value);
            match sample.status {
                MetricStatus::Normal => summary.normal_samples += 1,
                MetricStatus::Warning => summary.warning_samples += 1,
                MetricStatus::Critical => summary.critical_samples += 1,
            }
        }

        summary.mean = sum / summary.sample_count as f64;
        Some(summary)
    }
}
