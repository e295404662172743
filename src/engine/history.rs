use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::status::MetricStatus;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub status: MetricStatus,
}

/// Sliding window of the most recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct MetricHistory {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl MetricHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: HistorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    pub fn to_vec(&self) -> Vec<HistorySample> {
        self.samples.iter().copied().collect()
    }
}
