use rand::{Rng, SeedableRng, rngs::StdRng};

use super::definition::MetricDefinition;

/// Supplies uniform draws in `[0, 1)` to the random-walk generator.
pub trait ValueSource: Send {
    fn next_unit(&mut self) -> f64;
}

pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ValueSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

pub fn generate_value(definition: &MetricDefinition, source: &mut dyn ValueSource) -> f64 {
    let draw = source.next_unit();
    let raw = definition.base + (draw - 0.5) * definition.variance;
    // max/min rather than clamp: a hand-built definition with min > max must not panic.
    raw.max(definition.min).min(definition.max)
}

/// Replays a fixed list of draws, cycling once exhausted.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    draws: Vec<f64>,
    position: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Draw that makes `generate_value` land on `value` for `definition`.
    pub(crate) fn draw_for(definition: &MetricDefinition, value: f64) -> f64 {
        (value - definition.base) / definition.variance + 0.5
    }
}

#[cfg(test)]
impl ValueSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}
