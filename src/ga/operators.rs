//! Configurable genetic operators for timetabling.
//!
//! [`GeneticOperators`] carries the operator probabilities so the runner
//! can switch them via configuration without touching the operators.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert!((ops.crossover_bias - 0.5).abs() < 1e-10);
//! assert!((ops.mutation_probability - 0.3).abs() < 1e-10);
//! ```

use rand::Rng;

use super::chromosome::{reassign_mutation, uniform_crossover};
use crate::models::{Catalog, Schedule};

/// Default probability of mutating a child.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.3;

/// Default probability of taking a gene from the first parent.
pub const DEFAULT_CROSSOVER_BIAS: f64 = 0.5;

/// Clamps `p` to [0, 1], using `default` when `p` is NaN.
pub(crate) fn probability_or(p: f64, default: f64) -> f64 {
    if p.is_nan() {
        default
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Crossover and mutation with their probabilities.
///
/// # Example
///
/// ```
/// use u_timetable::ga::operators::GeneticOperators;
///
/// let ops = GeneticOperators::new(0.7, 0.1);
/// assert!((ops.crossover_bias - 0.7).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticOperators {
    /// Probability that a child gene comes from the first parent.
    pub crossover_bias: f64,
    /// Probability that a child is mutated once after crossover.
    pub mutation_probability: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_bias: DEFAULT_CROSSOVER_BIAS,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }
}

impl GeneticOperators {
    /// Creates operators with the given probabilities, clamped to [0, 1].
    ///
    /// NaN falls back to the default probability.
    pub fn new(crossover_bias: f64, mutation_probability: f64) -> Self {
        Self {
            crossover_bias: probability_or(crossover_bias, DEFAULT_CROSSOVER_BIAS),
            mutation_probability: probability_or(
                mutation_probability,
                DEFAULT_MUTATION_PROBABILITY,
            ),
        }
    }

    /// Builds a child from two parents.
    pub fn crossover<R: Rng>(&self, p1: &Schedule, p2: &Schedule, rng: &mut R) -> Schedule {
        uniform_crossover(p1, p2, self.crossover_bias, rng)
    }

    /// Mutates unconditionally.
    pub fn mutate<R: Rng>(&self, schedule: &mut Schedule, catalog: &Catalog, rng: &mut R) {
        reassign_mutation(schedule, catalog, rng);
    }

    /// Mutates with `mutation_probability`. Returns whether it did.
    pub fn maybe_mutate<R: Rng>(
        &self,
        schedule: &mut Schedule,
        catalog: &Catalog,
        rng: &mut R,
    ) -> bool {
        let p = probability_or(self.mutation_probability, DEFAULT_MUTATION_PROBABILITY);
        if rng.random_bool(p) {
            self.mutate(schedule, catalog, rng);
            true
        } else {
            false
        }
    }

    /// Crossover followed by optional mutation: one reproduction step.
    pub fn offspring<R: Rng>(
        &self,
        p1: &Schedule,
        p2: &Schedule,
        catalog: &Catalog,
        rng: &mut R,
    ) -> Schedule {
        let mut child = self.crossover(p1, p2, rng);
        self.maybe_mutate(&mut child, catalog, rng);
        child
    }
}
