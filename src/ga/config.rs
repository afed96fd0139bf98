//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::operators::{DEFAULT_CROSSOVER_BIAS, DEFAULT_MUTATION_PROBABILITY, GeneticOperators};
use crate::validation::{ValidationResult, validate_config};

/// Configuration for the timetabling GA.
///
/// Every field has a default, so a partial JSON/TOML document deserializes
/// into a complete configuration.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_mutation_probability(0.2)
///     .with_elite_count(1)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals per generation. Must be at least 2.
    pub population_size: usize,

    /// Generation budget. The run stops after evaluating this many
    /// generations even without a conflict-free schedule.
    pub max_generations: usize,

    /// Probability of mutating each child after crossover (0.0–1.0).
    pub mutation_probability: f64,

    /// Probability of taking each gene from the first parent (0.0–1.0).
    pub crossover_bias: f64,

    /// Number of top individuals copied unchanged into the next generation.
    ///
    /// 0 reproduces every slot by crossover, so the best individual of a
    /// generation may be lost. Any positive value makes the best fitness
    /// non-decreasing across generations.
    pub elite_count: usize,

    /// Whether to evaluate and reproduce in parallel using rayon.
    ///
    /// Results are identical either way for a given seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_generations: 100,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            crossover_bias: DEFAULT_CROSSOVER_BIAS,
            elite_count: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover bias.
    pub fn with_crossover_bias(mut self, bias: f64) -> Self {
        self.crossover_bias = bias.clamp(0.0, 1.0);
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Size of the parent pool: the top half, rounded down.
    ///
    /// Never below 2 (or the population size, if smaller), since every
    /// pairing needs two distinct parents.
    #[inline]
    pub fn parent_pool_size(&self) -> usize {
        (self.population_size / 2).max(2).min(self.population_size)
    }

    /// Operators configured by this config.
    pub fn operators(&self) -> GeneticOperators {
        GeneticOperators::new(self.crossover_bias, self.mutation_probability)
    }

    /// Validates the configuration.
    ///
    /// Returns every detected problem, not just the first.
    pub fn validate(&self) -> ValidationResult {
        validate_config(self)
    }
}
