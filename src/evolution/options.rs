//! # EngineOptions
//!
//! The `EngineOptions` struct holds the numeric configuration of an engine:
//! population split, age limit, optimization direction and worker pool
//! sizing.
//!
//! ## Example
//!
//! ```rust
//! use genepipe::evolution::EngineOptions;
//! use genepipe::optimize::Optimize;
//!
//! // 100 individuals, 40% of them bred as offspring every generation.
//! let options = EngineOptions::builder()
//!     .population_size(100)
//!     .offspring_fraction(0.4)
//!     .max_phenotype_age(30)
//!     .optimize(Optimize::Minimum)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.offspring_count(), 40);
//! assert_eq!(options.survivors_count(), 60);
//!
//! // Defaults mirror a population of 50 with 60% offspring.
//! let defaults = EngineOptions::default();
//! assert_eq!(defaults.population_size(), 50);
//! ```

use crate::error::{GeneticError, Result};
use crate::optimize::Optimize;

const DEFAULT_POPULATION_SIZE: usize = 50;
const DEFAULT_OFFSPRING_FRACTION: f64 = 0.6;
const DEFAULT_MAX_PHENOTYPE_AGE: u64 = 70;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    offspring_count: usize,
    survivors_count: usize,
    max_phenotype_age: u64,
    optimize: Optimize,
    /// `None` uses the available parallelism.
    worker_threads: Option<usize>,
    /// Smallest slice of the population evaluated by a single worker.
    min_evaluation_chunk: usize,
}

impl EngineOptions {
    pub fn new(
        offspring_count: usize,
        survivors_count: usize,
        max_phenotype_age: u64,
        optimize: Optimize,
    ) -> Self {
        Self {
            offspring_count,
            survivors_count,
            max_phenotype_age,
            optimize,
            worker_threads: None,
            min_evaluation_chunk: 1,
        }
    }

    pub fn offspring_count(&self) -> usize {
        self.offspring_count
    }

    pub fn survivors_count(&self) -> usize {
        self.survivors_count
    }

    /// Offspring plus survivors; constant across generations.
    pub fn population_size(&self) -> usize {
        self.offspring_count + self.survivors_count
    }

    pub fn max_phenotype_age(&self) -> u64 {
        self.max_phenotype_age
    }

    pub fn optimize(&self) -> Optimize {
        self.optimize
    }

    pub fn worker_threads(&self) -> Option<usize> {
        self.worker_threads
    }

    pub fn min_evaluation_chunk(&self) -> usize {
        self.min_evaluation_chunk
    }

    pub fn set_worker_threads(&mut self, threads: Option<usize>) {
        self.worker_threads = threads;
    }

    pub fn set_min_evaluation_chunk(&mut self, chunk: usize) {
        self.min_evaluation_chunk = chunk;
    }

    /// Checks that every count and limit is positive.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` naming the first offending value.
    pub fn validate(&self) -> Result<()> {
        if self.offspring_count == 0 {
            return Err(GeneticError::Configuration(
                "Offspring count must be positive".to_string(),
            ));
        }
        if self.survivors_count == 0 {
            return Err(GeneticError::Configuration(
                "Survivors count must be positive".to_string(),
            ));
        }
        if self.max_phenotype_age == 0 {
            return Err(GeneticError::Configuration(
                "Maximal phenotype age must be positive".to_string(),
            ));
        }
        if self.worker_threads == Some(0) {
            return Err(GeneticError::Configuration(
                "Worker thread count must be positive".to_string(),
            ));
        }
        if self.min_evaluation_chunk == 0 {
            return Err(GeneticError::Configuration(
                "Minimal evaluation chunk must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EngineOptions` instance.
    pub fn builder() -> EngineOptionsBuilder {
        EngineOptionsBuilder::default()
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        let offspring = split_offspring(DEFAULT_POPULATION_SIZE, DEFAULT_OFFSPRING_FRACTION);
        Self::new(
            offspring,
            DEFAULT_POPULATION_SIZE - offspring,
            DEFAULT_MAX_PHENOTYPE_AGE,
            Optimize::Maximum,
        )
    }
}

fn split_offspring(population_size: usize, fraction: f64) -> usize {
    (population_size as f64 * fraction).round() as usize
}

/// Builder for `EngineOptions`.
///
/// Counts can be given directly (`offspring_count`, `survivors_count`) or
/// derived from `population_size` and `offspring_fraction`. Explicit counts
/// win over derived ones.
#[derive(Debug, Clone, Default)]
pub struct EngineOptionsBuilder {
    population_size: Option<usize>,
    offspring_fraction: Option<f64>,
    offspring_count: Option<usize>,
    survivors_count: Option<usize>,
    max_phenotype_age: Option<u64>,
    optimize: Option<Optimize>,
    worker_threads: Option<usize>,
    min_evaluation_chunk: Option<usize>,
}

impl EngineOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn offspring_fraction(mut self, value: f64) -> Self {
        self.offspring_fraction = Some(value);
        self
    }

    pub fn offspring_count(mut self, value: usize) -> Self {
        self.offspring_count = Some(value);
        self
    }

    pub fn survivors_count(mut self, value: usize) -> Self {
        self.survivors_count = Some(value);
        self
    }

    pub fn max_phenotype_age(mut self, value: u64) -> Self {
        self.max_phenotype_age = Some(value);
        self
    }

    pub fn optimize(mut self, value: Optimize) -> Self {
        self.optimize = Some(value);
        self
    }

    pub fn worker_threads(mut self, value: usize) -> Self {
        self.worker_threads = Some(value);
        self
    }

    pub fn min_evaluation_chunk(mut self, value: usize) -> Self {
        self.min_evaluation_chunk = Some(value);
        self
    }

    /// Builds and validates the options.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the offspring fraction is not
    /// in `[0, 1]` or if the resulting options fail
    /// [`EngineOptions::validate`].
    pub fn build(self) -> Result<EngineOptions> {
        let fraction = self.offspring_fraction.unwrap_or(DEFAULT_OFFSPRING_FRACTION);
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GeneticError::Configuration(
                "Offspring fraction must be in the range [0.0, 1.0]".to_string(),
            ));
        }

        let population_size = self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE);
        let derived_offspring = split_offspring(population_size, fraction);
        let offspring_count = self.offspring_count.unwrap_or(derived_offspring);
        let survivors_count = self
            .survivors_count
            .unwrap_or(population_size.saturating_sub(derived_offspring));

        let options = EngineOptions {
            offspring_count,
            survivors_count,
            max_phenotype_age: self.max_phenotype_age.unwrap_or(DEFAULT_MAX_PHENOTYPE_AGE),
            optimize: self.optimize.unwrap_or_default(),
            worker_threads: self.worker_threads,
            min_evaluation_chunk: self.min_evaluation_chunk.unwrap_or(1),
        };

        options.validate()?;
        Ok(options)
    }
}
