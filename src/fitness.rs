//! # Fitness
//!
//! A fitness function maps a genotype to a number; a scaler optionally
//! reshapes that number (for instance to tune selection pressure). The
//! [`Evaluator`] applies both to every pending slot of a population.
//!
//! Closures implement both traits directly:
//!
//! ```rust
//! use genepipe::fitness::{FitnessFunction, FitnessScaler};
//! use genepipe::genotype::BitGenotype;
//!
//! let ones = |g: &BitGenotype| g.count_ones() as f64;
//! let squared = |f: f64| f * f;
//!
//! let genotype = BitGenotype::new(vec![true, true, false]);
//! assert_eq!(squared.scale(ones.evaluate(&genotype)), 4.0);
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use tracing::trace;

use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;

/// Maps a genotype to its raw fitness.
pub trait FitnessFunction<G: Genotype>: Send + Sync {
    fn evaluate(&self, genotype: &G) -> f64;
}

impl<G, F> FitnessFunction<G> for F
where
    G: Genotype,
    F: Fn(&G) -> f64 + Send + Sync,
{
    fn evaluate(&self, genotype: &G) -> f64 {
        self(genotype)
    }
}

/// Rescales raw fitness values.
pub trait FitnessScaler: Send + Sync {
    fn scale(&self, fitness: f64) -> f64;
}

impl<F> FitnessScaler for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn scale(&self, fitness: f64) -> f64 {
        self(fitness)
    }
}

/// Leaves fitness values unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl FitnessScaler for IdentityScaler {
    fn scale(&self, fitness: f64) -> f64 {
        fitness
    }
}

/// Computes missing fitness values for a population.
pub struct Evaluator<G: Genotype> {
    function: Arc<dyn FitnessFunction<G>>,
    scaler: Arc<dyn FitnessScaler>,
    /// Smallest slice of the population handed to a single worker.
    min_chunk_len: usize,
}

impl<G: Genotype> Clone for Evaluator<G> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
            scaler: Arc::clone(&self.scaler),
            min_chunk_len: self.min_chunk_len,
        }
    }
}

impl<G: Genotype> std::fmt::Debug for Evaluator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("min_chunk_len", &self.min_chunk_len)
            .finish_non_exhaustive()
    }
}

impl<G: Genotype> Evaluator<G> {
    pub fn new(
        function: Arc<dyn FitnessFunction<G>>,
        scaler: Arc<dyn FitnessScaler>,
        min_chunk_len: usize,
    ) -> Self {
        Self {
            function,
            scaler,
            min_chunk_len: min_chunk_len.max(1),
        }
    }

    /// Evaluates every pending slot of `population` in place.
    ///
    /// Slots are processed in parallel on the current `rayon` pool; each
    /// worker owns a disjoint index range. Already evaluated slots are left
    /// untouched, so calling this twice never recomputes a fitness value.
    ///
    /// Returns the number of slots that were evaluated by this call.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if any fitness value is not
    /// finite. The population may then be partially evaluated.
    pub fn evaluate(&self, population: &mut Population<G>) -> Result<usize> {
        let function = self.function.as_ref();
        let scaler = self.scaler.as_ref();

        let evaluated = population
            .as_mut_slice()
            .par_iter_mut()
            .with_min_len(self.min_chunk_len)
            .map(|slot| slot.evaluate(function, scaler).map(usize::from))
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        trace!(evaluated, size = population.len(), "population evaluated");
        Ok(evaluated)
    }
}
