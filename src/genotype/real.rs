use std::ops::Range;

use super::{Genotype, GenotypeFactory, MeanGenotype};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A vector of reals that must stay within `[min, max)`.
///
/// Mutation perturbs a gene by up to a tenth of the range in either
/// direction without clamping, so mutated genotypes can become invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct RealGenotype {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl RealGenotype {
    pub fn new(values: Vec<f64>, min: f64, max: f64) -> Self {
        Self { values, min, max }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Genotype for RealGenotype {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn is_valid(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.is_finite() && *v >= self.min && *v < self.max)
    }

    fn mutate_gene(&mut self, index: usize, rng: &mut RandomNumberGenerator) {
        let step = (self.max - self.min) * 0.1;
        self.values[index] += rng.gen_range(-step..=step);
    }

    fn swap_genes(&mut self, other: &mut Self, range: Range<usize>) {
        self.values[range.clone()].swap_with_slice(&mut other.values[range]);
    }
}

impl MeanGenotype for RealGenotype {
    /// Averages the genes both vectors share. If one vector is longer, its
    /// extra genes are kept as they are.
    fn mean(&self, other: &Self) -> Self {
        let shared = self.values.len().min(other.values.len());
        let tail = if self.values.len() > shared {
            &self.values[shared..]
        } else {
            &other.values[shared..]
        };

        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a + b) / 2.0)
            .chain(tail.iter().copied())
            .collect();

        Self::new(values, self.min, self.max)
    }
}

/// Creates real vectors with every gene uniform in `[min, max)`.
#[derive(Debug, Clone)]
pub struct RealFactory {
    length: usize,
    min: f64,
    max: f64,
}

impl RealFactory {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `length` is zero or
    /// the bounds do not describe a finite, non-empty range.
    pub fn new(length: usize, min: f64, max: f64) -> Result<Self> {
        if length == 0 {
            return Err(GeneticError::Configuration(
                "Real genotype length must be positive".to_string(),
            ));
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(GeneticError::Configuration(format!(
                "Invalid real gene range [{}, {})",
                min, max
            )));
        }

        Ok(Self { length, min, max })
    }
}

impl GenotypeFactory<RealGenotype> for RealFactory {
    fn new_instance(&self, rng: &mut RandomNumberGenerator) -> RealGenotype {
        let values = (0..self.length)
            .map(|_| rng.gen_range(self.min..self.max))
            .collect();

        RealGenotype::new(values, self.min, self.max)
    }
}
