use crate::error::Result;
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::{collect_indices, ensure_selectable, Selector};

/// Uniform random selection, ignoring fitness entirely.
///
/// Useful as a baseline when judging how much another selector contributes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSelector;

impl MonteCarloSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Genotype> Selector<G> for MonteCarloSelector {
    fn select(
        &self,
        population: &[Phenotype<G>],
        count: usize,
        _optimize: Optimize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>> {
        if !ensure_selectable(population, count)? {
            return Ok(Population::new());
        }

        let indices: Vec<usize> = (0..count).map(|_| rng.index(population.len())).collect();
        Ok(collect_indices(population, indices))
    }
}
