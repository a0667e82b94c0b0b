//! # Alteration
//!
//! Alterers apply mutation and recombination to the offspring population of
//! a generation. Every slot an alterer changes receives a new candidate born
//! in the current generation; its fitness is computed later by the
//! evaluation stage. Alterers never discard individuals, even invalid ones:
//! invalid individuals are replaced by the filter stage.

pub mod composite;
pub mod crossover;
pub mod mutator;

use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::phenotype::{Candidate, Individual};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

pub use composite::CompositeAlterer;
pub use crossover::{MeanCrossover, SinglePointCrossover};
pub use mutator::Mutator;

/// Trait for mutation and recombination policies.
pub trait Alterer<G: Genotype>: Debug + Send + Sync {
    /// Alters `population` in place and returns the number of individuals
    /// that were changed.
    fn alter(
        &self,
        population: &mut Population<G>,
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize>;
}

/// An altered population together with the number of changed individuals.
#[derive(Debug)]
pub struct AlterResult<G> {
    pub population: Population<G>,
    pub altered_count: usize,
}

/// Runs `alterer` over `population` and packages the outcome.
pub fn alter_population<G, A>(
    alterer: &A,
    mut population: Population<G>,
    generation: u64,
    rng: &mut RandomNumberGenerator,
) -> Result<AlterResult<G>>
where
    G: Genotype,
    A: Alterer<G> + ?Sized,
{
    let size = population.len();
    let altered_count = alterer.alter(&mut population, generation, rng)?;

    if population.len() != size {
        return Err(GeneticError::Alteration(format!(
            "Alterer changed the population size from {} to {}",
            size,
            population.len()
        )));
    }

    Ok(AlterResult {
        population,
        altered_count,
    })
}

/// Validates an alteration probability.
pub(crate) fn check_probability(probability: f64, what: &str) -> Result<f64> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GeneticError::Configuration(format!(
            "{} probability must be in the range [0.0, 1.0], got {}",
            what, probability
        )));
    }
    Ok(probability)
}

/// Stores a freshly altered genotype in `population[index]`.
pub(crate) fn replace_with<G: Genotype>(
    population: &mut Population<G>,
    index: usize,
    genotype: G,
    generation: u64,
) -> Result<()> {
    population.set(index, Individual::Pending(Candidate::new(genotype, generation)))?;
    Ok(())
}
