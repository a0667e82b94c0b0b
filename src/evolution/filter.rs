//! # Filter stage
//!
//! Replaces invalid and over-aged individuals with freshly created ones born
//! in the current generation. Replacements are not checked again in the same
//! pass: a factory is trusted to produce valid genotypes.

use tracing::{trace, warn};

use crate::genotype::{Genotype, GenotypeFactory};
use crate::phenotype::{Candidate, Individual};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// A filtered population and the number of replacements made.
#[derive(Debug)]
pub struct FilterResult<G> {
    pub population: Population<G>,
    /// Individuals replaced because `age > max_age`.
    pub aged_count: usize,
    /// Individuals replaced because their genotype was invalid.
    pub invalid_count: usize,
}

/// Scans every slot of `population`. Invalid individuals are replaced first;
/// valid ones older than `max_age` are replaced next; all others are kept.
pub fn filter_population<G, F>(
    mut population: Population<G>,
    generation: u64,
    max_age: u64,
    factory: &F,
    rng: &mut RandomNumberGenerator,
) -> FilterResult<G>
where
    G: Genotype,
    F: GenotypeFactory<G> + ?Sized,
{
    let mut aged_count = 0;
    let mut invalid_count = 0;

    for slot in population.as_mut_slice() {
        if !slot.is_valid() {
            invalid_count += 1;
        } else if slot.age(generation) > max_age {
            aged_count += 1;
        } else {
            continue;
        }

        *slot = Individual::Pending(Candidate::new(factory.new_instance(rng), generation));
    }

    trace!(generation, aged_count, invalid_count, "population filtered");
    if invalid_count > 0 && invalid_count * 2 > population.len() {
        warn!(
            generation,
            invalid_count,
            size = population.len(),
            "more than half of the population was invalid"
        );
    }

    FilterResult {
        population,
        aged_count,
        invalid_count,
    }
}
