use crate::alteration::{check_probability, replace_with, Alterer};
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Per-gene mutation.
///
/// Every gene of every individual is mutated independently with the given
/// probability. An individual counts as altered if at least one of its genes
/// was mutated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Mutator {
    probability: f64,
}

impl Mutator {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Mutation")?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<G: Genotype> Alterer<G> for Mutator {
    fn alter(
        &self,
        population: &mut Population<G>,
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let mut altered = 0;

        for index in 0..population.len() {
            let genes = population[index].genotype().len();
            let hits: Vec<usize> = (0..genes)
                .filter(|_| rng.gen_bool(self.probability))
                .collect();

            if hits.is_empty() {
                continue;
            }

            let mut genotype = population[index].genotype().clone();
            for gene in hits {
                genotype.mutate_gene(gene, rng);
            }

            replace_with(population, index, genotype, generation)?;
            altered += 1;
        }

        Ok(altered)
    }
}
