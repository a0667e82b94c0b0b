use crate::alteration::{check_probability, replace_with, Alterer};
use crate::error::Result;
use crate::genotype::{Genotype, MeanGenotype};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Single-point crossover of adjacent pairs.
///
/// The population is walked in pairs `(0, 1), (2, 3), ...`; with an odd size
/// the last individual is left alone. Each pair is recombined with the given
/// probability: a cut point is drawn in `1..len` and all genes from the cut
/// onwards are exchanged. Both children count as altered.
///
/// Pairs whose genotypes have fewer than two genes cannot be cut and are
/// skipped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct SinglePointCrossover {
    probability: f64,
}

impl SinglePointCrossover {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Crossover")?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<G: Genotype> Alterer<G> for SinglePointCrossover {
    fn alter(
        &self,
        population: &mut Population<G>,
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let mut altered = 0;

        for first in (0..population.len().saturating_sub(1)).step_by(2) {
            let second = first + 1;
            if !rng.gen_bool(self.probability) {
                continue;
            }

            let len = population[first]
                .genotype()
                .len()
                .min(population[second].genotype().len());
            if len < 2 {
                continue;
            }

            let cut = rng.gen_range(1..len);
            let mut a = population[first].genotype().clone();
            let mut b = population[second].genotype().clone();
            a.swap_genes(&mut b, cut..len);

            replace_with(population, first, a, generation)?;
            replace_with(population, second, b, generation)?;
            altered += 2;
        }

        Ok(altered)
    }
}

/// Arithmetic recombination of adjacent pairs.
///
/// For each pair `(0, 1), (2, 3), ...`, with the given probability the first
/// individual is replaced by the gene-wise mean of both. The second
/// individual is kept, so each recombination alters one individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct MeanCrossover {
    probability: f64,
}

impl MeanCrossover {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `probability` is not in `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self> {
        Ok(Self {
            probability: check_probability(probability, "Crossover")?,
        })
    }
}

impl<G: MeanGenotype> Alterer<G> for MeanCrossover {
    fn alter(
        &self,
        population: &mut Population<G>,
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let mut altered = 0;

        for first in (0..population.len().saturating_sub(1)).step_by(2) {
            if !rng.gen_bool(self.probability) {
                continue;
            }

            let child = population[first]
                .genotype()
                .mean(population[first + 1].genotype());
            replace_with(population, first, child, generation)?;
            altered += 1;
        }

        Ok(altered)
    }
}
