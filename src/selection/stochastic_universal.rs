use crate::error::Result;
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::roulette::proportional_probabilities;
use crate::selection::selector::{bucket_index, collect_indices, ensure_selectable, fitness_values, Selector};

/// Stochastic universal sampling.
///
/// Uses the same wheel as [`RouletteWheelSelector`](super::RouletteWheelSelector)
/// but spins it once: `count` pointers spaced `1 / count` apart, starting at a
/// random offset in `[0, 1 / count)`. Every individual is selected either
/// `floor(count * p)` or `ceil(count * p)` times, which gives much lower
/// variance than independent draws.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct StochasticUniversalSelector;

impl StochasticUniversalSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Genotype> Selector<G> for StochasticUniversalSelector {
    fn select(
        &self,
        population: &[Phenotype<G>],
        count: usize,
        optimize: Optimize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>> {
        if !ensure_selectable(population, count)? {
            return Ok(Population::new());
        }

        let cumulative = proportional_probabilities(&fitness_values(population), optimize)?;
        let spacing = 1.0 / count as f64;
        let start = rng.gen_f64() * spacing;

        let indices: Vec<usize> = (0..count)
            .map(|i| bucket_index(&cumulative, start + i as f64 * spacing))
            .collect();

        Ok(collect_indices(population, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;
    use crate::fitness::IdentityScaler;
    use crate::phenotype::Candidate;
    use crate::genotype::BitGenotype;

    fn population(fitness: &[f64]) -> Vec<Phenotype<BitGenotype>> {
        fitness
            .iter()
            .map(|&f| {
                Candidate::new(BitGenotype::new(vec![true]), 1)
                    .evaluate(&move |_: &BitGenotype| f, &IdentityScaler)
                    .unwrap()
            })
            .collect()
    }

    fn counts(population: &[Phenotype<BitGenotype>], selected: &Population<BitGenotype>) -> Vec<usize> {
        let mut counts = vec![0; population.len()];
        for slot in selected.iter() {
            let phenotype = slot.as_phenotype().unwrap();
            let idx = population.iter().position(|p| p.same_genotype(phenotype)).unwrap();
            counts[idx] += 1;
        }
        counts
    }

    #[test]
    fn test_counts_are_within_one_of_expectation() {
        let fitness = [1.0, 2.0, 3.0, 4.0];
        let population = population(&fitness);
        let total: f64 = fitness.iter().sum();

        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let selected = StochasticUniversalSelector::new()
                .select(&population, 20, Optimize::Maximum, &mut rng)
                .unwrap();

            assert_eq!(selected.len(), 20);
            for (i, count) in counts(&population, &selected).into_iter().enumerate() {
                let expected = 20.0 * fitness[i] / total;
                assert!((count as f64 - expected).abs() < 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_equal_fitness_selects_everyone_equally() {
        let population = population(&[5.0; 5]);
        let mut rng = RandomNumberGenerator::from_seed(13);

        let selected = StochasticUniversalSelector::new()
            .select(&population, 10, Optimize::Minimum, &mut rng)
            .unwrap();

        assert_eq!(counts(&population, &selected), vec![2; 5]);
    }

    #[test]
    fn test_all_zero_fitness_when_minimizing() {
        let population = population(&[0.0; 3]);
        let mut rng = RandomNumberGenerator::from_seed(8);

        let selected = StochasticUniversalSelector::new()
            .select(&population, 3, Optimize::Minimum, &mut rng)
            .unwrap();

        assert_eq!(counts(&population, &selected), vec![1; 3]);

        let result = StochasticUniversalSelector::new().select(&population, 3, Optimize::Maximum, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));
    }

    #[test]
    fn test_minimization_mirrors_maximization() {
        let maximized = population(&[9.0, 1.0]);
        let minimized = population(&[1.0, 9.0]);

        for seed in 0..10 {
            let mut rng_max = RandomNumberGenerator::from_seed(seed);
            let mut rng_min = RandomNumberGenerator::from_seed(seed);

            let a = StochasticUniversalSelector::new()
                .select(&maximized, 10, Optimize::Maximum, &mut rng_max)
                .unwrap();
            let b = StochasticUniversalSelector::new()
                .select(&minimized, 10, Optimize::Minimum, &mut rng_min)
                .unwrap();

            assert_eq!(counts(&maximized, &a), counts(&minimized, &b));
            assert_eq!(counts(&minimized, &b), vec![9, 1]);
        }
    }

    #[test]
    fn test_negative_fitness_is_an_error() {
        let population = population(&[1.0, -1.0]);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = StochasticUniversalSelector::new().select(&population, 2, Optimize::Maximum, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));
    }
}
