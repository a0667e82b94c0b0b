use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::{
    bucket_index, collect_indices, cumulative_probabilities, ensure_selectable, fitness_values,
    sample_without_replacement, Selector,
};

/// Draws `count` indices from rank-derived weights, with or without
/// replacement.
fn sample_by_weights(
    weights: &[f64],
    count: usize,
    with_replacement: bool,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<usize>> {
    if !with_replacement {
        return sample_without_replacement(weights, count, rng);
    }

    let cumulative = cumulative_probabilities(weights)?;
    Ok((0..count)
        .map(|_| bucket_index(&cumulative, rng.gen_f64()))
        .collect())
}

/// Linear rank-based selection.
///
/// Individuals are ranked from worst (rank 0) to best (rank `n - 1`), with
/// ties keeping their original order. The selection probability of rank `r`
/// is
///
/// ```text
/// p(r) = (2 - s) / n + 2 * r * (s - 1) / (n * (n - 1))
/// ```
///
/// where `s` is the selection pressure in `[1, 2]`. At 1.0 all individuals
/// are equally likely; at 2.0 the worst individual is never selected. Because
/// only ranks matter, negative fitness values are fine.
///
/// By default individuals are drawn with replacement. In
/// [`without_replacement`](Self::without_replacement) mode the selector
/// returns distinct individuals and reports a `GeneticError::Selection` when
/// more are requested than the population holds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct LinearRankSelector {
    /// Higher values increase selection pressure.
    selection_pressure: f64,
    with_replacement: bool,
}

impl LinearRankSelector {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `selection_pressure`
    /// is not in the range [1.0, 2.0].
    pub fn new(selection_pressure: f64) -> Result<Self> {
        if !(1.0..=2.0).contains(&selection_pressure) {
            return Err(GeneticError::Configuration(
                "Selection pressure must be in the range [1.0, 2.0]".to_string(),
            ));
        }

        Ok(Self {
            selection_pressure,
            with_replacement: true,
        })
    }

    pub fn without_replacement(mut self) -> Self {
        self.with_replacement = false;
        self
    }

    /// Selection weight of every individual, indexed like `fitness`.
    fn weights(&self, fitness: &[f64], optimize: Optimize) -> Vec<f64> {
        let n = fitness.len();
        if n == 1 {
            return vec![1.0];
        }

        let n_f = n as f64;
        let s = self.selection_pressure;
        let mut weights = vec![0.0; n];
        for (rank, idx) in optimize.ascending_indices(fitness).into_iter().enumerate() {
            weights[idx] = (2.0 - s) / n_f + (2.0 * rank as f64 * (s - 1.0)) / (n_f * (n_f - 1.0));
        }
        weights
    }
}

impl Default for LinearRankSelector {
    fn default() -> Self {
        Self {
            selection_pressure: 1.5,
            with_replacement: true,
        }
    }
}

impl<G: Genotype> Selector<G> for LinearRankSelector {
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

        let weights = self.weights(&fitness_values(population), optimize);
        let indices = sample_by_weights(&weights, count, self.with_replacement, rng)?;

        Ok(collect_indices(population, indices))
    }
}

/// Exponential rank-based selection.
///
/// Individuals are ranked from best (rank 0) to worst, ties keeping their
/// original order, and rank `r` is selected with probability proportional to
/// `c^r` for a base `c` in `[0, 1)`. Values of `c` close to 1 approach uniform
/// selection; `c = 0` always selects the best individual.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ExponentialRankSelector {
    base: f64,
    with_replacement: bool,
}

impl ExponentialRankSelector {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `base` is not in the
    /// range [0.0, 1.0).
    pub fn new(base: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&base) {
            return Err(GeneticError::Configuration(
                "Exponential rank base must be in the range [0.0, 1.0)".to_string(),
            ));
        }

        Ok(Self {
            base,
            with_replacement: true,
        })
    }

    pub fn without_replacement(mut self) -> Self {
        self.with_replacement = false;
        self
    }

    fn weights(&self, fitness: &[f64], optimize: Optimize) -> Vec<f64> {
        let mut weights = vec![0.0; fitness.len()];
        for (rank, idx) in optimize.descending_indices(fitness).into_iter().enumerate() {
            weights[idx] = self.base.powi(rank as i32);
        }
        weights
    }
}

impl Default for ExponentialRankSelector {
    fn default() -> Self {
        Self {
            base: 0.975,
            with_replacement: true,
        }
    }
}

impl<G: Genotype> Selector<G> for ExponentialRankSelector {
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

        let weights = self.weights(&fitness_values(population), optimize);
        let indices = sample_by_weights(&weights, count, self.with_replacement, rng)?;

        Ok(collect_indices(population, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::IdentityScaler;
    use crate::genotype::BitGenotype;
    use crate::phenotype::Candidate;
    use std::collections::HashSet;

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

    #[test]
    fn test_linear_weights_favor_better_ranks() {
        let selector = LinearRankSelector::new(2.0).unwrap();
        let weights = selector.weights(&[0.5, 0.8, 0.3, 0.9, 0.1], Optimize::Maximum);

        // Ranks (worst first): 0.1, 0.3, 0.5, 0.8, 0.9
        assert_eq!(weights[4], 0.0);
        assert!(weights[2] < weights[0]);
        assert!(weights[0] < weights[1]);
        assert!(weights[1] < weights[3]);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);

        let weights = selector.weights(&[0.5, 0.8, 0.3, 0.9, 0.1], Optimize::Minimum);
        assert_eq!(weights[3], 0.0);
        assert!(weights[4] > weights[2]);
    }

    #[test]
    fn test_linear_ties_keep_original_order() {
        let selector = LinearRankSelector::new(2.0).unwrap();
        let weights = selector.weights(&[1.0, 1.0, 1.0], Optimize::Maximum);

        assert!(weights[0] < weights[1]);
        assert!(weights[1] < weights[2]);
    }

    #[test]
    fn test_linear_pressure_one_is_uniform() {
        let selector = LinearRankSelector::new(1.0).unwrap();
        let weights = selector.weights(&[3.0, -1.0, 7.0, 0.0], Optimize::Maximum);

        for w in weights {
            assert!((w - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_linear_selection_count() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selected = LinearRankSelector::default()
            .select(&population, 12, Optimize::Maximum, &mut rng)
            .unwrap();
        assert_eq!(selected.len(), 12);

        let single = population_of_one();
        let selected = LinearRankSelector::default()
            .select(&single, 3, Optimize::Maximum, &mut rng)
            .unwrap();
        assert_eq!(selected.len(), 3);
    }

    fn population_of_one() -> Vec<Phenotype<BitGenotype>> {
        population(&[42.0])
    }

    #[test]
    fn test_without_replacement_returns_distinct_individuals() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selected = LinearRankSelector::new(2.0)
            .unwrap()
            .without_replacement()
            .select(&population, 5, Optimize::Maximum, &mut rng)
            .unwrap();

        let distinct: HashSet<usize> = selected
            .iter()
            .map(|s| {
                let p = s.as_phenotype().unwrap();
                population.iter().position(|q| q.same_genotype(p)).unwrap()
            })
            .collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_without_replacement_rejects_oversized_request() {
        let population = population(&[0.5, 0.8]);
        let mut rng = RandomNumberGenerator::from_seed(42);

        let result = LinearRankSelector::default()
            .without_replacement()
            .select(&population, 3, Optimize::Maximum, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));

        let result = ExponentialRankSelector::default()
            .without_replacement()
            .select(&population, 3, Optimize::Maximum, &mut rng);
        assert!(matches!(result, Err(GeneticError::Selection(_))));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LinearRankSelector::new(0.5).is_err());
        assert!(LinearRankSelector::new(2.5).is_err());
        assert!(ExponentialRankSelector::new(1.0).is_err());
        assert!(ExponentialRankSelector::new(-0.1).is_err());
    }

    #[test]
    fn test_exponential_zero_base_always_picks_best() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(3);

        let selected = ExponentialRankSelector::new(0.0)
            .unwrap()
            .select(&population, 10, Optimize::Maximum, &mut rng)
            .unwrap();
        assert!(selected.iter().all(|s| s.fitness() == Some(0.9)));

        let selected = ExponentialRankSelector::new(0.0)
            .unwrap()
            .select(&population, 10, Optimize::Minimum, &mut rng)
            .unwrap();
        assert!(selected.iter().all(|s| s.fitness() == Some(0.1)));
    }

    #[test]
    fn test_exponential_weights_decay_with_rank() {
        let selector = ExponentialRankSelector::new(0.5).unwrap();
        let weights = selector.weights(&[2.0, 3.0, 1.0], Optimize::Maximum);

        assert_eq!(weights, vec![0.5, 1.0, 0.25]);
    }
}
