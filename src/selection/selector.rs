use std::fmt::Debug;

use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::{Individual, Phenotype};
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for selection policies.
///
/// A selector draws exactly `count` individuals from `population`, usually
/// with replacement, and returns them as a new population. The input is never
/// modified, which is what allows the offspring and survivor selections of
/// one generation to read the same population concurrently.
///
/// The optimization direction is passed on every call. It decides how
/// individuals are compared or weighted but never changes the algorithm.
///
/// # Examples
///
/// ```
/// use genepipe::fitness::IdentityScaler;
/// use genepipe::genotype::BitGenotype;
/// use genepipe::optimize::Optimize;
/// use genepipe::phenotype::Candidate;
/// use genepipe::rng::RandomNumberGenerator;
/// use genepipe::selection::{Selector, TournamentSelector};
///
/// let population: Vec<_> = (0..5)
///     .map(|i| {
///         Candidate::new(BitGenotype::new(vec![i % 2 == 0; 3]), 1)
///             .evaluate(&|g: &BitGenotype| g.count_ones() as f64, &IdentityScaler)
///             .unwrap()
///     })
///     .collect();
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let selector = TournamentSelector::new(2).unwrap();
/// let selected = selector.select(&population, 8, Optimize::Maximum, &mut rng).unwrap();
///
/// assert_eq!(selected.len(), 8);
/// ```
pub trait Selector<G: Genotype>: Debug + Send + Sync {
    /// Selects `count` individuals from `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `count > 0` and the population is empty (`GeneticError::EmptyPopulation`)
    /// - the population violates the policy's preconditions, e.g. negative
    ///   fitness for fitness-proportional selection (`GeneticError::Selection`)
    fn select(
        &self,
        population: &[Phenotype<G>],
        count: usize,
        optimize: Optimize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>>;
}

/// Common precondition check. Returns `false` when there is nothing to
/// select, in which case the caller returns an empty population.
pub(crate) fn ensure_selectable<G>(population: &[Phenotype<G>], count: usize) -> Result<bool> {
    if count == 0 {
        return Ok(false);
    }
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    Ok(true)
}

/// Copies the phenotypes at `indices`, in order, into a new population.
pub(crate) fn collect_indices<G: Genotype>(
    population: &[Phenotype<G>],
    indices: impl IntoIterator<Item = usize>,
) -> Population<G> {
    indices
        .into_iter()
        .map(|idx| Individual::Evaluated(population[idx].clone()))
        .collect()
}

pub(crate) fn fitness_values<G: Genotype>(population: &[Phenotype<G>]) -> Vec<f64> {
    population.iter().map(Phenotype::fitness).collect()
}

/// Turns non-negative weights into cumulative probabilities ending in 1.0.
///
/// # Errors
///
/// Returns `GeneticError::Selection` if a weight is negative or not finite,
/// or if all weights are zero.
pub(crate) fn cumulative_probabilities(weights: &[f64]) -> Result<Vec<f64>> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(GeneticError::Selection(format!(
            "Selection weights must be finite and non-negative, found {}",
            w
        )));
    }

    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(GeneticError::Selection(
            "At least one individual must have a non-zero selection weight".to_string(),
        ));
    }

    let mut cumulative = 0.0;
    let mut probs: Vec<f64> = weights
        .iter()
        .map(|w| {
            cumulative += w / sum;
            cumulative
        })
        .collect();

    // Guard against floating-point drift in the last bucket.
    if let Some(last) = probs.last_mut() {
        *last = 1.0;
    }

    Ok(probs)
}

/// Index of the bucket containing `r`, where `r` is in `[0, 1)`.
pub(crate) fn bucket_index(cumulative: &[f64], r: f64) -> usize {
    cumulative
        .partition_point(|&p| p <= r)
        .min(cumulative.len().saturating_sub(1))
}

/// Draws `count` distinct indices, each with probability proportional to its
/// remaining weight. When every remaining weight is zero, the rest are drawn
/// uniformly.
pub(crate) fn sample_without_replacement(
    weights: &[f64],
    count: usize,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<usize>> {
    if count > weights.len() {
        return Err(GeneticError::Selection(format!(
            "Cannot select {} distinct individuals from a population of {}",
            count,
            weights.len()
        )));
    }

    let mut remaining: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count {
        let total: f64 = remaining.iter().map(|(_, w)| w).sum();
        let pos = if total > 0.0 {
            let mut r = rng.gen_f64() * total;
            let mut pos = remaining
                .iter()
                .rposition(|(_, w)| *w > 0.0)
                .unwrap_or(remaining.len() - 1);
            for (i, (_, w)) in remaining.iter().enumerate() {
                if r < *w {
                    pos = i;
                    break;
                }
                r -= w;
            }
            pos
        } else {
            rng.index(remaining.len())
        };

        selected.push(remaining.remove(pos).0);
    }

    Ok(selected)
}
