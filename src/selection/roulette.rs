use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::{
    bucket_index, collect_indices, cumulative_probabilities, ensure_selectable, fitness_values,
    Selector,
};

/// Fitness-proportional selection.
///
/// Each draw picks an individual with probability proportional to its
/// direction-adjusted fitness. For maximization the fitness is used as is.
/// For minimization each value is mirrored across the population's range as
/// `min + max - fitness`: the smallest value gets the slice the largest one
/// would get when maximizing, so `[a, b]` minimized is the wheel of `[b, a]`
/// maximized. A population of equal values is sampled uniformly in both
/// directions, except that all-zero fitness has nothing to maximize.
///
/// Fitness values must be non-negative. Negative values and an all-zero
/// population under [`Optimize::Maximum`] are reported as
/// `GeneticError::Selection`.
///
/// # Examples
///
/// ```
/// use genepipe::fitness::IdentityScaler;
/// use genepipe::genotype::BitGenotype;
/// use genepipe::optimize::Optimize;
/// use genepipe::phenotype::Candidate;
/// use genepipe::rng::RandomNumberGenerator;
/// use genepipe::selection::{RouletteWheelSelector, Selector};
///
/// let population: Vec<_> = [1.0, 2.0, 3.0]
///     .iter()
///     .map(|&f| {
///         Candidate::new(BitGenotype::new(vec![true]), 1)
///             .evaluate(&move |_: &BitGenotype| f, &IdentityScaler)
///             .unwrap()
///     })
///     .collect();
///
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let selected = RouletteWheelSelector::new()
///     .select(&population, 10, Optimize::Maximum, &mut rng)
///     .unwrap();
///
/// assert_eq!(selected.len(), 10);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelector;

impl RouletteWheelSelector {
    pub fn new() -> Self {
        Self
    }
}

/// Cumulative selection probabilities for fitness-proportional selectors.
///
/// # Errors
///
/// Returns `GeneticError::Selection` if any fitness value is negative or not
/// finite, or if all values are zero when maximizing.
pub(crate) fn proportional_probabilities(fitness: &[f64], optimize: Optimize) -> Result<Vec<f64>> {
    if let Some(f) = fitness.iter().find(|f| !f.is_finite() || **f < 0.0) {
        return Err(GeneticError::Selection(format!(
            "Fitness-proportional selection requires non-negative fitness values, found {}",
            f
        )));
    }

    let adjusted: Vec<f64> = match optimize {
        Optimize::Maximum => fitness.to_vec(),
        Optimize::Minimum => {
            let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
            let max = fitness.iter().copied().fold(0.0_f64, f64::max);
            if max - min <= 0.0 {
                // Every individual is equally good.
                vec![1.0; fitness.len()]
            } else {
                fitness.iter().map(|&f| min + max - f).collect()
            }
        }
    };

    cumulative_probabilities(&adjusted)
}

impl<G: Genotype> Selector<G> for RouletteWheelSelector {
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
        let indices: Vec<usize> = (0..count)
            .map(|_| bucket_index(&cumulative, rng.gen_f64()))
            .collect();

        Ok(collect_indices(population, indices))
    }
}
