use crate::error::Result;
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::{collect_indices, ensure_selectable, fitness_values, Selector};

/// Selects the best individuals, deterministically.
///
/// The population is ordered best first (ties keep their original order) and
/// the first `count` individuals are taken. When `count` exceeds the
/// population size the ordering is cycled, so the best individual appears
/// again after the worst one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct TruncationSelector;

impl TruncationSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Genotype> Selector<G> for TruncationSelector {
    fn select(
        &self,
        population: &[Phenotype<G>],
        count: usize,
        optimize: Optimize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>> {
        if !ensure_selectable(population, count)? {
            return Ok(Population::new());
        }

        let ordered = optimize.descending_indices(&fitness_values(population));
        Ok(collect_indices(
            population,
            ordered.into_iter().cycle().take(count),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::IdentityScaler;
    use crate::genotype::BitGenotype;
    use crate::phenotype::Candidate;

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

    fn fitness(selected: &Population<BitGenotype>) -> Vec<f64> {
        selected.iter().filter_map(|s| s.fitness()).collect()
    }

    #[test]
    fn test_selects_best_first() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = TruncationSelector::new()
            .select(&population, 2, Optimize::Maximum, &mut rng)
            .unwrap();
        assert_eq!(fitness(&selected), vec![0.9, 0.8]);

        let selected = TruncationSelector::new()
            .select(&population, 2, Optimize::Minimum, &mut rng)
            .unwrap();
        assert_eq!(fitness(&selected), vec![0.1, 0.3]);
    }

    #[test]
    fn test_cycles_when_count_exceeds_size() {
        let population = population(&[1.0, 3.0, 2.0]);
        let mut rng = RandomNumberGenerator::from_seed(0);

        let selected = TruncationSelector::new()
            .select(&population, 7, Optimize::Maximum, &mut rng)
            .unwrap();

        assert_eq!(fitness(&selected), vec![3.0, 2.0, 1.0, 3.0, 2.0, 1.0, 3.0]);
    }
}
