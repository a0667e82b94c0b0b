use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selector::{collect_indices, ensure_selectable, Selector};

/// Tournament selection.
///
/// For every output slot, `tournament_size` individuals are drawn uniformly
/// at random (with replacement) and the best of them is selected. Ties go to
/// the participant drawn first. A tournament size of 1 is plain uniform
/// sampling; larger tournaments increase selection pressure.
///
/// Works with negative fitness values and either optimization direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelector {
    tournament_size: usize,
}

impl TournamentSelector {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(
        &self,
        fitness: &[f64],
        optimize: Optimize,
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let mut best_idx = rng.index(fitness.len());

        for _ in 1..self.tournament_size {
            let idx = rng.index(fitness.len());
            if optimize.is_better(fitness[idx], fitness[best_idx]) {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl<G: Genotype> Selector<G> for TournamentSelector {
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

        let fitness: Vec<f64> = population.iter().map(Phenotype::fitness).collect();
        let winners: Vec<usize> = (0..count)
            .map(|_| self.run_tournament(&fitness, optimize, rng))
            .collect();

        Ok(collect_indices(population, winners))
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

    #[test]
    fn test_tournament_selection() {
        let population = population(&[0.5, 0.8, 0.3, 0.9, 0.1]);
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selected = TournamentSelector::default()
            .select(&population, 3, Optimize::Maximum, &mut rng)
            .unwrap();

        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_size_one_is_uniform() {
        let population = population(&[-3.0, 0.0, 100.0, 7.0]);
        let mut rng = RandomNumberGenerator::from_seed(17);

        let draws = 40_000;
        let selected = TournamentSelector::new(1)
            .unwrap()
            .select(&population, draws, Optimize::Maximum, &mut rng)
            .unwrap();

        let mut counts = vec![0usize; population.len()];
        for slot in selected.iter() {
            let p = slot.as_phenotype().unwrap();
            counts[population.iter().position(|q| q.same_genotype(p)).unwrap()] += 1;
        }

        let expected = draws as f64 / 4.0;
        for count in counts {
            assert!((count as f64 - expected).abs() < expected * 0.05);
        }
    }

    #[test]
    fn test_direction_changes_winner() {
        let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let selection = TournamentSelector::new(64).unwrap();

        // With 64 draws over 5 individuals every individual takes part with
        // overwhelming probability, so the winner is the global best.
        let mut rng = RandomNumberGenerator::from_seed(42);
        assert_eq!(selection.run_tournament(&fitness, Optimize::Maximum, &mut rng), 3);

        let mut rng = RandomNumberGenerator::from_seed(42);
        assert_eq!(selection.run_tournament(&fitness, Optimize::Minimum, &mut rng), 4);
    }

    #[test]
    fn test_negative_fitness_is_supported() {
        let population = population(&[-5.0, -1.0, -3.0]);
        let mut rng = RandomNumberGenerator::from_seed(5);

        let selected = TournamentSelector::new(50)
            .unwrap()
            .select(&population, 4, Optimize::Maximum, &mut rng)
            .unwrap();

        assert!(selected.iter().all(|s| s.fitness() == Some(-1.0)));
    }

    #[test]
    fn test_invalid_size() {
        assert!(TournamentSelector::new(0).is_err());
    }

    #[test]
    fn test_empty_population() {
        let population = population(&[]);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = TournamentSelector::default().select(&population, 2, Optimize::Maximum, &mut rng);
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));

        let empty = TournamentSelector::default()
            .select(&population, 0, Optimize::Maximum, &mut rng)
            .unwrap();
        assert!(empty.is_empty());
    }
}
