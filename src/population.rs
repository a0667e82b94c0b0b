//! # Population
//!
//! [`Population`] is the mutable working buffer every pipeline stage
//! operates on. Its slots may be pending or evaluated.
//!
//! [`EvaluatedPopulation`] is the immutable, shareable form published in an
//! evolution state. It can only be built from a population whose slots are
//! all evaluated, and cloning it is cheap.

use std::ops::Index;
use std::sync::Arc;

use crate::error::{GeneticError, OptionExt, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::{Individual, Phenotype};

/// An ordered, growable collection of population slots.
#[derive(Debug)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
}

impl<G> Clone for Population<G> {
    fn clone(&self) -> Self {
        Self {
            individuals: self.individuals.clone(),
        }
    }
}

impl<G> Default for Population<G> {
    fn default() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }
}

impl<G: Genotype> Population<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    /// Replaces the slot at `index` and returns the previous occupant.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Other` if `index` is out of bounds.
    pub fn set(&mut self, index: usize, individual: Individual<G>) -> Result<Individual<G>> {
        let len = self.individuals.len();
        let slot = self.individuals.get_mut(index).ok_or_else_genetic(|| {
            GeneticError::Other(format!(
                "Population index {} out of bounds for size {}",
                index, len
            ))
        })?;

        Ok(std::mem::replace(slot, individual))
    }

    pub fn push(&mut self, individual: Individual<G>) {
        self.individuals.push(individual);
    }

    /// Moves every slot of `other` to the end of this population, keeping
    /// their order.
    pub fn append(&mut self, mut other: Population<G>) {
        self.individuals.append(&mut other.individuals);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Individual<G>] {
        &self.individuals
    }

    pub fn as_mut_slice(&mut self) -> &mut [Individual<G>] {
        &mut self.individuals
    }

    /// Number of slots whose fitness has not been computed yet.
    pub fn pending_count(&self) -> usize {
        self.individuals.iter().filter(|s| !s.is_evaluated()).count()
    }
}

impl<G: Genotype> Index<usize> for Population<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<G> FromIterator<Individual<G>> for Population<G> {
    fn from_iter<I: IntoIterator<Item = Individual<G>>>(iter: I) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl<G> IntoIterator for Population<G> {
    type Item = Individual<G>;
    type IntoIter = std::vec::IntoIter<Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

/// An immutable, fully evaluated population.
#[derive(Debug)]
pub struct EvaluatedPopulation<G> {
    phenotypes: Arc<[Phenotype<G>]>,
}

impl<G> Clone for EvaluatedPopulation<G> {
    fn clone(&self) -> Self {
        Self {
            phenotypes: Arc::clone(&self.phenotypes),
        }
    }
}

impl<G: Genotype> EvaluatedPopulation<G> {
    pub fn len(&self) -> usize {
        self.phenotypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phenotypes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phenotype<G>> {
        self.phenotypes.get(index)
    }

    pub fn as_slice(&self) -> &[Phenotype<G>] {
        &self.phenotypes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phenotype<G>> {
        self.phenotypes.iter()
    }

    pub fn fitness_values(&self) -> Vec<f64> {
        self.phenotypes.iter().map(Phenotype::fitness).collect()
    }

    /// The best phenotype; the first one wins ties.
    pub fn best(&self, optimize: Optimize) -> Option<&Phenotype<G>> {
        self.phenotypes.iter().reduce(|best, p| {
            if optimize.is_better(p.fitness(), best.fitness()) {
                p
            } else {
                best
            }
        })
    }

    /// The worst phenotype; the first one wins ties.
    pub fn worst(&self, optimize: Optimize) -> Option<&Phenotype<G>> {
        self.phenotypes.iter().reduce(|worst, p| {
            if optimize.is_better(worst.fitness(), p.fitness()) {
                p
            } else {
                worst
            }
        })
    }

    /// Copies the phenotypes into a mutable working population.
    pub fn to_population(&self) -> Population<G> {
        self.phenotypes
            .iter()
            .cloned()
            .map(Individual::Evaluated)
            .collect()
    }
}

impl<G: Genotype> TryFrom<Population<G>> for EvaluatedPopulation<G> {
    type Error = GeneticError;

    fn try_from(population: Population<G>) -> Result<Self> {
        let pending = population.pending_count();
        if pending > 0 {
            return Err(GeneticError::Other(format!(
                "Cannot publish a population with {} unevaluated individuals",
                pending
            )));
        }

        let phenotypes: Vec<Phenotype<G>> = population
            .into_iter()
            .filter_map(|slot| match slot {
                Individual::Evaluated(phenotype) => Some(phenotype),
                Individual::Pending(_) => None,
            })
            .collect();

        Ok(Self {
            phenotypes: phenotypes.into(),
        })
    }
}

impl<G: Genotype> Index<usize> for EvaluatedPopulation<G> {
    type Output = Phenotype<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.phenotypes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::IdentityScaler;
    use crate::genotype::BitGenotype;
    use crate::phenotype::Candidate;

    fn evaluated(ones: usize) -> Individual<BitGenotype> {
        let mut bits = vec![false; 5];
        bits[..ones].iter_mut().for_each(|b| *b = true);
        Candidate::new(BitGenotype::new(bits), 1)
            .evaluate(&|g: &BitGenotype| g.count_ones() as f64, &IdentityScaler)
            .unwrap()
            .into()
    }

    #[test]
    fn test_set_and_get() {
        let mut population: Population<BitGenotype> = (0..3).map(evaluated).collect();

        let previous = population.set(1, evaluated(4)).unwrap();

        assert_eq!(previous.fitness(), Some(1.0));
        assert_eq!(population[1].fitness(), Some(4.0));
        assert!(population.set(3, evaluated(0)).is_err());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut first: Population<BitGenotype> = (0..2).map(evaluated).collect();
        let second: Population<BitGenotype> = (3..5).map(evaluated).collect();

        first.append(second);

        let fitness: Vec<Option<f64>> = first.iter().map(|s| s.fitness()).collect();
        assert_eq!(fitness, vec![Some(0.0), Some(1.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_try_from_rejects_pending() {
        let mut population: Population<BitGenotype> = (0..2).map(evaluated).collect();
        population.push(Candidate::new(BitGenotype::new(vec![true]), 1).into());

        assert!(EvaluatedPopulation::try_from(population).is_err());
    }

    #[test]
    fn test_best_and_worst() {
        let population: Population<BitGenotype> = [2, 4, 1, 4].into_iter().map(evaluated).collect();
        let population = EvaluatedPopulation::try_from(population).unwrap();

        let best = population.best(Optimize::Maximum).unwrap();
        assert_eq!(best.fitness(), 4.0);
        assert!(best.same_genotype(&population[1]));

        assert_eq!(population.worst(Optimize::Maximum).unwrap().fitness(), 1.0);
        assert_eq!(population.best(Optimize::Minimum).unwrap().fitness(), 1.0);
        assert_eq!(population.fitness_values(), vec![2.0, 4.0, 1.0, 4.0]);
    }
}
