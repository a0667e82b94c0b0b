use std::ops::Range;

use rand::seq::SliceRandom;

use super::{Genotype, GenotypeFactory};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// An ordering of the indices `0..len`.
///
/// Mutation swaps two positions and keeps the permutation valid. Gene
/// exchange with another permutation usually produces repeated indices, which
/// makes the genotype invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermutationGenotype {
    order: Vec<usize>,
}

impl PermutationGenotype {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl Genotype for PermutationGenotype {
    fn len(&self) -> usize {
        self.order.len()
    }

    fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        for &idx in &self.order {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    fn mutate_gene(&mut self, index: usize, rng: &mut RandomNumberGenerator) {
        let other = rng.index(self.order.len());
        self.order.swap(index, other);
    }

    fn swap_genes(&mut self, other: &mut Self, range: Range<usize>) {
        self.order[range.clone()].swap_with_slice(&mut other.order[range]);
    }
}

/// Creates uniformly shuffled permutations of `0..length`.
#[derive(Debug, Clone)]
pub struct PermutationFactory {
    length: usize,
}

impl PermutationFactory {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(GeneticError::Configuration(
                "Permutation length must be positive".to_string(),
            ));
        }

        Ok(Self { length })
    }
}

impl GenotypeFactory<PermutationGenotype> for PermutationFactory {
    fn new_instance(&self, rng: &mut RandomNumberGenerator) -> PermutationGenotype {
        let mut order: Vec<usize> = (0..self.length).collect();
        order.shuffle(&mut rng.rng);
        PermutationGenotype::new(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(PermutationGenotype::new(vec![2, 0, 1]).is_valid());
        assert!(!PermutationGenotype::new(vec![2, 2, 1]).is_valid());
        assert!(!PermutationGenotype::new(vec![0, 3, 1]).is_valid());
    }

    #[test]
    fn test_mutation_keeps_permutation_valid() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let mut genotype = PermutationFactory::new(12).unwrap().new_instance(&mut rng);

        for i in 0..12 {
            genotype.mutate_gene(i, &mut rng);
            assert!(genotype.is_valid());
        }
    }

    #[test]
    fn test_swap_genes_can_break_validity() {
        let mut a = PermutationGenotype::new(vec![0, 1, 2, 3]);
        let mut b = PermutationGenotype::new(vec![3, 2, 1, 0]);

        a.swap_genes(&mut b, 2..4);

        assert_eq!(a.order(), &[0, 1, 1, 0]);
        assert!(!a.is_valid());
        assert!(!b.is_valid());
    }
}
