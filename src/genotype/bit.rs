use std::ops::Range;

use super::{Genotype, GenotypeFactory};
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// A fixed-length bit string. Every bit pattern is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitGenotype {
    bits: Vec<bool>,
}

impl BitGenotype {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

impl Genotype for BitGenotype {
    fn len(&self) -> usize {
        self.bits.len()
    }

    fn is_valid(&self) -> bool {
        true
    }

    fn mutate_gene(&mut self, index: usize, _rng: &mut RandomNumberGenerator) {
        self.bits[index] = !self.bits[index];
    }

    fn swap_genes(&mut self, other: &mut Self, range: Range<usize>) {
        self.bits[range.clone()].swap_with_slice(&mut other.bits[range]);
    }
}

/// Creates random bit strings where each bit is set with `ones_probability`.
#[derive(Debug, Clone)]
pub struct BitFactory {
    length: usize,
    ones_probability: f64,
}

impl BitFactory {
    /// # Errors
    ///
    /// Returns a `GeneticError::Configuration` error if `length` is zero or
    /// `ones_probability` is not in `[0, 1]`.
    pub fn new(length: usize, ones_probability: f64) -> Result<Self> {
        if length == 0 {
            return Err(GeneticError::Configuration(
                "Bit genotype length must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&ones_probability) {
            return Err(GeneticError::Configuration(
                "Ones probability must be in the range [0.0, 1.0]".to_string(),
            ));
        }

        Ok(Self {
            length,
            ones_probability,
        })
    }
}

impl GenotypeFactory<BitGenotype> for BitFactory {
    fn new_instance(&self, rng: &mut RandomNumberGenerator) -> BitGenotype {
        BitGenotype::new(
            (0..self.length)
                .map(|_| rng.gen_bool(self.ones_probability))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutate_gene_flips() {
        let mut rng = RandomNumberGenerator::from_seed(0);
        let mut genotype = BitGenotype::new(vec![false, true, false]);

        genotype.mutate_gene(0, &mut rng);
        genotype.mutate_gene(1, &mut rng);

        assert_eq!(genotype.bits(), &[true, false, false]);
    }

    #[test]
    fn test_swap_genes_exchanges_tail() {
        let mut a = BitGenotype::new(vec![true; 4]);
        let mut b = BitGenotype::new(vec![false; 4]);

        a.swap_genes(&mut b, 2..4);

        assert_eq!(a.bits(), &[true, true, false, false]);
        assert_eq!(b.bits(), &[false, false, true, true]);
    }

    #[test]
    fn test_factory() {
        let mut rng = RandomNumberGenerator::from_seed(5);

        let all_ones = BitFactory::new(8, 1.0).unwrap().new_instance(&mut rng);
        assert_eq!(all_ones.count_ones(), 8);

        let all_zeros = BitFactory::new(8, 0.0).unwrap().new_instance(&mut rng);
        assert_eq!(all_zeros.count_ones(), 0);

        assert!(BitFactory::new(0, 0.5).is_err());
        assert!(BitFactory::new(4, 1.5).is_err());
    }
}
