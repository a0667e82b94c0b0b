//! # Genotype
//!
//! The engine treats candidate solutions as opaque values with a small,
//! uniform capability set: a gene count, a validity check, single-gene
//! mutation and gene exchange with another genotype. Every representation
//! provides the same methods, so alterers and the filter stage never need to
//! know which representation they are working on.
//!
//! ## Example
//!
//! ```rust
//! use genepipe::genotype::{BitFactory, Genotype, GenotypeFactory};
//! use genepipe::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let factory = BitFactory::new(16, 0.5).unwrap();
//! let genotype = factory.new_instance(&mut rng);
//!
//! assert_eq!(genotype.len(), 16);
//! assert!(genotype.is_valid());
//! ```

pub mod bit;
pub mod permutation;
pub mod real;

use std::fmt::Debug;
use std::ops::Range;

use crate::rng::RandomNumberGenerator;

pub use bit::{BitFactory, BitGenotype};
pub use permutation::{PermutationFactory, PermutationGenotype};
pub use real::{RealFactory, RealGenotype};

/// Capabilities the engine needs from a candidate-solution representation.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`
/// and `Sync` so populations can be shared across worker threads.
pub trait Genotype: Clone + Debug + Send + Sync + 'static {
    /// Number of genes.
    fn len(&self) -> usize;

    /// Returns `true` if the genotype has no genes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every gene satisfies the representation's rules.
    fn is_valid(&self) -> bool;

    /// Replaces or perturbs the gene at `index`.
    fn mutate_gene(&mut self, index: usize, rng: &mut RandomNumberGenerator);

    /// Exchanges the genes in `range` between `self` and `other`.
    ///
    /// The range must lie within both genotypes. The result is allowed to be
    /// invalid; invalid individuals are replaced later by the filter stage.
    fn swap_genes(&mut self, other: &mut Self, range: Range<usize>);
}

/// Genotypes whose genes can be averaged, for arithmetic recombination.
pub trait MeanGenotype: Genotype {
    /// Returns a genotype whose genes are the means of `self` and `other`.
    fn mean(&self, other: &Self) -> Self;
}

/// Produces independently random genotypes on demand.
pub trait GenotypeFactory<G: Genotype>: Send + Sync {
    fn new_instance(&self, rng: &mut RandomNumberGenerator) -> G;
}

impl<G, F> GenotypeFactory<G> for F
where
    G: Genotype,
    F: Fn(&mut RandomNumberGenerator) -> G + Send + Sync,
{
    fn new_instance(&self, rng: &mut RandomNumberGenerator) -> G {
        self(rng)
    }
}
