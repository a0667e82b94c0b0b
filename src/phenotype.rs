//! # Phenotype
//!
//! An individual exists in one of two states:
//!
//! - [`Candidate`]: a genotype together with the generation it was born in.
//!   Alteration and replacement produce candidates.
//! - [`Phenotype`]: a candidate whose fitness has been computed. Only
//!   phenotypes can be selected, compared or reported.
//!
//! A population slot ([`Individual`]) holds either state. The evaluation
//! stage is the only place where a candidate turns into a phenotype, and it
//! does so exactly once: evaluating a phenotype again is a no-op.
//!
//! Genotypes are reference counted. Selecting the same individual several
//! times only copies a pointer, and an alterer that changes a genotype always
//! builds a new candidate instead of mutating a shared one.
//!
//! ## Example
//!
//! ```rust
//! use genepipe::genotype::BitGenotype;
//! use genepipe::phenotype::{Candidate, Individual};
//!
//! let candidate = Candidate::new(BitGenotype::new(vec![true, false]), 1);
//! let mut slot = Individual::Pending(candidate);
//! assert!(slot.fitness().is_none());
//!
//! let newly = slot.evaluate(&|g: &BitGenotype| g.count_ones() as f64, &|f: f64| f).unwrap();
//! assert!(newly);
//! assert_eq!(slot.fitness(), Some(1.0));
//! ```

use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::fitness::{FitnessFunction, FitnessScaler};
use crate::genotype::Genotype;

/// A genotype with its birth generation and no fitness yet.
#[derive(Debug)]
pub struct Candidate<G> {
    genotype: Arc<G>,
    generation: u64,
}

impl<G> Clone for Candidate<G> {
    fn clone(&self) -> Self {
        Self {
            genotype: Arc::clone(&self.genotype),
            generation: self.generation,
        }
    }
}

impl<G: Genotype> Candidate<G> {
    pub fn new(genotype: G, generation: u64) -> Self {
        Self {
            genotype: Arc::new(genotype),
            generation,
        }
    }

    pub fn genotype(&self) -> &G {
        &self.genotype
    }

    /// The generation this individual was born in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of generations since birth, as seen from `current`.
    pub fn age(&self, current: u64) -> u64 {
        current.saturating_sub(self.generation)
    }

    pub fn is_valid(&self) -> bool {
        self.genotype.is_valid()
    }

    /// Computes the fitness (function, then scaler) and turns the candidate
    /// into a phenotype.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if the scaled fitness is
    /// not a finite number.
    pub fn evaluate<F, S>(self, function: &F, scaler: &S) -> Result<Phenotype<G>>
    where
        F: FitnessFunction<G> + ?Sized,
        S: FitnessScaler + ?Sized,
    {
        let raw = function.evaluate(&self.genotype);
        let fitness = scaler.scale(raw);

        if !fitness.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {} (raw {})",
                fitness, raw
            )));
        }

        Ok(Phenotype {
            candidate: self,
            fitness,
        })
    }
}

/// An evaluated individual.
#[derive(Debug)]
pub struct Phenotype<G> {
    candidate: Candidate<G>,
    fitness: f64,
}

impl<G> Clone for Phenotype<G> {
    fn clone(&self) -> Self {
        Self {
            candidate: self.candidate.clone(),
            fitness: self.fitness,
        }
    }
}

impl<G: Genotype> Phenotype<G> {
    pub fn genotype(&self) -> &G {
        self.candidate.genotype()
    }

    pub fn generation(&self) -> u64 {
        self.candidate.generation()
    }

    pub fn age(&self, current: u64) -> u64 {
        self.candidate.age(current)
    }

    pub fn is_valid(&self) -> bool {
        self.candidate.is_valid()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The unevaluated part of this phenotype.
    pub fn candidate(&self) -> &Candidate<G> {
        &self.candidate
    }

    /// Returns `true` if both phenotypes share the same genotype allocation.
    pub fn same_genotype(&self, other: &Phenotype<G>) -> bool {
        Arc::ptr_eq(&self.candidate.genotype, &other.candidate.genotype)
    }
}

/// A population slot.
#[derive(Debug)]
pub enum Individual<G> {
    Pending(Candidate<G>),
    Evaluated(Phenotype<G>),
}

impl<G> Clone for Individual<G> {
    fn clone(&self) -> Self {
        match self {
            Individual::Pending(candidate) => Individual::Pending(candidate.clone()),
            Individual::Evaluated(phenotype) => Individual::Evaluated(phenotype.clone()),
        }
    }
}

impl<G: Genotype> Individual<G> {
    pub fn candidate(&self) -> &Candidate<G> {
        match self {
            Individual::Pending(candidate) => candidate,
            Individual::Evaluated(phenotype) => phenotype.candidate(),
        }
    }

    pub fn genotype(&self) -> &G {
        self.candidate().genotype()
    }

    pub fn generation(&self) -> u64 {
        self.candidate().generation()
    }

    pub fn age(&self, current: u64) -> u64 {
        self.candidate().age(current)
    }

    pub fn is_valid(&self) -> bool {
        self.candidate().is_valid()
    }

    pub fn fitness(&self) -> Option<f64> {
        match self {
            Individual::Pending(_) => None,
            Individual::Evaluated(phenotype) => Some(phenotype.fitness()),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self, Individual::Evaluated(_))
    }

    pub fn as_phenotype(&self) -> Option<&Phenotype<G>> {
        match self {
            Individual::Pending(_) => None,
            Individual::Evaluated(phenotype) => Some(phenotype),
        }
    }

    /// Evaluates the slot in place if it is still pending.
    ///
    /// Returns `true` if the fitness function was called.
    pub fn evaluate<F, S>(&mut self, function: &F, scaler: &S) -> Result<bool>
    where
        F: FitnessFunction<G> + ?Sized,
        S: FitnessScaler + ?Sized,
    {
        let candidate = match self {
            Individual::Evaluated(_) => return Ok(false),
            Individual::Pending(candidate) => candidate.clone(),
        };

        *self = Individual::Evaluated(candidate.evaluate(function, scaler)?);
        Ok(true)
    }
}

impl<G> From<Candidate<G>> for Individual<G> {
    fn from(candidate: Candidate<G>) -> Self {
        Individual::Pending(candidate)
    }
}

impl<G> From<Phenotype<G>> for Individual<G> {
    fn from(phenotype: Phenotype<G>) -> Self {
        Individual::Evaluated(phenotype)
    }
}
