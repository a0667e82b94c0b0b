use std::ops::{Add, AddAssign};
use std::time::Duration;

use crate::error::{GeneticError, Result};
use crate::genotype::Genotype;
use crate::optimize::Optimize;
use crate::phenotype::Phenotype;
use crate::population::EvaluatedPopulation;

/// A fully evaluated population at a given generation.
///
/// Generations start at 1. States are immutable and cheap to clone: the
/// population is shared.
#[derive(Debug)]
pub struct EvolutionState<G> {
    population: EvaluatedPopulation<G>,
    generation: u64,
}

impl<G> Clone for EvolutionState<G> {
    fn clone(&self) -> Self {
        Self {
            population: self.population.clone(),
            generation: self.generation,
        }
    }
}

impl<G: Genotype> EvolutionState<G> {
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `generation` is 0, or if a
    /// phenotype was born after `generation`.
    pub fn new(population: EvaluatedPopulation<G>, generation: u64) -> Result<Self> {
        if generation == 0 {
            return Err(GeneticError::Configuration(
                "Generation numbers start at 1".to_string(),
            ));
        }
        if let Some(phenotype) = population.iter().find(|p| p.generation() > generation) {
            return Err(GeneticError::Configuration(format!(
                "Phenotype born in generation {} cannot belong to generation {}",
                phenotype.generation(),
                generation
            )));
        }
        Ok(Self {
            population,
            generation,
        })
    }

    pub fn population(&self) -> &EvaluatedPopulation<G> {
        &self.population
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Wall-clock time spent in each stage of one `evolve` call.
///
/// The two selection chains run concurrently, so the stage durations do not
/// add up to `evolve`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvolutionDurations {
    pub offspring_selection: Duration,
    pub survivors_selection: Duration,
    pub offspring_alter: Duration,
    pub offspring_filter: Duration,
    pub survivor_filter: Duration,
    pub evaluation: Duration,
    /// The whole `evolve` call.
    pub evolve: Duration,
}

impl Add for EvolutionDurations {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            offspring_selection: self.offspring_selection + other.offspring_selection,
            survivors_selection: self.survivors_selection + other.survivors_selection,
            offspring_alter: self.offspring_alter + other.offspring_alter,
            offspring_filter: self.offspring_filter + other.offspring_filter,
            survivor_filter: self.survivor_filter + other.survivor_filter,
            evaluation: self.evaluation + other.evaluation,
            evolve: self.evolve + other.evolve,
        }
    }
}

impl AddAssign for EvolutionDurations {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// The outcome of one `evolve` call: the next state plus bookkeeping.
#[derive(Debug)]
pub struct EvolutionResult<G> {
    state: EvolutionState<G>,
    durations: EvolutionDurations,
    altered_count: usize,
    invalid_count: usize,
    aged_count: usize,
    optimize: Optimize,
}

impl<G> Clone for EvolutionResult<G> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            durations: self.durations,
            altered_count: self.altered_count,
            invalid_count: self.invalid_count,
            aged_count: self.aged_count,
            optimize: self.optimize,
        }
    }
}

impl<G: Genotype> EvolutionResult<G> {
    pub(crate) fn new(
        state: EvolutionState<G>,
        durations: EvolutionDurations,
        altered_count: usize,
        invalid_count: usize,
        aged_count: usize,
        optimize: Optimize,
    ) -> Self {
        Self {
            state,
            durations,
            altered_count,
            invalid_count,
            aged_count,
            optimize,
        }
    }

    pub fn state(&self) -> &EvolutionState<G> {
        &self.state
    }

    pub fn into_state(self) -> EvolutionState<G> {
        self.state
    }

    pub fn population(&self) -> &EvaluatedPopulation<G> {
        self.state.population()
    }

    pub fn generation(&self) -> u64 {
        self.state.generation()
    }

    pub fn durations(&self) -> &EvolutionDurations {
        &self.durations
    }

    /// Individuals changed by the alterer, as reported by it.
    pub fn altered_count(&self) -> usize {
        self.altered_count
    }

    /// Invalid individuals replaced across both filter stages.
    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    /// Over-aged individuals replaced across both filter stages.
    pub fn aged_count(&self) -> usize {
        self.aged_count
    }

    pub fn optimize(&self) -> Optimize {
        self.optimize
    }

    pub fn best_phenotype(&self) -> Option<&Phenotype<G>> {
        self.state.population().best(self.optimize)
    }

    pub fn worst_phenotype(&self) -> Option<&Phenotype<G>> {
        self.state.population().worst(self.optimize)
    }
}
