use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use tracing::debug;

use super::builder::EngineBuilder;
use super::filter::{filter_population, FilterResult};
use super::options::EngineOptions;
use super::state::{EvolutionDurations, EvolutionResult, EvolutionState};
use super::stream::EvolutionStream;
use crate::alteration::{alter_population, Alterer};
use crate::error::{self, GeneticError, Result};
use crate::fitness::Evaluator;
use crate::genotype::{Genotype, GenotypeFactory};
use crate::optimize::Optimize;
use crate::phenotype::{Candidate, Individual, Phenotype};
use crate::population::{EvaluatedPopulation, Population};
use crate::rng::RandomNumberGenerator;
use crate::selection::Selector;

/// Output of the offspring chain: select, alter, filter.
struct OffspringBranch<G> {
    filtered: FilterResult<G>,
    altered_count: usize,
    selection: Duration,
    alter: Duration,
    filter: Duration,
}

/// Output of the survivor chain: select, filter.
struct SurvivorBranch<G> {
    filtered: FilterResult<G>,
    selection: Duration,
    filter: Duration,
}

/// Advances an evaluated population by one generation.
///
/// An engine is immutable once built and can be shared between threads.
/// Each call to [`Engine::evolve`] runs two independent chains on the
/// engine's worker pool:
///
/// * offspring: select `offspring_count` individuals, alter them, filter them
/// * survivors: select `survivors_count` individuals, filter them
///
/// The chains are joined (survivors first, then offspring), the new
/// individuals are evaluated in parallel and the result becomes the state of
/// the next generation.
///
/// Given the same starting state and the same seeded generator, `evolve`
/// always produces the same result, regardless of the number of workers.
pub struct Engine<G: Genotype> {
    factory: Arc<dyn GenotypeFactory<G>>,
    evaluator: Evaluator<G>,
    offspring_selector: Arc<dyn Selector<G>>,
    survivors_selector: Arc<dyn Selector<G>>,
    alterer: Arc<dyn Alterer<G>>,
    options: EngineOptions,
    pool: Arc<ThreadPool>,
}

impl<G: Genotype> std::fmt::Debug for Engine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("offspring_selector", &self.offspring_selector)
            .field("survivors_selector", &self.survivors_selector)
            .field("alterer", &self.alterer)
            .field("options", &self.options)
            .field("workers", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl<G: Genotype> Engine<G> {
    pub(crate) fn new(
        factory: Arc<dyn GenotypeFactory<G>>,
        evaluator: Evaluator<G>,
        offspring_selector: Arc<dyn Selector<G>>,
        survivors_selector: Arc<dyn Selector<G>>,
        alterer: Arc<dyn Alterer<G>>,
        options: EngineOptions,
        pool: Arc<ThreadPool>,
    ) -> Self {
        Self {
            factory,
            evaluator,
            offspring_selector,
            survivors_selector,
            alterer,
            options,
            pool,
        }
    }

    /// Returns a builder for creating an `Engine`.
    pub fn builder() -> EngineBuilder<G> {
        EngineBuilder::new()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn optimize(&self) -> Optimize {
        self.options.optimize()
    }

    pub fn offspring_count(&self) -> usize {
        self.options.offspring_count()
    }

    pub fn survivors_count(&self) -> usize {
        self.options.survivors_count()
    }

    pub fn population_size(&self) -> usize {
        self.options.population_size()
    }

    pub fn max_phenotype_age(&self) -> u64 {
        self.options.max_phenotype_age()
    }

    /// Creates and evaluates a random population at generation 1.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if a fitness value is not
    /// finite, or `GeneticError::Concurrency` if an evaluation worker panics.
    pub fn new_state(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionState<G>> {
        let mut population: Population<G> = (0..self.population_size())
            .map(|_| Individual::Pending(Candidate::new(self.factory.new_instance(rng), 1)))
            .collect();

        self.evaluate(&mut population)?;
        EvolutionState::new(EvaluatedPopulation::try_from(population)?, 1)
    }

    /// Produces the next generation from `state`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a selector, the alterer or the
    /// fitness function. A panic in any worker is reported as
    /// `GeneticError::Concurrency`. On error no partial result is returned.
    pub fn evolve(
        &self,
        state: &EvolutionState<G>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult<G>> {
        let evolve_timer = Instant::now();
        let generation = state.generation();
        let population = state.population().as_slice();

        let mut offspring_rng = rng.fork();
        let mut survivor_rng = rng.fork();

        let (offspring, survivors) = self.pool.install(|| {
            rayon::join(
                || {
                    catch_unwind(AssertUnwindSafe(|| {
                        self.offspring_branch(population, generation, &mut offspring_rng)
                    }))
                    .map_err(|payload| error::from_panic("offspring", payload))
                    .and_then(|branch| branch)
                },
                || {
                    catch_unwind(AssertUnwindSafe(|| {
                        self.survivor_branch(population, generation, &mut survivor_rng)
                    }))
                    .map_err(|payload| error::from_panic("survivors", payload))
                    .and_then(|branch| branch)
                },
            )
        });
        let offspring = offspring?;
        let survivors = survivors?;

        let invalid_count = offspring.filtered.invalid_count + survivors.filtered.invalid_count;
        let aged_count = offspring.filtered.aged_count + survivors.filtered.aged_count;

        let mut next = survivors.filtered.population;
        next.append(offspring.filtered.population);

        let evaluation_timer = Instant::now();
        self.evaluate(&mut next)?;
        let evaluation = evaluation_timer.elapsed();

        let next_state = EvolutionState::new(EvaluatedPopulation::try_from(next)?, generation + 1)?;

        let durations = EvolutionDurations {
            offspring_selection: offspring.selection,
            survivors_selection: survivors.selection,
            offspring_alter: offspring.alter,
            offspring_filter: offspring.filter,
            survivor_filter: survivors.filter,
            evaluation,
            evolve: evolve_timer.elapsed(),
        };

        debug!(
            generation = next_state.generation(),
            altered = offspring.altered_count,
            invalid = invalid_count,
            aged = aged_count,
            elapsed = ?durations.evolve,
            "generation evolved"
        );

        Ok(EvolutionResult::new(
            next_state,
            durations,
            offspring.altered_count,
            invalid_count,
            aged_count,
            self.optimize(),
        ))
    }

    /// Returns an iterator that evolves `state` one generation per item.
    ///
    /// The iterator ends after yielding the first error.
    pub fn stream(
        &self,
        state: EvolutionState<G>,
        rng: RandomNumberGenerator,
    ) -> EvolutionStream<'_, G> {
        EvolutionStream::new(self, state, rng)
    }

    fn offspring_branch(
        &self,
        population: &[Phenotype<G>],
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<OffspringBranch<G>> {
        let timer = Instant::now();
        let selected = self.select(
            self.offspring_selector.as_ref(),
            population,
            self.offspring_count(),
            rng,
        )?;
        let selection = timer.elapsed();

        let timer = Instant::now();
        let altered = alter_population(self.alterer.as_ref(), selected, generation, rng)?;
        let alter = timer.elapsed();

        let timer = Instant::now();
        let filtered = filter_population(
            altered.population,
            generation,
            self.max_phenotype_age(),
            self.factory.as_ref(),
            rng,
        );
        let filter = timer.elapsed();

        Ok(OffspringBranch {
            filtered,
            altered_count: altered.altered_count,
            selection,
            alter,
            filter,
        })
    }

    fn survivor_branch(
        &self,
        population: &[Phenotype<G>],
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SurvivorBranch<G>> {
        let timer = Instant::now();
        let selected = self.select(
            self.survivors_selector.as_ref(),
            population,
            self.survivors_count(),
            rng,
        )?;
        let selection = timer.elapsed();

        let timer = Instant::now();
        let filtered = filter_population(
            selected,
            generation,
            self.max_phenotype_age(),
            self.factory.as_ref(),
            rng,
        );
        let filter = timer.elapsed();

        Ok(SurvivorBranch {
            filtered,
            selection,
            filter,
        })
    }

    fn select(
        &self,
        selector: &dyn Selector<G>,
        population: &[Phenotype<G>],
        count: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<G>> {
        let selected = selector.select(population, count, self.optimize(), rng)?;
        if selected.len() != count {
            return Err(GeneticError::Selection(format!(
                "Selector returned {} individuals, expected {}",
                selected.len(),
                count
            )));
        }
        Ok(selected)
    }

    fn evaluate(&self, population: &mut Population<G>) -> Result<usize> {
        let evaluator = &self.evaluator;
        catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| evaluator.evaluate(population))
        }))
        .map_err(|payload| error::from_panic("evaluation", payload))
        .and_then(|evaluated| evaluated)
    }
}
