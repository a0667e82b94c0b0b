use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::engine::Engine;
use super::options::EngineOptions;
use crate::alteration::{Alterer, CompositeAlterer, Mutator, SinglePointCrossover};
use crate::error::{GeneticError, Result, ResultExt};
use crate::fitness::{Evaluator, FitnessFunction, FitnessScaler, IdentityScaler};
use crate::genotype::{Genotype, GenotypeFactory};
use crate::selection::{Selector, TournamentSelector};

const DEFAULT_CROSSOVER_PROBABILITY: f64 = 0.2;
const DEFAULT_MUTATION_PROBABILITY: f64 = 0.15;

/// Builder for [`Engine`].
///
/// Only the genotype factory and the fitness function are required. Unset
/// capabilities default to:
///
/// * scaler: [`IdentityScaler`]
/// * offspring and survivors selectors: [`TournamentSelector`] of size 3
/// * alterer: [`SinglePointCrossover`] (0.2) followed by [`Mutator`] (0.15)
/// * options: [`EngineOptions::default`]
pub struct EngineBuilder<G: Genotype> {
    factory: Option<Arc<dyn GenotypeFactory<G>>>,
    fitness_function: Option<Arc<dyn FitnessFunction<G>>>,
    scaler: Option<Arc<dyn FitnessScaler>>,
    offspring_selector: Option<Arc<dyn Selector<G>>>,
    survivors_selector: Option<Arc<dyn Selector<G>>>,
    alterer: Option<Arc<dyn Alterer<G>>>,
    options: Option<EngineOptions>,
    pool: Option<Arc<ThreadPool>>,
}

impl<G: Genotype> EngineBuilder<G> {
    pub fn new() -> Self {
        Self {
            factory: None,
            fitness_function: None,
            scaler: None,
            offspring_selector: None,
            survivors_selector: None,
            alterer: None,
            options: None,
            pool: None,
        }
    }

    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: GenotypeFactory<G> + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    pub fn with_fitness_function<F>(mut self, function: F) -> Self
    where
        F: FitnessFunction<G> + 'static,
    {
        self.fitness_function = Some(Arc::new(function));
        self
    }

    pub fn with_scaler<S>(mut self, scaler: S) -> Self
    where
        S: FitnessScaler + 'static,
    {
        self.scaler = Some(Arc::new(scaler));
        self
    }

    pub fn with_offspring_selector<S>(mut self, selector: S) -> Self
    where
        S: Selector<G> + 'static,
    {
        self.offspring_selector = Some(Arc::new(selector));
        self
    }

    pub fn with_survivors_selector<S>(mut self, selector: S) -> Self
    where
        S: Selector<G> + 'static,
    {
        self.survivors_selector = Some(Arc::new(selector));
        self
    }

    /// Uses the same selector for offspring and survivors.
    pub fn with_selector<S>(mut self, selector: S) -> Self
    where
        S: Selector<G> + 'static,
    {
        let selector: Arc<dyn Selector<G>> = Arc::new(selector);
        self.offspring_selector = Some(Arc::clone(&selector));
        self.survivors_selector = Some(selector);
        self
    }

    pub fn with_alterer<A>(mut self, alterer: A) -> Self
    where
        A: Alterer<G> + 'static,
    {
        self.alterer = Some(Arc::new(alterer));
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Runs the engine on an existing pool instead of creating one.
    /// `EngineOptions::worker_threads` is ignored in that case.
    pub fn with_thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Validates the configuration and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the factory or the fitness
    /// function is missing, or if the options are invalid. Returns
    /// `GeneticError::Other` if the worker pool cannot be created.
    pub fn build(self) -> Result<Engine<G>> {
        let factory = self.factory.ok_or_else(|| {
            GeneticError::Configuration("Genotype factory not specified".to_string())
        })?;

        let fitness_function = self.fitness_function.ok_or_else(|| {
            GeneticError::Configuration("Fitness function not specified".to_string())
        })?;

        let options = self.options.unwrap_or_default();
        options.validate()?;

        let scaler: Arc<dyn FitnessScaler> = match self.scaler {
            Some(scaler) => scaler,
            None => Arc::new(IdentityScaler),
        };
        let offspring_selector: Arc<dyn Selector<G>> = match self.offspring_selector {
            Some(selector) => selector,
            None => Arc::new(TournamentSelector::default()),
        };
        let survivors_selector: Arc<dyn Selector<G>> = match self.survivors_selector {
            Some(selector) => selector,
            None => Arc::new(TournamentSelector::default()),
        };
        let alterer: Arc<dyn Alterer<G>> = match self.alterer {
            Some(alterer) => alterer,
            None => Arc::new(default_alterer()?),
        };

        let pool: Arc<ThreadPool> = match self.pool {
            Some(pool) => pool,
            None => Arc::new(
                ThreadPoolBuilder::new()
                    .num_threads(options.worker_threads().unwrap_or(0))
                    .thread_name(|index| format!("genepipe-worker-{}", index))
                    .build()
                    .context("Failed to create worker pool")?,
            ),
        };

        let evaluator = Evaluator::new(fitness_function, scaler, options.min_evaluation_chunk());

        Ok(Engine::new(
            factory,
            evaluator,
            offspring_selector,
            survivors_selector,
            alterer,
            options,
            pool,
        ))
    }
}

impl<G: Genotype> Default for EngineBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}

fn default_alterer<G: Genotype>() -> Result<CompositeAlterer<G>> {
    Ok(CompositeAlterer::new()
        .and_then(SinglePointCrossover::new(DEFAULT_CROSSOVER_PROBABILITY)?)
        .and_then(Mutator::new(DEFAULT_MUTATION_PROBABILITY)?))
}
