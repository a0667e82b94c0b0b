//! # genepipe
//!
//! A generational evolution engine. Each generation runs two selection
//! chains concurrently (offspring and survivors), alters the offspring,
//! replaces invalid and over-aged individuals, and evaluates the new
//! population in parallel.
//!
//! ```rust
//! use genepipe::prelude::*;
//!
//! let engine = Engine::<BitGenotype>::builder()
//!     .with_factory(BitFactory::new(32, 0.5).unwrap())
//!     .with_fitness_function(|g: &BitGenotype| g.count_ones() as f64)
//!     .with_options(EngineOptions::builder().population_size(20).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let mut state = engine.new_state(&mut rng).unwrap();
//! for _ in 0..5 {
//!     state = engine.evolve(&state, &mut rng).unwrap().into_state();
//! }
//!
//! assert_eq!(state.generation(), 6);
//! assert_eq!(state.population().len(), 20);
//! ```

pub mod alteration;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genotype;
pub mod optimize;
pub mod phenotype;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};

pub mod prelude {
    pub use crate::alteration::{Alterer, CompositeAlterer, MeanCrossover, Mutator, SinglePointCrossover};
    pub use crate::error::{GeneticError, Result};
    pub use crate::evolution::{
        Engine, EngineBuilder, EngineOptions, EvolutionDurations, EvolutionResult, EvolutionState,
    };
    pub use crate::fitness::{FitnessFunction, FitnessScaler, IdentityScaler};
    pub use crate::genotype::{
        BitFactory, BitGenotype, Genotype, GenotypeFactory, PermutationFactory, PermutationGenotype,
        RealFactory, RealGenotype,
    };
    pub use crate::optimize::Optimize;
    pub use crate::phenotype::{Candidate, Individual, Phenotype};
    pub use crate::population::{EvaluatedPopulation, Population};
    pub use crate::rng::RandomNumberGenerator;
    pub use crate::selection::{
        ExponentialRankSelector, LinearRankSelector, MonteCarloSelector, RouletteWheelSelector,
        Selector, StochasticUniversalSelector, TournamentSelector, TruncationSelector,
    };
}
