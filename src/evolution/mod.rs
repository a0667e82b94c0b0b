pub mod builder;
pub mod engine;
pub mod filter;
pub mod options;
pub mod state;
pub mod stream;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use filter::{filter_population, FilterResult};
pub use options::{EngineOptions, EngineOptionsBuilder};
pub use state::{EvolutionDurations, EvolutionResult, EvolutionState};
pub use stream::EvolutionStream;
