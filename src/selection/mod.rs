pub mod monte_carlo;
pub mod rank;
pub mod roulette;
pub mod selector;
pub mod stochastic_universal;
pub mod tournament;
pub mod truncation;

pub use monte_carlo::MonteCarloSelector;
pub use rank::{ExponentialRankSelector, LinearRankSelector};
pub use roulette::RouletteWheelSelector;
pub use selector::Selector;
pub use stochastic_universal::StochasticUniversalSelector;
pub use tournament::TournamentSelector;
pub use truncation::TruncationSelector;
