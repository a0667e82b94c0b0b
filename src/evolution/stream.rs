use super::engine::Engine;
use super::state::{EvolutionResult, EvolutionState};
use crate::error::Result;
use crate::genotype::Genotype;
use crate::rng::RandomNumberGenerator;

/// An endless iterator of generations produced by an [`Engine`].
///
/// Each item is the result of evolving the previous item's state. After an
/// error is yielded the stream is exhausted.
///
/// ```rust
/// use genepipe::evolution::Engine;
/// use genepipe::genotype::{BitFactory, BitGenotype};
/// use genepipe::rng::RandomNumberGenerator;
///
/// let engine = Engine::<BitGenotype>::builder()
///     .with_factory(BitFactory::new(16, 0.5).unwrap())
///     .with_fitness_function(|g: &BitGenotype| g.count_ones() as f64)
///     .build()
///     .unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(7);
/// let start = engine.new_state(&mut rng).unwrap();
///
/// let last = engine
///     .stream(start, rng)
///     .take(10)
///     .last()
///     .unwrap()
///     .unwrap();
/// assert_eq!(last.generation(), 11);
/// ```
pub struct EvolutionStream<'a, G: Genotype> {
    engine: &'a Engine<G>,
    state: Option<EvolutionState<G>>,
    rng: RandomNumberGenerator,
}

impl<'a, G: Genotype> EvolutionStream<'a, G> {
    pub(crate) fn new(
        engine: &'a Engine<G>,
        state: EvolutionState<G>,
        rng: RandomNumberGenerator,
    ) -> Self {
        Self {
            engine,
            state: Some(state),
            rng,
        }
    }
}

impl<G: Genotype> Iterator for EvolutionStream<'_, G> {
    type Item = Result<EvolutionResult<G>>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let result = self.engine.evolve(&state, &mut self.rng);
        if let Ok(result) = &result {
            self.state = Some(result.state().clone());
        }
        Some(result)
    }
}
