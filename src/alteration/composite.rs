use std::sync::Arc;

use crate::alteration::Alterer;
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Applies a sequence of alterers in order.
///
/// The reported count is the sum of the counts of every stage. An individual
/// altered by two stages is counted twice.
///
/// Stage order is significant: with the same seed, reordering the stages
/// generally produces a different population.
#[derive(Debug)]
pub struct CompositeAlterer<G: Genotype> {
    stages: Vec<Arc<dyn Alterer<G>>>,
}

impl<G: Genotype> Clone for CompositeAlterer<G> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<G: Genotype> Default for CompositeAlterer<G> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<G: Genotype> CompositeAlterer<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage that runs after all current stages.
    pub fn and_then<A>(mut self, alterer: A) -> Self
    where
        A: Alterer<G> + 'static,
    {
        self.stages.push(Arc::new(alterer));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<G: Genotype> Alterer<G> for CompositeAlterer<G> {
    fn alter(
        &self,
        population: &mut Population<G>,
        generation: u64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        let mut altered = 0;
        for stage in &self.stages {
            altered += stage.alter(population, generation, rng)?;
        }
        Ok(altered)
    }
}
