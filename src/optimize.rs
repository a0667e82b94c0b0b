//! # Optimize
//!
//! The optimization direction decides which of two fitness values is better.
//! Selectors consult it for every comparison and weighting; it never changes
//! the structure of an algorithm.

use std::cmp::Ordering;

/// Whether lower or higher fitness values are preferred.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optimize {
    /// Lower fitness is better.
    Minimum,
    /// Higher fitness is better.
    #[default]
    Maximum,
}

impl Optimize {
    /// Compares two fitness values with respect to this direction.
    ///
    /// Returns `Ordering::Greater` when `a` is better than `b`. NaN is always
    /// considered worse than any number, and two NaNs compare equal.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let natural = match (a.is_nan(), b.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        };

        match self {
            Optimize::Maximum => natural,
            Optimize::Minimum => natural.reverse(),
        }
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Returns the better of the two values, preferring `a` on ties.
    pub fn best(&self, a: f64, b: f64) -> f64 {
        if self.compare(b, a) == Ordering::Greater {
            b
        } else {
            a
        }
    }

    /// Returns the worse of the two values, preferring `a` on ties.
    pub fn worst(&self, a: f64, b: f64) -> f64 {
        if self.compare(b, a) == Ordering::Less {
            b
        } else {
            a
        }
    }

    /// Orders indices from worst to best fitness. The sort is stable, so
    /// equal fitness values keep their original relative order.
    pub fn ascending_indices(&self, fitness: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| self.compare(fitness[a], fitness[b]));
        indices
    }

    /// Orders indices from best to worst fitness. The sort is stable, so
    /// equal fitness values keep their original relative order.
    pub fn descending_indices(&self, fitness: &[f64]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..fitness.len()).collect();
        indices.sort_by(|&a, &b| self.compare(fitness[b], fitness[a]));
        indices
    }
}
