//! # Error Types
//!
//! This module defines the error type shared by every stage of the evolution
//! pipeline. Configuration problems are reported eagerly when an engine is
//! built; everything else is reported by the `evolve` call that hit it.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genepipe::error::{GeneticError, Result};
//!
//! fn check_counts(offspring: usize) -> Result<()> {
//!     if offspring == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Offspring count must be positive".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_counts(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genepipe::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[u32]) -> genepipe::error::Result<u32> {
//!     scores.iter().max().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[3, 7, 5]).unwrap(), 7);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running an engine.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// An engine, selector or alterer was configured with invalid parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A selector's preconditions were violated by the population it was given.
    #[error("Selection error: {0}")]
    Selection(String),

    /// An alterer could not be applied to the population it was given.
    #[error("Alteration error: {0}")]
    Alteration(String),

    /// An operation that needs at least one individual received none.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The fitness function or scaler produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A worker task failed unexpectedly while running a pipeline stage.
    #[error("Concurrency error in {stage}: {cause}")]
    Concurrency { stage: &'static str, cause: String },

    /// Random number generation failed.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use genepipe::error::ResultExt;
///
/// fn parse_size(raw: &str) -> genepipe::error::Result<usize> {
///     raw.parse::<usize>().context("Invalid population size")
/// }
///
/// assert!(parse_size("twelve").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error into a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Converts a panic payload caught from a worker task into a
/// `GeneticError::Concurrency` for the given stage.
pub(crate) fn from_panic(stage: &'static str, payload: Box<dyn std::any::Any + Send>) -> GeneticError {
    let cause = if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    };

    GeneticError::Concurrency { stage, cause }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_foreign_error() {
        let result: std::result::Result<usize, _> = "abc".parse::<usize>();
        let err = result.context("parsing size").unwrap_err();

        match err {
            GeneticError::Other(msg) => assert!(msg.starts_with("parsing size: ")),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_panic_extracts_message() {
        let payload = std::panic::catch_unwind(|| panic!("stage exploded")).unwrap_err();
        let err = from_panic("offspring selection", payload);

        match err {
            GeneticError::Concurrency { stage, cause } => {
                assert_eq!(stage, "offspring selection");
                assert_eq!(cause, "stage exploded");
            }
            other => panic!("Expected Concurrency error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = GeneticError::Selection("negative fitness".to_string());
        assert_eq!(err.to_string(), "Selection error: negative fitness");

        let err = GeneticError::EmptyPopulation;
        assert!(err.to_string().contains("empty population"));
    }
}
