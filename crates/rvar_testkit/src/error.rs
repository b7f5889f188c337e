//! Error types for equivalence-check configuration.
//!
//! This module provides:
//! - `ConfigError`: Rejected outcome spaces and experiment settings

use thiserror::Error;

/// Configuration error for the equivalence oracle.
///
/// These errors occur during construction when invalid parameters are
/// provided; a constructed `Confidence` or `DiscreteOutcomeSpace` is
/// always valid.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Replicate count must be at least one.
    #[error("Invalid replicate count {0}: must be at least 1")]
    InvalidReplicates(usize),

    /// Threshold must be finite and lie strictly inside (0, 1).
    #[error("Invalid threshold {0}: must lie strictly inside (0, 1)")]
    InvalidThreshold(f64),

    /// An outcome space needs at least one outcome.
    #[error("Outcome space is empty")]
    EmptyOutcomeSpace,

    /// Outcomes must be pairwise distinct.
    #[error("Outcome at index {index} duplicates an earlier outcome")]
    DuplicateOutcome {
        /// Index of the repeated outcome
        index: usize,
    },

    /// Prior must have one entry per outcome.
    #[error("Prior has {prior} entries for {outcomes} outcomes")]
    PriorLengthMismatch {
        /// Number of outcomes
        outcomes: usize,
        /// Number of prior entries
        prior: usize,
    },

    /// Prior entries must be finite and positive.
    #[error("Invalid prior entry {value} at index {index}: must be finite and positive")]
    InvalidPrior {
        /// Index of the offending entry
        index: usize,
        /// The rejected value
        value: f64,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}
