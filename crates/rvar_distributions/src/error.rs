//! Error types for distribution construction.
//!
//! This module provides:
//! - `DistributionError`: Rejected sampler parameters

use thiserror::Error;

/// Distribution construction errors.
///
/// Parameters are validated when the sampling variable is built, never
/// while it runs, so a constructed variable cannot fail on its own.
///
/// # Examples
/// ```
/// use rvar_distributions::DistributionError;
///
/// let err = DistributionError::InvalidParameter {
///     name: "rate",
///     reason: "must be positive and finite, got -1".to_string(),
/// };
/// assert!(format!("{}", err).contains("rate"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DistributionError {
    /// A distribution parameter is out of its valid domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A categorical distribution was given no weights.
    #[error("Categorical weights are empty")]
    EmptyWeights,
}

impl DistributionError {
    pub(crate) fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.to_string(),
        }
    }
}
