//! Experiment configuration for statistical equivalence checks.
//!
//! This module provides [`Confidence`], the immutable pair of replicate
//! count and decision threshold, and its fluent builder.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Replicate count and decision threshold of a comparison.
///
/// - `replicates`: Monte Carlo samples drawn per variable per seed
/// - `threshold`: posterior probability of difference above which two
///   variables are declared unequal
///
/// Immutable once constructed; use [`Confidence::new`] or
/// [`Confidence::builder`].
///
/// # Examples
///
/// ```rust
/// use rvar_testkit::Confidence;
///
/// let confidence = Confidence::builder()
///     .replicates(2_000)
///     .threshold(0.5)
///     .build()
///     .expect("valid confidence");
///
/// assert_eq!(confidence.replicates(), 2_000);
/// assert_eq!(confidence.threshold(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConfidence"))]
pub struct Confidence {
    replicates: usize,
    threshold: f64,
}

impl Confidence {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `replicates` is 0
    /// - `threshold` is non-finite or outside the open interval (0, 1)
    pub fn new(replicates: usize, threshold: f64) -> Result<Self, ConfigError> {
        if replicates == 0 {
            return Err(ConfigError::InvalidReplicates(replicates));
        }
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(Self {
            replicates,
            threshold,
        })
    }

    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ConfidenceBuilder {
        ConfidenceBuilder::default()
    }

    /// Returns the replicate count.
    #[inline]
    pub fn replicates(&self) -> usize {
        self.replicates
    }

    /// Returns the decision threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Builder for [`Confidence`].
///
/// Both fields are required; validation runs at [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct ConfidenceBuilder {
    replicates: Option<usize>,
    threshold: Option<f64>,
}

impl ConfidenceBuilder {
    /// Sets the replicate count.
    #[inline]
    pub fn replicates(mut self, replicates: usize) -> Self {
        self.replicates = Some(replicates);
        self
    }

    /// Sets the decision threshold.
    #[inline]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a field is missing or invalid.
    pub fn build(self) -> Result<Confidence, ConfigError> {
        let replicates = self.replicates.ok_or(ConfigError::InvalidParameter {
            name: "replicates",
            value: "must be specified".to_string(),
        })?;

        let threshold = self.threshold.ok_or(ConfigError::InvalidParameter {
            name: "threshold",
            value: "must be specified".to_string(),
        })?;

        Confidence::new(replicates, threshold)
    }
}

/// Unvalidated wire form; deserialisation goes through [`Confidence::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawConfidence {
    replicates: usize,
    threshold: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfidence> for Confidence {
    type Error = ConfigError;

    fn try_from(raw: RawConfidence) -> Result<Self, Self::Error> {
        Confidence::new(raw.replicates, raw.threshold)
    }
}
