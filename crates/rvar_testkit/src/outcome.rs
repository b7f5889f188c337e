//! Declared discrete outcome spaces.
//!
//! An outcome space lists every value a compared variable may produce and
//! the Dirichlet prior over their probabilities. It is declared by the
//! caller, never inferred from samples.

use crate::error::ConfigError;

/// Finite, ordered set of distinct outcomes with a Dirichlet prior.
///
/// `prior()[i]` is the concentration for `outcomes()[i]`. The default
/// prior is all ones (uniform).
///
/// # Examples
///
/// ```rust
/// use rvar_testkit::DiscreteOutcomeSpace;
///
/// let die = DiscreteOutcomeSpace::new((1..=6).collect::<Vec<u8>>()).unwrap();
/// assert_eq!(die.len(), 6);
/// assert_eq!(die.index_of(&4), Some(3));
/// assert_eq!(die.index_of(&7), None);
/// assert!(die.prior().iter().all(|&a| a == 1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteOutcomeSpace<A> {
    outcomes: Vec<A>,
    prior: Vec<f64>,
}

impl<A: PartialEq> DiscreteOutcomeSpace<A> {
    /// Creates an outcome space with the uniform prior.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `outcomes` is empty or contains duplicates.
    pub fn new(outcomes: Vec<A>) -> Result<Self, ConfigError> {
        let prior = vec![1.0; outcomes.len()];
        Self::with_prior(outcomes, prior)
    }

    /// Creates an outcome space with an explicit Dirichlet prior.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `outcomes` is empty or contains duplicates
    /// - `prior` length differs from `outcomes` length
    /// - any prior entry is non-finite or not positive
    pub fn with_prior(outcomes: Vec<A>, prior: Vec<f64>) -> Result<Self, ConfigError> {
        if outcomes.is_empty() {
            return Err(ConfigError::EmptyOutcomeSpace);
        }
        for index in 1..outcomes.len() {
            if outcomes[..index].contains(&outcomes[index]) {
                return Err(ConfigError::DuplicateOutcome { index });
            }
        }
        if prior.len() != outcomes.len() {
            return Err(ConfigError::PriorLengthMismatch {
                outcomes: outcomes.len(),
                prior: prior.len(),
            });
        }
        if let Some((index, &value)) = prior
            .iter()
            .enumerate()
            .find(|(_, a)| !(a.is_finite() && **a > 0.0))
        {
            return Err(ConfigError::InvalidPrior { index, value });
        }
        Ok(Self { outcomes, prior })
    }

    /// Position of `value` in the outcome list, if declared.
    pub fn index_of(&self, value: &A) -> Option<usize> {
        self.outcomes.iter().position(|outcome| outcome == value)
    }
}

impl<A> DiscreteOutcomeSpace<A> {
    /// Declared outcomes, in order.
    #[inline]
    pub fn outcomes(&self) -> &[A] {
        &self.outcomes
    }

    /// Dirichlet concentration per outcome.
    #[inline]
    pub fn prior(&self) -> &[f64] {
        &self.prior
    }

    /// Number of outcomes.
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always `false`; construction rejects empty spaces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl DiscreteOutcomeSpace<bool> {
    /// `[false, true]` with the uniform prior.
    pub fn boolean() -> Self {
        Self {
            outcomes: vec![false, true],
            prior: vec![1.0, 1.0],
        }
    }
}
