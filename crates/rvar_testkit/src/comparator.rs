//! Bayesian comparison of two outcome tallies.
//!
//! Two tallies over the same outcome space are compared as competing
//! models:
//!
//! - **same**: both tallies come from one categorical generator with a
//!   Dirichlet(`alpha`) prior over its probabilities
//! - **different**: each tally has its own generator, both with the same
//!   prior
//!
//! With equal prior odds the posterior probability of "different" is
//!
//! ```text
//! p = 1 - exp(same - log_sum_exp(same, different))
//! ```
//!
//! where `same` and `different` are the log marginal likelihoods of the
//! two models. Two tallies are judged equal iff `p <= threshold`.

use rvar_core::math::{ln_gamma, log_sum_exp};

use crate::confidence::Confidence;
use crate::outcome::DiscreteOutcomeSpace;
use crate::tally::OutcomeTally;

/// Dirichlet-multinomial log marginal likelihood of one count vector.
///
/// # Mathematical Definition
/// ```text
/// ln Γ(Σα) + ln Γ(n + 1) - ln Γ(n + Σα)
///   + Σ_k [ln Γ(x_k + α_k) - ln Γ(α_k) - ln Γ(x_k + 1)]
/// ```
/// with `n = Σ x_k`.
///
/// # Examples
/// ```
/// use rvar_testkit::comparator::log_marginal_likelihood;
///
/// // Beta-binomial with a uniform prior: P(3 heads in 5) = 1/6
/// let lml = log_marginal_likelihood(&[3, 2], &[1.0, 1.0]);
/// assert!((lml - (1.0_f64 / 6.0).ln()).abs() < 1e-12);
/// ```
pub fn log_marginal_likelihood(counts: &[u64], alpha: &[f64]) -> f64 {
    debug_assert_eq!(counts.len(), alpha.len());
    let alpha_sum: f64 = alpha.iter().sum();
    let n = counts.iter().sum::<u64>() as f64;

    let per_outcome: f64 = counts
        .iter()
        .zip(alpha)
        .map(|(&x, &a)| {
            let x = x as f64;
            ln_gamma(x + a) - ln_gamma(a) - ln_gamma(x + 1.0)
        })
        .sum();

    ln_gamma(alpha_sum) + ln_gamma(n + 1.0) - ln_gamma(n + alpha_sum) + per_outcome
}

/// Log marginal likelihood of two count vectors under one shared
/// generator.
///
/// # Mathematical Definition
/// ```text
/// ln Γ(Σα) + ln Γ(n₁ + 1) + ln Γ(n₂ + 1) - ln Γ(n₁ + n₂ + Σα)
///   + Σ_k [ln Γ(c1_k + c2_k + α_k) - ln Γ(α_k) - ln Γ(c1_k + 1) - ln Γ(c2_k + 1)]
/// ```
///
/// Symmetric in its first two arguments bit for bit.
pub fn joint_log_marginal_likelihood(first: &[u64], second: &[u64], alpha: &[f64]) -> f64 {
    debug_assert_eq!(first.len(), alpha.len());
    debug_assert_eq!(second.len(), alpha.len());
    let alpha_sum: f64 = alpha.iter().sum();
    let n1 = first.iter().sum::<u64>() as f64;
    let n2 = second.iter().sum::<u64>() as f64;

    let per_outcome: f64 = first
        .iter()
        .zip(second)
        .zip(alpha)
        .map(|((&x, &y), &a)| {
            let (x, y) = (x as f64, y as f64);
            ln_gamma(x + y + a) - ln_gamma(a) - (ln_gamma(x + 1.0) + ln_gamma(y + 1.0))
        })
        .sum();

    ln_gamma(alpha_sum) + (ln_gamma(n1 + 1.0) + ln_gamma(n2 + 1.0)) - ln_gamma(n1 + n2 + alpha_sum)
        + per_outcome
}

/// Posterior probability that `first` and `second` were produced by
/// different generators, under equal prior odds.
///
/// Always in `[0, 1]`; symmetric in its first two arguments.
pub fn posterior_probability_of_difference(first: &[u64], second: &[u64], alpha: &[f64]) -> f64 {
    let same = joint_log_marginal_likelihood(first, second, alpha);
    let different = log_marginal_likelihood(first, alpha) + log_marginal_likelihood(second, alpha);
    // 1 - exp(d) computed without cancellation for d near zero
    let p = -(same - log_sum_exp(same, different)).exp_m1();
    p.clamp(0.0, 1.0)
}

/// Outcome of comparing two tallies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    /// Posterior probability that the tallies come from different
    /// generators.
    pub probability_of_difference: f64,
    /// `true` iff `probability_of_difference <= threshold`.
    pub equal: bool,
}

/// Per-seed verdict: Dirichlet-multinomial marginal-likelihood ratio test
/// with a fixed prior and decision threshold.
///
/// # Examples
///
/// ```rust
/// use rvar_testkit::comparator::BayesianComparator;
/// use rvar_testkit::{Confidence, DiscreteOutcomeSpace, OutcomeTally};
///
/// let space = DiscreteOutcomeSpace::boolean();
/// let comparator = BayesianComparator::new(&space, &Confidence::new(1_000, 0.5).unwrap());
///
/// let fair = OutcomeTally::new(vec![500, 500]);
/// let biased = OutcomeTally::new(vec![100, 900]);
///
/// assert!(comparator.compare(&fair, &fair).equal);
/// assert!(!comparator.compare(&fair, &biased).equal);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BayesianComparator {
    prior: Vec<f64>,
    threshold: f64,
}

impl BayesianComparator {
    /// Creates a comparator using the prior of `space` and the threshold of
    /// `confidence`.
    pub fn new<A>(space: &DiscreteOutcomeSpace<A>, confidence: &Confidence) -> Self {
        Self {
            prior: space.prior().to_vec(),
            threshold: confidence.threshold(),
        }
    }

    /// Dirichlet prior in use.
    #[inline]
    pub fn prior(&self) -> &[f64] {
        &self.prior
    }

    /// Decision threshold in use.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compares two tallies aligned to the comparator's outcome space.
    ///
    /// Dropped samples do not enter the comparison.
    pub fn compare(&self, first: &OutcomeTally, second: &OutcomeTally) -> Comparison {
        let p = posterior_probability_of_difference(first.counts(), second.counts(), &self.prior);
        Comparison {
            probability_of_difference: p,
            equal: p <= self.threshold,
        }
    }
}
