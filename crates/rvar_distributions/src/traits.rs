//! Distribution capability traits.
//!
//! Each capability is a separate trait so callers can depend on exactly the
//! samplers they use and inject any implementation at construction time.
//! Every method validates its parameters up front and returns a random
//! variable that cannot fail on its own.

use rvar_core::effect::Effect;
use rvar_core::rng::RandomGeneratorState;
use rvar_core::variable::RandomVariable;

use crate::error::DistributionError;

/// Result of building a sampling variable.
pub type SamplerResult<F, S, A> = Result<RandomVariable<F, S, A>, DistributionError>;

/// Continuous uniform distribution on `[low, high)`.
pub trait UniformSampler {
    /// Builds a variable uniform on `[low, high)`.
    ///
    /// # Errors
    /// `InvalidParameter` unless both bounds and their difference are
    /// finite and `low < high`.
    fn uniform<F, S>(&self, low: f64, high: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState;
}

/// Bernoulli distribution.
pub trait BernoulliSampler {
    /// Builds a variable that is `true` with probability `p`.
    ///
    /// # Errors
    /// `InvalidParameter` unless `p` lies in `[0, 1]`.
    fn bernoulli<F, S>(&self, p: f64) -> SamplerResult<F, S, bool>
    where
        F: Effect,
        S: RandomGeneratorState;
}

/// Categorical distribution over indices `0..weights.len()`.
pub trait CategoricalSampler {
    /// Builds a variable drawing index `i` with probability proportional to
    /// `weights[i]`.
    ///
    /// # Errors
    /// `EmptyWeights` for an empty slice; `InvalidParameter` when a weight
    /// is negative or non-finite, or all weights are zero.
    fn categorical<F, S>(&self, weights: &[f64]) -> SamplerResult<F, S, usize>
    where
        F: Effect,
        S: RandomGeneratorState;
}

/// Exponential distribution.
pub trait ExponentialSampler {
    /// Builds a variable exponentially distributed with the given `rate`.
    ///
    /// # Errors
    /// `InvalidParameter` unless `rate` is positive and finite.
    fn exponential<F, S>(&self, rate: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState;
}

/// Gumbel (type I extreme value) distribution.
pub trait GumbelSampler {
    /// Builds a Gumbel variable with the given `location` and `scale`.
    ///
    /// # Errors
    /// `InvalidParameter` unless `location` is finite and `scale` positive
    /// and finite.
    fn gumbel<F, S>(&self, location: f64, scale: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState;
}

pub(crate) fn check_uniform(low: f64, high: f64) -> Result<(), DistributionError> {
    if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
        return Err(DistributionError::invalid(
            "low/high",
            format!("bounds must be finite, got [{}, {})", low, high),
        ));
    }
    if low >= high {
        return Err(DistributionError::invalid(
            "low/high",
            format!("low must be below high, got [{}, {})", low, high),
        ));
    }
    Ok(())
}

pub(crate) fn check_probability(p: f64) -> Result<(), DistributionError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DistributionError::invalid(
            "p",
            format!("must lie in [0, 1], got {}", p),
        ))
    }
}

pub(crate) fn check_weights(weights: &[f64]) -> Result<(), DistributionError> {
    if weights.is_empty() {
        return Err(DistributionError::EmptyWeights);
    }
    if let Some((i, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(DistributionError::invalid(
            "weights",
            format!("weight {} must be finite and non-negative, got {}", i, w),
        ));
    }
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(DistributionError::invalid(
            "weights",
            format!("total weight must be positive and finite, got {}", total),
        ));
    }
    Ok(())
}

pub(crate) fn check_rate(rate: f64) -> Result<(), DistributionError> {
    if rate > 0.0 && rate.is_finite() {
        Ok(())
    } else {
        Err(DistributionError::invalid(
            "rate",
            format!("must be positive and finite, got {}", rate),
        ))
    }
}

pub(crate) fn check_gumbel(location: f64, scale: f64) -> Result<(), DistributionError> {
    if !location.is_finite() {
        return Err(DistributionError::invalid(
            "location",
            format!("must be finite, got {}", location),
        ));
    }
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(DistributionError::invalid(
            "scale",
            format!("must be positive and finite, got {}", scale),
        ));
    }
    Ok(())
}
