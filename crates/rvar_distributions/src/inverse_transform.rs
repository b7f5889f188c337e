//! Samplers built from closed-form transforms of uniform draws.
//!
//! Every draw consumes exactly one 64-bit word, which keeps the number of
//! generator steps per sample fixed and easy to reason about:
//!
//! | Distribution | Transform |
//! |--------------|-----------|
//! | Uniform | `low + (high - low) * u` |
//! | Bernoulli | `u < p` |
//! | Categorical | first cumulative weight above `u * total` |
//! | Exponential | `-ln(v) / rate` |
//! | Gumbel | `location - scale * ln(-ln(v))` |
//!
//! Here `u` is uniform on `[0, 1)` and `v` uniform on the open interval
//! `(0, 1)`.

use rvar_core::effect::Effect;
use rvar_core::rng::RandomGeneratorState;
use rvar_core::variable::RandomVariable;

use crate::traits::{
    check_gumbel, check_probability, check_rate, check_uniform, check_weights, BernoulliSampler,
    CategoricalSampler, ExponentialSampler, GumbelSampler, SamplerResult, UniformSampler,
};

/// 2^-52.
const OPEN_UNIT: f64 = 1.0 / (1u64 << 52) as f64;

/// Uniform on the open interval `(0, 1)`: the midpoints of a 2^52 grid, so
/// both logarithms in the Gumbel transform stay finite.
fn open_unit<F, S>() -> RandomVariable<F, S, f64>
where
    F: Effect,
    S: RandomGeneratorState,
{
    RandomVariable::<F, S, u64>::next_u64().map(|bits| ((bits >> 12) as f64 + 0.5) * OPEN_UNIT)
}

/// Sampler family implemented with inverse-CDF transforms over
/// [`RandomVariable::next_f64`].
///
/// # Examples
///
/// ```rust
/// use rvar_core::effect::Identity;
/// use rvar_core::rng::SplitMix64;
/// use rvar_distributions::{BernoulliSampler, InverseTransformSamplers};
///
/// let always = InverseTransformSamplers
///     .bernoulli::<Identity, SplitMix64>(1.0)
///     .unwrap();
/// assert!(always.simulate(SplitMix64::from_seed(9)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InverseTransformSamplers;

impl UniformSampler for InverseTransformSamplers {
    fn uniform<F, S>(&self, low: f64, high: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_uniform(low, high)?;
        let width = high - low;
        Ok(RandomVariable::<F, S, f64>::next_f64().map(move |u| {
            // Rounding can land exactly on `high` for wide ranges
            let x = low + width * u;
            if x < high {
                x
            } else {
                low
            }
        }))
    }
}

impl BernoulliSampler for InverseTransformSamplers {
    fn bernoulli<F, S>(&self, p: f64) -> SamplerResult<F, S, bool>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_probability(p)?;
        Ok(RandomVariable::<F, S, f64>::next_f64().map(move |u| u < p))
    }
}

impl CategoricalSampler for InverseTransformSamplers {
    fn categorical<F, S>(&self, weights: &[f64]) -> SamplerResult<F, S, usize>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_weights(weights)?;
        let cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |acc, &w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        let total = cumulative[cumulative.len() - 1];
        let last_positive = weights.iter().rposition(|&w| w > 0.0).unwrap_or(0);

        Ok(RandomVariable::<F, S, f64>::next_f64().map(move |u| {
            let target = u * total;
            cumulative
                .partition_point(|&c| c <= target)
                .min(last_positive)
        }))
    }
}

impl ExponentialSampler for InverseTransformSamplers {
    fn exponential<F, S>(&self, rate: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_rate(rate)?;
        Ok(open_unit().map(move |v| -v.ln() / rate))
    }
}

impl GumbelSampler for InverseTransformSamplers {
    fn gumbel<F, S>(&self, location: f64, scale: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_gumbel(location, scale)?;
        Ok(open_unit().map(move |v| location - scale * (-v.ln()).ln()))
    }
}
