//! Samplers delegating to `rand` and `rand_distr`.
//!
//! Each variable wraps a pre-built distribution object and samples it
//! through [`RandomVariable::with_rng`], so the draw consumes the threaded
//! generator state exactly like any other primitive.

use rand::distributions::{Bernoulli, Distribution, Uniform, WeightedError, WeightedIndex};
use rand_distr::{Exp, Gumbel};
use rvar_core::effect::Effect;
use rvar_core::rng::RandomGeneratorState;
use rvar_core::variable::RandomVariable;

use crate::error::DistributionError;
use crate::traits::{
    check_gumbel, check_rate, check_uniform, BernoulliSampler, CategoricalSampler,
    ExponentialSampler, GumbelSampler, SamplerResult, UniformSampler,
};

/// Sampler family backed by the `rand`/`rand_distr` distribution objects.
///
/// # Examples
///
/// ```rust
/// use rvar_core::effect::Identity;
/// use rvar_core::rng::SplitMix64;
/// use rvar_distributions::{ExponentialSampler, RandDistrSamplers};
///
/// let exp = RandDistrSamplers
///     .exponential::<Identity, SplitMix64>(2.0)
///     .unwrap();
/// assert!(exp.simulate(SplitMix64::from_seed(1)) >= 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandDistrSamplers;

impl UniformSampler for RandDistrSamplers {
    fn uniform<F, S>(&self, low: f64, high: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        // Uniform::new panics on an empty or non-finite range
        check_uniform(low, high)?;
        let dist = Uniform::new(low, high);
        Ok(RandomVariable::with_rng(move |rng| dist.sample(rng)))
    }
}

impl BernoulliSampler for RandDistrSamplers {
    fn bernoulli<F, S>(&self, p: f64) -> SamplerResult<F, S, bool>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        let dist = Bernoulli::new(p).map_err(|e| DistributionError::invalid("p", e))?;
        Ok(RandomVariable::with_rng(move |rng| dist.sample(rng)))
    }
}

impl CategoricalSampler for RandDistrSamplers {
    fn categorical<F, S>(&self, weights: &[f64]) -> SamplerResult<F, S, usize>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        let dist = WeightedIndex::<f64>::new(weights).map_err(|e| match e {
            WeightedError::NoItem => DistributionError::EmptyWeights,
            other => DistributionError::invalid("weights", other),
        })?;
        Ok(RandomVariable::with_rng(move |rng| dist.sample(rng)))
    }
}

impl ExponentialSampler for RandDistrSamplers {
    fn exponential<F, S>(&self, rate: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        // Exp::new accepts a zero rate
        check_rate(rate)?;
        let dist = Exp::new(rate).map_err(|e| DistributionError::invalid("rate", e))?;
        Ok(RandomVariable::with_rng(move |rng| dist.sample(rng)))
    }
}

impl GumbelSampler for RandDistrSamplers {
    fn gumbel<F, S>(&self, location: f64, scale: f64) -> SamplerResult<F, S, f64>
    where
        F: Effect,
        S: RandomGeneratorState,
    {
        check_gumbel(location, scale)?;
        let dist =
            Gumbel::new(location, scale).map_err(|e| DistributionError::invalid("scale", e))?;
        Ok(RandomVariable::with_rng(move |rng| dist.sample(rng)))
    }
}
