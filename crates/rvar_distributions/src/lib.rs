//! # rvar_distributions: Distribution Samplers
//!
//! ## Layer 2 Role
//!
//! rvar_distributions builds sampling random variables on top of the
//! rvar_core kernel:
//! - Capability traits, one per distribution (`traits`)
//! - `RandDistrSamplers`: delegates to `rand`/`rand_distr`
//! - `InverseTransformSamplers`: closed-form transforms of uniform draws
//! - Error types: `DistributionError` (`error`)
//!
//! Both sampler families are plain values. Code that needs a sampler takes
//! it as a generic parameter bounded by the capability it uses, so the
//! family is chosen by the caller at construction time.
//!
//! ## Usage Examples
//!
//! ```rust
//! use rvar_core::effect::Identity;
//! use rvar_core::rng::SplitMix64;
//! use rvar_core::variable::RandomVariable;
//! use rvar_distributions::{
//!     BernoulliSampler, DistributionError, InverseTransformSamplers, RandDistrSamplers,
//! };
//!
//! type Rv<A> = RandomVariable<Identity, SplitMix64, A>;
//!
//! // Number of heads in three tosses of a biased coin
//! fn heads<D: BernoulliSampler>(sampler: &D, p: f64) -> Result<Rv<u32>, DistributionError> {
//!     let coin: Rv<bool> = sampler.bernoulli(p)?;
//!     let c = coin.clone();
//!     Ok(coin
//!         .zip(c.clone())
//!         .zip(c)
//!         .map(|((a, b), c)| a as u32 + b as u32 + c as u32))
//! }
//!
//! let seed = SplitMix64::from_seed(3);
//! assert!(heads(&RandDistrSamplers, 0.5)?.simulate(seed) <= 3);
//! assert!(heads(&InverseTransformSamplers, 0.5)?.simulate(seed) <= 3);
//! assert!(heads(&RandDistrSamplers, 2.0).is_err());
//! # Ok::<(), DistributionError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
mod inverse_transform;
mod rand_distr_samplers;
pub mod traits;

pub use error::DistributionError;
pub use inverse_transform::InverseTransformSamplers;
pub use rand_distr_samplers::RandDistrSamplers;
pub use traits::{
    BernoulliSampler, CategoricalSampler, ExponentialSampler, GumbelSampler, SamplerResult,
    UniformSampler,
};
