//! # rvar_core: Random Variable Kernel
//!
//! ## Layer 1 (Foundation) Role
//!
//! rvar_core is the bottom layer of the workspace, providing:
//! - Splittable, value-style generator states (`rng`)
//! - Effect contexts random variables run inside (`effect`)
//! - The typed, heterogeneous run context (`context`)
//! - The stack-safe random variable monad (`variable`)
//! - Log-space special functions (`math`)
//!
//! ## Minimal Dependency Principle
//!
//! Layer 1 has no dependencies on other rvar_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - rand: `RngCore` bridge so `rand`/`rand_distr` samplers can consume a
//!   generator state
//!
//! ## Usage Examples
//!
//! ```rust
//! use rvar_core::effect::Identity;
//! use rvar_core::rng::SplitMix64;
//! use rvar_core::variable::RandomVariable;
//!
//! type Rv<A> = RandomVariable<Identity, SplitMix64, A>;
//!
//! let die: Rv<u64> = Rv::next_u64().map(|bits| bits % 6 + 1);
//! let two_dice = die.clone().zip(die).map(|(a, b)| a + b);
//!
//! let total = two_dice.simulate(SplitMix64::from_seed(7));
//! assert!((2..=12).contains(&total));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod effect;
pub mod math;
pub mod rng;
pub mod variable;
