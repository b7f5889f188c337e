//! # rvar_testkit: Distributional Equivalence Oracle
//!
//! ## Layer 3 Role
//!
//! rvar_testkit answers "do two random variables describe the same
//! distribution?" for property-based test harnesses:
//! - Declared outcome spaces with a Dirichlet prior (`outcome`)
//! - Experiment configuration: replicates and threshold (`confidence`)
//! - Monte Carlo outcome counting (`tally`)
//! - Dirichlet-multinomial model comparison (`comparator`)
//! - The two-tier decision procedure (`decider`)
//! - Error types: `ConfigError` (`error`)
//!
//! ## Logging
//!
//! Per-seed verdicts and fallback activation are reported at `debug`
//! level through `tracing`; tallies that dropped undeclared outcomes are
//! reported at `warn`. The crate never installs a subscriber.
//!
//! ## Usage Examples
//!
//! ```rust
//! use rvar_core::effect::Identity;
//! use rvar_core::rng::EnumerableSplitMix;
//! use rvar_core::variable::RandomVariable;
//! use rvar_testkit::{Confidence, DiscreteOutcomeSpace, EquivalenceDecider};
//!
//! type Rv<A> = RandomVariable<Identity, EnumerableSplitMix<8>, A>;
//!
//! // Two ways of rolling a fair four-sided die
//! let direct = Rv::next_u64().map(|bits| bits % 4);
//! let two_coins = Rv::next_u64()
//!     .map(|bits| bits >> 63)
//!     .zip(Rv::next_u64().map(|bits| bits >> 63))
//!     .map(|(hi, lo)| 2 * hi + lo);
//!
//! let decider = EquivalenceDecider::new(
//!     DiscreteOutcomeSpace::new(vec![0, 1, 2, 3]).unwrap(),
//!     Confidence::builder().replicates(2_000).threshold(0.99).build().unwrap(),
//! );
//! assert!(decider.are_equivalent(&direct, &two_coins));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Confidence`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod comparator;
pub mod confidence;
pub mod decider;
pub mod error;
pub mod outcome;
pub mod tally;

pub use comparator::{BayesianComparator, Comparison};
pub use confidence::{Confidence, ConfidenceBuilder};
pub use decider::EquivalenceDecider;
pub use error::ConfigError;
pub use outcome::DiscreteOutcomeSpace;
pub use tally::{tally, OutcomeTally};
