//! # Random Generator State Capability
//!
//! This module defines the capability contract every generator state must
//! honour in order to drive a [`RandomVariable`](crate::variable::RandomVariable),
//! together with the default splittable generator shipped with the kernel.
//!
//! ## Design Rationale
//!
//! - **Purity**: A state is a plain value. Advancing it returns a new state
//!   rather than mutating in place, so identical states always yield identical
//!   outputs and identical splits.
//! - **Cheap splitting**: `split` runs once per replicate per variable per seed
//!   during an equivalence check. Implementations must be O(1) and must not
//!   allocate.
//! - **Optional enumeration**: Small state spaces may offer
//!   [`ExhaustiveStates`], which the equivalence oracle needs in order to
//!   visit every reachable starting state.
//!
//! ## Module Structure
//!
//! - `splitmix`: [`SplitMix64`] and its enumerable restriction
//! - `state_rng`: [`StateRng`], a `rand::RngCore` adapter over any generator state
//!
//! ## Usage Example
//!
//! ```rust
//! use rvar_core::rng::{RandomGeneratorState, SplitMix64};
//!
//! let state = SplitMix64::from_seed(42);
//! let (left, right) = state.split();
//!
//! // Splitting is deterministic
//! assert_eq!(state.split(), (left, right));
//! ```

mod splitmix;
mod state_rng;

pub use splitmix::{EnumerableSplitMix, SplitMix64};
pub use state_rng::StateRng;

/// Opaque, deterministic, splittable pseudo-random generator state.
///
/// Every method consumes the state and returns its successor, which keeps
/// the contract referentially transparent: calling a method twice on equal
/// states gives equal results.
pub trait RandomGeneratorState: Clone + 'static {
    /// Draws the next 64 random bits, returning the advanced state.
    fn next_u64(self) -> (Self, u64);

    /// Splits the state into two states with independent, non-overlapping
    /// future output.
    fn split(self) -> (Self, Self);

    /// Draws the next 32 random bits (upper half of [`next_u64`](Self::next_u64)).
    #[inline]
    fn next_u32(self) -> (Self, u32) {
        let (next, bits) = self.next_u64();
        (next, (bits >> 32) as u32)
    }
}

/// Generator states whose reachable starting space is small enough to
/// enumerate exhaustively.
///
/// `enumerate` must be finite and must list every reachable starting state
/// exactly once, in the same order on every call.
pub trait ExhaustiveStates: RandomGeneratorState {
    /// Lists every starting state in a fixed, deterministic order.
    fn enumerate() -> Vec<Self>;
}

#[cfg(test)]
mod tests;
