//! `rand::RngCore` adapter over a value-style generator state.

use rand::RngCore;

use super::RandomGeneratorState;

/// Mutable `rand::RngCore` view of a [`RandomGeneratorState`].
///
/// Lets `rand`/`rand_distr` distributions sample from the state threaded
/// through a random variable. Take the advanced state back with
/// [`into_state`](Self::into_state) once sampling is done.
///
/// # Examples
///
/// ```rust
/// use rand::Rng;
/// use rvar_core::rng::{SplitMix64, StateRng};
///
/// let mut rng = StateRng::new(SplitMix64::from_seed(3));
/// let u: f64 = rng.gen();
/// assert!((0.0..1.0).contains(&u));
///
/// let advanced = rng.into_state();
/// assert_ne!(advanced, SplitMix64::from_seed(3));
/// ```
#[derive(Clone, Debug)]
pub struct StateRng<S> {
    state: S,
}

impl<S: RandomGeneratorState> StateRng<S> {
    /// Wraps a generator state.
    #[inline]
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Returns the advanced generator state.
    #[inline]
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: RandomGeneratorState> RngCore for StateRng<S> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let (next, bits) = self.state.clone().next_u32();
        self.state = next;
        bits
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let (next, bits) = self.state.clone().next_u64();
        self.state = next;
        bits
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = RngCore::next_u64(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
