//! SplitMix64 splittable generator.
//!
//! This is the generator of Steele, Lea & Flood (2014), "Fast Splittable
//! Pseudorandom Number Generators": a Weyl sequence over `seed` with an odd
//! increment `gamma`, whitened by a 64-bit finaliser. Splitting derives a
//! fresh seed and a fresh gamma from two successive outputs.

use super::{ExhaustiveStates, RandomGeneratorState};

/// Odd approximation of 2^64 / phi, the default Weyl increment.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Finaliser used for output values (variant 13 of Stafford's mixers).
#[inline]
fn mix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// MurmurHash3 finaliser used for derived gammas. Always returns an odd value with
/// enough bit transitions to avoid weak Weyl sequences.
#[inline]
fn mix_gamma(z: u64) -> u64 {
    let z = (z ^ (z >> 33)).wrapping_mul(0xff51_afd7_ed55_8ccd);
    let z = (z ^ (z >> 33)).wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    let z = (z ^ (z >> 33)) | 1;
    if (z ^ (z >> 1)).count_ones() < 24 {
        z ^ 0xaaaa_aaaa_aaaa_aaaa
    } else {
        z
    }
}

/// SplitMix64 generator state.
///
/// `Copy`, two words wide, with O(1) allocation-free [`split`].
///
/// # Examples
///
/// ```rust
/// use rvar_core::rng::{RandomGeneratorState, SplitMix64};
///
/// let (s1, a) = SplitMix64::from_seed(7).next_u64();
/// let (s2, b) = SplitMix64::from_seed(7).next_u64();
///
/// // Same seed produces identical output
/// assert_eq!(a, b);
/// assert_eq!(s1, s2);
/// ```
///
/// [`split`]: RandomGeneratorState::split
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SplitMix64 {
    seed: u64,
    gamma: u64,
}

impl SplitMix64 {
    /// Creates a generator initialised with the given seed and the golden
    /// gamma.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            gamma: GOLDEN_GAMMA,
        }
    }

    /// Advances the Weyl sequence by one step.
    #[inline]
    fn step(self) -> (Self, u64) {
        let seed = self.seed.wrapping_add(self.gamma);
        (
            Self {
                seed,
                gamma: self.gamma,
            },
            seed,
        )
    }
}

impl RandomGeneratorState for SplitMix64 {
    #[inline]
    fn next_u64(self) -> (Self, u64) {
        let (next, raw) = self.step();
        (next, mix64(raw))
    }

    #[inline]
    fn split(self) -> (Self, Self) {
        let (advanced, seed_source) = self.step();
        let (advanced, gamma_source) = advanced.step();
        let child = Self {
            seed: mix64(seed_source),
            gamma: mix_gamma(gamma_source),
        };
        (advanced, child)
    }
}

/// SplitMix64 restricted to the `N` starting seeds `0..N`.
///
/// Offers [`ExhaustiveStates`], so it can drive the equivalence oracle.
/// After the first draw or split the state behaves exactly like
/// [`SplitMix64`].
///
/// # Examples
///
/// ```rust
/// use rvar_core::rng::{EnumerableSplitMix, ExhaustiveStates};
///
/// let states = EnumerableSplitMix::<4>::enumerate();
/// assert_eq!(states.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumerableSplitMix<const N: u64>(SplitMix64);

impl<const N: u64> EnumerableSplitMix<N> {
    /// Returns the underlying SplitMix64 state.
    #[inline]
    pub fn inner(&self) -> SplitMix64 {
        self.0
    }
}

impl<const N: u64> RandomGeneratorState for EnumerableSplitMix<N> {
    #[inline]
    fn next_u64(self) -> (Self, u64) {
        let (next, bits) = self.0.next_u64();
        (Self(next), bits)
    }

    #[inline]
    fn split(self) -> (Self, Self) {
        let (left, right) = self.0.split();
        (Self(left), Self(right))
    }
}

impl<const N: u64> ExhaustiveStates for EnumerableSplitMix<N> {
    fn enumerate() -> Vec<Self> {
        (0..N).map(|seed| Self(SplitMix64::from_seed(seed))).collect()
    }
}
