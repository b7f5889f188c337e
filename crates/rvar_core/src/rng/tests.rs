//! Unit tests for the generator capability.
//!
//! This module contains tests verifying:
//! - Seed reproducibility of draws and splits
//! - Independence of split streams
//! - The `RngCore` bridge used by external distributions

use super::*;
use proptest::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Draws `n` values from a state, returning them with the final state.
fn draw(mut state: SplitMix64, n: usize) -> (SplitMix64, Vec<u64>) {
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let (next, bits) = state.next_u64();
        state = next;
        out.push(bits);
    }
    (state, out)
}

#[test]
fn test_seed_reproducibility() {
    let (_, first) = draw(SplitMix64::from_seed(12345), 100);
    let (_, second) = draw(SplitMix64::from_seed(12345), 100);
    assert_eq!(first, second);
}

#[test]
fn test_split_reproducibility() {
    let a = SplitMix64::from_seed(9).split();
    let b = SplitMix64::from_seed(9).split();
    assert_eq!(a, b);
}

#[test]
fn test_split_streams_do_not_overlap() {
    let (left, right) = SplitMix64::from_seed(2024).split();
    let (_, xs) = draw(left, 1000);
    let (_, ys) = draw(right, 1000);

    let shared = xs.iter().filter(|x| ys.contains(x)).count();
    assert_eq!(shared, 0);
}

#[test]
fn test_repeated_splits_give_distinct_children() {
    let mut state = SplitMix64::from_seed(0);
    let mut firsts = Vec::new();
    for _ in 0..500 {
        let (next, child) = state.split();
        state = next;
        firsts.push(child.next_u64().1);
    }
    firsts.sort_unstable();
    firsts.dedup();
    assert_eq!(firsts.len(), 500);
}

#[test]
fn test_split_children_are_balanced() {
    // Low bit of each child's first draw should look like a fair coin
    let mut state = SplitMix64::from_seed(77);
    let mut ones = 0;
    let trials = 10_000;
    for _ in 0..trials {
        let (next, child) = state.split();
        state = next;
        ones += (child.next_u64().1 & 1) as usize;
    }
    let freq = ones as f64 / trials as f64;
    assert!((freq - 0.5).abs() < 0.03, "low-bit frequency {}", freq);
}

#[test]
fn test_next_u32_is_upper_half() {
    let state = SplitMix64::from_seed(5);
    let (_, wide) = state.next_u64();
    let (_, narrow) = state.next_u32();
    assert_eq!(narrow, (wide >> 32) as u32);
}

#[test]
fn test_state_rng_matches_direct_draws() {
    let mut rng = StateRng::new(SplitMix64::from_seed(11));
    let (_, direct) = draw(SplitMix64::from_seed(11), 3);
    let bridged: Vec<u64> = (0..3).map(|_| rand::RngCore::next_u64(&mut rng)).collect();
    assert_eq!(direct, bridged);
}

#[test]
fn test_state_rng_fill_bytes_partial_chunk() {
    let mut rng = StateRng::new(SplitMix64::from_seed(1));
    let mut buffer = [0_u8; 13];
    rand::RngCore::fill_bytes(&mut rng, &mut buffer);

    let (_, words) = draw(SplitMix64::from_seed(1), 2);
    assert_eq!(&buffer[..8], &words[0].to_le_bytes());
    assert_eq!(&buffer[8..], &words[1].to_le_bytes()[..5]);
}

#[test]
fn test_state_rng_drives_rand_distr() {
    let mut rng = StateRng::new(SplitMix64::from_seed(42));
    let n = 20_000;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for _ in 0..n {
        let z: f64 = StandardNormal.sample(&mut rng);
        sum += z;
        sum_sq += z * z;
    }
    let mean = sum / n as f64;
    let var = sum_sq / n as f64 - mean * mean;
    assert!(mean.abs() < 0.05, "mean {}", mean);
    assert!((var - 1.0).abs() < 0.05, "variance {}", var);
}

#[test]
fn test_enumerable_states_cover_every_seed_once() {
    let states = EnumerableSplitMix::<16>::enumerate();
    let mut seen: Vec<u64> = states.iter().map(|s| s.next_u64().1).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 16);
}

proptest! {
    #[test]
    fn test_uniform_via_bridge_in_range(seed in any::<u64>()) {
        let mut rng = StateRng::new(SplitMix64::from_seed(seed));
        let u: f64 = rng.gen();
        prop_assert!((0.0..1.0).contains(&u));
    }

    #[test]
    fn test_split_is_pure(seed in any::<u64>()) {
        let state = SplitMix64::from_seed(seed);
        prop_assert_eq!(state.split(), state.split());
        prop_assert_eq!(state.next_u64(), state.next_u64());
    }
}
