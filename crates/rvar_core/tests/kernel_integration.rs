//! End-to-end tests of the random variable kernel.
//!
//! Exercises the public API only: composing variables, threading state and
//! context, and sampling through `rand_distr` against a threaded state.

use approx::assert_relative_eq;
use rand_distr::{Distribution, StandardNormal};
use rvar_core::context::ContextKey;
use rvar_core::effect::{Fallible, Identity};
use rvar_core::rng::{EnumerableSplitMix, ExhaustiveStates, RandomGeneratorState, SplitMix64};
use rvar_core::variable::RandomVariable;

type Rv<A> = RandomVariable<Identity, SplitMix64, A>;

/// Random walk of `steps` unit steps, built by left-nested binds.
fn random_walk(steps: usize) -> Rv<i64> {
    (0..steps).fold(Rv::pure(0_i64), |acc, _| {
        acc.flat_map(|pos| {
            Rv::next_u64().map(move |bits| if bits >> 63 == 1 { pos + 1 } else { pos - 1 })
        })
    })
}

#[test]
fn test_random_walk_is_reproducible() {
    let walk = random_walk(10_000);
    let seed = SplitMix64::from_seed(2024);
    let first = walk.simulate(seed);
    assert_eq!(first, walk.simulate(seed));
    // Parity of a walk matches the step count
    assert_eq!(first.rem_euclid(2), 0);
}

#[test]
fn test_random_walk_mean_is_near_zero() {
    let walk = random_walk(100);
    let n = 2_000;
    let mut seed = SplitMix64::from_seed(11);
    let mut total = 0_i64;
    for _ in 0..n {
        let (next, trial) = seed.split();
        seed = next;
        total += walk.simulate(trial);
    }
    // Std of the mean is 10 / sqrt(2000) ~ 0.22
    let mean = total as f64 / n as f64;
    assert!(mean.abs() < 1.5, "mean {}", mean);
}

#[test]
fn test_normal_sampling_through_with_rng() {
    let normal = Rv::with_rng(|rng| -> f64 { StandardNormal.sample(rng) });
    let n = 20_000;
    let mut seed = SplitMix64::from_seed(5);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for _ in 0..n {
        let (next, trial) = seed.split();
        seed = next;
        let x = normal.simulate(trial);
        sum += x;
        sum_sq += x * x;
    }
    let mean = sum / n as f64;
    let var = sum_sq / n as f64 - mean * mean;
    assert!(mean.abs() < 0.05, "mean {}", mean);
    assert_relative_eq!(var, 1.0, epsilon = 0.05);
}

#[test]
fn test_context_counts_draws_within_a_run() {
    let draws: ContextKey<u32> = ContextKey::new();
    let counted_draw = Rv::<Option<u32>>::get_extra(draws).flat_map(move |seen| {
        Rv::<()>::set_extra(draws, seen.unwrap_or(0) + 1).flat_map(|_| Rv::next_u64())
    });
    let three = counted_draw
        .clone()
        .zip(counted_draw.clone())
        .zip(counted_draw)
        .flat_map(move |_| Rv::<Option<u32>>::get_extra(draws));

    assert_eq!(three.simulate(SplitMix64::from_seed(0)), Some(3));
}

#[test]
fn test_enumerable_states_drive_variables() {
    type SmallRv<A> = RandomVariable<Identity, EnumerableSplitMix<16>, A>;

    let bit = SmallRv::next_u64().map(|bits| bits & 1);
    for state in EnumerableSplitMix::<16>::enumerate() {
        let (_, bits) = state.next_u64();
        assert_eq!(bit.simulate(state), bits & 1);
    }
}

#[test]
fn test_fallible_validation_inside_chain() {
    type Checked<A> = RandomVariable<Fallible<String>, SplitMix64, A>;

    let draw = Checked::next_f64().flat_map(|u| {
        if u < 0.999_999 {
            Checked::pure(u)
        } else {
            Checked::lift(Err(format!("draw {} too close to one", u)))
        }
    });
    for seed in 0..100 {
        let u = draw.simulate(SplitMix64::from_seed(seed));
        assert!(matches!(u, Ok(x) if (0.0..1.0).contains(&x)));
    }
}
