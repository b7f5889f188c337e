//! Unit tests for random variables.
//!
//! This module contains tests verifying:
//! - Monad laws for `pure`, `map` and `flat_map`
//! - Seed determinism of `simulate`
//! - Stack safety of long bind chains (build, run and drop), including
//!   chains of effect steps and eagerly built right-nested chains
//! - Context isolation between runs
//! - Error propagation through the `Fallible` effect

use super::*;
use crate::effect::{Fallible, Identity, Symbolic, Term};
use crate::rng::SplitMix64;
use proptest::prelude::*;

type Rv<A> = RandomVariable<Identity, SplitMix64, A>;

fn coin() -> Rv<bool> {
    Rv::next_u64().map(|bits| bits >> 63 == 1)
}

#[test]
fn test_pure_ignores_seed() {
    let rv = Rv::pure(7_i32);
    assert_eq!(rv.simulate(SplitMix64::from_seed(1)), 7);
    assert_eq!(rv.simulate(SplitMix64::from_seed(2)), 7);
}

#[test]
fn test_pure_leaves_state_untouched() {
    let seed = SplitMix64::from_seed(3);
    let (state, ctx, value) = Rv::pure("x").run(seed, ExtensibleContext::new());
    assert_eq!(state, seed);
    assert!(ctx.is_empty());
    assert_eq!(value, "x");
}

#[test]
fn test_next_u64_matches_generator() {
    let seed = SplitMix64::from_seed(99);
    let (expected_state, expected) = seed.next_u64();
    let (state, _, value) = Rv::next_u64().run(seed, ExtensibleContext::new());
    assert_eq!(value, expected);
    assert_eq!(state, expected_state);
}

#[test]
fn test_next_f64_in_unit_interval() {
    let rv = Rv::next_f64();
    for seed in 0..1000 {
        let u = rv.simulate(SplitMix64::from_seed(seed));
        assert!((0.0..1.0).contains(&u), "{} out of range", u);
    }
}

#[test]
fn test_simulate_is_deterministic() {
    let rv = coin().zip(Rv::next_f64()).zip(Rv::next_u64());
    for seed in 0..50 {
        let seed = SplitMix64::from_seed(seed);
        assert_eq!(rv.simulate(seed), rv.simulate(seed));
    }
}

#[test]
fn test_binds_thread_state() {
    // Two draws in sequence must differ from drawing twice from the same state
    let pair = Rv::next_u64().zip(Rv::next_u64());
    let (a, b) = pair.simulate(SplitMix64::from_seed(5));
    assert_ne!(a, b);

    let (s1, first) = SplitMix64::from_seed(5).next_u64();
    let (_, second) = s1.next_u64();
    assert_eq!((a, b), (first, second));
}

#[test]
fn test_left_identity() {
    let f = |n: u64| Rv::next_u64().map(move |bits| bits ^ n);
    let lhs = Rv::pure(17_u64).flat_map(f);
    let rhs = f(17);
    for seed in 0..20 {
        let seed = SplitMix64::from_seed(seed);
        assert_eq!(lhs.simulate(seed), rhs.simulate(seed));
    }
}

#[test]
fn test_right_identity() {
    let rv = Rv::next_u64();
    let bound = rv.clone().flat_map(Rv::pure);
    for seed in 0..20 {
        let seed = SplitMix64::from_seed(seed);
        assert_eq!(rv.simulate(seed), bound.simulate(seed));
    }
}

#[test]
fn test_associativity() {
    let f = |a: u64| Rv::next_u64().map(move |b| a.wrapping_add(b));
    let g = |a: u64| Rv::next_u64().map(move |b| a ^ b);
    let lhs = Rv::next_u64().flat_map(f).flat_map(g);
    let rhs = Rv::next_u64().flat_map(move |a| f(a).flat_map(g));
    for seed in 0..20 {
        let seed = SplitMix64::from_seed(seed);
        assert_eq!(lhs.simulate(seed), rhs.simulate(seed));
    }
}

#[test]
fn test_long_left_nested_chain_is_stack_safe() {
    let n = 200_000;
    let rv = (0..n).fold(Rv::pure(0_u64), |acc, _| acc.flat_map(|x| Rv::pure(x + 1)));
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), n);
    drop(rv);
}

#[test]
fn test_long_map_chain_is_stack_safe() {
    let n = 200_000;
    let rv = (0..n).fold(Rv::pure(0_u64), |acc, _| acc.map(|x| x + 1));
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), n);
}

#[test]
fn test_long_right_nested_chain_is_stack_safe() {
    fn count_draws(remaining: u64, total: u64) -> Rv<u64> {
        if remaining == 0 {
            Rv::pure(total)
        } else {
            Rv::next_u64().flat_map(move |_| count_draws(remaining - 1, total + 1))
        }
    }
    assert_eq!(count_draws(100_000, 0).simulate(SplitMix64::from_seed(0)), 100_000);
}

#[test]
fn test_long_fallible_lift_chain_is_stack_safe() {
    type FallibleRv<A> = RandomVariable<Fallible<String>, SplitMix64, A>;

    let n = 100_000;
    let rv = (0..n).fold(FallibleRv::pure(0_u64), |acc, _| {
        acc.flat_map(|x| FallibleRv::lift(Ok(x + 1)))
    });
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), Ok(n));
}

#[test]
fn test_long_fallible_chain_stops_at_error() {
    type FallibleRv<A> = RandomVariable<Fallible<String>, SplitMix64, A>;

    let n = 100_000_u64;
    let rv = (0..n).fold(FallibleRv::pure(0_u64), |acc, _| {
        acc.flat_map(|x| {
            if x == 50_000 {
                FallibleRv::lift(Err(format!("failed at {}", x)))
            } else {
                FallibleRv::lift(Ok(x + 1))
            }
        })
    });
    assert_eq!(
        rv.simulate(SplitMix64::from_seed(0)),
        Err("failed at 50000".to_string())
    );
}

#[test]
fn test_long_identity_from_fn_chain_is_stack_safe() {
    let n = 100_000;
    let rv = (0..n).fold(Rv::pure(0_u64), |acc, _| {
        acc.flat_map(|x| Rv::from_fn(move |state, ctx| (state, ctx, x + 1)))
    });
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), n);
}

#[test]
fn test_long_symbolic_effect_chain_is_stack_safe() {
    type SymRv<A> = RandomVariable<Symbolic, SplitMix64, A>;

    let n = 100_000;
    let rv = (0..n).fold(SymRv::pure(0_u64), |acc, _| {
        acc.flat_map(|x| SymRv::lift(Term::leaf(x + 1)))
    });
    let term = rv.simulate(SplitMix64::from_seed(0));
    assert_eq!(term.value, n);
    assert!(term.steps >= n as usize);
}

fn eager_right_nested(n: u64) -> Rv<u64> {
    (0..n).fold(Rv::pure(0_u64), |acc, _| {
        Rv::next_u64().flat_map(move |_| acc.clone().map(|x| x + 1))
    })
}

#[test]
fn test_eager_right_nested_chain_runs_and_drops() {
    let rv = eager_right_nested(100_000);
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), 100_000);
    drop(rv);
}

#[test]
fn test_eager_right_nested_chain_drops_unevaluated() {
    drop(eager_right_nested(100_000));
}

#[test]
fn test_shared_subchain_survives_partial_drop() {
    let shared = eager_right_nested(10_000);
    let left = shared.clone().map(|x| x * 2);
    let right = shared.map(|x| x + 1);
    drop(left);
    assert_eq!(right.simulate(SplitMix64::from_seed(4)), 10_001);
}

#[test]
fn test_extras_are_local_to_a_run() {
    let key: ContextKey<u32> = ContextKey::new();
    let rv = Rv::<Option<u32>>::get_extra(key).flat_map(move |before| {
        Rv::<()>::set_extra(key, 5)
            .flat_map(move |_| Rv::<Option<u32>>::get_extra(key).map(move |after| (before, after)))
    });

    let seed = SplitMix64::from_seed(0);
    assert_eq!(rv.simulate(seed), (None, Some(5)));
    // A second run starts from an empty context again
    assert_eq!(rv.simulate(seed), (None, Some(5)));
}

#[test]
fn test_run_exposes_final_context() {
    let key: ContextKey<String> = ContextKey::new();
    let rv = Rv::<()>::set_extra(key, "tag".to_string());
    let (_, ctx, ()) = rv.run(SplitMix64::from_seed(0), ExtensibleContext::new());
    assert_eq!(ctx.get(&key), Some("tag".to_string()));
}

#[test]
fn test_fallible_error_propagates_unmodified() {
    type FallibleRv<A> = RandomVariable<Fallible<String>, SplitMix64, A>;

    let failing: FallibleRv<u64> = FallibleRv::lift(Err("sampler exhausted".to_string()));
    let rv = FallibleRv::next_u64()
        .flat_map(move |_| failing.clone())
        .map(|x| x + 1);

    assert_eq!(
        rv.simulate(SplitMix64::from_seed(0)),
        Err("sampler exhausted".to_string())
    );
}

#[test]
fn test_fallible_success_path() {
    type FallibleRv<A> = RandomVariable<Fallible<String>, SplitMix64, A>;

    let rv = FallibleRv::lift(Ok(20_u64)).flat_map(|x| FallibleRv::pure(x * 2));
    assert_eq!(rv.simulate(SplitMix64::from_seed(0)), Ok(40));
}

#[test]
fn test_from_fn_threads_state_inside_effect() {
    type FallibleRv<A> = RandomVariable<Fallible<&'static str>, SplitMix64, A>;

    let guarded = FallibleRv::<u64>::from_fn(|state, ctx| {
        let (next, bits) = state.next_u64();
        if bits % 2 == 0 {
            Ok((next, ctx, bits))
        } else {
            Err("odd draw")
        }
    });

    let mut saw_ok = false;
    let mut saw_err = false;
    for seed in 0..64 {
        match guarded.simulate(SplitMix64::from_seed(seed)) {
            Ok(bits) => {
                assert_eq!(bits % 2, 0);
                saw_ok = true;
            }
            Err(msg) => {
                assert_eq!(msg, "odd draw");
                saw_err = true;
            }
        }
    }
    assert!(saw_ok && saw_err);
}

#[test]
fn test_symbolic_counts_effect_steps_only() {
    type SymRv<A> = RandomVariable<Symbolic, SplitMix64, A>;

    // State-only steps leave no trace in the term
    let pure_steps = SymRv::next_u64().map(|bits| bits & 1);
    let term = pure_steps.simulate(SplitMix64::from_seed(0));
    assert_eq!(term.steps, 0);

    // A lifted effect is visible structurally
    let lifted = SymRv::lift(Term { value: 3_u64, steps: 1 });
    assert!(lifted.simulate(SplitMix64::from_seed(0)).steps > 0);
    assert_eq!(lifted.simulate(SplitMix64::from_seed(0)).value, 3);
}

#[test]
fn test_with_rng_advances_state() {
    let rv = Rv::with_rng(|rng| {
        let a = rand::RngCore::next_u64(rng);
        let b = rand::RngCore::next_u64(rng);
        (a, b)
    });
    let seed = SplitMix64::from_seed(8);
    let (state, _, (a, b)) = rv.run(seed, ExtensibleContext::new());

    let (s1, first) = seed.next_u64();
    let (s2, second) = s1.next_u64();
    assert_eq!((a, b), (first, second));
    assert_eq!(state, s2);
}

proptest! {
    #[test]
    fn test_map_fusion(seed in any::<u64>(), k in any::<u64>()) {
        let seed = SplitMix64::from_seed(seed);
        let fused = Rv::next_u64().map(move |x| x.wrapping_mul(k).rotate_left(7));
        let split = Rv::next_u64().map(move |x| x.wrapping_mul(k)).map(|x| x.rotate_left(7));
        prop_assert_eq!(fused.simulate(seed), split.simulate(seed));
    }
}
