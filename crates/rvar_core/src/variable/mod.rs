//! # Random Variables
//!
//! [`RandomVariable`] is a pure, state-threading computation of a
//! value of type `A`. Conceptually it is a function
//!
//! ```text
//! (S, ExtensibleContext) -> F::Wrapped<(S, ExtensibleContext, A)>
//! ```
//!
//! where `S` is a [`RandomGeneratorState`] and `F` an [`Effect`]. The
//! representation is private: a variable is built from the constructors
//! below and composed with [`map`](RandomVariable::map) and
//! [`flat_map`](RandomVariable::flat_map).
//!
//! ## Stack Safety
//!
//! An equivalence check issues thousands of binds per comparison. Binds are
//! recorded as graph nodes and evaluated by an iterative interpreter with an
//! explicit continuation stack. Effect steps (`from_fn`, `lift`) suspend
//! the interpreter, which resumes through [`Effect::tail_rec_m`]. Dropping
//! a variable goes through a thread-local queue, so chains reachable
//! through captured variables are released without recursion as well.
//!
//! ## Usage Example
//!
//! ```rust
//! use rvar_core::effect::Identity;
//! use rvar_core::rng::SplitMix64;
//! use rvar_core::variable::RandomVariable;
//!
//! type Rv<A> = RandomVariable<Identity, SplitMix64, A>;
//!
//! let coin: Rv<bool> = Rv::next_u64().map(|bits| bits & 1 == 1);
//! let pair = coin.clone().flat_map(move |a| coin.clone().map(move |b| (a, b)));
//!
//! // Same seed, same value
//! let seed = SplitMix64::from_seed(42);
//! assert_eq!(pair.simulate(seed), pair.simulate(seed));
//! ```

mod node;

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::context::{ContextKey, ExtensibleContext};
use crate::effect::Effect;
use crate::rng::{RandomGeneratorState, StateRng};
use node::{interpret, unerase, Erased, Frame, Node};

/// 2^-53, the spacing of doubles in [0.5, 1).
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Seed-driven, monadic computation of an `A` inside effect `F` over
/// generator state `S`.
///
/// Cloning is cheap (reference-counted) and a variable can be simulated any
/// number of times. Identical seeds give identical results for
/// deterministic effects.
pub struct RandomVariable<F: Effect, S: 'static, A> {
    node: Rc<Node<F, S>>,
    _value: PhantomData<fn() -> A>,
}

impl<F: Effect, S: 'static, A> Clone for RandomVariable<F, S, A> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
            _value: PhantomData,
        }
    }
}

impl<F: Effect, S: 'static, A> fmt::Debug for RandomVariable<F, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomVariable")
            .field("value", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

impl<F, S, A> RandomVariable<F, S, A>
where
    F: Effect,
    S: 'static,
    A: 'static,
{
    fn from_node(node: Node<F, S>) -> Self {
        Self {
            node: Rc::new(node),
            _value: PhantomData,
        }
    }

    /// A computation that ignores state and context and always yields
    /// `value`.
    pub fn pure(value: A) -> Self
    where
        A: Clone,
    {
        Self::from_node(Node::pure(move || Box::new(value.clone()) as Erased))
    }

    /// Builds an effect-free step from a pure function of the generator
    /// state.
    pub fn from_state(step: impl Fn(S) -> (S, A) + 'static) -> Self {
        Self::from_node(Node::state(move |state, _ctx| {
            let (next, value) = step(state);
            (next, Box::new(value) as Erased)
        }))
    }

    /// Builds a step from the full state-passing function inside the
    /// effect.
    pub fn from_fn(
        run: impl Fn(S, ExtensibleContext) -> F::Wrapped<(S, ExtensibleContext, A)> + 'static,
    ) -> Self {
        Self::from_node(Node::effect(move |state, ctx| {
            F::map::<(S, ExtensibleContext, A), (S, ExtensibleContext, Erased), _>(
                run(state, ctx),
                |(state, ctx, value)| (state, ctx, Box::new(value) as Erased),
            )
        }))
    }

    /// Embeds an effect value, leaving state and context untouched.
    pub fn lift(fa: F::Wrapped<A>) -> Self
    where
        F::Wrapped<A>: Clone + 'static,
    {
        Self::from_fn(move |state, ctx| {
            F::map::<A, (S, ExtensibleContext, A), _>(fa.clone(), move |value| (state, ctx, value))
        })
    }

    /// Applies `f` to the produced value.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> RandomVariable<F, S, B> {
        let frame = Frame::Map(Rc::new(move |value: Erased| {
            Box::new(f(unerase::<A>(value))) as Erased
        }));
        RandomVariable::from_node(Node::then(self.node, frame))
    }

    /// Sequential composition: runs `self`, then the variable returned by
    /// `f`, threading state and context through both.
    pub fn flat_map<B: 'static>(
        self,
        f: impl Fn(A) -> RandomVariable<F, S, B> + 'static,
    ) -> RandomVariable<F, S, B> {
        let frame = Frame::Bind(Rc::new(move |value: Erased| f(unerase::<A>(value)).node));
        RandomVariable::from_node(Node::then(self.node, frame))
    }

    /// Pairs the values of `self` and `other`, running `self` first.
    pub fn zip<B: 'static>(self, other: RandomVariable<F, S, B>) -> RandomVariable<F, S, (A, B)>
    where
        A: Clone,
    {
        self.flat_map(move |a| {
            other
                .clone()
                .map(move |b| (a.clone(), b))
        })
    }

    /// Runs the computation from `state` and `ctx`, returning the final
    /// state and context alongside the value.
    pub fn run(&self, state: S, ctx: ExtensibleContext) -> F::Wrapped<(S, ExtensibleContext, A)> {
        F::map::<(S, ExtensibleContext, Erased), (S, ExtensibleContext, A), _>(
            interpret(Rc::clone(&self.node), state, ctx),
            |(state, ctx, value)| (state, ctx, unerase::<A>(value)),
        )
    }

    /// Runs the computation from `seed` with an empty context and returns
    /// only the value.
    pub fn simulate(&self, seed: S) -> F::Wrapped<A> {
        F::map::<(S, ExtensibleContext, A), A, _>(
            self.run(seed, ExtensibleContext::new()),
            |(_, _, value)| value,
        )
    }
}

impl<F, S, T> RandomVariable<F, S, Option<T>>
where
    F: Effect,
    S: 'static,
    T: Clone + 'static,
{
    /// Reads the context entry stored under `key`; `None` when absent.
    pub fn get_extra(key: ContextKey<T>) -> Self {
        Self::from_node(Node::state(move |state, ctx| {
            (state, Box::new(ctx.get(&key)) as Erased)
        }))
    }
}

impl<F, S> RandomVariable<F, S, ()>
where
    F: Effect,
    S: 'static,
{
    /// Stores `value` under `key` for the rest of the enclosing run.
    pub fn set_extra<T: Clone + 'static>(key: ContextKey<T>, value: T) -> Self {
        Self::from_node(Node::state(move |state, ctx| {
            ctx.set(&key, value.clone());
            (state, Box::new(()) as Erased)
        }))
    }
}

impl<F, S> RandomVariable<F, S, u64>
where
    F: Effect,
    S: RandomGeneratorState,
{
    /// Draws 64 random bits.
    pub fn next_u64() -> Self {
        Self::from_state(|state: S| state.next_u64())
    }
}

impl<F, S> RandomVariable<F, S, f64>
where
    F: Effect,
    S: RandomGeneratorState,
{
    /// Draws a uniform double in `[0, 1)` from the top 53 bits of one
    /// 64-bit draw.
    pub fn next_f64() -> Self {
        Self::from_state(|state: S| {
            let (next, bits) = state.next_u64();
            (next, (bits >> 11) as f64 * F64_UNIT)
        })
    }
}

impl<F, S, A> RandomVariable<F, S, A>
where
    F: Effect,
    S: RandomGeneratorState,
    A: 'static,
{
    /// Samples with any `rand::RngCore` consumer, typically a `rand_distr`
    /// distribution, against the threaded generator state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand_distr::{Distribution, Exp1};
    /// use rvar_core::effect::Identity;
    /// use rvar_core::rng::SplitMix64;
    /// use rvar_core::variable::RandomVariable;
    ///
    /// let exp = RandomVariable::<Identity, SplitMix64, f64>::with_rng(|rng| Exp1.sample(rng));
    /// assert!(exp.simulate(SplitMix64::from_seed(1)) >= 0.0);
    /// ```
    pub fn with_rng(sample: impl Fn(&mut StateRng<S>) -> A + 'static) -> Self {
        Self::from_state(move |state: S| {
            let mut rng = StateRng::new(state);
            let value = sample(&mut rng);
            (rng.into_state(), value)
        })
    }
}

#[cfg(test)]
mod tests;
