//! Effect contexts that random variables run inside.
//!
//! A random variable produces `F::Wrapped<A>` rather than a bare `A`, where
//! `F` is an [`Effect`]. The kernel only needs `pure`, `flat_map` and the
//! optional concrete collapse of a wrapped boolean; everything else is the
//! effect's own business, including failure.
//!
//! Three effects ship with the kernel:
//!
//! | Effect | `Wrapped<A>` | Collapse |
//! |--------|--------------|----------|
//! | [`Identity`] | `A` | always concrete |
//! | [`Fallible<E>`] | `Result<A, E>` | `Ok(b)` is concrete, `Err` is indeterminate |
//! | [`Symbolic`] | [`Term<A>`] | never concrete |

use std::marker::PhantomData;
use std::ops::ControlFlow;

/// Effect context parameterising a random variable.
///
/// Implementations are zero-sized markers; the wrapped type is the generic
/// associated type [`Wrapped`](Effect::Wrapped).
pub trait Effect: Sized + 'static {
    /// Effect-wrapped value of type `A`.
    type Wrapped<A>;

    /// Wraps a plain value with no effect.
    fn pure<A>(value: A) -> Self::Wrapped<A>;

    /// Sequences `k` after `fa`.
    fn flat_map<A, B, K>(fa: Self::Wrapped<A>, k: K) -> Self::Wrapped<B>
    where
        K: FnOnce(A) -> Self::Wrapped<B> + 'static;

    /// Applies `k` to the wrapped value.
    #[inline]
    fn map<A, B, K>(fa: Self::Wrapped<A>, k: K) -> Self::Wrapped<B>
    where
        K: FnOnce(A) -> B + 'static,
    {
        Self::flat_map::<A, B, _>(fa, move |a| Self::pure(k(a)))
    }

    /// Repeats `step` while it returns `Continue`, sequencing each
    /// resumption as one effect step.
    ///
    /// Equivalent to recursing through [`flat_map`](Effect::flat_map) but
    /// must run in constant native stack depth: the random variable
    /// interpreter resumes after every effect step through this loop.
    fn tail_rec_m<A, B, K>(init: A, step: K) -> Self::Wrapped<B>
    where
        K: FnMut(A) -> Self::Wrapped<ControlFlow<B, A>>;

    /// Runs a wrapped boolean to a concrete verdict.
    ///
    /// Returns `None` when the effect cannot be evaluated to a definite
    /// result, e.g. a symbolic effect or a failed computation.
    fn collapse(verdict: Self::Wrapped<bool>) -> Option<bool>;
}

/// Plain values; every computation is total and deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl Effect for Identity {
    type Wrapped<A> = A;

    #[inline]
    fn pure<A>(value: A) -> A {
        value
    }

    #[inline]
    fn flat_map<A, B, K>(fa: A, k: K) -> B
    where
        K: FnOnce(A) -> B + 'static,
    {
        k(fa)
    }

    fn tail_rec_m<A, B, K>(init: A, mut step: K) -> B
    where
        K: FnMut(A) -> ControlFlow<B, A>,
    {
        let mut next = init;
        loop {
            match step(next) {
                ControlFlow::Continue(a) => next = a,
                ControlFlow::Break(b) => return b,
            }
        }
    }

    #[inline]
    fn collapse(verdict: bool) -> Option<bool> {
        Some(verdict)
    }
}

/// Computations that may fail with an error of type `E`.
///
/// The first error short-circuits every later bind and is returned
/// unmodified from `simulate`.
pub struct Fallible<E>(PhantomData<fn() -> E>);

impl<E: 'static> Effect for Fallible<E> {
    type Wrapped<A> = Result<A, E>;

    #[inline]
    fn pure<A>(value: A) -> Result<A, E> {
        Ok(value)
    }

    #[inline]
    fn flat_map<A, B, K>(fa: Result<A, E>, k: K) -> Result<B, E>
    where
        K: FnOnce(A) -> Result<B, E> + 'static,
    {
        fa.and_then(k)
    }

    fn tail_rec_m<A, B, K>(init: A, mut step: K) -> Result<B, E>
    where
        K: FnMut(A) -> Result<ControlFlow<B, A>, E>,
    {
        let mut next = init;
        loop {
            match step(next)? {
                ControlFlow::Continue(a) => next = a,
                ControlFlow::Break(b) => return Ok(b),
            }
        }
    }

    #[inline]
    fn collapse(verdict: Result<bool, E>) -> Option<bool> {
        verdict.ok()
    }
}

/// Result of a [`Symbolic`] computation: the value together with the number
/// of effect steps sequenced to produce it.
///
/// Two terms are equal only if both the value and the step count agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term<A> {
    /// Computed value.
    pub value: A,
    /// Number of `flat_map` steps sequenced into this term.
    pub steps: usize,
}

impl<A> Term<A> {
    /// A term produced without any effect steps.
    #[inline]
    pub fn leaf(value: A) -> Self {
        Self { value, steps: 0 }
    }
}

/// Effect whose results are compared structurally and never collapsed to a
/// concrete verdict.
///
/// Equivalence checks over `Symbolic` always take the exact extensional
/// path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Symbolic;

impl Effect for Symbolic {
    type Wrapped<A> = Term<A>;

    #[inline]
    fn pure<A>(value: A) -> Term<A> {
        Term::leaf(value)
    }

    #[inline]
    fn flat_map<A, B, K>(fa: Term<A>, k: K) -> Term<B>
    where
        K: FnOnce(A) -> Term<B> + 'static,
    {
        let next = k(fa.value);
        Term {
            value: next.value,
            steps: fa.steps + next.steps + 1,
        }
    }

    #[inline]
    fn map<A, B, K>(fa: Term<A>, k: K) -> Term<B>
    where
        K: FnOnce(A) -> B + 'static,
    {
        Term {
            value: k(fa.value),
            steps: fa.steps,
        }
    }

    fn tail_rec_m<A, B, K>(init: A, mut step: K) -> Term<B>
    where
        K: FnMut(A) -> Term<ControlFlow<B, A>>,
    {
        let mut steps = 0;
        let mut next = init;
        loop {
            let term = step(next);
            steps += term.steps;
            match term.value {
                ControlFlow::Continue(a) => {
                    steps += 1;
                    next = a;
                }
                ControlFlow::Break(value) => return Term { value, steps },
            }
        }
    }

    #[inline]
    fn collapse(_verdict: Term<bool>) -> Option<bool> {
        None
    }
}
