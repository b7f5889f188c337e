//! Monte Carlo outcome counting.
//!
//! [`tally`] turns a random variable into a random variable over
//! frequency tables. Trials draw from successive splits of the incoming
//! generator state, so they are mutually independent while sharing one
//! entropy source, and each trial runs with its own empty context.

use std::rc::Rc;

use rvar_core::context::ExtensibleContext;
use rvar_core::effect::Effect;
use rvar_core::rng::RandomGeneratorState;
use rvar_core::variable::RandomVariable;
use tracing::warn;

use crate::outcome::DiscreteOutcomeSpace;

/// Frequency table aligned to a [`DiscreteOutcomeSpace`].
///
/// `counts()[i]` is the number of trials that produced `outcomes()[i]`.
/// Trials whose value is not declared are counted in `dropped()` only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OutcomeTally {
    counts: Vec<u64>,
    dropped: u64,
}

impl OutcomeTally {
    /// Creates a tally from explicit counts with nothing dropped.
    pub fn new(counts: Vec<u64>) -> Self {
        Self { counts, dropped: 0 }
    }

    /// All-zero tally over `len` outcomes.
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0; len])
    }

    /// Per-outcome counts.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Trials that produced an undeclared value.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Sum of the per-outcome counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts one trial at `index`, or as dropped when `None`.
    pub fn record(&mut self, index: Option<usize>) {
        match index.and_then(|i| self.counts.get_mut(i)) {
            Some(count) => *count += 1,
            None => self.dropped += 1,
        }
    }
}

/// Builds a variable that samples `rv` `replicates` times and counts the
/// outcomes against `space`.
///
/// Samples are consumed through the effect, so a failing trial under a
/// short-circuiting effect stops the remaining trials.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
/// use rvar_core::effect::Identity;
/// use rvar_core::rng::SplitMix64;
/// use rvar_core::variable::RandomVariable;
/// use rvar_testkit::{tally, DiscreteOutcomeSpace};
///
/// let coin = RandomVariable::<Identity, SplitMix64, u64>::next_u64().map(|b| b & 1 == 1);
/// let space = Rc::new(DiscreteOutcomeSpace::boolean());
///
/// let counts = tally(&coin, &space, 1_000).simulate(SplitMix64::from_seed(0));
/// assert_eq!(counts.total(), 1_000);
/// assert_eq!(counts.dropped(), 0);
/// ```
pub fn tally<F, S, A>(
    rv: &RandomVariable<F, S, A>,
    space: &Rc<DiscreteOutcomeSpace<A>>,
    replicates: usize,
) -> RandomVariable<F, S, OutcomeTally>
where
    F: Effect,
    S: RandomGeneratorState,
    A: PartialEq + 'static,
{
    let rv = rv.clone();
    let space = Rc::clone(space);

    RandomVariable::from_fn(move |state: S, ctx: ExtensibleContext| {
        let mut counts = F::pure(OutcomeTally::zeros(space.len()));
        let mut state = state;
        for _ in 0..replicates {
            let (next, trial) = state.split();
            state = next;
            let rv = rv.clone();
            let space = Rc::clone(&space);
            counts = F::flat_map::<OutcomeTally, OutcomeTally, _>(counts, move |mut acc| {
                F::map::<A, OutcomeTally, _>(rv.simulate(trial), move |value| {
                    acc.record(space.index_of(&value));
                    acc
                })
            });
        }
        F::map::<OutcomeTally, (S, ExtensibleContext, OutcomeTally), _>(counts, move |counts| {
            if counts.dropped() > 0 {
                warn!(
                    dropped = counts.dropped(),
                    replicates,
                    "samples fell outside the declared outcome space"
                );
            }
            (state, ctx, counts)
        })
    })
}
