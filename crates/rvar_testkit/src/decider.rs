//! Distributional equivalence of two random variables.
//!
//! ## Algorithm
//!
//! 1. For every enumerated starting state `s`, in enumeration order, tally
//!    both variables from `s` and compare the tallies with the
//!    [`BayesianComparator`].
//! 2. AND the per-seed verdicts inside the effect, stopping at the first
//!    "unequal" seed: later seeds are not sampled at all.
//! 3. Collapse the wrapped verdict. A concrete answer is final. When the
//!    effect cannot be collapsed, the statistical result is discarded and
//!    the variables are compared exactly: both are run from every
//!    enumerated state and their wrapped results must be equal.
//!
//! Statistically inconclusive evidence counts as "equal".

use std::rc::Rc;

use rvar_core::effect::Effect;
use rvar_core::rng::ExhaustiveStates;
use rvar_core::variable::RandomVariable;
use tracing::debug;

use crate::comparator::BayesianComparator;
use crate::confidence::Confidence;
use crate::outcome::DiscreteOutcomeSpace;
use crate::tally::{tally, OutcomeTally};

/// Decides whether two random variables over a declared outcome space
/// describe the same distribution.
///
/// # Examples
///
/// ```rust
/// use rvar_core::effect::Identity;
/// use rvar_core::rng::EnumerableSplitMix;
/// use rvar_core::variable::RandomVariable;
/// use rvar_testkit::{Confidence, DiscreteOutcomeSpace, EquivalenceDecider};
///
/// type Rv<A> = RandomVariable<Identity, EnumerableSplitMix<4>, A>;
///
/// let decider = EquivalenceDecider::new(
///     DiscreteOutcomeSpace::boolean(),
///     Confidence::new(1_000, 0.9).unwrap(),
/// );
///
/// let high_bit = Rv::next_u64().map(|bits| bits >> 63 == 1);
/// let always = Rv::pure(true);
///
/// assert!(decider.are_equivalent(&high_bit, &high_bit));
/// assert!(!decider.are_equivalent(&high_bit, &always));
/// ```
#[derive(Clone, Debug)]
pub struct EquivalenceDecider<A> {
    space: Rc<DiscreteOutcomeSpace<A>>,
    confidence: Confidence,
    comparator: Rc<BayesianComparator>,
}

impl<A: PartialEq + 'static> EquivalenceDecider<A> {
    /// Creates a decider for variables over `space`.
    pub fn new(space: DiscreteOutcomeSpace<A>, confidence: Confidence) -> Self {
        let comparator = Rc::new(BayesianComparator::new(&space, &confidence));
        Self {
            space: Rc::new(space),
            confidence,
            comparator,
        }
    }

    /// Declared outcome space.
    #[inline]
    pub fn space(&self) -> &DiscreteOutcomeSpace<A> {
        &self.space
    }

    /// Replicate count and threshold.
    #[inline]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns `true` when `x` and `y` are judged to describe the same
    /// distribution.
    ///
    /// Symmetric: swapping `x` and `y` gives the same answer.
    pub fn are_equivalent<F, S>(
        &self,
        x: &RandomVariable<F, S, A>,
        y: &RandomVariable<F, S, A>,
    ) -> bool
    where
        F: Effect,
        S: ExhaustiveStates,
        F::Wrapped<A>: PartialEq,
    {
        let seeds = S::enumerate();

        // An effect that cannot collapse even a pure value never yields a
        // statistical verdict, so skip sampling entirely.
        if F::collapse(F::pure(true)).is_none() {
            return Self::exactly_equal(x, y, seeds);
        }

        let replicates = self.confidence.replicates();
        let tally_x = tally(x, &self.space, replicates);
        let tally_y = tally(y, &self.space, replicates);

        let mut verdict = F::pure(true);
        for (index, seed) in seeds.iter().cloned().enumerate() {
            let tally_x = tally_x.clone();
            let tally_y = tally_y.clone();
            let comparator = Rc::clone(&self.comparator);
            verdict = F::flat_map::<bool, bool, _>(verdict, move |equal_so_far| {
                if !equal_so_far {
                    return F::pure(false);
                }
                let seed_y = seed.clone();
                F::flat_map::<OutcomeTally, bool, _>(tally_x.simulate(seed), move |counts_x| {
                    F::map::<OutcomeTally, bool, _>(tally_y.simulate(seed_y), move |counts_y| {
                        let comparison = comparator.compare(&counts_x, &counts_y);
                        debug!(
                            seed = index,
                            probability_of_difference = comparison.probability_of_difference,
                            threshold = comparator.threshold(),
                            equal = comparison.equal,
                            "seed verdict"
                        );
                        comparison.equal
                    })
                })
            });
        }

        match F::collapse(verdict) {
            Some(equal) => equal,
            None => Self::exactly_equal(x, y, seeds),
        }
    }

    /// Runs both variables from every seed and compares the wrapped
    /// results; no sampling, no tolerance.
    fn exactly_equal<F, S>(
        x: &RandomVariable<F, S, A>,
        y: &RandomVariable<F, S, A>,
        seeds: Vec<S>,
    ) -> bool
    where
        F: Effect,
        S: ExhaustiveStates,
        F::Wrapped<A>: PartialEq,
    {
        debug!(
            seeds = seeds.len(),
            "effect has no concrete collapse; comparing exactly"
        );
        seeds
            .into_iter()
            .all(|seed| x.simulate(seed.clone()) == y.simulate(seed))
    }
}
