//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported and
//! accessible via absolute paths.

/// Test that configuration types are accessible via absolute path.
#[test]
fn test_configuration_exports() {
    use rvar_testkit::confidence::ConfidenceBuilder;
    use rvar_testkit::error::ConfigError;
    use rvar_testkit::outcome::DiscreteOutcomeSpace;
    use rvar_testkit::Confidence;

    let confidence = ConfidenceBuilder::default()
        .replicates(10)
        .threshold(0.5)
        .build()
        .unwrap();
    assert_eq!(confidence, Confidence::new(10, 0.5).unwrap());

    let space = DiscreteOutcomeSpace::with_prior(vec!["a", "b"], vec![2.0, 0.5]).unwrap();
    assert_eq!(space.prior(), &[2.0, 0.5]);

    let _err = ConfigError::InvalidReplicates(0);
}

/// Test that comparison functions are accessible via absolute path.
#[test]
fn test_comparator_exports() {
    use rvar_testkit::comparator::joint_log_marginal_likelihood;
    use rvar_testkit::comparator::log_marginal_likelihood;
    use rvar_testkit::comparator::posterior_probability_of_difference;
    use rvar_testkit::{BayesianComparator, Comparison, OutcomeTally};

    let alpha = [1.0, 1.0];
    let _ = log_marginal_likelihood(&[1, 2], &alpha);
    let _ = joint_log_marginal_likelihood(&[1, 2], &[2, 1], &alpha);
    let p = posterior_probability_of_difference(&[1, 2], &[2, 1], &alpha);

    let comparator = BayesianComparator::new(
        &rvar_testkit::DiscreteOutcomeSpace::boolean(),
        &rvar_testkit::Confidence::new(3, 0.5).unwrap(),
    );
    let comparison: Comparison = comparator.compare(
        &OutcomeTally::new(vec![1, 2]),
        &OutcomeTally::new(vec![2, 1]),
    );
    assert_eq!(comparison.probability_of_difference, p);
}

/// Test that the decider and tally are accessible via absolute path.
#[test]
fn test_decider_exports() {
    use rvar_core::effect::Identity;
    use rvar_core::rng::{EnumerableSplitMix, ExhaustiveStates};
    use rvar_core::variable::RandomVariable;
    use rvar_testkit::decider::EquivalenceDecider;
    use rvar_testkit::tally::tally;
    use std::rc::Rc;

    type Rv<A> = RandomVariable<Identity, EnumerableSplitMix<2>, A>;

    let space = rvar_testkit::DiscreteOutcomeSpace::new(vec![1_u8]).unwrap();
    let constant: Rv<u8> = Rv::pure(1);
    let counted = tally(&constant, &Rc::new(space.clone()), 5);
    assert_eq!(
        counted.simulate(EnumerableSplitMix::<2>::enumerate()[0]).counts(),
        &[5]
    );

    let decider = EquivalenceDecider::new(space, rvar_testkit::Confidence::new(5, 0.9).unwrap());
    assert!(decider.are_equivalent(&constant, &constant));
}
