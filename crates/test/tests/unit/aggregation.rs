use tourmaline_core_types::{BlsPublicKey, BlsSignature, Height};
use tourmaline_pool::{PoolError, Stage};
use tourmaline_signing_bls as bls;
use tourmaline_test::fixtures::{
    make_header, make_params, make_validators, signed_commit, TestValidator, DEFAULT_SEED,
};
use tourmaline_test::TestSetup;

fn setup() -> (TestSetup, Vec<TestValidator>) {
    let setup = TestSetup::new();
    let validators = make_validators(&[10, 20, 30, 40], DEFAULT_SEED);

    setup.oracle.set_params_from(0, make_params(&validators, 60));
    setup.oracle.set_heights(1000, 1050);

    (setup, validators)
}

/// The aggregate equals the reference BLS aggregation over the pairs in
/// lexicographic key order.
#[tokio::test]
async fn aggregate_matches_reference_aggregation() {
    let (setup, validators) = setup();
    let header = make_header(1005, 1000);
    let commits: Vec<_> = validators[0..3]
        .iter()
        .map(|v| signed_commit(&header, v))
        .collect();

    let aggregate = setup.pool.aggregate_single_commits(&commits).await.unwrap();
    assert_eq!(aggregate.height, Height::new(1005));

    let mut keys: Vec<BlsPublicKey> = validators.iter().map(|v| v.validator.bls_key).collect();
    keys.sort_unstable();
    let mut pairs: Vec<(BlsPublicKey, BlsSignature)> = commits
        .iter()
        .zip(&validators[0..3])
        .map(|(c, v)| (v.validator.bls_key, c.certificate_signature))
        .collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let (bits, signature) = bls::create_agg_sig(&keys, &pairs).unwrap();
    assert_eq!(aggregate.aggregation_bits, bits);
    assert_eq!(
        aggregate.certificate_signature.as_ref(),
        signature.as_bytes()
    );

    // Three of four bits set, in one byte.
    assert_eq!(aggregate.aggregation_bits.len(), 1);
    let set_bits = (0..4)
        .filter(|i| bls::is_bit_set(&aggregate.aggregation_bits, *i))
        .count();
    assert_eq!(set_bits, 3);
}

/// Same inputs in any order produce the same aggregate.
#[tokio::test]
async fn aggregation_is_input_order_insensitive() {
    let (setup, validators) = setup();
    let header = make_header(1005, 1000);
    let mut commits: Vec<_> = validators
        .iter()
        .map(|v| signed_commit(&header, v))
        .collect();

    let forward = setup.pool.aggregate_single_commits(&commits).await.unwrap();
    commits.reverse();
    let backward = setup.pool.aggregate_single_commits(&commits).await.unwrap();

    assert_eq!(forward, backward);
}

#[tokio::test]
async fn empty_input_is_an_error() {
    let (setup, _) = setup();

    let err = setup.pool.aggregate_single_commits(&[]).await.unwrap_err();
    assert!(matches!(err, PoolError::NoSingleCommit));
}

#[tokio::test]
async fn mixed_heights_are_an_error() {
    let (setup, validators) = setup();
    let commits = vec![
        signed_commit(&make_header(1005, 1000), &validators[0]),
        signed_commit(&make_header(1006, 1000), &validators[1]),
    ];

    let err = setup.pool.aggregate_single_commits(&commits).await.unwrap_err();
    assert!(matches!(err, PoolError::HeightMismatch(a, b)
        if a.as_u64() == 1005 && b.as_u64() == 1006));
}

/// Removing a signer's validator from the parameter set makes its key
/// unresolvable.
#[tokio::test]
async fn missing_bls_key_is_an_error() {
    let (setup, validators) = setup();
    // Parameters know every validator but the first.
    setup
        .oracle
        .set_params_from(0, make_params(&validators[1..], 60));

    let header = make_header(1005, 1000);
    let commits = vec![signed_commit(&header, &validators[0])];

    let err = setup.pool.aggregate_single_commits(&commits).await.unwrap_err();
    assert!(matches!(
        err,
        PoolError::NoBlsKeyForValidator(address) if address == validators[0].address()
    ));
}

/// The selector walks down from the bound and returns the highest height
/// whose pooled commits reach the threshold.
#[tokio::test]
async fn selects_the_highest_height_reaching_threshold() {
    let (mut setup, validators) = setup();

    // 1005: weight 100, 1008: weight 70, 1009: weight 40 (threshold 60).
    for validator in &validators {
        setup
            .pool
            .seed(Stage::Gossiped, signed_commit(&make_header(1005, 1000), validator));
    }
    for validator in &validators[2..4] {
        setup
            .pool
            .seed(Stage::Gossiped, signed_commit(&make_header(1008, 1000), validator));
    }
    setup
        .pool
        .seed(Stage::Gossiped, signed_commit(&make_header(1009, 1000), &validators[3]));

    let aggregate = setup.pool.select_aggregate_commit().await.unwrap();

    assert_eq!(aggregate.height, Height::new(1008));
    assert!(aggregate.is_signed());
}

/// No height reaches the threshold: the sentinel at the certified height.
#[tokio::test]
async fn returns_the_sentinel_when_nothing_reaches_threshold() {
    let (mut setup, validators) = setup();

    setup
        .pool
        .seed(Stage::Gossiped, signed_commit(&make_header(1009, 1000), &validators[3]));

    let aggregate = setup.pool.select_aggregate_commit().await.unwrap();

    assert_eq!(aggregate.height, Height::new(1000));
    assert!(aggregate.aggregation_bits.is_empty());
    assert!(aggregate.certificate_signature.is_empty());
}

/// The walk never crosses the next parameter change.
#[tokio::test]
async fn bound_stops_below_the_next_parameter_change() {
    let (mut setup, validators) = setup();
    setup
        .oracle
        .set_params_from(1006, make_params(&validators, 60));

    for validator in &validators {
        setup
            .pool
            .seed(Stage::Gossiped, signed_commit(&make_header(1005, 1000), validator));
        setup
            .pool
            .seed(Stage::Gossiped, signed_commit(&make_header(1008, 1000), validator));
    }

    let aggregate = setup.pool.select_aggregate_commit().await.unwrap();

    // 1008 reaches the threshold but lies beyond the bound 1005.
    assert_eq!(aggregate.height, Height::new(1005));
}

/// A parameter change immediately above the certified height leaves no
/// height to walk.
#[tokio::test]
async fn sentinel_when_parameters_change_at_the_next_height() {
    let (mut setup, validators) = setup();
    setup
        .oracle
        .set_params_from(1001, make_params(&validators, 60));

    for validator in &validators {
        setup
            .pool
            .seed(Stage::Gossiped, signed_commit(&make_header(1005, 1000), validator));
    }

    let aggregate = setup.pool.select_aggregate_commit().await.unwrap();

    assert_eq!(aggregate.height, Height::new(1000));
    assert!(!aggregate.is_signed());
}
