use tourmaline_core_types::{BlockHeader, BlockId, BlsSignature, Height};
use tourmaline_pool::{PoolError, Stage};
use tourmaline_test::fixtures::{
    make_header, make_params, make_validators, signed_commit, TestValidator, DEFAULT_SEED,
};
use tourmaline_test::TestSetup;

/// A pool over four equally weighted validators, with the BFT engine at
/// certified height 1000 / precommitted height 1050, a finalized tip at 950
/// whose aggregate commit sits at 940, and a canonical block at 1020.
fn setup() -> (TestSetup, Vec<TestValidator>, BlockHeader) {
    let setup = TestSetup::new();
    let validators = make_validators(&[10, 10, 10, 10], DEFAULT_SEED);

    setup.oracle.set_params_from(0, make_params(&validators, 30));
    setup.oracle.set_heights(1000, 1050);
    setup
        .oracle
        .set_current_validators(validators.iter().map(|v| v.validator.clone()).collect());

    setup.chain.set_finalized_height(950);
    setup.chain.insert_header(make_header(950, 940));

    let header = make_header(1020, 1000);
    setup.chain.insert_header(header.clone());

    (setup, validators, header)
}

#[tokio::test]
async fn accepts_a_valid_commit() {
    let (setup, validators, header) = setup();
    let commit = signed_commit(&header, &validators[0]);

    assert!(setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn rejects_commit_for_a_height_without_a_block() {
    let (setup, validators, header) = setup();
    let mut commit = signed_commit(&header, &validators[0]);
    commit.height = Height::new(1021);

    assert!(!setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn rejects_commit_with_mismatched_block_id() {
    let (setup, validators, header) = setup();
    let mut commit = signed_commit(&header, &validators[0]);
    commit.block_id = BlockId::new([0xdd; 32]);

    assert!(!setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn rejects_already_known_commit_in_any_index() {
    let (mut setup, validators, header) = setup();
    let commit = signed_commit(&header, &validators[0]);

    setup.pool.add_commit(commit.clone(), false);
    assert!(!setup.pool.validate_commit(&commit).await.unwrap());

    let gossiped = signed_commit(&header, &validators[1]);
    setup.pool.seed(Stage::Gossiped, gossiped.clone());
    assert!(!setup.pool.validate_commit(&gossiped).await.unwrap());

    // A commit known to no index still validates.
    let fresh = signed_commit(&header, &validators[2]);
    assert!(setup.pool.validate_commit(&fresh).await.unwrap());
}

#[tokio::test]
async fn rejects_commit_at_or_below_the_removal_height() {
    let (setup, validators, _) = setup();

    let old_header = make_header(940, 900);
    setup.chain.insert_header(old_header.clone());
    let commit = signed_commit(&old_header, &validators[0]);

    assert!(!setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn rejects_commit_outside_the_range_without_a_parameter_change() {
    let (setup, validators, _) = setup();

    // Below max_height_certified - COMMIT_RANGE_STORED = 950, above the
    // removal height 940.
    let header = make_header(945, 900);
    setup.chain.insert_header(header.clone());
    let commit = signed_commit(&header, &validators[0]);

    assert!(!setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn accepts_out_of_range_commit_preceding_a_parameter_change() {
    let (setup, validators, _) = setup();

    let header = make_header(945, 900);
    setup.chain.insert_header(header.clone());
    let commit = signed_commit(&header, &validators[0]);

    // The validator set changes right above the commit's height.
    setup
        .oracle
        .set_params_from(946, make_params(&validators, 30));

    assert!(setup.pool.validate_commit(&commit).await.unwrap());
}

#[tokio::test]
async fn raises_for_a_validator_outside_the_active_set() {
    let (setup, _, header) = setup();
    let strangers = make_validators(&[10], 0xbeef);
    let commit = signed_commit(&header, &strangers[0]);

    let err = setup.pool.validate_commit(&commit).await.unwrap_err();
    assert!(matches!(
        err,
        PoolError::ValidatorNotActive { address, .. } if address == strangers[0].address()
    ));
}

#[tokio::test]
async fn raises_for_a_bit_flipped_signature() {
    let (setup, validators, header) = setup();
    let mut commit = signed_commit(&header, &validators[0]);

    let mut sig = *commit.certificate_signature.as_bytes();
    sig[17] ^= 0x01;
    commit.certificate_signature = BlsSignature::new(sig);

    let err = setup.pool.validate_commit(&commit).await.unwrap_err();
    assert!(matches!(err, PoolError::InvalidSignature { .. }));
}

#[tokio::test]
async fn raises_for_a_signature_over_the_wrong_certificate() {
    let (setup, validators, header) = setup();

    // Signed over a different header's certificate, replayed for the
    // canonical block at 1020.
    let other = make_header(1021, 1000);
    let mut commit = signed_commit(&other, &validators[0]);
    commit.height = header.height;
    commit.block_id = header.id;

    let err = setup.pool.validate_commit(&commit).await.unwrap_err();
    assert!(matches!(err, PoolError::InvalidSignature { .. }));
}
