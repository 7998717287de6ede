//! Deterministic fixtures: validators with real BLS keys, headers, commits.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use tourmaline_core_types::{
    Address, AggregateCommit, BftParameters, BlockHeader, BlockId, BlsSignature, Hash256, Height,
    NetworkId, SingleCommit, Validator,
};
use tourmaline_pool::create_single_commit;
use tourmaline_signing_bls::SecretKey;

/// Seed used by fixtures unless a test needs a second, distinct universe.
pub const DEFAULT_SEED: u64 = 0x1055;

/// A validator together with its secret key.
pub struct TestValidator {
    pub validator: Validator,
    pub secret_key: SecretKey,
}

impl TestValidator {
    pub fn address(&self) -> Address {
        self.validator.address
    }
}

/// The network identifier all fixtures sign under.
pub fn network_id() -> NetworkId {
    NetworkId::new([0xaa; 32])
}

/// Generate one validator per weight, with addresses and BLS keys derived
/// from `seed`.
pub fn make_validators(weights: &[u64], seed: u64) -> Vec<TestValidator> {
    let mut rng = StdRng::seed_from_u64(seed);

    weights
        .iter()
        .map(|weight| {
            let mut ikm = [0u8; 32];
            rng.fill_bytes(&mut ikm);
            let secret_key = SecretKey::from_ikm(&ikm).expect("32 bytes of ikm");

            let mut address = [0u8; 20];
            rng.fill_bytes(&mut address);

            TestValidator {
                validator: Validator {
                    address: Address::new(address),
                    bft_weight: *weight,
                    bls_key: secret_key.public_key(),
                },
                secret_key,
            }
        })
        .collect()
}

/// BFT parameters over the given validators.
pub fn make_params(validators: &[TestValidator], certificate_threshold: u64) -> BftParameters {
    BftParameters {
        certificate_threshold,
        validators: validators.iter().map(|v| v.validator.clone()).collect(),
    }
}

/// A header at `height` whose id is a pure function of the height, carrying
/// an aggregate commit at `aggregate_height`.
pub fn make_header(height: u64, aggregate_height: u64) -> BlockHeader {
    let mut id = [0x77u8; 32];
    id[..8].copy_from_slice(&height.to_be_bytes());

    BlockHeader {
        id: BlockId::new(id),
        height: Height::new(height),
        timestamp: 1_700_000_000 + height,
        state_root: Hash256::new([0x51; 32]),
        validators_hash: Hash256::new([0x52; 32]),
        generator_address: Address::new([0x99; 20]),
        aggregate_commit: AggregateCommit::sentinel(Height::new(aggregate_height)),
    }
}

/// A commit over `header`'s certificate, properly signed by `validator`.
pub fn signed_commit(header: &BlockHeader, validator: &TestValidator) -> SingleCommit {
    create_single_commit(
        header,
        validator.address(),
        &validator.secret_key,
        &network_id(),
    )
}

/// A structurally valid commit with a garbage signature, for tests that
/// never verify it.
pub fn unsigned_commit(height: u64, validator: &TestValidator) -> SingleCommit {
    let header = make_header(height, 0);
    SingleCommit {
        block_id: header.id,
        height: Height::new(height),
        validator_address: validator.address(),
        certificate_signature: BlsSignature::new([0x0b; 96]),
    }
}
