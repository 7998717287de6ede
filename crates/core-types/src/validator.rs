use crate::{Address, BlsPublicKey, Height};

/// An active validator as reported by the BFT oracle for some height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validator {
    /// Address of the validator.
    pub address: Address,
    /// Voting weight of the validator.
    pub bft_weight: u64,
    /// BLS public key of the validator.
    pub bls_key: BlsPublicKey,
}

/// BFT parameters active at a height: the validator set and the weight
/// required to certify a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BftParameters {
    /// Minimum summed weight required to form a valid aggregate commit.
    pub certificate_threshold: u64,
    /// Validator set, in the oracle's order.
    pub validators: Vec<Validator>,
}

impl BftParameters {
    /// Look up a validator by address.
    pub fn validator_by_address(&self, address: &Address) -> Option<&Validator> {
        self.validators.iter().find(|v| &v.address == address)
    }

    /// The validators' BLS keys in lexicographic order, as required by the
    /// aggregation routines.
    pub fn sorted_bls_keys(&self) -> Vec<BlsPublicKey> {
        let mut keys: Vec<_> = self.validators.iter().map(|v| v.bls_key).collect();
        keys.sort_unstable();
        keys
    }
}

/// The two heights the BFT engine exposes to the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BftHeights {
    /// Highest height with a valid aggregate commit on chain.
    pub max_height_certified: Height,
    /// Highest height the local BFT engine has precommitted.
    pub max_height_precommitted: Height,
}
