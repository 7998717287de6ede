use bytes::Bytes;

use crate::{Address, BlockId, BlsSignature, Height};

/// A single validator's attestation over a block certificate.
///
/// Two commits are the same pool entry when their `(height,
/// validator_address)` pair matches; equality compares all fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleCommit {
    /// Identifier of the block being attested.
    pub block_id: BlockId,
    /// Height of the block being attested.
    pub height: Height,
    /// Address of the attesting validator.
    pub validator_address: Address,
    /// BLS signature over the encoded certificate of the block.
    pub certificate_signature: BlsSignature,
}

impl SingleCommit {
    /// The pool uniqueness key of this commit.
    pub fn key(&self) -> (Height, Address) {
        (self.height, self.validator_address)
    }
}

/// A BLS aggregation of single commits at one height.
///
/// `aggregation_bits` is a bitmap over the validator set at `height`, taken
/// in lexicographic order of the validators' BLS keys. Empty bits and an
/// empty signature together form the sentinel "no aggregate".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateCommit {
    /// Height of the aggregated commits.
    pub height: Height,
    /// Bitmap of contributing validators.
    pub aggregation_bits: Bytes,
    /// Aggregated BLS signature, or empty for the sentinel.
    pub certificate_signature: Bytes,
}

impl AggregateCommit {
    /// The sentinel aggregate for the given height: no contributors, no
    /// signature.
    pub fn sentinel(height: Height) -> Self {
        Self {
            height,
            aggregation_bits: Bytes::new(),
            certificate_signature: Bytes::new(),
        }
    }

    /// Whether this aggregate carries a signature at all.
    pub fn is_signed(&self) -> bool {
        !self.certificate_signature.is_empty() && !self.aggregation_bits.is_empty()
    }
}

/// The outbound gossip payload: a batch of canonically encoded single
/// commits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SingleCommitsPacket {
    /// Canonical encodings of the batched commits.
    pub commits: Vec<Bytes>,
}
