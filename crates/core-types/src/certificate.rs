use crate::{BlockHeader, BlockId, Hash256, Height};

/// The signing payload of a commit: five fields projected from a block
/// header.
///
/// The canonical encoding of a certificate, prefixed with
/// [`MESSAGE_TAG_CERTIFICATE`](crate::MESSAGE_TAG_CERTIFICATE) and the
/// network identifier, is what validators sign and what aggregate commit
/// verification checks against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    /// Identifier of the certified block.
    pub block_id: BlockId,
    /// Height of the certified block.
    pub height: Height,
    /// Timestamp of the certified block.
    pub timestamp: u64,
    /// State root of the certified block.
    pub state_root: Hash256,
    /// Hash of the validator set of the certified block.
    pub validators_hash: Hash256,
}

impl Certificate {
    /// Project a certificate out of a block header.
    pub fn from_block_header(header: &BlockHeader) -> Self {
        Self {
            block_id: header.id,
            height: header.height,
            timestamp: header.timestamp,
            state_root: header.state_root,
            validators_hash: header.validators_hash,
        }
    }
}
