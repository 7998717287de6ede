use crate::{Address, AggregateCommit, BlockId, Hash256, Height};

/// The slice of a block header the commit pool consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Identifier of the block.
    pub id: BlockId,
    /// Height of the block.
    pub height: Height,
    /// Timestamp of the block.
    pub timestamp: u64,
    /// State root after executing the block.
    pub state_root: Hash256,
    /// Hash of the validator set active for the block.
    pub validators_hash: Hash256,
    /// Address of the block generator.
    pub generator_address: Address,
    /// The aggregate commit included in the block.
    pub aggregate_commit: AggregateCommit,
}
