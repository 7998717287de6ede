use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{BlockHeader, Height};

/// Errors reported by a [`ChainStore`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The chain's backing store failed.
    #[error("chain backend failure: {0}")]
    Backend(String),
}

/// Read-only view of the canonical chain.
#[async_trait]
pub trait ChainStore: Send + Sync {
    /// The height of the finalized tip.
    fn finalized_height(&self) -> Height;

    /// The canonical block header at `height`, or `None` when the chain has
    /// no block there yet.
    async fn block_header_by_height(
        &self,
        height: Height,
    ) -> Result<Option<BlockHeader>, ChainError>;
}

#[async_trait]
impl<T: ChainStore + ?Sized> ChainStore for Arc<T> {
    fn finalized_height(&self) -> Height {
        (**self).finalized_height()
    }

    async fn block_header_by_height(
        &self,
        height: Height,
    ) -> Result<Option<BlockHeader>, ChainError> {
        (**self).block_header_by_height(height).await
    }
}
