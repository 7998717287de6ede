use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{Address, BftHeights, BftParameters, BlsPublicKey, Height, Validator};

/// Errors reported by a [`BftOracle`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    /// No BFT parameters are recorded at or after the given height.
    #[error("no BFT parameters found from height {0}")]
    ParametersNotFound(Height),

    /// The oracle has no entry for the given validator at the given height.
    #[error("validator {address} not found at height {height}")]
    ValidatorNotFound {
        /// Address that was looked up.
        address: Address,
        /// Height of the lookup.
        height: Height,
    },

    /// The oracle's backing store failed.
    #[error("oracle backend failure: {0}")]
    Backend(String),
}

/// Read-only view of the BFT engine's computed state.
///
/// The pool is polymorphic over this trait so that consensus backends and
/// test doubles can be swapped freely. All answers are allowed to change
/// between calls as the engine advances; the pool reconciles on its next
/// tick.
#[async_trait]
pub trait BftOracle: Send + Sync {
    /// The engine's current certified and precommitted heights.
    async fn bft_heights(&self) -> Result<BftHeights, OracleError>;

    /// The BFT parameters active at `height`.
    async fn bft_parameters(&self, height: Height) -> Result<BftParameters, OracleError>;

    /// The smallest height greater than or equal to `from` at which the BFT
    /// parameters change, or [`OracleError::ParametersNotFound`] when no
    /// such change is recorded.
    async fn next_height_bft_parameters(&self, from: Height) -> Result<Height, OracleError>;

    /// Whether a BFT parameter entry exists exactly at `height`, i.e.
    /// whether the validator set or thresholds change at that height.
    async fn exist_bft_parameters(&self, height: Height) -> Result<bool, OracleError>;

    /// The BLS key of the given validator at the given height.
    async fn validator_bls_key(
        &self,
        address: &Address,
        height: Height,
    ) -> Result<BlsPublicKey, OracleError>;

    /// The validator set active right now.
    async fn current_validators(&self) -> Result<Vec<Validator>, OracleError>;
}

#[async_trait]
impl<T: BftOracle + ?Sized> BftOracle for Arc<T> {
    async fn bft_heights(&self) -> Result<BftHeights, OracleError> {
        (**self).bft_heights().await
    }

    async fn bft_parameters(&self, height: Height) -> Result<BftParameters, OracleError> {
        (**self).bft_parameters(height).await
    }

    async fn next_height_bft_parameters(&self, from: Height) -> Result<Height, OracleError> {
        (**self).next_height_bft_parameters(from).await
    }

    async fn exist_bft_parameters(&self, height: Height) -> Result<bool, OracleError> {
        (**self).exist_bft_parameters(height).await
    }

    async fn validator_bls_key(
        &self,
        address: &Address,
        height: Height,
    ) -> Result<BlsPublicKey, OracleError> {
        (**self).validator_bls_key(address, height).await
    }

    async fn current_validators(&self) -> Result<Vec<Validator>, OracleError> {
        (**self).current_validators().await
    }
}
