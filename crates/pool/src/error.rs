use thiserror::Error;

use tourmaline_core_types::{Address, ChainError, Height, OracleError};

/// Errors surfaced by the commit pool.
///
/// `validate_commit` distinguishes in-protocol rejections (`Ok(false)`) from
/// peer-attributable faults (`Err`): [`PoolError::ValidatorNotActive`] and
/// [`PoolError::InvalidSignature`] indicate malformed peer input and should
/// feed into peer scoring, while an `Ok(false)` carries no blame.
#[derive(Debug, Error)]
pub enum PoolError {
    /// A commit names a validator that is not active at its height.
    #[error("validator {address} is not active at height {height}")]
    ValidatorNotActive {
        /// The validator named by the commit.
        address: Address,
        /// The height of the commit.
        height: Height,
    },

    /// A commit's certificate signature failed BLS verification.
    #[error("invalid certificate signature from {address} at height {height}")]
    InvalidSignature {
        /// The validator named by the commit.
        address: Address,
        /// The height of the commit.
        height: Height,
    },

    /// The aggregator was called with an empty set of commits.
    #[error("cannot aggregate an empty set of single commits")]
    NoSingleCommit,

    /// The aggregator could not resolve a BLS key for a commit's validator.
    #[error("no BLS key for validator {0}")]
    NoBlsKeyForValidator(Address),

    /// The aggregator was called with commits from different heights.
    #[error("single commits span different heights: {0} and {1}")]
    HeightMismatch(Height, Height),

    /// The chain has no header at the given height where one is required.
    #[error("no block header found at height {0}")]
    HeaderNotFound(Height),

    /// The BFT oracle failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The chain store failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// Wire encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] tourmaline_codec::Error),

    /// A BLS operation failed.
    #[error(transparent)]
    Bls(#[from] tourmaline_signing_bls::Error),
}
