//! Core type definitions and interfaces for the Tourmaline commit pool.
//!
//! This crate defines the domain model shared by every other crate in the
//! workspace: heights, addresses, BLS key and signature wrappers, single and
//! aggregate commits, certificates, block headers, validator sets, and the
//! capability traits through which the pool reads consensus state
//! ([`BftOracle`]), chain state ([`ChainStore`]) and publishes gossip
//! ([`NetworkSink`]).

mod address;
mod bls;
mod certificate;
mod chain;
mod commit;
mod hashes;
mod header;
mod height;
mod network;
mod oracle;
mod validator;

pub use address::Address;
pub use bls::{BlsPublicKey, BlsSignature};
pub use certificate::Certificate;
pub use chain::{ChainError, ChainStore};
pub use commit::{AggregateCommit, SingleCommit, SingleCommitsPacket};
pub use hashes::{BlockId, Hash256, NetworkId};
pub use header::BlockHeader;
pub use height::Height;
pub use network::{NetworkError, NetworkSink};
pub use oracle::{BftOracle, OracleError};
pub use validator::{BftHeights, BftParameters, Validator};

/// Number of heights below the highest certified height for which single
/// commits are still accepted and stored.
pub const COMMIT_RANGE_STORED: u64 = 50;

/// Domain separation tag prepended to the network identifier and the encoded
/// certificate when signing or verifying a certificate signature.
pub const MESSAGE_TAG_CERTIFICATE: &[u8] = b"LSK_CE_";

/// Network event under which a batch of encoded single commits is gossiped.
pub const NETWORK_EVENT_COMMIT_MESSAGES: &str = "commitMessages";
