//! Single and aggregate commit pool for the Tourmaline consensus engine.
//!
//! The pool collects single commits — one validator's BLS attestation over a
//! block certificate — from the local generator and from peers, keeps them
//! in three lifecycle stages (`local`, `non_gossiped`, `gossiped`), and on a
//! per-block-time tick prunes stale entries, promotes fresh ones, and
//! gossips a bounded batch to the network. The block producer path asks the
//! pool for the best aggregate commit it can assemble from the singles at
//! hand.
//!
//! The pool reads consensus state through
//! [`BftOracle`](tourmaline_core_types::BftOracle), chain state through
//! [`ChainStore`](tourmaline_core_types::ChainStore), and publishes through
//! [`NetworkSink`](tourmaline_core_types::NetworkSink); it owns no state
//! beyond its three in-memory indices.

mod aggregation;
mod config;
mod error;
mod index;
mod job;
mod pool;

pub use config::PoolConfig;
pub use error::PoolError;
pub use index::{CommitIndex, Order};
pub use job::ticker;
pub use pool::{create_single_commit, CommitPool, Stage};
