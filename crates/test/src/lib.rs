//! Test doubles and fixtures for the Tourmaline commit pool.
//!
//! The doubles implement the three capability traits the pool consumes,
//! with scriptable state: [`TestOracle`] serves BFT heights and parameter
//! change points, [`TestChain`] serves headers and the finalized height,
//! and [`TestNetwork`] records every broadcast. [`fixtures`] generates
//! deterministic validators (real BLS keys derived from a seed), headers
//! and commits.


pub mod fixtures;

pub use chain::TestChain;
pub use network::TestNetwork;
pub use oracle::TestOracle;

use std::sync::Arc;

use tourmaline_pool::{CommitPool, PoolConfig};

/// A pool wired to fresh test doubles, with handles to each double kept
/// alongside so tests can script them after construction.
pub struct TestSetup {
    pub oracle: Arc<TestOracle>,
    pub chain: Arc<TestChain>,
    pub network: Arc<TestNetwork>,
    pub pool: CommitPool<Arc<TestOracle>, Arc<TestChain>, Arc<TestNetwork>>,
}

impl TestSetup {
    /// A pool over empty doubles and the fixture network identifier.
    pub fn new() -> Self {
        let oracle = Arc::new(TestOracle::new());
        let chain = Arc::new(TestChain::new());
        let network = Arc::new(TestNetwork::new());

        let pool = CommitPool::new(
            Arc::clone(&oracle),
            Arc::clone(&chain),
            Arc::clone(&network),
            fixtures::network_id(),
            PoolConfig::default(),
        );

        Self {
            oracle,
            chain,
            network,
            pool,
        }
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}
