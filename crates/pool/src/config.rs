use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime configuration of the commit pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Interval between two runs of the pruning and gossip job. One block
    /// time.
    #[serde(with = "humantime_serde")]
    pub block_time: Duration,

    /// Reserved for commit persistence across restarts. Currently unused;
    /// commits lost on restart are recovered from peers.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            block_time: Duration::from_secs(10),
            db_path: None,
        }
    }
}
