use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use tourmaline_codec::Protobuf;
use tourmaline_core_types::{
    Address, BftOracle, ChainStore, Height, NetworkSink, SingleCommit, SingleCommitsPacket,
    COMMIT_RANGE_STORED, NETWORK_EVENT_COMMIT_MESSAGES,
};

use crate::error::PoolError;
use crate::index::Order;
use crate::pool::{all_commits_ascending, CommitPool};

impl<O, C, N> CommitPool<O, C, N>
where
    O: BftOracle,
    C: ChainStore,
    N: NetworkSink,
{
    /// Run one pruning and gossip tick.
    ///
    /// Evicts every commit at or below the removal height, drops
    /// non-gossiped commits that BFT parameter evolution made inadmissible,
    /// promotes the survivors to `gossiped`, and broadcasts a batch capped
    /// at twice the current validator count.
    ///
    /// The tick is all-or-nothing with respect to the indices: mutations
    /// are staged on copies and only swapped in once every read has
    /// succeeded. The network send happens after the swap and is
    /// fire-and-forget; the next tick rebuilds the batch from scratch.
    pub async fn run_tick(&mut self) -> Result<(), PoolError> {
        let removal_height = self.max_removal_height().await?;
        let heights = self.oracle.bft_heights().await?;
        let current_validators = self.oracle.current_validators().await?;

        let mut local = self.local.clone();
        let mut non_gossiped = self.non_gossiped.clone();
        let mut gossiped = self.gossiped.clone();

        let before = local.len() + non_gossiped.len() + gossiped.len();
        local.prune_up_to(removal_height);
        non_gossiped.prune_up_to(removal_height);
        gossiped.prune_up_to(removal_height);
        let evicted = before - (local.len() + non_gossiped.len() + gossiped.len());

        // Parameter changes upstream can retroactively invalidate pooled
        // commits; re-check admissibility before promoting.
        let mut inadmissible = Vec::new();
        for commit in non_gossiped.get_all(Order::Asc) {
            if !self.is_admissible(commit.height, &heights).await? {
                inadmissible.push(commit.clone());
            }
        }
        for commit in &inadmissible {
            debug!(
                height = %commit.height,
                validator = %commit.validator_address,
                "dropping commit no longer admissible"
            );
            non_gossiped.delete_single(commit);
        }

        // The broadcast batch considers non-gossiped commits as they were
        // before promotion.
        let pre_promotion: Vec<SingleCommit> =
            non_gossiped.get_all(Order::Dsc).cloned().collect();

        for commit in non_gossiped.get_all(Order::Asc) {
            gossiped.add(commit.clone());
        }
        non_gossiped.clear();

        let cap = 2 * current_validators.len();
        let mut selected: Vec<SingleCommit> = Vec::new();
        let mut picked: HashSet<(Height, Address)> = HashSet::new();

        // Oldest first, so lagging peers can catch up and finalize.
        let stale_cutoff = heights
            .max_height_precommitted
            .saturating_sub(COMMIT_RANGE_STORED);
        let all = all_commits_ascending(&local, &non_gossiped, &gossiped);
        for commit in all.iter().filter(|c| c.height < stale_cutoff) {
            if selected.len() == cap {
                break;
            }
            if picked.insert(commit.key()) {
                selected.push(commit.clone());
            }
        }

        // Our own commits beat relayed ones for the remaining slots.
        for commit in local.get_all(Order::Dsc) {
            if selected.len() == cap {
                break;
            }
            if picked.insert(commit.key()) {
                selected.push(commit.clone());
            }
        }

        for commit in &pre_promotion {
            if selected.len() == cap {
                break;
            }
            if picked.insert(commit.key()) {
                selected.push(commit.clone());
            }
        }

        self.local = local;
        self.non_gossiped = non_gossiped;
        self.gossiped = gossiped;

        debug!(
            %removal_height,
            evicted,
            dropped = inadmissible.len(),
            promoted = pre_promotion.len(),
            selected = selected.len(),
            "commit pool tick complete"
        );

        let packet = SingleCommitsPacket {
            commits: selected.iter().map(Protobuf::to_bytes).collect(),
        };
        let payload: Bytes = packet.to_bytes();
        if let Err(e) = self
            .network
            .send(NETWORK_EVENT_COMMIT_MESSAGES, payload)
            .await
        {
            warn!(error = %e, "failed to broadcast single commits");
        }

        Ok(())
    }
}

/// Drive the pruning and gossip job of a shared pool, once per block time.
///
/// A failed tick leaves the pool untouched and is retried on the next
/// interval. The lock is held for the whole tick, so pool mutations queued
/// elsewhere observe the post-tick state.
pub async fn ticker<O, C, N>(pool: Arc<Mutex<CommitPool<O, C, N>>>, block_time: Duration)
where
    O: BftOracle,
    C: ChainStore,
    N: NetworkSink,
{
    loop {
        tokio::time::sleep(block_time).await;

        let mut pool = pool.lock().await;
        if let Err(e) = pool.run_tick().await {
            error!(error = %e, "commit pool job tick failed");
        }
    }
}
