use tracing::debug;

use tourmaline_codec::Protobuf;
use tourmaline_core_types::{
    Address, BftHeights, BftOracle, BlockHeader, Certificate, ChainStore, Height, NetworkId,
    NetworkSink, OracleError, SingleCommit, COMMIT_RANGE_STORED, MESSAGE_TAG_CERTIFICATE,
};
use tourmaline_signing_bls as bls;

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::index::{CommitIndex, Order};

/// Lifecycle stage of a commit inside the pool.
///
/// Exposed for the test suite; production code interacts with stages only
/// through [`CommitPool::add_commit`] and the pruning job.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Commits this node authored with its own validator keys.
    Local,
    /// Commits received or created but not yet broadcast.
    NonGossiped,
    /// Commits already broadcast, kept for aggregation.
    Gossiped,
}

/// The commit pool: three commit indices plus read handles on consensus and
/// chain state and a write handle on the network.
///
/// A `(height, validator_address)` pair lives in at most one of the three
/// indices at any time. Commits enter through [`add_commit`], move from
/// `non_gossiped` to `gossiped` when the periodic job broadcasts, and leave
/// when the job prunes them below the removal height.
///
/// [`add_commit`]: CommitPool::add_commit
pub struct CommitPool<O, C, N> {
    pub(crate) oracle: O,
    pub(crate) chain: C,
    pub(crate) network: N,
    pub(crate) network_id: NetworkId,
    pub(crate) config: PoolConfig,
    pub(crate) local: CommitIndex,
    pub(crate) non_gossiped: CommitIndex,
    pub(crate) gossiped: CommitIndex,
}

impl<O, C, N> CommitPool<O, C, N>
where
    O: BftOracle,
    C: ChainStore,
    N: NetworkSink,
{
    /// Create an empty pool over the given collaborators.
    pub fn new(oracle: O, chain: C, network: N, network_id: NetworkId, config: PoolConfig) -> Self {
        Self {
            oracle,
            chain,
            network,
            network_id,
            config,
            local: CommitIndex::new(),
            non_gossiped: CommitIndex::new(),
            gossiped: CommitIndex::new(),
        }
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Insert a commit. Locally generated commits go to the `local` index,
    /// everything else to `non_gossiped`; the gossip job alone promotes into
    /// `gossiped`. A commit already known to any index is ignored.
    pub fn add_commit(&mut self, commit: SingleCommit, local: bool) {
        if self.has_commit(&commit) {
            return;
        }

        debug!(
            height = %commit.height,
            validator = %commit.validator_address,
            local,
            "adding single commit"
        );

        if local {
            self.local.add(commit);
        } else {
            self.non_gossiped.add(commit);
        }
    }

    /// Whether any index holds an entry for `commit`'s
    /// `(height, validator_address)`.
    pub fn has_commit(&self, commit: &SingleCommit) -> bool {
        self.local.exists(commit)
            || self.non_gossiped.exists(commit)
            || self.gossiped.exists(commit)
    }

    /// All commits at the given height: local first, then non-gossiped,
    /// then gossiped, each in insertion order.
    pub fn get_commits_by_height(&self, height: Height) -> Vec<SingleCommit> {
        let mut commits = Vec::new();
        commits.extend_from_slice(self.local.get_by_height(height));
        commits.extend_from_slice(self.non_gossiped.get_by_height(height));
        commits.extend_from_slice(self.gossiped.get_by_height(height));
        commits
    }

    /// All commits across the three indices, ascending by height.
    pub fn get_all_commits(&self) -> Vec<SingleCommit> {
        all_commits_ascending(&self.local, &self.non_gossiped, &self.gossiped)
    }

    /// Validate a candidate single commit against chain and consensus state.
    ///
    /// Returns `Ok(true)` when the commit should be admitted, `Ok(false)`
    /// for the normal rejection paths (unknown block, wrong block id,
    /// already known, too old, outside the stored range with no upcoming
    /// parameter change), and an error for peer-attributable faults: a
    /// validator outside the active set or a signature that fails BLS
    /// verification.
    pub async fn validate_commit(&self, commit: &SingleCommit) -> Result<bool, PoolError> {
        // The commit must attest the canonical block at its height.
        let Some(header) = self.chain.block_header_by_height(commit.height).await? else {
            return Ok(false);
        };
        if header.id != commit.block_id {
            return Ok(false);
        }

        // Re-delivery of a known commit is not a fault.
        if self.has_commit(commit) {
            return Ok(false);
        }

        if commit.height <= self.max_removal_height().await? {
            return Ok(false);
        }

        let heights = self.oracle.bft_heights().await?;
        if !self.is_admissible(commit.height, &heights).await? {
            return Ok(false);
        }

        let params = match self.oracle.bft_parameters(commit.height).await {
            Ok(params) => params,
            Err(OracleError::ParametersNotFound(_)) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        if params
            .validator_by_address(&commit.validator_address)
            .is_none()
        {
            return Err(PoolError::ValidatorNotActive {
                address: commit.validator_address,
                height: commit.height,
            });
        }

        let bls_key = self
            .oracle
            .validator_bls_key(&commit.validator_address, commit.height)
            .await?;

        let certificate = Certificate::from_block_header(&header);
        let payload = certificate.to_bytes();
        if !bls::verify(
            &bls_key,
            MESSAGE_TAG_CERTIFICATE,
            &self.network_id,
            &payload,
            &commit.certificate_signature,
        ) {
            return Err(PoolError::InvalidSignature {
                address: commit.validator_address,
                height: commit.height,
            });
        }

        Ok(true)
    }

    /// The height at and below which commits are no longer useful: the
    /// aggregate commit height recorded in the block header at the
    /// finalized tip.
    pub async fn max_removal_height(&self) -> Result<Height, PoolError> {
        let finalized = self.chain.finalized_height();
        let header = self
            .chain
            .block_header_by_height(finalized)
            .await?
            .ok_or(PoolError::HeaderNotFound(finalized))?;

        Ok(header.aggregate_commit.height)
    }

    /// Whether a commit at `height` is admissible: inside the stored range
    /// `[max_height_certified - COMMIT_RANGE_STORED, max_height_precommitted]`,
    /// or immediately followed by a BFT parameter change.
    pub(crate) async fn is_admissible(
        &self,
        height: Height,
        heights: &BftHeights,
    ) -> Result<bool, PoolError> {
        let lower = heights.max_height_certified.saturating_sub(COMMIT_RANGE_STORED);
        if lower <= height && height <= heights.max_height_precommitted {
            return Ok(true);
        }

        Ok(self.oracle.exist_bft_parameters(height.increment()).await?)
    }

    /// Place a commit directly into a lifecycle stage, bypassing
    /// `add_commit`'s routing. Test seam only.
    #[doc(hidden)]
    pub fn seed(&mut self, stage: Stage, commit: SingleCommit) {
        match stage {
            Stage::Local => self.local.add(commit),
            Stage::NonGossiped => self.non_gossiped.add(commit),
            Stage::Gossiped => self.gossiped.add(commit),
        };
    }

    /// The commits currently held in a lifecycle stage, ascending by
    /// height. Test seam only.
    #[doc(hidden)]
    pub fn stage_commits(&self, stage: Stage) -> Vec<SingleCommit> {
        let index = match stage {
            Stage::Local => &self.local,
            Stage::NonGossiped => &self.non_gossiped,
            Stage::Gossiped => &self.gossiped,
        };
        index.get_all(Order::Asc).cloned().collect()
    }
}

/// Sign a single commit over the certificate derived from `header`, for the
/// node's own validator key.
pub fn create_single_commit(
    header: &BlockHeader,
    validator_address: Address,
    secret_key: &bls::SecretKey,
    network_id: &NetworkId,
) -> SingleCommit {
    let certificate = Certificate::from_block_header(header);
    let payload = certificate.to_bytes();

    SingleCommit {
        block_id: header.id,
        height: header.height,
        validator_address,
        certificate_signature: secret_key.sign(MESSAGE_TAG_CERTIFICATE, network_id, &payload),
    }
}

/// Merge the three indices into one ascending-by-height sequence, keeping
/// the local / non-gossiped / gossiped order within each height.
pub(crate) fn all_commits_ascending(
    local: &CommitIndex,
    non_gossiped: &CommitIndex,
    gossiped: &CommitIndex,
) -> Vec<SingleCommit> {
    let mut heights: Vec<Height> = Vec::new();
    for index in [local, non_gossiped, gossiped] {
        for commit in index.get_all(Order::Asc) {
            if !heights.contains(&commit.height) {
                heights.push(commit.height);
            }
        }
    }
    heights.sort_unstable();

    let mut commits = Vec::new();
    for height in heights {
        commits.extend_from_slice(local.get_by_height(height));
        commits.extend_from_slice(non_gossiped.get_by_height(height));
        commits.extend_from_slice(gossiped.get_by_height(height));
    }
    commits
}
