use std::collections::{HashMap, HashSet};

use bytes::Bytes;
use tracing::debug;

use tourmaline_codec::Protobuf;
use tourmaline_core_types::{
    Address, AggregateCommit, BftOracle, BlsPublicKey, Certificate, ChainStore, NetworkSink,
    OracleError, SingleCommit, Validator, MESSAGE_TAG_CERTIFICATE,
};
use tourmaline_signing_bls as bls;

use crate::error::PoolError;
use crate::pool::CommitPool;

impl<O, C, N> CommitPool<O, C, N>
where
    O: BftOracle,
    C: ChainStore,
    N: NetworkSink,
{
    /// Combine single commits at one height into an aggregate commit.
    ///
    /// All commits must share one height and every named validator must
    /// carry a BLS key in the parameters at that height. The aggregation
    /// bitmap covers the full validator set in lexicographic key order, not
    /// just the signing subset.
    pub async fn aggregate_single_commits(
        &self,
        commits: &[SingleCommit],
    ) -> Result<AggregateCommit, PoolError> {
        let Some(first) = commits.first() else {
            return Err(PoolError::NoSingleCommit);
        };
        let height = first.height;
        for commit in commits {
            if commit.height != height {
                return Err(PoolError::HeightMismatch(height, commit.height));
            }
        }

        let params = self.oracle.bft_parameters(height).await?;
        let keys_by_address: HashMap<Address, BlsPublicKey> = params
            .validators
            .iter()
            .map(|v| (v.address, v.bls_key))
            .collect();

        let mut pairs = Vec::with_capacity(commits.len());
        for commit in commits {
            let key = keys_by_address
                .get(&commit.validator_address)
                .ok_or(PoolError::NoBlsKeyForValidator(commit.validator_address))?;
            pairs.push((*key, commit.certificate_signature));
        }

        // The aggregation routine expects the key list and the pair list in
        // lexicographic key order.
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let keys_list = params.sorted_bls_keys();

        let (aggregation_bits, signature) = bls::create_agg_sig(&keys_list, &pairs)?;

        Ok(AggregateCommit {
            height,
            aggregation_bits,
            certificate_signature: Bytes::copy_from_slice(signature.as_bytes()),
        })
    }

    /// Choose the highest aggregatable height and build its aggregate
    /// commit.
    ///
    /// Walks from the admissible ceiling — one height below the next BFT
    /// parameter change, capped at the precommitted height — down to just
    /// above the certified height, and aggregates at the first height whose
    /// pooled commits reach the certificate threshold. Returns the sentinel
    /// aggregate at the certified height when no height qualifies.
    pub async fn select_aggregate_commit(&self) -> Result<AggregateCommit, PoolError> {
        let heights = self.oracle.bft_heights().await?;

        let next_change = match self
            .oracle
            .next_height_bft_parameters(heights.max_height_certified.increment())
            .await
        {
            Ok(height) => Some(height),
            Err(OracleError::ParametersNotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        let height_bound = match next_change {
            Some(change) => {
                std::cmp::min(change.saturating_sub(1), heights.max_height_precommitted)
            }
            None => heights.max_height_precommitted,
        };

        if height_bound > heights.max_height_certified {
            let params = self.oracle.bft_parameters(height_bound).await?;

            let mut height = height_bound;
            while height > heights.max_height_certified {
                let commits = self.get_commits_by_height(height);
                if !commits.is_empty() && reaches_threshold(&params.validators, &commits, params.certificate_threshold) {
                    debug!(%height, commits = commits.len(), "aggregating single commits");
                    return self.aggregate_single_commits(&commits).await;
                }
                height = height.saturating_sub(1);
            }
        }

        Ok(AggregateCommit::sentinel(heights.max_height_certified))
    }

    /// Verify an externally supplied aggregate commit.
    ///
    /// Structural defects and out-of-window heights return `Ok(false)`
    /// without raising; only collaborator failures surface as errors.
    pub async fn verify_aggregate_commit(
        &self,
        aggregate: &AggregateCommit,
    ) -> Result<bool, PoolError> {
        if !aggregate.is_signed() {
            return Ok(false);
        }

        let heights = self.oracle.bft_heights().await?;
        if aggregate.height <= heights.max_height_certified {
            return Ok(false);
        }
        if aggregate.height > heights.max_height_precommitted {
            return Ok(false);
        }

        match self
            .oracle
            .next_height_bft_parameters(heights.max_height_certified.increment())
            .await
        {
            Ok(change) if aggregate.height > change.saturating_sub(1) => return Ok(false),
            Ok(_) | Err(OracleError::ParametersNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let Some(header) = self.chain.block_header_by_height(aggregate.height).await? else {
            return Ok(false);
        };
        let certificate = Certificate::from_block_header(&header);
        let payload = certificate.to_bytes();

        let params = self.oracle.bft_parameters(aggregate.height).await?;
        let mut validators: Vec<&Validator> = params.validators.iter().collect();
        validators.sort_unstable_by(|a, b| a.bls_key.cmp(&b.bls_key));
        let keys: Vec<BlsPublicKey> = validators.iter().map(|v| v.bls_key).collect();
        let weights: Vec<u64> = validators.iter().map(|v| v.bft_weight).collect();

        Ok(bls::verify_weighted_agg_sig(
            &keys,
            &weights,
            &aggregate.aggregation_bits,
            &aggregate.certificate_signature,
            MESSAGE_TAG_CERTIFICATE,
            &self.network_id,
            &payload,
            params.certificate_threshold,
        ))
    }
}

/// Whether the weight of the validators that appear in `commits` reaches
/// `threshold`.
fn reaches_threshold(
    validators: &[Validator],
    commits: &[SingleCommit],
    threshold: u64,
) -> bool {
    let addresses: HashSet<Address> = commits.iter().map(|c| c.validator_address).collect();
    let signed: u128 = validators
        .iter()
        .filter(|v| addresses.contains(&v.address))
        .map(|v| u128::from(v.bft_weight))
        .sum();

    signed >= u128::from(threshold)
}
