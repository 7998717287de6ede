//! BLS12-381 signing and aggregation for the Tourmaline commit pool.
//!
//! Uses the min-pk instantiation (48-byte public keys, 96-byte signatures)
//! with the proof-of-possession ciphersuite. All signing payloads are
//! domain-separated with a protocol message tag and the network identifier,
//! so a signature can never be replayed for a different message kind or on a
//! different chain.
//!
//! Aggregation works over a *full* key list in lexicographic order: the
//! bitmap returned by [`create_agg_sig`] has one bit per key in that list,
//! and verification recovers the signing subset from the bitmap alone.

use blst::min_pk::{AggregatePublicKey, AggregateSignature, PublicKey, SecretKey as BlstSecretKey, Signature};
use blst::BLST_ERROR;
use bytes::Bytes;
use thiserror::Error;

use tourmaline_core_types::{BlsPublicKey, BlsSignature, NetworkId};

/// Domain separation tag of the proof-of-possession ciphersuite.
const CIPHERSUITE_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Errors arising from key handling and aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The provided key material cannot produce a secret key.
    #[error("invalid secret key material")]
    InvalidSecretKey,

    /// A signature's compressed encoding does not decode to a group point.
    #[error("malformed BLS signature")]
    MalformedSignature,

    /// A signer's public key is absent from the full key list.
    #[error("signer's public key is not in the key list")]
    SignerNotInKeyList,

    /// Aggregation was attempted over zero signatures.
    #[error("nothing to aggregate")]
    EmptyAggregation,
}

/// A BLS secret key.
#[derive(Clone)]
pub struct SecretKey(BlstSecretKey);

impl SecretKey {
    /// Derive a secret key from input key material (at least 32 bytes).
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, Error> {
        BlstSecretKey::key_gen(ikm, &[])
            .map(Self)
            .map_err(|_| Error::InvalidSecretKey)
    }

    /// The corresponding public key, compressed.
    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey::new(self.0.sk_to_pk().to_bytes())
    }

    /// Sign `payload` under the given message tag and network identifier.
    pub fn sign(&self, tag: &[u8], network_id: &NetworkId, payload: &[u8]) -> BlsSignature {
        let message = signing_input(tag, network_id, payload);
        BlsSignature::new(self.0.sign(&message, CIPHERSUITE_DST, &[]).to_bytes())
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// The exact byte string a certificate signature covers:
/// `tag || network_id || payload`.
pub fn signing_input(tag: &[u8], network_id: &NetworkId, payload: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(tag.len() + NetworkId::LENGTH + payload.len());
    input.extend_from_slice(tag);
    input.extend_from_slice(network_id.as_bytes());
    input.extend_from_slice(payload);
    input
}

/// Verify a single signature over a tagged payload.
///
/// Malformed keys or signatures verify as `false`; the caller cannot
/// distinguish them from a wrong signature, which is the desired behaviour
/// for peer-supplied data.
pub fn verify(
    public_key: &BlsPublicKey,
    tag: &[u8],
    network_id: &NetworkId,
    payload: &[u8],
    signature: &BlsSignature,
) -> bool {
    let Ok(pk) = PublicKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let Ok(sig) = Signature::from_bytes(signature.as_bytes()) else {
        return false;
    };

    let message = signing_input(tag, network_id, payload);
    sig.verify(true, &message, CIPHERSUITE_DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS
}

/// Aggregate the given `(public key, signature)` pairs into a single
/// signature plus a participation bitmap over `keys_list`.
///
/// `keys_list` must be the *full* key list of the validator set at the
/// relevant height, in lexicographic order; the bitmap layout is derived
/// from positions in that list (bit `i` lives at byte `i / 8`, mask
/// `1 << (i % 8)`).
pub fn create_agg_sig(
    keys_list: &[BlsPublicKey],
    pairs: &[(BlsPublicKey, BlsSignature)],
) -> Result<(Bytes, BlsSignature), Error> {
    if pairs.is_empty() {
        return Err(Error::EmptyAggregation);
    }

    let mut bits = vec![0u8; keys_list.len().div_ceil(8)];
    let mut signatures = Vec::with_capacity(pairs.len());

    for (key, signature) in pairs {
        let index = keys_list
            .iter()
            .position(|k| k == key)
            .ok_or(Error::SignerNotInKeyList)?;
        bits[index / 8] |= 1 << (index % 8);

        signatures
            .push(Signature::from_bytes(signature.as_bytes()).map_err(|_| Error::MalformedSignature)?);
    }

    let refs: Vec<&Signature> = signatures.iter().collect();
    let aggregate =
        AggregateSignature::aggregate(&refs, true).map_err(|_| Error::MalformedSignature)?;

    Ok((
        Bytes::from(bits),
        BlsSignature::new(aggregate.to_signature().to_bytes()),
    ))
}

/// Whether bit `index` is set in an aggregation bitmap.
pub fn is_bit_set(bits: &[u8], index: usize) -> bool {
    bits.get(index / 8)
        .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
}

/// Verify an aggregated signature over one tagged payload against the
/// subset of `keys` selected by `aggregation_bits`, requiring the summed
/// weight of the subset to reach `threshold`.
///
/// `keys` and `weights` run in parallel and must cover the full validator
/// set in lexicographic key order. Any structural defect — wrong bitmap
/// length, bits beyond the set, under-threshold weight, malformed points —
/// verifies as `false`.
pub fn verify_weighted_agg_sig(
    keys: &[BlsPublicKey],
    weights: &[u64],
    aggregation_bits: &[u8],
    signature: &Bytes,
    tag: &[u8],
    network_id: &NetworkId,
    payload: &[u8],
    threshold: u64,
) -> bool {
    if keys.len() != weights.len() || aggregation_bits.len() != keys.len().div_ceil(8) {
        return false;
    }

    // Bits past the end of the key list must be zero.
    for index in keys.len()..aggregation_bits.len() * 8 {
        if is_bit_set(aggregation_bits, index) {
            return false;
        }
    }

    let mut signing_keys = Vec::new();
    let mut signed_weight: u128 = 0;

    for (index, (key, weight)) in keys.iter().zip(weights).enumerate() {
        if !is_bit_set(aggregation_bits, index) {
            continue;
        }

        let Ok(pk) = PublicKey::from_bytes(key.as_bytes()) else {
            return false;
        };
        signing_keys.push(pk);
        signed_weight += u128::from(*weight);
    }

    if signing_keys.is_empty() || signed_weight < u128::from(threshold) {
        return false;
    }

    let Ok(sig) = Signature::from_bytes(signature) else {
        return false;
    };

    let refs: Vec<&PublicKey> = signing_keys.iter().collect();
    let Ok(aggregate_pk) = AggregatePublicKey::aggregate(&refs, false) else {
        return false;
    };

    let message = signing_input(tag, network_id, payload);
    sig.verify(
        true,
        &message,
        CIPHERSUITE_DST,
        &[],
        &aggregate_pk.to_public_key(),
        false,
    ) == BLST_ERROR::BLST_SUCCESS
}
