//! Canonical wire encoding for Tourmaline commit pool messages.
//!
//! The protocol fixes a protobuf schema for the payloads the pool signs and
//! gossips: the unsigned certificate (the BLS signing payload), single
//! commits, the gossip packet, and aggregate commits. The raw messages live
//! in [`proto`]; domain types convert through the [`Protobuf`] trait.
//!
//! Encoding must be deterministic: fields are emitted in field-number order
//! with varint scalars, so the canonical bytes of a message are a pure
//! function of its contents.

use prost::{DecodeError, EncodeError, Message};
use thiserror::Error;

pub use prost;

pub mod proto;

mod impls;

/// Errors arising when converting between domain types and wire messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to decode a Protobuf message.
    #[error("failed to decode Protobuf message")]
    Decode(#[from] DecodeError),

    /// Failed to encode a Protobuf message.
    #[error("failed to encode Protobuf message")]
    Encode(#[from] EncodeError),

    /// A bytes field did not have the length the schema requires.
    #[error("invalid length for `{message}.{field}`: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Message the field belongs to.
        message: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
}

/// Conversion between a domain type and its raw wire message.
pub trait Protobuf: Sized {
    /// The raw prost message this type encodes to.
    type Proto: Message + Default;

    /// Build the domain type out of a decoded wire message, validating
    /// field lengths.
    fn from_proto(proto: Self::Proto) -> Result<Self, Error>;

    /// Project the domain type into its wire message.
    fn to_proto(&self) -> Self::Proto;

    /// Decode from canonical bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let proto = Self::Proto::decode(bytes)?;
        Self::from_proto(proto)
    }

    /// Encode to canonical bytes.
    fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.to_proto().encode_to_vec())
    }
}
