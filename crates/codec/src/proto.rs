//! Raw wire messages.
//!
//! Field numbers and scalar types are fixed by the protocol; changing them
//! changes the signing payloads and breaks interoperability.

/// The unsigned certificate: the payload a certificate signature covers.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnsignedCertificate {
    #[prost(bytes = "bytes", tag = "1")]
    pub block_id: ::prost::bytes::Bytes,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(uint64, tag = "3")]
    pub timestamp: u64,
    #[prost(bytes = "bytes", tag = "4")]
    pub state_root: ::prost::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "5")]
    pub validators_hash: ::prost::bytes::Bytes,
}

/// A single commit as gossiped between peers.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleCommit {
    #[prost(bytes = "bytes", tag = "1")]
    pub block_id: ::prost::bytes::Bytes,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(bytes = "bytes", tag = "3")]
    pub validator_address: ::prost::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "4")]
    pub certificate_signature: ::prost::bytes::Bytes,
}

/// A batch of encoded single commits.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleCommitsPacket {
    #[prost(bytes = "bytes", repeated, tag = "1")]
    pub commits: ::prost::alloc::vec::Vec<::prost::bytes::Bytes>,
}

/// An aggregate commit as carried in a block header.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AggregateCommit {
    #[prost(uint64, tag = "1")]
    pub height: u64,
    #[prost(bytes = "bytes", tag = "2")]
    pub aggregation_bits: ::prost::bytes::Bytes,
    #[prost(bytes = "bytes", tag = "3")]
    pub certificate_signature: ::prost::bytes::Bytes,
}
