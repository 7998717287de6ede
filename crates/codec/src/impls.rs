use bytes::Bytes;

use tourmaline_core_types::{
    Address, AggregateCommit, BlockId, BlsSignature, Certificate, Hash256, Height, SingleCommit,
    SingleCommitsPacket,
};

use crate::{proto, Error, Protobuf};

fn fixed_field<'a, T>(
    message: &'static str,
    field: &'static str,
    expected: usize,
    bytes: &'a [u8],
) -> Result<T, Error>
where
    T: TryFrom<&'a [u8], Error = usize>,
{
    T::try_from(bytes).map_err(|got| Error::InvalidLength {
        message,
        field,
        expected,
        got,
    })
}

impl Protobuf for Certificate {
    type Proto = proto::UnsignedCertificate;

    fn from_proto(proto: Self::Proto) -> Result<Self, Error> {
        Ok(Self {
            block_id: fixed_field(
                "UnsignedCertificate",
                "block_id",
                BlockId::LENGTH,
                &proto.block_id,
            )?,
            height: Height::new(proto.height),
            timestamp: proto.timestamp,
            state_root: fixed_field(
                "UnsignedCertificate",
                "state_root",
                Hash256::LENGTH,
                &proto.state_root,
            )?,
            validators_hash: fixed_field(
                "UnsignedCertificate",
                "validators_hash",
                Hash256::LENGTH,
                &proto.validators_hash,
            )?,
        })
    }

    fn to_proto(&self) -> Self::Proto {
        proto::UnsignedCertificate {
            block_id: Bytes::from(self.block_id.to_vec()),
            height: self.height.as_u64(),
            timestamp: self.timestamp,
            state_root: Bytes::from(self.state_root.to_vec()),
            validators_hash: Bytes::from(self.validators_hash.to_vec()),
        }
    }
}

impl Protobuf for SingleCommit {
    type Proto = proto::SingleCommit;

    fn from_proto(proto: Self::Proto) -> Result<Self, Error> {
        Ok(Self {
            block_id: fixed_field("SingleCommit", "block_id", BlockId::LENGTH, &proto.block_id)?,
            height: Height::new(proto.height),
            validator_address: fixed_field(
                "SingleCommit",
                "validator_address",
                Address::LENGTH,
                &proto.validator_address,
            )?,
            certificate_signature: fixed_field(
                "SingleCommit",
                "certificate_signature",
                BlsSignature::LENGTH,
                &proto.certificate_signature,
            )?,
        })
    }

    fn to_proto(&self) -> Self::Proto {
        proto::SingleCommit {
            block_id: Bytes::from(self.block_id.to_vec()),
            height: self.height.as_u64(),
            validator_address: Bytes::from(self.validator_address.to_vec()),
            certificate_signature: Bytes::from(self.certificate_signature.to_vec()),
        }
    }
}

impl Protobuf for SingleCommitsPacket {
    type Proto = proto::SingleCommitsPacket;

    fn from_proto(proto: Self::Proto) -> Result<Self, Error> {
        Ok(Self {
            commits: proto.commits,
        })
    }

    fn to_proto(&self) -> Self::Proto {
        proto::SingleCommitsPacket {
            commits: self.commits.clone(),
        }
    }
}

impl Protobuf for AggregateCommit {
    type Proto = proto::AggregateCommit;

    fn from_proto(proto: Self::Proto) -> Result<Self, Error> {
        Ok(Self {
            height: Height::new(proto.height),
            aggregation_bits: proto.aggregation_bits,
            certificate_signature: proto.certificate_signature,
        })
    }

    fn to_proto(&self) -> Self::Proto {
        proto::AggregateCommit {
            height: self.height.as_u64(),
            aggregation_bits: self.aggregation_bits.clone(),
            certificate_signature: self.certificate_signature.clone(),
        }
    }
}
