use core::fmt;

/// A compressed BLS12-381 public key (min-pk, 48 bytes).
///
/// Ordering is lexicographic over the compressed encoding. The aggregation
/// routines rely on this ordering to lay out aggregation bitmaps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlsPublicKey([u8; Self::LENGTH]);

impl BlsPublicKey {
    /// Length of a compressed public key in bytes.
    pub const LENGTH: usize = 48;

    /// Wrap a compressed public key.
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// The compressed encoding.
    pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }
}

impl TryFrom<&[u8]> for BlsPublicKey {
    type Error = usize;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| bytes.len())
    }
}

impl fmt::Display for BlsPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BlsPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BlsPublicKey({})", hex::encode(self.0))
    }
}

/// A compressed BLS12-381 signature (min-pk, 96 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlsSignature([u8; Self::LENGTH]);

impl BlsSignature {
    /// Length of a compressed signature in bytes.
    pub const LENGTH: usize = 96;

    /// Wrap a compressed signature.
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// The compressed encoding.
    pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// The compressed encoding, as a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl TryFrom<&[u8]> for BlsSignature {
    type Error = usize;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| bytes.len())
    }
}

impl fmt::Debug for BlsSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BlsSignature({})", hex::encode(self.0))
    }
}
