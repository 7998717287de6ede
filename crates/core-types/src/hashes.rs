use core::fmt;

macro_rules! hash_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; Self::LENGTH]);

        impl $name {
            /// Length in bytes.
            pub const LENGTH: usize = 32;

            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
                Self(bytes)
            }

            /// The raw bytes.
            pub const fn as_bytes(&self) -> &[u8; Self::LENGTH] {
                &self.0
            }

            /// The raw bytes, as a vector.
            pub fn to_vec(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = usize;

            /// Fails with the actual length if the slice is not 32 bytes long.
            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                <[u8; Self::LENGTH]>::try_from(bytes)
                    .map(Self)
                    .map_err(|_| bytes.len())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), hex::encode(self.0))
            }
        }
    };
}

hash_newtype! {
    /// The 32-byte identifier of a block.
    BlockId
}

hash_newtype! {
    /// A 32-byte hash (state root, validators hash).
    Hash256
}

hash_newtype! {
    /// The 32-byte identifier of the network, mixed into every signed payload
    /// to prevent cross-chain signature replay.
    NetworkId
}
