//! Content-addressed hashing.

use sbor::prelude::BasicSbor;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a hash from hex.
#[derive(Debug, Error, PartialEq)]
pub enum HexError {
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid digest length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// A 256-bit digest.
///
/// Content identity throughout the workspace. Produced by hashing bytes
/// (`from_bytes`) or by adopting an externally computed digest
/// (`from_hash_bytes`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BasicSbor)]
#[sbor(transparent)]
pub struct Hash([u8; 32]);

impl Hash {
    /// The all-zero digest, used as a placeholder where no content exists.
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// Hash arbitrary bytes with the default algorithm (blake3).
    pub fn from_bytes(data: &[u8]) -> Self {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Adopt an already-computed 32-byte digest.
    pub fn from_hash_bytes(bytes: &[u8; 32]) -> Self {
        Hash(*bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex representation of the full digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Hash {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| HexError::InvalidLength(v.len()))?;
        Ok(Hash(bytes))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Abbreviated for log output
        write!(f, "Hash({}…)", hex::encode(&self.0[..8]))
    }
}

/// Pluggable digest capability.
///
/// The message container computes its identity hash through this trait so
/// deployments can substitute the algorithm without touching the container.
pub trait HashProvider: Send + Sync {
    /// Compute the digest of `data`.
    fn make_hash(&self, data: &[u8]) -> Hash;
}

/// Default provider: blake3 (256-bit).
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl HashProvider for Blake3Hasher {
    fn make_hash(&self, data: &[u8]) -> Hash {
        Hash::from_bytes(data)
    }
}
