//! Double-SHA256 digests

use crate::core::constants::HASH_SIZE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 32-byte digest kept in the byte order the hash function produced it
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash256([u8; HASH_SIZE]);

impl Hash256 {
    /// Wrap raw digest bytes
    pub fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the digest bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// The same digest with its byte order flipped (display order for block hashes)
    pub fn reversed(&self) -> Self {
        let mut bytes = self.0;
        bytes.reverse();
        Self(bytes)
    }

    /// Lowercase hex of the bytes in stored order
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// `SHA256(SHA256(data))`
pub fn double_sha256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash256(second.into())
}

impl FromStr for Hash256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        super::hex::decode_array::<HASH_SIZE>("hash", s).map(Self)
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash256::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_known_vectors() {
        assert_eq!(
            double_sha256(b"").to_hex(),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_eq!(
            double_sha256(b"hello").to_hex(),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_reversed() {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0] = 0xab;
        let hash = Hash256::from_bytes(bytes);

        let reversed = hash.reversed();
        assert_eq!(reversed.as_bytes()[HASH_SIZE - 1], 0xab);
        assert_eq!(reversed.reversed(), hash);
        assert!(reversed.to_hex().ends_with("ab"));
    }

    #[test]
    fn test_hex_string_forms() {
        let hash = double_sha256(b"hello");
        let parsed: Hash256 = hash.to_hex().parse().unwrap();
        assert_eq!(parsed, hash);
        assert_eq!(format!("{}", hash), hash.to_hex());

        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
        assert!("abcd".parse::<Hash256>().is_err());
    }
}
