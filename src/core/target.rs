//! Compact proof-of-work targets
//!
//! The header `bits` field packs a 256-bit target into one exponent byte and
//! a 3-byte mantissa: `target = mantissa * 256^(exponent - 3)`.

use crate::core::hash::Hash256;
use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exponent of the difficulty-1 target
const DIFF1_EXPONENT: u32 = 0x1d;

/// Mantissa of the difficulty-1 target
const DIFF1_MANTISSA: u32 = 0x00ffff;

/// Compact (`nBits`) encoding of a mining target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Create from the raw `nBits` value
    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The target of difficulty 1 (`1d00ffff`)
    pub fn diff1() -> Self {
        Self((DIFF1_EXPONENT << 24) | DIFF1_MANTISSA)
    }

    /// Create from the four header bytes (little-endian)
    pub fn from_header_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Get the raw `nBits` value
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Exponent byte
    pub fn exponent(&self) -> u32 {
        self.0 >> 24
    }

    /// Low 23 bits; the 0x00800000 bit is a sign flag
    pub fn mantissa(&self) -> u32 {
        self.0 & 0x007f_ffff
    }

    /// Expand to the full 256-bit target
    pub fn to_target(&self) -> BigUint {
        let mantissa = BigUint::from(self.mantissa());
        let exponent = self.exponent();
        if exponent <= 3 {
            mantissa >> (8 * (3 - exponent))
        } else {
            mantissa << (8 * (exponent - 3))
        }
    }

    /// Difficulty relative to `1d00ffff`
    ///
    /// Returns infinity for a zero mantissa.
    pub fn difficulty(&self) -> f64 {
        let shift = 8 * (DIFF1_EXPONENT as i32 - self.exponent() as i32);
        let ratio = f64::from(DIFF1_MANTISSA) / f64::from(self.mantissa());
        ratio * 2f64.powi(shift)
    }

    /// Whether a display-order block hash satisfies this target
    pub fn is_met_by(&self, block_hash: &Hash256) -> bool {
        BigUint::from_bytes_be(block_hash.as_bytes()) <= self.to_target()
    }

    /// Lowercase hex of the raw value
    pub fn to_hex(&self) -> String {
        format!("{:08x}", self.0)
    }
}

/// Difficulty a display-order block hash would satisfy: `diff1 / hash`
pub fn hash_difficulty(block_hash: &Hash256) -> f64 {
    let hash = BigUint::from_bytes_be(block_hash.as_bytes());
    if hash.is_zero() {
        return f64::INFINITY;
    }

    let diff1 = CompactTarget::diff1().to_target();
    match (diff1.to_f64(), hash.to_f64()) {
        (Some(numerator), Some(denominator)) => numerator / denominator,
        _ => f64::NAN,
    }
}

impl FromStr for CompactTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = super::hex::decode_array::<4>("bits", s)?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }
}

impl TryFrom<String> for CompactTarget {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CompactTarget> for String {
    fn from(target: CompactTarget) -> Self {
        target.to_hex()
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
