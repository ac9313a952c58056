//! Hex decoding for template fields
//!
//! Every template field arrives as a hex string, optionally `0x`-prefixed.

use crate::error::{Error, Result};

/// Decode a hex string that may have a "0x" prefix
pub fn decode_field(field: &str, hex_str: &str) -> Result<Vec<u8>> {
    let trimmed = hex_str.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(cleaned).map_err(|e| Error::invalid_hex(field, e.to_string()))
}

/// Decode a fixed-size field
pub fn decode_array<const N: usize>(field: &str, hex_str: &str) -> Result<[u8; N]> {
    let bytes = decode_field(field, hex_str)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        Error::invalid_field(field, format!("expected {} bytes, got {}", N, bytes.len()))
    })
}

/// Decode a fixed-size numeric field and flip it into header byte order
///
/// Template numerics are written most-significant byte first; the header
/// stores them little-endian.
pub fn decode_reversed<const N: usize>(field: &str, hex_str: &str) -> Result<[u8; N]> {
    let mut bytes = decode_array::<N>(field, hex_str)?;
    bytes.reverse();
    Ok(bytes)
}
