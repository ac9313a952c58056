//! Block header reconstruction
//!
//! Hashing primitives and the coinbase → merkle root → header pipeline,
//! plus compact target decoding for checking the resulting block hash.

pub mod hash;
pub mod header;
pub mod hex;
pub mod target;

pub use hash::{double_sha256, Hash256};
pub use header::{reconstruct, BlockTemplate, HeaderReport, Reconstruction};
pub use target::CompactTarget;

/// Sizes of the block header and its parts
pub mod constants {
    /// Size of a serialized block header in bytes
    pub const HEADER_SIZE: usize = 80;

    /// Size of a double-SHA256 digest in bytes
    pub const HASH_SIZE: usize = 32;
}


#[cfg(test)]
mod tests_property;
