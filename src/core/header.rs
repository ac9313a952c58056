//! Coinbase, merkle root and block header reconstruction
//!
//! Rebuilds a block header from the pieces a stratum job hands out: the two
//! coinbase halves, the extra-nonces, the header numerics and the merkle
//! branch. Numeric fields are written most-significant byte first in the
//! template and flipped into header order; coinbase pieces are used as-is.

use crate::core::constants::{HASH_SIZE, HEADER_SIZE};
use crate::core::hash::{double_sha256, Hash256};
use crate::core::hex::{decode_array, decode_field, decode_reversed};
use crate::core::target::{hash_difficulty, CompactTarget};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hex fields of a mining job, as handed out by the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTemplate {
    /// Coinbase transaction up to the extra-nonces
    pub coinbase1: String,
    /// Pool-assigned extra-nonce
    pub extranonce1: String,
    /// Miner-rolled extra-nonce
    pub extranonce2: String,
    /// Coinbase transaction after the extra-nonces
    pub coinbase2: String,
    /// Header nonce
    pub nonce: String,
    /// Compact target (`nBits`)
    pub bits: String,
    /// Header timestamp (`nTime`)
    pub time: String,
    /// Hash of the previous block, display order
    pub previous_block_hash: String,
    /// Block version
    pub version: String,
    /// Merkle branch hashes climbing from the coinbase to the root
    pub merkle_branch: Vec<String>,
}

impl Default for BlockTemplate {
    fn default() -> Self {
        Self {
            coinbase1: "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff2f02d301044381376305".to_string(),
            extranonce1: "deadc0de".to_string(),
            extranonce2: "b0".to_string(),
            coinbase2: "a9f0013bfed85f9f824cf64d79b71e0db1aa9471fd790f1b6cbad3222db9bf5200000000020000000000000000266a24aa21a9ede2f61c3f71d1defd3fa999dfa36953755c690689799962b48bebd836974e8cf900f2052a01000000160014475a44069a4288f3df3048fb12926f27c63f157900000000".to_string(),
            nonce: "02570730".to_string(),
            bits: "1d00ffff".to_string(),
            time: "633780f7".to_string(),
            previous_block_hash: "000000000002ea8eb35b9df5a5f7d3f7182d5226e4e9ab5399fe7582f0f9a9de".to_string(),
            version: "20000000".to_string(),
            merkle_branch: Vec::new(),
        }
    }
}

impl BlockTemplate {
    /// Decode the coinbase pieces, in their natural byte order
    pub fn coinbase_parts(&self) -> Result<CoinbaseParts> {
        Ok(CoinbaseParts {
            coinbase1: decode_field("coinbase1", &self.coinbase1)?,
            extranonce1: decode_field("extranonce1", &self.extranonce1)?,
            extranonce2: decode_field("extranonce2", &self.extranonce2)?,
            coinbase2: decode_field("coinbase2", &self.coinbase2)?,
        })
    }

    /// Decode the header numerics, flipped into header byte order
    pub fn header_fields(&self) -> Result<HeaderFields> {
        Ok(HeaderFields {
            version: decode_reversed("version", &self.version)?,
            previous_block_hash: decode_reversed("previous_block_hash", &self.previous_block_hash)?,
            time: decode_reversed("time", &self.time)?,
            bits: decode_reversed("bits", &self.bits)?,
            nonce: decode_reversed("nonce", &self.nonce)?,
        })
    }

    /// Decode the merkle branch
    pub fn merkle_branches(&self) -> Result<Vec<Hash256>> {
        self.merkle_branch
            .iter()
            .map(|step| decode_array::<HASH_SIZE>("merkle_branch", step).map(Hash256::from_bytes))
            .collect()
    }
}

/// Decoded coinbase transaction pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinbaseParts {
    /// Coinbase transaction up to the extra-nonces
    pub coinbase1: Vec<u8>,
    /// Pool-assigned extra-nonce
    pub extranonce1: Vec<u8>,
    /// Miner-rolled extra-nonce
    pub extranonce2: Vec<u8>,
    /// Coinbase transaction after the extra-nonces
    pub coinbase2: Vec<u8>,
}

impl CoinbaseParts {
    /// `coinbase1 || extranonce1 || extranonce2 || coinbase2`
    pub fn serialize(&self) -> Vec<u8> {
        [
            self.coinbase1.as_slice(),
            self.extranonce1.as_slice(),
            self.extranonce2.as_slice(),
            self.coinbase2.as_slice(),
        ]
        .concat()
    }
}

/// Header numerics in header byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    /// Block version
    pub version: [u8; 4],
    /// Previous block hash
    pub previous_block_hash: [u8; HASH_SIZE],
    /// Timestamp
    pub time: [u8; 4],
    /// Compact target
    pub bits: [u8; 4],
    /// Nonce
    pub nonce: [u8; 4],
}

impl HeaderFields {
    /// Assemble the 80-byte header around a merkle root
    pub fn serialize(&self, merkle_root: &Hash256) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        let parts: [&[u8]; 6] = [
            &self.version,
            &self.previous_block_hash,
            merkle_root.as_bytes(),
            &self.time,
            &self.bits,
            &self.nonce,
        ];

        let mut offset = 0;
        for part in parts {
            header[offset..offset + part.len()].copy_from_slice(part);
            offset += part.len();
        }
        header
    }

    /// Compact target carried by the header
    pub fn target(&self) -> CompactTarget {
        CompactTarget::from_header_bytes(self.bits)
    }
}

/// Fold the merkle branch onto the coinbase hash
///
/// With an empty branch the root is the coinbase hash itself.
pub fn merkle_root(coinbase_hash: Hash256, branches: &[Hash256]) -> Hash256 {
    branches.iter().fold(coinbase_hash, |root, step| {
        let mut pair = [0u8; 2 * HASH_SIZE];
        pair[..HASH_SIZE].copy_from_slice(root.as_bytes());
        pair[HASH_SIZE..].copy_from_slice(step.as_bytes());
        double_sha256(&pair)
    })
}

/// Every intermediate of a header reconstruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// Serialized coinbase transaction
    pub coinbase: Vec<u8>,
    /// Double-SHA256 of the coinbase
    pub coinbase_hash: Hash256,
    /// Merkle root placed in the header
    pub merkle_root: Hash256,
    /// Serialized header
    pub header: [u8; HEADER_SIZE],
    /// Double-SHA256 of the header, digest order
    pub header_hash: Hash256,
    /// Header target
    pub target: CompactTarget,
}

impl Reconstruction {
    /// Header hash in display order
    pub fn block_hash(&self) -> Hash256 {
        self.header_hash.reversed()
    }

    /// Whether the block hash satisfies the header target
    pub fn meets_target(&self) -> bool {
        self.target.is_met_by(&self.block_hash())
    }

    /// Flatten into a serializable report
    pub fn report(&self) -> HeaderReport {
        let block_hash = self.block_hash();
        HeaderReport {
            coinbase: hex::encode(&self.coinbase),
            coinbase_hash: self.coinbase_hash,
            merkle_root: self.merkle_root,
            header: hex::encode(self.header),
            header_hash: self.header_hash,
            block_hash,
            bits: self.target,
            target_difficulty: self.target.difficulty(),
            hash_difficulty: hash_difficulty(&block_hash),
            meets_target: self.meets_target(),
        }
    }
}

/// Serializable summary of a reconstruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderReport {
    /// Serialized coinbase, hex
    pub coinbase: String,
    /// Double-SHA256 of the coinbase
    pub coinbase_hash: Hash256,
    /// Merkle root placed in the header
    pub merkle_root: Hash256,
    /// Serialized header, hex
    pub header: String,
    /// Header digest, digest order
    pub header_hash: Hash256,
    /// Header digest, display order
    pub block_hash: Hash256,
    /// Compact target from the header
    pub bits: CompactTarget,
    /// Difficulty of the header target
    pub target_difficulty: f64,
    /// Difficulty the block hash reaches
    pub hash_difficulty: f64,
    /// Whether the block hash satisfies the target
    pub meets_target: bool,
}

/// Run the whole pipeline over a template
pub fn reconstruct(template: &BlockTemplate) -> Result<Reconstruction> {
    let coinbase = template.coinbase_parts()?.serialize();
    let fields = template.header_fields()?;
    let branches = template.merkle_branches()?;

    let coinbase_hash = double_sha256(&coinbase);
    debug!(
        coinbase_len = coinbase.len(),
        coinbase_hash = %coinbase_hash,
        "Coinbase hashed"
    );

    let merkle_root = merkle_root(coinbase_hash, &branches);
    let header = fields.serialize(&merkle_root);
    let header_hash = double_sha256(&header);
    debug!(
        branches = branches.len(),
        merkle_root = %merkle_root,
        header_hash = %header_hash,
        "Header assembled"
    );

    Ok(Reconstruction {
        coinbase,
        coinbase_hash,
        merkle_root,
        header,
        header_hash,
        target: fields.target(),
    })
}
