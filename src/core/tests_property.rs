//! Property tests for header reconstruction
//!
//! Byte-order handling and determinism over random templates.

use super::header::merkle_root;
use super::*;
use proptest::prelude::*;

fn hex_bytes(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), len).prop_map(::hex::encode)
}

fn template_strategy() -> impl Strategy<Value = BlockTemplate> {
    (
        (1usize..120).prop_flat_map(hex_bytes),
        hex_bytes(4),
        (0usize..9).prop_flat_map(hex_bytes),
        (1usize..120).prop_flat_map(hex_bytes),
        hex_bytes(4),
        hex_bytes(4),
        hex_bytes(4),
        hex_bytes(32),
        hex_bytes(4),
    )
        .prop_map(
            |(coinbase1, extranonce1, extranonce2, coinbase2, nonce, bits, time, prev, version)| {
                BlockTemplate {
                    coinbase1,
                    extranonce1,
                    extranonce2,
                    coinbase2,
                    nonce,
                    bits,
                    time,
                    previous_block_hash: prev,
                    version,
                    merkle_branch: Vec::new(),
                }
            },
        )
}

proptest! {
    #[test]
    fn reconstruction_is_deterministic(template in template_strategy()) {
        let first = reconstruct(&template).unwrap();
        let second = reconstruct(&template).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn header_is_always_eighty_bytes_with_root_in_place(template in template_strategy()) {
        let result = reconstruct(&template).unwrap();
        prop_assert_eq!(result.header.len(), constants::HEADER_SIZE);
        prop_assert_eq!(&result.header[36..68], result.merkle_root.as_bytes());
        prop_assert_eq!(result.merkle_root, result.coinbase_hash);
        prop_assert_eq!(double_sha256(&result.header), result.header_hash);
    }

    #[test]
    fn numerics_are_reversed_into_header(template in template_strategy()) {
        let result = reconstruct(&template).unwrap();

        let mut version = ::hex::decode(&template.version).unwrap();
        version.reverse();
        prop_assert_eq!(&result.header[0..4], version.as_slice());

        let mut nonce = ::hex::decode(&template.nonce).unwrap();
        nonce.reverse();
        prop_assert_eq!(&result.header[76..80], nonce.as_slice());
    }

    #[test]
    fn coinbase_is_plain_concatenation(template in template_strategy()) {
        let result = reconstruct(&template).unwrap();
        let expected = ::hex::decode(format!(
            "{}{}{}{}",
            template.coinbase1, template.extranonce1, template.extranonce2, template.coinbase2
        ))
        .unwrap();
        prop_assert_eq!(result.coinbase, expected);
    }

    #[test]
    fn block_hash_is_reversed_digest(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let digest = double_sha256(&data);
        let mut bytes = *digest.as_bytes();
        bytes.reverse();
        let reversed = digest.reversed();
        prop_assert_eq!(reversed.as_bytes(), &bytes);
    }

    #[test]
    fn empty_branch_keeps_coinbase_hash(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let coinbase_hash = double_sha256(&data);
        prop_assert_eq!(merkle_root(coinbase_hash, &[]), coinbase_hash);
    }
}
