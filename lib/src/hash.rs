//! Keccak-256 and the 32-byte ABI word encodings every digest in the crate is built from.

use alloy_primitives::U256;
use sha3::{Digest, Keccak256};

use crate::{Address, Hash32};

pub fn keccak(bytes: &[u8]) -> Hash32 {
    let mut h = Keccak256::new();
    h.update(bytes);
    h.finalize().into()
}

/// `address` as an ABI word: 12 zero bytes then the 20 address bytes.
pub fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

pub fn encode_u256(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

pub fn encode_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
