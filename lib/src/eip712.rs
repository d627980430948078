//! EIP-712 typed-data digests for airdrop claims.
//!
//! digest = keccak256("\x19\x01" || domainSeparator || structHash)

use sha3::{Digest, Keccak256};

use crate::hash::{encode_address, encode_u256, encode_u64, keccak};
use crate::{Address, ClaimMessage, Hash32};

pub const DOMAIN_NAME: &str = "Airdrop";
pub const DOMAIN_VERSION: &str = "v1";

pub const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
pub const CLAIM_TYPE: &[u8] = b"Claim(address claimer,uint256 amount)";

const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

pub fn domain_separator(chain_id: u64, verifying_contract: &Address) -> Hash32 {
    Keccak256::new()
        .chain_update(keccak(DOMAIN_TYPE))
        .chain_update(keccak(DOMAIN_NAME.as_bytes()))
        .chain_update(keccak(DOMAIN_VERSION.as_bytes()))
        .chain_update(encode_u64(chain_id))
        .chain_update(encode_address(verifying_contract))
        .finalize()
        .into()
}

pub fn claim_struct_hash(claim: &ClaimMessage) -> Hash32 {
    Keccak256::new()
        .chain_update(keccak(CLAIM_TYPE))
        .chain_update(encode_address(&claim.recipient))
        .chain_update(encode_u256(claim.amount))
        .finalize()
        .into()
}

pub fn typed_data_digest(domain_separator: &Hash32, struct_hash: &Hash32) -> Hash32 {
    let mut buf = [0u8; 66];
    buf[..2].copy_from_slice(&TYPED_DATA_PREFIX);
    buf[2..34].copy_from_slice(domain_separator);
    buf[34..].copy_from_slice(struct_hash);
    keccak(&buf)
}

/// Signing domain of one deployed airdrop. The separator is computed once from
/// the chain id observed at deployment and never re-derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimDomain {
    separator: Hash32,
}

impl ClaimDomain {
    pub fn new(chain_id: u64, verifying_contract: &Address) -> Self {
        Self { separator: domain_separator(chain_id, verifying_contract) }
    }

    pub fn separator(&self) -> Hash32 {
        self.separator
    }

    pub fn digest(&self, claim: &ClaimMessage) -> Hash32 {
        typed_data_digest(&self.separator, &claim_struct_hash(claim))
    }
}
