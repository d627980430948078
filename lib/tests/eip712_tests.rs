use airdrop_lib::eip712::*;
use airdrop_lib::hash::keccak;
use airdrop_lib::signature::{addr_from_signer, deterministic_key, recover_signer, sign_digest};
use airdrop_lib::{Claim, ClaimMessage};
use alloy_primitives::{Address as AlloyAddress, U256};
use alloy_sol_types::{eip712_domain, SolStruct};
use sha3::{Digest, Keccak256};

const CONTRACT: [u8; 20] = [0x11; 20];

fn sample_claim() -> ClaimMessage {
    ClaimMessage::new([0xC0; 20], U256::from(500u64))
}

fn alloy_domain(chain_id: u64, contract: [u8; 20]) -> alloy_sol_types::Eip712Domain {
    eip712_domain! {
        name: "Airdrop",
        version: "v1",
        chain_id: chain_id,
        verifying_contract: AlloyAddress::from(contract),
    }
}

#[test]
fn test_type_strings_match_sol_struct() {
    assert_eq!(Claim::eip712_root_type().as_bytes(), CLAIM_TYPE);
    assert_eq!(keccak(CLAIM_TYPE), Claim::from(&sample_claim()).eip712_type_hash().0);
}

#[test]
fn test_domain_separator_matches_alloy() {
    for chain_id in [1u64, 5, 10, 31337] {
        let ours = domain_separator(chain_id, &CONTRACT);
        assert_eq!(ours, alloy_domain(chain_id, CONTRACT).separator().0, "chain {}", chain_id);
    }
}

#[test]
fn test_domain_separator_manual_layout() {
    let mut k = Keccak256::new();
    k.update(keccak(DOMAIN_TYPE));
    k.update(keccak(b"Airdrop"));
    k.update(keccak(b"v1"));
    let mut chain = [0u8; 32];
    chain[31] = 1;
    k.update(chain);
    let mut contract = [0u8; 32];
    contract[12..].copy_from_slice(&CONTRACT);
    k.update(contract);
    let expected: [u8; 32] = k.finalize().into();
    assert_eq!(domain_separator(1, &CONTRACT), expected);
}

#[test]
fn test_struct_hash_matches_alloy() {
    let c = sample_claim();
    assert_eq!(claim_struct_hash(&c), Claim::from(&c).eip712_hash_struct().0);
}

#[test]
fn test_digest_matches_alloy_signing_hash() {
    let c = sample_claim();
    let domain = ClaimDomain::new(1, &CONTRACT);
    let expected = Claim::from(&c).eip712_signing_hash(&alloy_domain(1, CONTRACT));
    assert_eq!(domain.digest(&c), expected.0);
}

#[test]
fn test_digest_prefix_layout() {
    let sep = [0x01u8; 32];
    let sh = [0x02u8; 32];
    let mut buf = vec![0x19, 0x01];
    buf.extend_from_slice(&sep);
    buf.extend_from_slice(&sh);
    assert_eq!(typed_data_digest(&sep, &sh), keccak(&buf));
}

#[test]
fn test_domain_binds_chain_and_contract() {
    let c = sample_claim();
    let base = ClaimDomain::new(1, &CONTRACT).digest(&c);
    assert_ne!(base, ClaimDomain::new(2, &CONTRACT).digest(&c));
    assert_ne!(base, ClaimDomain::new(1, &[0x12; 20]).digest(&c));
}

#[test]
fn test_sign_and_recover_roundtrip() {
    let sk = deterministic_key(7).unwrap();
    let digest = ClaimDomain::new(1, &CONTRACT).digest(&sample_claim());
    let sig = sign_digest(&sk, &digest).unwrap();
    assert!(sig[64] == 27 || sig[64] == 28);
    assert_eq!(recover_signer(&digest, &sig), Some(addr_from_signer(&sk)));
}

#[test]
fn test_recover_accepts_raw_recovery_id() {
    let sk = deterministic_key(7).unwrap();
    let digest = keccak(b"payload");
    let mut sig = sign_digest(&sk, &digest).unwrap();
    sig[64] -= 27;
    assert_eq!(recover_signer(&digest, &sig), Some(addr_from_signer(&sk)));
}

#[test]
fn test_recover_rejects_malformed() {
    let sk = deterministic_key(7).unwrap();
    let digest = keccak(b"payload");
    let sig = sign_digest(&sk, &digest).unwrap();

    assert_eq!(recover_signer(&digest, &sig[..64]), None);
    assert_eq!(recover_signer(&digest, &[0u8; 65]), None);

    let mut bad_v = sig;
    bad_v[64] = 29;
    assert_eq!(recover_signer(&digest, &bad_v), None);
}

#[test]
fn test_recover_rejects_high_s() {
    let sk = deterministic_key(7).unwrap();
    let digest = keccak(b"payload");
    let sig = sign_digest(&sk, &digest).unwrap();

    let n = U256::from_str_radix(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        16,
    )
    .unwrap();
    let s = U256::from_be_slice(&sig[32..64]);
    let mut malleated = sig;
    malleated[32..64].copy_from_slice(&(n - s).to_be_bytes::<32>());
    malleated[64] = if sig[64] == 27 { 28 } else { 27 };
    assert_eq!(recover_signer(&digest, &malleated), None);
}

#[test]
fn test_any_bit_flip_changes_recovered_identity() {
    let sk = deterministic_key(7).unwrap();
    let signer = addr_from_signer(&sk);
    let c = sample_claim();
    let domain = ClaimDomain::new(1, &CONTRACT);
    let digest = domain.digest(&c);
    let sig = sign_digest(&sk, &digest).unwrap();

    for byte in [0usize, 17, 31, 32, 50, 63] {
        let mut flipped = sig;
        flipped[byte] ^= 0x01;
        assert_ne!(recover_signer(&digest, &flipped), Some(signer), "sig byte {}", byte);
    }

    let mut other = c;
    other.recipient[19] ^= 0x01;
    assert_ne!(recover_signer(&domain.digest(&other), &sig), Some(signer));

    let more = ClaimMessage::new(c.recipient, c.amount + U256::from(1u64));
    assert_ne!(recover_signer(&domain.digest(&more), &sig), Some(signer));
}
