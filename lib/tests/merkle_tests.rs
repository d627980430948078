use airdrop_lib::hash::keccak;
use airdrop_lib::merkle::*;
use airdrop_lib::{AirdropError, Claim, ClaimMessage};
use alloy_primitives::U256;
use alloy_sol_types::SolType;

fn claim(byte: u8, amount: u64) -> ClaimMessage {
    ClaimMessage::new([byte; 20], U256::from(amount))
}

fn leaves(n: usize) -> Vec<[u8; 32]> {
    (0..n).map(|i| claim(i as u8 + 1, 100 * (i as u64 + 1))).map(|c| claim_leaf(&c)).collect()
}

#[test]
fn test_claim_leaf_matches_abi_encoding() {
    let c = claim(0xAA, 1000);
    let encoded = Claim::abi_encode(&Claim::from(&c));
    assert_eq!(encoded.len(), 64);
    assert_eq!(claim_leaf(&c), keccak(&encoded));
}

#[test]
fn test_claim_leaf_layout() {
    let c = claim(0xAA, 1000);
    let mut buf = [0u8; 64];
    buf[12..32].copy_from_slice(&c.recipient);
    buf[62..].copy_from_slice(&1000u16.to_be_bytes());
    assert_eq!(claim_leaf(&c), keccak(&buf));
}

#[test]
fn test_fold_sorted_pair_is_order_independent() {
    let a = keccak(&[1u8]);
    let b = keccak(&[2u8]);
    assert_eq!(fold_sorted_pair(a, b), fold_sorted_pair(b, a));

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&lo);
    buf[32..].copy_from_slice(&hi);
    assert_eq!(fold_sorted_pair(a, b), keccak(&buf));
}

#[test]
fn test_merkle_root_from_leaves_two_nodes() {
    let a = keccak(&[1u8]);
    let b = keccak(&[2u8]);
    let root = merkle_root_from_leaves(vec![a, b]);
    assert_eq!(root, fold_sorted_pair(a, b));
}

#[test]
fn test_odd_leaf_is_promoted() {
    let l = leaves(3);
    let root = merkle_root_from_leaves(l.clone());
    assert_eq!(root, fold_sorted_pair(fold_sorted_pair(l[0], l[1]), l[2]));
    let (proof, _) = build_merkle_proof_sorted(l.clone(), 2);
    assert_eq!(proof, vec![fold_sorted_pair(l[0], l[1])]);
}

#[test]
fn test_single_leaf_tree_has_empty_proof() {
    let l = leaves(1);
    let (proof, root) = build_merkle_proof_sorted(l.clone(), 0);
    assert!(proof.is_empty());
    assert_eq!(root, l[0]);
    assert!(verify_merkle_proof_sorted_keccak(l[0], &proof, root));
}

#[test]
fn test_empty_tree_root() {
    assert_eq!(merkle_root_from_leaves(vec![]), keccak(&[]));
}

#[test]
fn test_every_leaf_verifies_for_various_sizes() {
    for n in 1..=9 {
        let l = leaves(n);
        let root = merkle_root_from_leaves(l.clone());
        for i in 0..n {
            let (proof, r) = build_merkle_proof_sorted(l.clone(), i);
            assert_eq!(r, root);
            assert!(verify_merkle_proof_sorted_keccak(l[i], &proof, root), "n={} i={}", n, i);
        }
    }
}

#[test]
fn test_verify_claim_accepts_member() {
    let claims: Vec<ClaimMessage> = (0..5).map(|i| claim(i + 1, 1000)).collect();
    let l: Vec<[u8; 32]> = claims.iter().map(claim_leaf).collect();
    let root = merkle_root_from_leaves(l.clone());
    let (proof, _) = build_merkle_proof_sorted(l.clone(), 3);
    assert_eq!(verify_claim(&root, &l[3], &proof, &claims[3]), Ok(()));
}

#[test]
fn test_verify_claim_rejects_inconsistent_leaf() {
    let claims: Vec<ClaimMessage> = (0..4).map(|i| claim(i + 1, 1000)).collect();
    let l: Vec<[u8; 32]> = claims.iter().map(claim_leaf).collect();
    let root = merkle_root_from_leaves(l.clone());
    let (proof, _) = build_merkle_proof_sorted(l.clone(), 1);

    // Valid proof for claim 1 presented with claim 2's recipient.
    assert_eq!(verify_claim(&root, &l[1], &proof, &claims[2]), Err(AirdropError::InvalidLeaf));

    // Right recipient, inflated amount.
    let inflated = ClaimMessage::new(claims[1].recipient, U256::from(1_000_000u64));
    assert_eq!(verify_claim(&root, &l[1], &proof, &inflated), Err(AirdropError::InvalidLeaf));
}

#[test]
fn test_verify_claim_rejects_non_member() {
    let claims: Vec<ClaimMessage> = (0..4).map(|i| claim(i + 1, 1000)).collect();
    let l: Vec<[u8; 32]> = claims.iter().map(claim_leaf).collect();
    let root = merkle_root_from_leaves(l.clone());
    let (proof, _) = build_merkle_proof_sorted(l, 0);

    let outsider = claim(0xEE, 1000);
    let outsider_leaf = claim_leaf(&outsider);
    assert_eq!(
        verify_claim(&root, &outsider_leaf, &proof, &outsider),
        Err(AirdropError::InvalidMerkleRoot)
    );
}

#[test]
fn test_verify_claim_rejects_truncated_proof() {
    let claims: Vec<ClaimMessage> = (0..8).map(|i| claim(i + 1, 1000)).collect();
    let l: Vec<[u8; 32]> = claims.iter().map(claim_leaf).collect();
    let root = merkle_root_from_leaves(l.clone());
    let (mut proof, _) = build_merkle_proof_sorted(l.clone(), 5);
    proof.pop();
    assert_eq!(verify_claim(&root, &l[5], &proof, &claims[5]), Err(AirdropError::InvalidMerkleRoot));
}
