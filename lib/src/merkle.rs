use tracing::debug;

use crate::error::{AirdropError, AirdropResult};
use crate::hash::{encode_address, encode_u256, keccak};
use crate::{ClaimMessage, Hash32};

/// Leaf committed for a claim: keccak256(abi.encode(recipient, amount)).
pub fn claim_leaf(claim: &ClaimMessage) -> Hash32 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&encode_address(&claim.recipient));
    buf[32..].copy_from_slice(&encode_u256(claim.amount));
    keccak(&buf)
}

/// Parent of two nodes: keccak256(min(a, b) || max(a, b)), comparing the
/// hashes as big-endian integers.
pub fn fold_sorted_pair(a: Hash32, b: Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&lo);
    buf[32..].copy_from_slice(&hi);
    keccak(&buf)
}

/// Fold `proof` into `leaf` left to right and return the reconstructed root.
pub fn process_proof(leaf: Hash32, proof: &[Hash32]) -> Hash32 {
    proof.iter().fold(leaf, |node, sib| fold_sorted_pair(node, *sib))
}

pub fn verify_merkle_proof_sorted_keccak(leaf: Hash32, proof: &[Hash32], root: Hash32) -> bool {
    process_proof(leaf, proof) == root
}

/// Check that `(recipient, amount)` is committed under `root`.
///
/// The caller-supplied `leaf` must equal the recomputed claim leaf before the
/// proof is walked, so a proof for one leaf cannot be paired with another
/// claim.
pub fn verify_claim(
    root: &Hash32,
    leaf: &Hash32,
    proof: &[Hash32],
    claim: &ClaimMessage,
) -> AirdropResult<()> {
    if claim_leaf(claim) != *leaf {
        debug!(recipient = %hex::encode(claim.recipient), "leaf does not match claim");
        return Err(AirdropError::InvalidLeaf);
    }
    let computed = process_proof(*leaf, proof);
    if computed != *root {
        debug!(
            computed = %hex::encode(computed),
            depth = proof.len(),
            "proof does not reach merkle root"
        );
        return Err(AirdropError::InvalidMerkleRoot);
    }
    Ok(())
}

/// Build a Merkle root from a list of leaves using sorted-pair Keccak parents.
/// An odd node at the end of a level is promoted unchanged.
pub fn merkle_root_from_leaves(leaves: Vec<Hash32>) -> Hash32 {
    build_merkle_proof_sorted(leaves, 0).1
}

/// Sibling path for the leaf at `idx` together with the root of the tree.
pub fn build_merkle_proof_sorted(leaves: Vec<Hash32>, mut idx: usize) -> (Vec<Hash32>, Hash32) {
    if leaves.is_empty() {
        return (vec![], keccak(&[]));
    }
    let mut proof = Vec::new();
    let mut level = leaves;
    while level.len() > 1 {
        let mut next: Vec<Hash32> = Vec::with_capacity((level.len() + 1) / 2);
        let mut i = 0;
        while i < level.len() {
            if i + 1 < level.len() {
                let (a, b) = (level[i], level[i + 1]);
                if idx == i {
                    proof.push(b);
                } else if idx == i + 1 {
                    proof.push(a);
                }
                next.push(fold_sorted_pair(a, b));
                i += 2;
            } else {
                next.push(level[i]);
                i += 1;
            }
        }
        idx /= 2;
        level = next;
    }
    (proof, level[0])
}
