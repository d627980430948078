//! secp256k1 recovery of Ethereum-style signer addresses from 32-byte digests.
//!
//! Signatures use the 65-byte `r || s || v` layout. `v` is accepted as either
//! `27/28` or the raw recovery id `0/1`.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::hash::keccak;
use crate::{Address, Hash32};

pub const SIGNATURE_LEN: usize = 65;

/// Ethereum address of a public key: last 20 bytes of keccak(X || Y).
pub fn address_of(vk: &VerifyingKey) -> Address {
    let point = vk.to_encoded_point(false);
    let hash = keccak(&point.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    addr
}

pub fn addr_from_signer(sk: &SigningKey) -> Address {
    address_of(sk.verifying_key())
}

/// Recover the address that signed `digest`. Returns `None` for anything that
/// is not a well-formed, low-s signature over the digest.
pub fn recover_signer(digest: &Hash32, signature: &[u8]) -> Option<Address> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }
    let v = match signature[64] {
        27 | 28 => signature[64] - 27,
        0 | 1 => signature[64],
        _ => return None,
    };
    let recovery_id = RecoveryId::from_byte(v)?;
    let sig = Signature::from_slice(&signature[..64]).ok()?;
    let vk = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).ok()?;
    Some(address_of(&vk))
}

/// Sign `digest` and pack the result as `r || s || v` with `v` in {27, 28}.
pub fn sign_digest(sk: &SigningKey, digest: &Hash32) -> Result<[u8; SIGNATURE_LEN], String> {
    let (sig, recovery_id) = sk
        .sign_prehash_recoverable(digest)
        .map_err(|e| format!("signing failed: {e}"))?;
    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = 27 + recovery_id.to_byte();
    Ok(out)
}

/// Deterministic test/sample key derived from a small seed.
pub fn deterministic_key(seed: u64) -> Result<SigningKey, String> {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&seed.to_be_bytes());
    SigningKey::from_bytes((&bytes).into()).map_err(|_| "bad key".to_string())
}
