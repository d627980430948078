use alloy_primitives::U256;
use k256::ecdsa::SigningKey;

use crate::airdrop::{Airdrop, DeployEnv};
use crate::eip712::ClaimDomain;
use crate::merkle::{build_merkle_proof_sorted, claim_leaf, merkle_root_from_leaves};
use crate::scenario::{Call, Deployment, Scenario};
use crate::signature::{addr_from_signer, deterministic_key, sign_digest, SIGNATURE_LEN};
use crate::token::InMemoryToken;
use crate::{Address, ClaimMessage, Hash32};

pub const SAMPLE_CHAIN_ID: u64 = 1;
pub const SAMPLE_CONTRACT: Address = [0x11; 20];
pub const SAMPLE_DEPLOYER: Address = [0xAD; 20];
pub const SAMPLE_TOKEN: Address = [0x70; 20];
const SIGNER_SEED: u64 = 0x5167;

/// A committed allocation list together with the keys and tree needed to
/// produce valid proofs and signatures for it.
#[derive(Clone)]
pub struct SampleAirdrop {
    pub env: DeployEnv,
    pub token: Address,
    pub signer_key: SigningKey,
    pub allocations: Vec<ClaimMessage>,
    pub leaves: Vec<Hash32>,
    pub root: Hash32,
}

impl SampleAirdrop {
    pub fn new(allocations: Vec<ClaimMessage>) -> Result<Self, String> {
        if allocations.is_empty() {
            return Err("need at least one allocation".to_string());
        }
        let leaves: Vec<Hash32> = allocations.iter().map(claim_leaf).collect();
        let root = merkle_root_from_leaves(leaves.clone());
        Ok(Self {
            env: DeployEnv { chain_id: SAMPLE_CHAIN_ID, contract: SAMPLE_CONTRACT, deployer: SAMPLE_DEPLOYER },
            token: SAMPLE_TOKEN,
            signer_key: deterministic_key(SIGNER_SEED)?,
            allocations,
            leaves,
            root,
        })
    }

    /// `count` recipients with key-derived addresses and amounts 1000, 1250, ...
    pub fn with_recipients(count: usize) -> Result<Self, String> {
        let allocations = (0..count)
            .map(|i| {
                let sk = deterministic_key(i as u64 + 1)?;
                Ok(ClaimMessage::new(addr_from_signer(&sk), U256::from(1000 + 250 * i as u64)))
            })
            .collect::<Result<Vec<_>, String>>()?;
        Self::new(allocations)
    }

    pub fn signer(&self) -> Address {
        addr_from_signer(&self.signer_key)
    }

    /// Allocation at `index`. Panics if `index` is out of range.
    pub fn claim(&self, index: usize) -> ClaimMessage {
        self.allocations[index]
    }

    /// Sibling path for the allocation at `index`. Panics if `index` is out
    /// of range, like [`SampleAirdrop::claim`].
    pub fn proof(&self, index: usize) -> Vec<Hash32> {
        assert!(
            index < self.leaves.len(),
            "allocation {} out of range ({} allocations)",
            index,
            self.leaves.len()
        );
        build_merkle_proof_sorted(self.leaves.clone(), index).0
    }

    pub fn sign(&self, claim: &ClaimMessage) -> Result<[u8; SIGNATURE_LEN], String> {
        let digest = ClaimDomain::new(self.env.chain_id, &self.env.contract).digest(claim);
        sign_digest(&self.signer_key, &digest)
    }

    pub fn total(&self) -> U256 {
        self.allocations.iter().fold(U256::ZERO, |acc, c| acc.saturating_add(c.amount))
    }

    pub fn deployment(&self) -> Deployment {
        Deployment {
            env: self.env,
            merkle_root: self.root,
            signer: self.signer(),
            token: self.token,
            funding: self.total(),
        }
    }

    /// Deployed airdrop plus a token holding exactly the allocated total.
    pub fn deploy(&self) -> (Airdrop, InMemoryToken) {
        Scenario { deployment: self.deployment(), calls: vec![] }.deploy()
    }

    pub fn merkle_call(&self, index: usize) -> Call {
        let claim = self.claim(index);
        Call::MerkleClaim {
            caller: claim.recipient,
            recipient: claim.recipient,
            amount: claim.amount,
            leaf: self.leaves[index],
            proof: self.proof(index),
        }
    }

    pub fn signature_call(&self, index: usize) -> Result<Call, String> {
        let claim = self.claim(index);
        Ok(Call::SignatureClaim {
            caller: claim.recipient,
            recipient: claim.recipient,
            amount: claim.amount,
            signature: self.sign(&claim)?.to_vec(),
        })
    }
}

/// Four recipients exercising both claim paths, the double-claim guard, the
/// sender check and the kill-switch.
pub fn build_sample_scenario() -> Result<Scenario, String> {
    let sample = SampleAirdrop::with_recipients(4)?;

    let mut stolen = sample.merkle_call(2);
    if let Call::MerkleClaim { caller, .. } = &mut stolen {
        *caller = sample.claim(3).recipient;
    }

    let calls = vec![
        sample.merkle_call(0),
        sample.merkle_call(0),
        sample.signature_call(1)?,
        sample.merkle_call(1),
        stolen,
        Call::DisableSignatures { caller: sample.env.deployer },
        sample.signature_call(3)?,
        sample.merkle_call(3),
    ];

    Ok(Scenario { deployment: sample.deployment(), calls })
}
