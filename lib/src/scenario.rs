//! Ordered call sequences against a freshly deployed airdrop, used by the
//! replay CLI and the tests.

use alloy_primitives::U256;

use crate::airdrop::{Airdrop, DeployEnv};
use crate::error::AirdropError;
use crate::token::InMemoryToken;
use crate::{Address, Hash32};

#[derive(Clone, Debug)]
pub struct Deployment {
    pub env: DeployEnv,
    pub merkle_root: Hash32,
    pub signer: Address,
    pub token: Address,
    /// Tokens minted to the airdrop before any call runs.
    pub funding: U256,
}

#[derive(Clone, Debug)]
pub enum Call {
    SignatureClaim { caller: Address, recipient: Address, amount: U256, signature: Vec<u8> },
    MerkleClaim { caller: Address, recipient: Address, amount: U256, leaf: Hash32, proof: Vec<Hash32> },
    DisableSignatures { caller: Address },
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::SignatureClaim { .. } => "signatureClaim",
            Call::MerkleClaim { .. } => "merkleClaim",
            Call::DisableSignatures { .. } => "disableSignatures",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub deployment: Deployment,
    pub calls: Vec<Call>,
}

pub struct Replay {
    pub airdrop: Airdrop,
    pub token: InMemoryToken,
    pub outcomes: Vec<Result<(), AirdropError>>,
}

impl Scenario {
    pub fn deploy(&self) -> (Airdrop, InMemoryToken) {
        let d = &self.deployment;
        let airdrop = Airdrop::deploy(d.env, d.merkle_root, d.signer, d.token);
        let mut token = InMemoryToken::new(d.token);
        token.mint(airdrop.address(), d.funding);
        (airdrop, token)
    }

    /// Deploy, then run every call in order. A failing call does not stop the
    /// replay; its error is recorded in `outcomes`.
    pub fn replay(&self) -> Replay {
        let (mut airdrop, mut token) = self.deploy();
        let outcomes = self
            .calls
            .iter()
            .map(|call| execute(&mut airdrop, &mut token, call))
            .collect();
        Replay { airdrop, token, outcomes }
    }
}

pub fn execute(airdrop: &mut Airdrop, token: &mut InMemoryToken, call: &Call) -> Result<(), AirdropError> {
    match call {
        Call::SignatureClaim { caller, recipient, amount, signature } => {
            airdrop.signature_claim(token, *caller, signature, *recipient, *amount)
        }
        Call::MerkleClaim { caller, recipient, amount, leaf, proof } => {
            airdrop.merkle_claim(token, *caller, proof, *leaf, *recipient, *amount)
        }
        Call::DisableSignatures { caller } => airdrop.disable_signature_verification(*caller),
    }
}
