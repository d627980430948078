//! One-time token distribution authorized by either an EIP-712 signature from
//! a designated signer or a Merkle membership proof, with a shared ledger that
//! pays each recipient at most once.

use alloy_primitives::U256;
use alloy_sol_types::sol;

pub mod airdrop;
pub mod eip712;
pub mod error;
pub mod hash;
pub mod io;
pub mod ledger;
pub mod merkle;
pub mod ownable;
pub mod samples;
pub mod scenario;
pub mod signature;
pub mod token;
pub mod util;

pub use airdrop::{Airdrop, AirdropConfig, AirdropEvent, ClaimMethod, DeployEnv};
pub use error::{AirdropError, AirdropResult};
pub use token::{Erc20, InMemoryToken};

pub type Address = [u8; 20];
pub type Hash32 = [u8; 32];

sol! {
    /// Typed-data struct the signer authorizes, as declared on chain.
    struct Claim {
        address claimer;
        uint256 amount;
    }
}

/// Payload both proof paths commit to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimMessage {
    pub recipient: Address,
    pub amount: U256,
}

impl ClaimMessage {
    pub fn new(recipient: Address, amount: U256) -> Self {
        Self { recipient, amount }
    }
}

impl From<&ClaimMessage> for Claim {
    fn from(msg: &ClaimMessage) -> Self {
        Claim { claimer: msg.recipient.into(), amount: msg.amount }
    }
}
