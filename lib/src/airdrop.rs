//! Claim policy engine: the one-time distribution with two mutually exclusive
//! proof paths (EIP-712 signature, Merkle membership) sharing one ledger.
//!
//! Every mutating entry point is all-or-nothing. Mutations are recorded in a
//! journal while an operation runs; if it fails, the journal is unwound back
//! to where the operation started, taking any nested (reentrant) effects with
//! it. Claims also roll the token back to its checkpoint, so a nested payout
//! is undone together with the ledger entry that allowed it.
//!
//! Claims mark the ledger before calling the token. A token that calls back
//! into the airdrop from inside `transfer` therefore sees the recipient as
//! claimed and is rejected with `AlreadyClaimed`.

use alloy_primitives::U256;
use tracing::{debug, info, warn};

use crate::eip712::ClaimDomain;
use crate::error::{AirdropError, AirdropResult};
use crate::ledger::{ClaimLedger, SignatureGate};
use crate::merkle::verify_claim;
use crate::ownable::Ownable;
use crate::signature::recover_signer;
use crate::token::Erc20;
use crate::{Address, ClaimMessage, Hash32};

/// Execution context observed when the airdrop is deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployEnv {
    pub chain_id: u64,
    /// Identity of the airdrop itself; the EIP-712 verifying contract.
    pub contract: Address,
    /// Becomes the owner.
    pub deployer: Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AirdropConfig {
    merkle_root: Hash32,
    signer: Address,
    token: Address,
    domain: ClaimDomain,
}

impl AirdropConfig {
    pub fn merkle_root(&self) -> Hash32 {
        self.merkle_root
    }

    pub fn signer(&self) -> Address {
        self.signer
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn domain(&self) -> &ClaimDomain {
        &self.domain
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimMethod {
    Signature,
    Merkle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AirdropEvent {
    Claimed { recipient: Address, amount: U256, method: ClaimMethod },
    SignatureVerificationDisabled { admin: Address },
    OwnershipTransferred { previous: Option<Address>, new: Option<Address> },
}

#[derive(Clone, Copy, Debug)]
enum JournalEntry {
    Claimed(Address),
    Gate(SignatureGate),
    Owner(Option<Address>),
    Logged,
}

#[derive(Clone, Debug)]
pub struct Airdrop {
    address: Address,
    config: AirdropConfig,
    owner: Ownable,
    ledger: ClaimLedger,
    gate: SignatureGate,
    events: Vec<AirdropEvent>,
    journal: Vec<JournalEntry>,
    depth: usize,
}

impl Airdrop {
    pub fn deploy(env: DeployEnv, merkle_root: Hash32, signer: Address, token: Address) -> Self {
        let domain = ClaimDomain::new(env.chain_id, &env.contract);
        info!(
            chain_id = env.chain_id,
            contract = %hex::encode(env.contract),
            merkle_root = %hex::encode(merkle_root),
            signer = %hex::encode(signer),
            "airdrop deployed"
        );
        Self {
            address: env.contract,
            config: AirdropConfig { merkle_root, signer, token, domain },
            owner: Ownable::new(env.deployer),
            ledger: ClaimLedger::new(),
            gate: SignatureGate::Enabled,
            events: Vec::new(),
            journal: Vec::new(),
            depth: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &AirdropConfig {
        &self.config
    }

    pub fn token(&self) -> Address {
        self.config.token
    }

    pub fn merkle_root(&self) -> Hash32 {
        self.config.merkle_root
    }

    pub fn signer(&self) -> Address {
        self.config.signer
    }

    pub fn domain_separator(&self) -> Hash32 {
        self.config.domain.separator()
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.owner()
    }

    pub fn signature_disabled(&self) -> bool {
        self.gate.is_disabled()
    }

    pub fn has_claimed(&self, recipient: &Address) -> bool {
        self.ledger.is_claimed(recipient)
    }

    pub fn claimed_count(&self) -> usize {
        self.ledger.claimed_count()
    }

    pub fn ledger(&self) -> &ClaimLedger {
        &self.ledger
    }

    pub fn events(&self) -> &[AirdropEvent] {
        &self.events
    }

    /// Digest the configured signer must sign to authorize `(recipient, amount)`.
    pub fn claim_digest(&self, recipient: Address, amount: U256) -> Hash32 {
        self.config.domain.digest(&ClaimMessage::new(recipient, amount))
    }

    /// Claim `amount` for `recipient` with an EIP-712 signature from the
    /// configured signer.
    pub fn signature_claim<T: Erc20 + ?Sized>(
        &mut self,
        token: &mut T,
        caller: Address,
        signature: &[u8],
        recipient: Address,
        amount: U256,
    ) -> AirdropResult<()> {
        self.transact_with(token, |airdrop, token| {
            airdrop.check_token(&*token)?;
            let claim = ClaimMessage::new(recipient, amount);
            airdrop.check_claimant(&caller, &claim)?;
            if let Err(e) = airdrop.gate.ensure_enabled() {
                debug!(recipient = %hex::encode(recipient), "signature path disabled");
                return Err(e);
            }
            let digest = airdrop.config.domain.digest(&claim);
            match recover_signer(&digest, signature) {
                Some(signer) if signer == airdrop.config.signer => {}
                recovered => {
                    debug!(
                        digest = %hex::encode(digest),
                        recovered = ?recovered.map(hex::encode),
                        "signature not from configured signer"
                    );
                    return Err(AirdropError::InvalidSigner);
                }
            }
            airdrop.settle(token, claim, ClaimMethod::Signature)
        })
    }

    /// Claim `amount` for `recipient` with a membership proof against the
    /// committed root.
    pub fn merkle_claim<T: Erc20 + ?Sized>(
        &mut self,
        token: &mut T,
        caller: Address,
        proof: &[Hash32],
        leaf: Hash32,
        recipient: Address,
        amount: U256,
    ) -> AirdropResult<()> {
        self.transact_with(token, |airdrop, token| {
            airdrop.check_token(&*token)?;
            let claim = ClaimMessage::new(recipient, amount);
            airdrop.check_claimant(&caller, &claim)?;
            verify_claim(&airdrop.config.merkle_root, &leaf, proof, &claim)?;
            airdrop.settle(token, claim, ClaimMethod::Merkle)
        })
    }

    /// Permanently switch off the signature path. Owner only; calling it again
    /// keeps the path disabled and re-emits the event.
    pub fn disable_signature_verification(&mut self, caller: Address) -> AirdropResult<()> {
        self.transact(|airdrop| {
            if let Err(e) = airdrop.owner.only_owner(&caller) {
                debug!(caller = %hex::encode(caller), "non-owner tried to disable signatures");
                return Err(e);
            }
            let previous = airdrop.gate.disable();
            airdrop.journal.push(JournalEntry::Gate(previous));
            airdrop.log(AirdropEvent::SignatureVerificationDisabled { admin: caller });
            info!(admin = %hex::encode(caller), "signature verification disabled");
            Ok(())
        })
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> AirdropResult<()> {
        self.transact(|airdrop| {
            let previous = airdrop.owner.transfer_ownership(&caller, new_owner)?;
            airdrop.journal.push(JournalEntry::Owner(previous));
            airdrop.log(AirdropEvent::OwnershipTransferred { previous, new: Some(new_owner) });
            Ok(())
        })
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> AirdropResult<()> {
        self.transact(|airdrop| {
            let previous = airdrop.owner.renounce_ownership(&caller)?;
            airdrop.journal.push(JournalEntry::Owner(previous));
            airdrop.log(AirdropEvent::OwnershipTransferred { previous, new: None });
            Ok(())
        })
    }

    fn check_token<T: Erc20 + ?Sized>(&self, token: &T) -> AirdropResult<()> {
        if token.address() != self.config.token {
            debug!(token = %hex::encode(token.address()), "token is not the configured one");
            return Err(AirdropError::WrongToken);
        }
        Ok(())
    }

    /// Preconditions shared by both claim paths, in order: the caller must be
    /// the recipient, and the recipient must not have claimed yet.
    fn check_claimant(&self, caller: &Address, claim: &ClaimMessage) -> AirdropResult<()> {
        if *caller != claim.recipient {
            debug!(
                caller = %hex::encode(caller),
                recipient = %hex::encode(claim.recipient),
                "caller is not the recipient"
            );
            return Err(AirdropError::InvalidSender);
        }
        if let Err(e) = self.ledger.ensure_unclaimed(&claim.recipient) {
            debug!(recipient = %hex::encode(claim.recipient), "already claimed");
            return Err(e);
        }
        Ok(())
    }

    /// Mark the claim, then pay it out. The ledger write must precede the
    /// transfer.
    fn settle<T: Erc20 + ?Sized>(
        &mut self,
        token: &mut T,
        claim: ClaimMessage,
        method: ClaimMethod,
    ) -> AirdropResult<()> {
        self.ledger.mark_claimed(claim.recipient)?;
        self.journal.push(JournalEntry::Claimed(claim.recipient));

        if !token.transfer(self, claim.recipient, claim.amount) {
            warn!(
                recipient = %hex::encode(claim.recipient),
                amount = %claim.amount,
                "token transfer failed"
            );
            return Err(AirdropError::TransferFailed);
        }

        self.log(AirdropEvent::Claimed { recipient: claim.recipient, amount: claim.amount, method });
        info!(
            recipient = %hex::encode(claim.recipient),
            amount = %claim.amount,
            ?method,
            "claimed"
        );
        Ok(())
    }

    fn log(&mut self, event: AirdropEvent) {
        self.events.push(event);
        self.journal.push(JournalEntry::Logged);
    }

    fn transact<R>(
        &mut self,
        op: impl FnOnce(&mut Self) -> AirdropResult<R>,
    ) -> AirdropResult<R> {
        let checkpoint = self.journal.len();
        self.depth += 1;
        let result = op(self);
        self.depth -= 1;
        match &result {
            Err(e) => {
                if self.journal.len() > checkpoint {
                    warn!(code = e.code(), depth = self.depth, "operation rejected, rolling back");
                }
                self.revert_to(checkpoint);
            }
            Ok(_) if self.depth == 0 => self.journal.clear(),
            Ok(_) => {}
        }
        result
    }

    /// `transact` for operations that move tokens: the token is rolled back
    /// with the journal on failure and committed with it at the outermost
    /// success.
    fn transact_with<T: Erc20 + ?Sized, R>(
        &mut self,
        token: &mut T,
        op: impl FnOnce(&mut Self, &mut T) -> AirdropResult<R>,
    ) -> AirdropResult<R> {
        let checkpoint = token.checkpoint();
        let result = self.transact(|airdrop| op(airdrop, &mut *token));
        match &result {
            Err(_) => token.rollback(checkpoint),
            Ok(_) if self.depth == 0 => token.commit(),
            Ok(_) => {}
        }
        result
    }

    fn revert_to(&mut self, checkpoint: usize) {
        while self.journal.len() > checkpoint {
            let Some(entry) = self.journal.pop() else { break };
            match entry {
                JournalEntry::Claimed(recipient) => self.ledger.unwind_claim(&recipient),
                JournalEntry::Gate(previous) => self.gate.unwind(previous),
                JournalEntry::Owner(previous) => self.owner.unwind(previous),
                JournalEntry::Logged => {
                    self.events.pop();
                }
            }
        }
    }
}
