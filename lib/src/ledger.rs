//! Claimed-status bookkeeping and the signature kill-switch.
//!
//! Both are one-way: [`ClaimStatus`] only moves `Unclaimed -> Claimed` and
//! [`SignatureGate`] only moves `Enabled -> Disabled`. The crate-private
//! `unwind_*` functions exist for the engine's transaction journal, which
//! restores the state an aborted operation started from.

use std::collections::HashMap;

use crate::error::{AirdropError, AirdropResult};
use crate::Address;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClaimStatus {
    #[default]
    Unclaimed,
    Claimed,
}

impl ClaimStatus {
    pub fn claim(self) -> AirdropResult<ClaimStatus> {
        match self {
            ClaimStatus::Unclaimed => Ok(ClaimStatus::Claimed),
            ClaimStatus::Claimed => Err(AirdropError::AlreadyClaimed),
        }
    }

    pub fn is_claimed(self) -> bool {
        self == ClaimStatus::Claimed
    }
}

/// Per-recipient claim status. Recipients never seen read as `Unclaimed`.
#[derive(Clone, Debug, Default)]
pub struct ClaimLedger {
    entries: HashMap<Address, ClaimStatus>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, recipient: &Address) -> ClaimStatus {
        self.entries.get(recipient).copied().unwrap_or_default()
    }

    pub fn is_claimed(&self, recipient: &Address) -> bool {
        self.status(recipient).is_claimed()
    }

    pub fn ensure_unclaimed(&self, recipient: &Address) -> AirdropResult<()> {
        self.status(recipient).claim().map(|_| ())
    }

    pub fn mark_claimed(&mut self, recipient: Address) -> AirdropResult<()> {
        let next = self.status(&recipient).claim()?;
        self.entries.insert(recipient, next);
        Ok(())
    }

    pub fn claimed_count(&self) -> usize {
        self.entries.values().filter(|s| s.is_claimed()).count()
    }

    /// Claimed recipients in ascending address order.
    pub fn claimed(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self
            .entries
            .iter()
            .filter(|(_, s)| s.is_claimed())
            .map(|(a, _)| *a)
            .collect();
        out.sort();
        out
    }

    pub(crate) fn unwind_claim(&mut self, recipient: &Address) {
        self.entries.remove(recipient);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureGate {
    #[default]
    Enabled,
    Disabled,
}

impl SignatureGate {
    pub fn is_disabled(self) -> bool {
        self == SignatureGate::Disabled
    }

    pub fn ensure_enabled(self) -> AirdropResult<()> {
        match self {
            SignatureGate::Enabled => Ok(()),
            SignatureGate::Disabled => Err(AirdropError::SignaturesDisabled),
        }
    }

    /// Returns the previous state; disabling twice leaves the gate disabled.
    pub fn disable(&mut self) -> SignatureGate {
        std::mem::replace(self, SignatureGate::Disabled)
    }

    pub(crate) fn unwind(&mut self, previous: SignatureGate) {
        *self = previous;
    }
}
