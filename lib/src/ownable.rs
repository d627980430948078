use tracing::info;

use crate::error::{AirdropError, AirdropResult};
use crate::Address;

/// Single-administrator access control. `None` once ownership is renounced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ownable {
    owner: Option<Address>,
}

impl Ownable {
    pub fn new(owner: Address) -> Self {
        Self { owner: Some(owner) }
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn only_owner(&self, caller: &Address) -> AirdropResult<()> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(AirdropError::Unauthorized),
        }
    }

    /// Hand ownership to `new_owner`, returning the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> AirdropResult<Option<Address>> {
        self.only_owner(caller)?;
        if new_owner == [0u8; 20] {
            return Err(AirdropError::InvalidOwner);
        }
        info!(new_owner = %hex::encode(new_owner), "ownership transferred");
        Ok(self.owner.replace(new_owner))
    }

    pub fn renounce_ownership(&mut self, caller: &Address) -> AirdropResult<Option<Address>> {
        self.only_owner(caller)?;
        info!("ownership renounced");
        Ok(self.owner.take())
    }

    pub(crate) fn unwind(&mut self, previous: Option<Address>) {
        self.owner = previous;
    }
}
