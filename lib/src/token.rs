use std::collections::HashMap;

use alloy_primitives::U256;
use tracing::debug;

use crate::airdrop::Airdrop;
use crate::Address;

/// The slice of a fungible token the airdrop depends on.
pub trait Erc20 {
    /// Identity the airdrop was configured with.
    fn address(&self) -> Address;

    fn balance_of(&self, owner: &Address) -> U256;

    /// Move `amount` from the calling airdrop's holdings to `to`, reporting
    /// success. `airdrop` is the caller, passed through so a token can call
    /// back into it before returning, as a token contract could on chain.
    fn transfer(&mut self, airdrop: &mut Airdrop, to: Address, amount: U256) -> bool;

    /// Position in the token's own change history before an airdrop
    /// operation runs.
    fn checkpoint(&self) -> usize;

    /// Undo every balance change made since `checkpoint`, including those
    /// made by nested claims that already returned.
    fn rollback(&mut self, checkpoint: usize);

    /// Forget the change history. Called once the outermost airdrop
    /// operation has succeeded.
    fn commit(&mut self);
}

/// Balance-map token used by the harness and tests.
#[derive(Clone, Debug)]
pub struct InMemoryToken {
    address: Address,
    balances: HashMap<Address, U256>,
    /// Previous balances overwritten since the last commit, oldest first.
    journal: Vec<(Address, U256)>,
}

impl InMemoryToken {
    pub fn new(address: Address) -> Self {
        Self { address, balances: HashMap::new(), journal: Vec::new() }
    }

    pub fn mint(&mut self, to: Address, amount: U256) {
        let balance = self.balances.entry(to).or_insert(U256::ZERO);
        *balance = balance.saturating_add(amount);
    }

    /// Non-zero balances in ascending address order.
    pub fn balances(&self) -> Vec<(Address, U256)> {
        let mut out: Vec<(Address, U256)> = self
            .balances
            .iter()
            .filter(|(_, b)| !b.is_zero())
            .map(|(a, b)| (*a, *b))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Plain balance move; `false` leaves both balances untouched.
    pub fn move_balance(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let from_balance = self.balance_of(&from);
        let Some(remaining) = from_balance.checked_sub(amount) else {
            debug!(
                from = %hex::encode(from),
                balance = %from_balance,
                %amount,
                "insufficient balance"
            );
            return false;
        };
        if from == to {
            return true;
        }
        let Some(credited) = self.balance_of(&to).checked_add(amount) else {
            return false;
        };
        self.write(from, remaining);
        self.write(to, credited);
        true
    }

    fn write(&mut self, owner: Address, balance: U256) {
        let previous = self.balances.insert(owner, balance).unwrap_or(U256::ZERO);
        self.journal.push((owner, previous));
    }
}

impl Erc20 for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, owner: &Address) -> U256 {
        self.balances.get(owner).copied().unwrap_or(U256::ZERO)
    }

    fn transfer(&mut self, airdrop: &mut Airdrop, to: Address, amount: U256) -> bool {
        self.move_balance(airdrop.address(), to, amount)
    }

    fn checkpoint(&self) -> usize {
        self.journal.len()
    }

    fn rollback(&mut self, checkpoint: usize) {
        while self.journal.len() > checkpoint {
            let Some((owner, previous)) = self.journal.pop() else { break };
            self.balances.insert(owner, previous);
        }
    }

    fn commit(&mut self) {
        self.journal.clear();
    }
}
