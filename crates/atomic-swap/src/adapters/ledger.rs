//! Escrow Ledger Adapter
//!
//! Implements `EscrowLedger` with in-memory balances and a single bridge
//! holding account.

use crate::domain::{AccAddress, Coin, LedgerError};
use crate::ports::EscrowLedger;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory ledger for tests and local simulation.
pub struct InMemoryLedger {
    /// Balances: (account, denom) -> amount.
    balances: RwLock<HashMap<(AccAddress, String), u128>>,
    /// Bridge holding account.
    escrow: AccAddress,
}

impl InMemoryLedger {
    /// Create a ledger whose holding account is `escrow`.
    pub fn new(escrow: AccAddress) -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
            escrow,
        }
    }

    /// Holding account address.
    pub fn escrow_account(&self) -> &AccAddress {
        &self.escrow
    }

    /// Credit an account out of thin air (genesis funding, tests).
    ///
    /// Saturates at `u128::MAX`.
    pub fn mint(&self, to: &AccAddress, coin: &Coin) {
        let mut balances = self.balances.write();
        let balance = balances
            .entry((to.clone(), coin.denom.clone()))
            .or_insert(0);
        *balance = balance.saturating_add(coin.amount);
    }

    /// Balance of an account.
    pub fn balance(&self, account: &AccAddress, denom: &str) -> u128 {
        self.balances
            .read()
            .get(&(account.clone(), denom.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Balance held in escrow.
    pub fn escrow_balance(&self, denom: &str) -> u128 {
        self.balance(&self.escrow, denom)
    }

    fn transfer(&self, from: &AccAddress, to: &AccAddress, coin: &Coin) -> Result<(), LedgerError> {
        let mut balances = self.balances.write();
        let from_key = (from.clone(), coin.denom.clone());
        let available = balances.get(&from_key).copied().unwrap_or(0);
        if available < coin.amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                denom: coin.denom.clone(),
                needed: coin.amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_key = (to.clone(), coin.denom.clone());
        let credited = balances
            .get(&to_key)
            .copied()
            .unwrap_or(0)
            .checked_add(coin.amount)
            .ok_or_else(|| LedgerError::Unavailable("balance overflow".to_string()))?;

        balances.insert(from_key, available - coin.amount);
        balances.insert(to_key, credited);
        debug!("[swap] ledger moved {} from {} to {}", coin, from, to);
        Ok(())
    }
}

impl EscrowLedger for InMemoryLedger {
    fn transfer_to_escrow(&self, from: &AccAddress, amount: &Coin) -> Result<(), LedgerError> {
        self.transfer(from, &self.escrow, amount)
    }

    fn transfer_from_escrow(&self, to: &AccAddress, amount: &Coin) -> Result<(), LedgerError> {
        self.transfer(&self.escrow, to, amount)
    }
}
