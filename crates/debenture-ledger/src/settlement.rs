//! Value-transfer substrate.
//!
//! The ledger never moves value itself; it asks a [`SettlementBackend`]
//! to move N units from account A to account B and treats the outcome as
//! authoritative. The bundled [`InMemorySettlement`] keeps balances in
//! process and is what tests and the reference server run against.

use std::collections::HashMap;

use parking_lot::Mutex;
use thiserror::Error;

use debenture_core::{AccountId, LedgerError};

/// A specialized Result type for settlement operations.
pub type SettlementResult<T> = Result<T, SettlementError>;

/// Errors surfaced by a settlement backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    /// The source account cannot cover the transfer.
    #[error("Insufficient funds in {account}: required {required}, available {available}")]
    InsufficientFunds {
        /// Account being debited.
        account: AccountId,
        /// Amount the transfer needed.
        required: u128,
        /// Balance actually held.
        available: u128,
    },

    /// Crediting the destination would overflow its balance.
    #[error("Balance overflow crediting {account}")]
    BalanceOverflow {
        /// Account being credited.
        account: AccountId,
    },
}

impl From<SettlementError> for LedgerError {
    fn from(err: SettlementError) -> Self {
        LedgerError::settlement(err.to_string())
    }
}

/// Moves value between externally authenticated accounts.
///
/// Implementations must make `transfer` atomic: either both the debit and
/// the credit happen, or neither does.
pub trait SettlementBackend: Send + Sync {
    /// Current balance of `account` (0 for unknown accounts).
    fn balance(&self, account: &AccountId) -> u128;

    /// Credits `amount` to `account` from outside the ledger.
    ///
    /// This is the funding entry point: buyers fund their accounts and
    /// operators pre-fund the coupon treasury through it.
    fn deposit(&self, account: &AccountId, amount: u128) -> SettlementResult<()>;

    /// Atomically moves `amount` from `from` to `to`.
    ///
    /// A zero-amount transfer succeeds and is a no-op.
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> SettlementResult<()>;
}

/// In-process settlement backend over a guarded balance map.
pub struct InMemorySettlement {
    balances: Mutex<HashMap<AccountId, u128>>,
}

impl Default for InMemorySettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySettlement {
    /// Creates a backend with no funded accounts.
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }
}

impl SettlementBackend for InMemorySettlement {
    fn balance(&self, account: &AccountId) -> u128 {
        self.balances.lock().get(account).copied().unwrap_or(0)
    }

    fn deposit(&self, account: &AccountId, amount: u128) -> SettlementResult<()> {
        let mut balances = self.balances.lock();
        let entry = balances.entry(account.clone()).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| SettlementError::BalanceOverflow {
                account: account.clone(),
            })?;
        Ok(())
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) -> SettlementResult<()> {
        if amount == 0 {
            return Ok(());
        }

        let mut balances = self.balances.lock();

        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(SettlementError::InsufficientFunds {
                account: from.clone(),
                required: amount,
                available,
            });
        }

        // A self-transfer that passed the funds check is a no-op.
        if from == to {
            return Ok(());
        }

        let credited = balances
            .get(to)
            .copied()
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or_else(|| SettlementError::BalanceOverflow { account: to.clone() })?;

        // Both sides checked; apply under the single lock.
        balances.insert(from.clone(), available - amount);
        balances.insert(to.clone(), credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> AccountId {
        AccountId::new(name)
    }

    #[test]
    fn test_unknown_account_has_zero_balance() {
        let settlement = InMemorySettlement::new();
        assert_eq!(settlement.balance(&account("nobody")), 0);
    }

    #[test]
    fn test_deposit_and_transfer() {
        let settlement = InMemorySettlement::new();
        settlement.deposit(&account("alice"), 500).unwrap();

        settlement
            .transfer(&account("alice"), &account("bob"), 200)
            .unwrap();

        assert_eq!(settlement.balance(&account("alice")), 300);
        assert_eq!(settlement.balance(&account("bob")), 200);
    }

    #[test]
    fn test_transfer_insufficient_funds_changes_nothing() {
        let settlement = InMemorySettlement::new();
        settlement.deposit(&account("alice"), 100).unwrap();

        let err = settlement
            .transfer(&account("alice"), &account("bob"), 101)
            .unwrap_err();
        assert!(matches!(err, SettlementError::InsufficientFunds { .. }));

        assert_eq!(settlement.balance(&account("alice")), 100);
        assert_eq!(settlement.balance(&account("bob")), 0);
    }

    #[test]
    fn test_zero_transfer_is_noop() {
        let settlement = InMemorySettlement::new();
        settlement
            .transfer(&account("alice"), &account("bob"), 0)
            .unwrap();
        assert_eq!(settlement.balance(&account("bob")), 0);
    }

    #[test]
    fn test_self_transfer_preserves_balance() {
        let settlement = InMemorySettlement::new();
        settlement.deposit(&account("alice"), 100).unwrap();
        settlement
            .transfer(&account("alice"), &account("alice"), 60)
            .unwrap();
        assert_eq!(settlement.balance(&account("alice")), 100);
    }
}
