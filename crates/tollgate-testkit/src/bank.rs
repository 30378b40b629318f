//! In-memory balance ledger for tests
//!
//! Implements [`BalanceOracle`] with controllable failures and a read counter,
//! so tests can assert both the outcome of an authentication and whether the
//! ledger was consulted at all.
//!
//! Uses `std::sync::Mutex`: tests run in controlled contexts and lock
//! contention is not a concern.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tollgate_core::{
    AccountAddress, Amount, AssetId, AuthContext, BalanceOracle, Result, TollgateError,
};

/// Shared in-memory balances. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    state: Arc<Mutex<BankState>>,
}

#[derive(Debug, Default)]
struct BankState {
    balances: HashMap<(AccountAddress, AssetId), Amount>,
    reads: usize,
    failure: Option<String>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, BankState> {
        self.state.lock().unwrap()
    }

    pub fn set_balance(&self, address: AccountAddress, asset: impl Into<AssetId>, amount: Amount) {
        self.state().balances.insert((address, asset.into()), amount);
    }

    /// Current holding, without counting as a read
    pub fn holding(&self, address: &AccountAddress, asset: &AssetId) -> Amount {
        self.state()
            .balances
            .get(&(*address, asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Move `amount` of `asset` between accounts
    pub fn transfer(
        &self,
        from: &AccountAddress,
        to: &AccountAddress,
        asset: impl Into<AssetId>,
        amount: Amount,
    ) -> Result<()> {
        let asset = asset.into();
        let mut state = self.state();
        let available = state
            .balances
            .get(&(*from, asset.clone()))
            .copied()
            .unwrap_or(0);
        if available < amount {
            return Err(TollgateError::dependency(format!(
                "insufficient {asset}: {from} holds {available}, needs {amount}"
            )));
        }

        state.balances.insert((*from, asset.clone()), available - amount);
        *state.balances.entry((*to, asset)).or_insert(0) += amount;
        Ok(())
    }

    /// Number of `balance` calls served or failed so far
    pub fn balance_reads(&self) -> usize {
        self.state().reads
    }

    /// Make every following `balance` call fail with a dependency error
    pub fn fail_reads(&self, message: impl Into<String>) {
        self.state().failure = Some(message.into());
    }
}

impl BalanceOracle for MemoryBank {
    fn balance(
        &self,
        _ctx: &mut AuthContext,
        address: &AccountAddress,
        asset: &AssetId,
    ) -> Result<Amount> {
        let mut state = self.state();
        state.reads += 1;
        if let Some(message) = &state.failure {
            return Err(TollgateError::dependency(message.clone()));
        }
        Ok(state
            .balances
            .get(&(*address, asset.clone()))
            .copied()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyTestFixture;

    fn ctx() -> AuthContext {
        AuthContext::new("tollgate-test", 1, 1_000)
    }

    #[test]
    fn test_balances_and_read_counter() {
        let bank = MemoryBank::new();
        let alice = KeyTestFixture::from_seed_string("alice").address();
        let asset = AssetId::new("nft/1");
        bank.set_balance(alice, asset.clone(), 1);

        assert_eq!(bank.balance(&mut ctx(), &alice, &asset).unwrap(), 1);
        assert_eq!(
            bank.balance(&mut ctx(), &alice, &AssetId::new("nft/2")).unwrap(),
            0
        );
        assert_eq!(bank.balance_reads(), 2);
    }

    #[test]
    fn test_transfer() {
        let bank = MemoryBank::new();
        let alice = KeyTestFixture::from_seed_string("alice").address();
        let bob = KeyTestFixture::from_seed_string("bob").address();
        let asset = AssetId::new("nft/1");
        bank.set_balance(alice, asset.clone(), 1);

        bank.transfer(&alice, &bob, asset.clone(), 1).unwrap();
        assert_eq!(bank.holding(&alice, &asset), 0);
        assert_eq!(bank.holding(&bob, &asset), 1);

        assert!(bank.transfer(&alice, &bob, asset, 1).is_err());
        assert_eq!(bank.balance_reads(), 0);
    }

    #[test]
    fn test_failing_reads() {
        let bank = MemoryBank::new();
        bank.fail_reads("store offline");
        let alice = KeyTestFixture::from_seed_string("alice").address();

        let err = bank
            .balance(&mut ctx(), &alice, &AssetId::new("nft/1"))
            .unwrap_err();
        assert_eq!(err, TollgateError::dependency("store offline"));
        assert_eq!(bank.balance_reads(), 1);
    }
}
