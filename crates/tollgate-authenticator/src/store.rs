//! Per-account authenticator records and their lifecycle
//!
//! A record is the persisted `(type, config)` pair. Records are created by
//! an add request after the authenticator's add gate passes, and deleted by a
//! remove request unless the authenticator vetoes it. Records are never
//! mutated in place; replacement is remove-then-add.

use crate::authenticator::Authenticator;
use crate::manager::AuthenticatorManager;
use crate::params::AuthenticatorParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tollgate_core::{
    AccountAddress, AuthContext, AuthenticatorId, AuthenticatorType, Result, TollgateError,
};
use tracing::{debug, warn};

/// Persisted authenticator configuration of one account slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuthenticator {
    pub id: AuthenticatorId,
    pub authenticator_type: AuthenticatorType,
    /// Opaque config blob handed to `initialize`
    pub data: Vec<u8>,
}

/// A stored record resolved into a ready authenticator.
#[derive(Debug)]
pub struct InitializedAuthenticator {
    pub id: AuthenticatorId,
    pub authenticator: Box<dyn Authenticator>,
}

/// In-memory authenticator records keyed by account.
///
/// Serializes with bincode for hosts that snapshot module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatorStore {
    records: BTreeMap<AccountAddress, Vec<StoredAuthenticator>>,
    next_id: u64,
    max_per_account: u64,
}

impl AuthenticatorStore {
    pub fn new(params: &AuthenticatorParams) -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 0,
            max_per_account: params.max_authenticators_per_account,
        }
    }

    /// Validate and persist a new record, returning its id.
    ///
    /// Nothing is stored if resolution or the add gate fails.
    pub fn add_authenticator(
        &mut self,
        ctx: &mut AuthContext,
        manager: &AuthenticatorManager,
        account: &AccountAddress,
        authenticator_type: &AuthenticatorType,
        data: &[u8],
    ) -> Result<AuthenticatorId> {
        let existing = self.authenticators(account).len() as u64;
        if existing >= self.max_per_account {
            return Err(TollgateError::limit_exceeded(format!(
                "account {account} already has {existing} authenticators"
            )));
        }

        let authenticator = manager.resolve(authenticator_type, data)?;
        authenticator.on_authenticator_added(ctx, account, data)?;

        let id = AuthenticatorId(self.next_id);
        self.next_id += 1;
        self.records
            .entry(*account)
            .or_default()
            .push(StoredAuthenticator {
                id,
                authenticator_type: authenticator_type.clone(),
                data: data.to_vec(),
            });

        debug!(
            account = %account,
            authenticator_type = %authenticator_type,
            id = %id,
            "Authenticator added"
        );
        Ok(id)
    }

    /// Delete a record unless its authenticator vetoes the removal.
    pub fn remove_authenticator(
        &mut self,
        ctx: &mut AuthContext,
        manager: &AuthenticatorManager,
        account: &AccountAddress,
        id: AuthenticatorId,
    ) -> Result<()> {
        let record = self
            .authenticators(account)
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| {
                TollgateError::not_found(format!("authenticator {id} on account {account}"))
            })?;

        let authenticator = manager.resolve(&record.authenticator_type, &record.data)?;
        if let Err(err) = authenticator.on_authenticator_removed(ctx, account, &record.data) {
            warn!(account = %account, id = %id, error = %err, "Authenticator removal vetoed");
            return Err(TollgateError::removal_vetoed(err.to_string()));
        }

        if let Some(records) = self.records.get_mut(account) {
            records.retain(|stored| stored.id != id);
            if records.is_empty() {
                self.records.remove(account);
            }
        }

        debug!(account = %account, id = %id, "Authenticator removed");
        Ok(())
    }

    /// Records of `account` in id order.
    pub fn authenticators(&self, account: &AccountAddress) -> &[StoredAuthenticator] {
        self.records
            .get(account)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve every record of `account`.
    pub fn initialized_authenticators(
        &self,
        manager: &AuthenticatorManager,
        account: &AccountAddress,
    ) -> Result<Vec<InitializedAuthenticator>> {
        self.authenticators(account)
            .iter()
            .map(|record| {
                Ok(InitializedAuthenticator {
                    id: record.id,
                    authenticator: manager.resolve(&record.authenticator_type, &record.data)?,
                })
            })
            .collect()
    }
}

impl Default for AuthenticatorStore {
    fn default() -> Self {
        Self::new(&AuthenticatorParams::default())
    }
}
