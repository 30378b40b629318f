//! Transaction authentication pipeline
//!
//! Runs the account authenticators for every message of a transaction before
//! execution, and their confirmation hooks after it. Accounts without stored
//! authenticators fall back to the manager's default template.

use crate::authenticator::Authenticator;
use crate::manager::AuthenticatorManager;
use crate::store::AuthenticatorStore;
use std::sync::Arc;
use tollgate_core::{
    AccountAddress, AuthContext, AuthenticationData, AuthenticationResult, AuthenticatorId,
    ConfirmationResult, Message, MessageScope, Result, TollgateError, Tx,
};
use tracing::{debug, trace, warn};

/// The authenticator that accepted one message, kept for confirmation.
#[derive(Debug, Clone)]
pub struct AuthenticatedMessage {
    /// Position of the message in the transaction
    pub index: usize,
    pub account: AccountAddress,
    /// Stored record that accepted the message; `None` for the default template
    pub authenticator_id: Option<AuthenticatorId>,
    pub authenticator: Arc<dyn Authenticator>,
    pub auth_data: AuthenticationData,
}

/// Authenticates and confirms transactions against stored records.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticationPipeline<'a> {
    manager: &'a AuthenticatorManager,
    store: &'a AuthenticatorStore,
}

impl<'a> AuthenticationPipeline<'a> {
    pub fn new(manager: &'a AuthenticatorManager, store: &'a AuthenticatorStore) -> Self {
        Self { manager, store }
    }

    /// Authenticate every message of `tx`, in order.
    ///
    /// Fails on the first message no authenticator accepts.
    pub fn authenticate_transaction(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        simulate: bool,
    ) -> Result<Vec<AuthenticatedMessage>> {
        let mut authenticated = Vec::with_capacity(tx.messages.len());
        for (index, message) in tx.messages.iter().enumerate() {
            authenticated.push(self.authenticate_message(ctx, tx, index, message, simulate)?);
        }
        Ok(authenticated)
    }

    fn authenticate_message(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        index: usize,
        message: &Message,
        simulate: bool,
    ) -> Result<AuthenticatedMessage> {
        let account = *message.primary_signer().ok_or_else(|| {
            TollgateError::invalid_transaction(format!("message {index} has no signer"))
        })?;

        for (authenticator_id, authenticator) in self.candidates(&account)? {
            ctx.consume_gas(authenticator.static_gas(), "authenticator static gas")?;

            let auth_data = authenticator.authentication_data(
                ctx,
                tx,
                MessageScope::Message(index),
                simulate,
            )?;
            match authenticator.authenticate(ctx, &account, message, &auth_data)? {
                AuthenticationResult::Authenticated => {
                    debug!(
                        account = %account,
                        authenticator_type = %authenticator.authenticator_type(),
                        message_index = index,
                        block_height = ctx.block_height(),
                        gas = ctx.gas_meter().consumed(),
                        "Message authenticated"
                    );
                    return Ok(AuthenticatedMessage {
                        index,
                        account,
                        authenticator_id,
                        authenticator,
                        auth_data,
                    });
                }
                AuthenticationResult::NotAuthenticated => {
                    trace!(
                        account = %account,
                        authenticator_type = %authenticator.authenticator_type(),
                        "Candidate declined"
                    );
                }
            }
        }

        warn!(account = %account, message_index = index, "No authenticator accepted message");
        Err(TollgateError::unauthorized(format!(
            "account {account} cannot authorize message {index}"
        )))
    }

    /// Run the confirmation hook of each winning authenticator.
    pub fn confirm_transaction(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        authenticated: &[AuthenticatedMessage],
    ) -> Result<()> {
        for entry in authenticated {
            let message = tx.messages.get(entry.index).ok_or_else(|| {
                TollgateError::invalid_transaction(format!(
                    "authenticated message {} is not in the transaction",
                    entry.index
                ))
            })?;

            if let ConfirmationResult::Block { reason } = entry.authenticator.confirm_execution(
                ctx,
                &entry.account,
                message,
                &entry.auth_data,
            ) {
                warn!(
                    account = %entry.account,
                    message_index = entry.index,
                    reason = %reason,
                    "Execution blocked"
                );
                return Err(TollgateError::execution_blocked(reason));
            }
        }
        Ok(())
    }

    /// Notify the account's authenticators of a message authorized elsewhere.
    pub fn track_message(
        &self,
        ctx: &mut AuthContext,
        account: &AccountAddress,
        message: &Message,
    ) -> Result<()> {
        for (_, authenticator) in self.candidates(account)? {
            authenticator.track(ctx, account, message)?;
        }
        Ok(())
    }

    fn candidates(
        &self,
        account: &AccountAddress,
    ) -> Result<Vec<(Option<AuthenticatorId>, Arc<dyn Authenticator>)>> {
        let stored = self.store.initialized_authenticators(self.manager, account)?;
        if stored.is_empty() {
            return Ok(vec![(None, self.manager.default_authenticator()?)]);
        }
        Ok(stored
            .into_iter()
            .map(|entry| (Some(entry.id), Arc::from(entry.authenticator)))
            .collect())
    }
}
