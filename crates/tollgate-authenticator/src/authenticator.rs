//! The authenticator contract
//!
//! An authenticator is a policy bound to an account. The host materializes a
//! fresh instance per authentication cycle through
//! [`AuthenticatorManager::resolve`](crate::AuthenticatorManager::resolve),
//! so instances carry only immutable dependencies and their configuration.

use std::fmt;
use tollgate_core::{
    AccountAddress, AuthContext, AuthenticationData, AuthenticationResult, AuthenticatorType,
    ConfirmationResult, Gas, Message, MessageScope, Result, Tx,
};

/// Contract every authentication policy satisfies.
///
/// Call order for one message: the host charges [`static_gas`] on the
/// context, then calls [`authentication_data`] and [`authenticate`]. After
/// the message executes it calls [`confirm_execution`] on the authenticator
/// that accepted it. The remaining hooks run outside this hot path.
///
/// [`static_gas`]: Authenticator::static_gas
/// [`authentication_data`]: Authenticator::authentication_data
/// [`authenticate`]: Authenticator::authenticate
/// [`confirm_execution`]: Authenticator::confirm_execution
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Stable registry key of this policy kind.
    fn authenticator_type(&self) -> AuthenticatorType;

    /// Fixed cost charged before `authenticate` runs, regardless of outcome.
    ///
    /// Delegated operations meter their own cost when they execute.
    fn static_gas(&self) -> Gas;

    /// Bind `config` and return a ready instance. `self` is left untouched.
    ///
    /// Fails with `TollgateError::Config` when the bytes are structurally
    /// invalid for this type. Semantic checks are left to authentication.
    fn initialize(&self, config: &[u8]) -> Result<Box<dyn Authenticator>>;

    /// Extract the transaction material `authenticate` needs.
    ///
    /// `MessageScope::Global` is a valid input, not an error.
    fn authentication_data(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData>;

    /// Decide whether `account` may execute `message`.
    ///
    /// Reads state only. Rejection is `Ok(NotAuthenticated)`.
    fn authenticate(
        &self,
        ctx: &mut AuthContext,
        account: &AccountAddress,
        message: &Message,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult>;

    /// Observe a message authorized through another path (e.g. delegated
    /// execution).
    fn track(
        &self,
        _ctx: &mut AuthContext,
        _account: &AccountAddress,
        _message: &Message,
    ) -> Result<()> {
        Ok(())
    }

    /// Gate run once when a record is added; an error aborts the add.
    fn on_authenticator_added(
        &self,
        _ctx: &mut AuthContext,
        _account: &AccountAddress,
        _config: &[u8],
    ) -> Result<()> {
        Ok(())
    }

    /// Veto gate run before a record is removed; an error blocks removal.
    ///
    /// Use only to protect safety-critical invariants.
    fn on_authenticator_removed(
        &self,
        _ctx: &mut AuthContext,
        _account: &AccountAddress,
        _config: &[u8],
    ) -> Result<()> {
        Ok(())
    }

    /// Post-execution check, e.g. spend caps.
    fn confirm_execution(
        &self,
        _ctx: &mut AuthContext,
        _account: &AccountAddress,
        _message: &Message,
        _auth_data: &AuthenticationData,
    ) -> ConfirmationResult {
        ConfirmationResult::Confirm
    }
}
