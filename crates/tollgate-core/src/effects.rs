//! Interfaces to collaborators outside the authentication core
//!
//! The ledger supplies implementations of these traits when it wires up its
//! authenticators. Every call is a synchronous read of local ledger state;
//! implementations charge their own gas on the context they receive.

use crate::context::AuthContext;
use crate::errors::Result;
use crate::identifiers::{AccountAddress, AssetId};
use crate::keys::PublicKey;
use crate::outcome::AuthenticationResult;
use crate::tx::{AuthenticationData, Message, MessageScope, Tx};
use std::fmt;

/// Quantity of an asset.
pub type Amount = u128;

/// Read-only balance lookup.
pub trait BalanceOracle: Send + Sync + fmt::Debug {
    /// Quantity of `asset` held by `address` at the current ledger state.
    ///
    /// Infrastructure failures are `TollgateError::Dependency`.
    fn balance(&self, ctx: &mut AuthContext, address: &AccountAddress, asset: &AssetId)
        -> Result<Amount>;
}

/// Transaction decoding service pairing signers with signatures.
pub trait SignatureExtractor: Send + Sync + fmt::Debug {
    fn extract(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData>;
}

/// Signature-verification policy reused by composite authenticators.
///
/// The key to verify with is an explicit argument; implementations keep no
/// per-call state.
pub trait SignatureVerifier: Send + Sync + fmt::Debug {
    /// Extract the signature material this verifier needs.
    fn authentication_data(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData>;

    /// Check that `signer`, owning `pub_key`, signed the transaction.
    fn verify_signature(
        &self,
        ctx: &mut AuthContext,
        signer: &AccountAddress,
        pub_key: &PublicKey,
        message: &Message,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult>;
}
