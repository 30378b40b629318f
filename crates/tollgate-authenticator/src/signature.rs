//! Signature-verification authenticator
//!
//! The ledger's baseline policy: a message is authorized when the account's
//! signature slot carries a valid ed25519 signature over the sign bytes. It
//! also serves as the delegate of composite authenticators through the
//! [`SignatureVerifier`] interface.

use crate::authenticator::Authenticator;
use crate::params::AuthenticatorParams;
use std::sync::Arc;
use tollgate_core::{
    AccountAddress, AuthContext, AuthenticationData, AuthenticationResult, AuthenticatorType,
    Gas, Message, MessageScope, PublicKey, Result, SignatureExtractor, SignatureV2,
    SignatureVerifier, TollgateError, Tx,
};
use tracing::debug;

/// Registry key of [`SignatureVerificationAuthenticator`].
pub const SIGNATURE_VERIFICATION_TYPE: &str = "SignatureVerification";

/// Pairs signature slot `i` with `Tx::signers()[i]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSignatureExtractor;

impl SignatureExtractor for DefaultSignatureExtractor {
    fn extract(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData> {
        let tx_signers = tx.signers();
        let scoped_signers = match scope {
            MessageScope::Global => tx_signers.clone(),
            MessageScope::Message(index) => tx
                .messages
                .get(index)
                .ok_or_else(|| {
                    TollgateError::invalid_transaction(format!(
                        "message index {index} out of range for {} messages",
                        tx.messages.len()
                    ))
                })?
                .signers
                .clone(),
        };

        let mut signers = Vec::with_capacity(scoped_signers.len());
        let mut signatures = Vec::with_capacity(scoped_signers.len());
        for signer in scoped_signers {
            let slot = tx_signers
                .iter()
                .position(|candidate| *candidate == signer)
                .and_then(|slot| tx.signatures.get(slot));
            match slot {
                Some(signature) => {
                    signers.push(signer);
                    signatures.push(signature.clone());
                }
                None if simulate => continue,
                None => {
                    return Err(TollgateError::invalid_transaction(format!(
                        "missing signature for signer {signer}"
                    )))
                }
            }
        }

        // Bound to the executing chain, not the chain the transaction names.
        let sign_doc = tx.sign_doc_for(ctx.chain_id())?;
        AuthenticationData::new(signers, signatures, sign_doc, simulate)
    }
}

/// Authenticates accounts by ed25519 signature.
///
/// A template (no key bound) accepts the key declared in the account's own
/// signature slot if that key derives the account address. An initialized
/// instance requires the declared key to equal the bound key.
#[derive(Debug, Clone)]
pub struct SignatureVerificationAuthenticator {
    extractor: Arc<dyn SignatureExtractor>,
    static_gas: Gas,
    verify_cost: Gas,
    pub_key: Option<PublicKey>,
}

impl SignatureVerificationAuthenticator {
    pub fn new(extractor: Arc<dyn SignatureExtractor>, params: &AuthenticatorParams) -> Self {
        Self {
            extractor,
            static_gas: params.signature_static_gas,
            verify_cost: params.ed25519_verify_cost,
            pub_key: None,
        }
    }

    /// Template using [`DefaultSignatureExtractor`].
    pub fn with_default_extractor(params: &AuthenticatorParams) -> Self {
        Self::new(Arc::new(DefaultSignatureExtractor), params)
    }

    /// Key bound by `initialize`, if any.
    pub fn bound_key(&self) -> Option<&PublicKey> {
        self.pub_key.as_ref()
    }

    fn verify_entry(
        &self,
        ctx: &mut AuthContext,
        signature: &SignatureV2,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult> {
        ctx.consume_gas(self.verify_cost, "ed25519 signature verification")?;

        if auth_data.is_simulation() && signature.data.is_empty() {
            debug!(
                pub_key = %signature.pub_key,
                "Skipping verification of empty simulation signature"
            );
            return Ok(AuthenticationResult::Authenticated);
        }

        let sign_bytes = auth_data.sign_bytes(signature.sequence);
        Ok(AuthenticationResult::from_check(
            signature.pub_key.verify(&sign_bytes, &signature.data),
        ))
    }
}

impl Authenticator for SignatureVerificationAuthenticator {
    fn authenticator_type(&self) -> AuthenticatorType {
        AuthenticatorType::new(SIGNATURE_VERIFICATION_TYPE)
    }

    fn static_gas(&self) -> Gas {
        self.static_gas
    }

    fn initialize(&self, config: &[u8]) -> Result<Box<dyn Authenticator>> {
        let pub_key = PublicKey::from_bytes(config)?;
        Ok(Box::new(Self {
            pub_key: Some(pub_key),
            ..self.clone()
        }))
    }

    fn authentication_data(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData> {
        self.extractor.extract(ctx, tx, scope, simulate)
    }

    fn authenticate(
        &self,
        ctx: &mut AuthContext,
        account: &AccountAddress,
        message: &Message,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult> {
        let Some(signature) = auth_data.signature_for(account) else {
            debug!(
                account = %account,
                msg_type = %message.type_url,
                "No signature slot for account"
            );
            return Ok(AuthenticationResult::NotAuthenticated);
        };

        let key_matches = match &self.pub_key {
            Some(bound) => signature.pub_key == *bound,
            None => signature.pub_key.address() == *account,
        };
        if !key_matches {
            debug!(account = %account, "Declared key does not match account");
            return Ok(AuthenticationResult::NotAuthenticated);
        }

        self.verify_entry(ctx, signature, auth_data)
    }

    fn on_authenticator_added(
        &self,
        _ctx: &mut AuthContext,
        account: &AccountAddress,
        config: &[u8],
    ) -> Result<()> {
        let pub_key = PublicKey::from_bytes(config)?;
        debug!(account = %account, pub_key = %pub_key, "Signature key registered");
        Ok(())
    }
}

impl SignatureVerifier for SignatureVerificationAuthenticator {
    fn authentication_data(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData> {
        self.extractor.extract(ctx, tx, scope, simulate)
    }

    fn verify_signature(
        &self,
        ctx: &mut AuthContext,
        signer: &AccountAddress,
        pub_key: &PublicKey,
        message: &Message,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult> {
        if pub_key.address() != *signer {
            debug!(signer = %signer, "Public key does not derive signer address");
            return Ok(AuthenticationResult::NotAuthenticated);
        }
        let Some(signature) = auth_data.signature_by_key(pub_key) else {
            debug!(signer = %signer, msg_type = %message.type_url, "No signature declares key");
            return Ok(AuthenticationResult::NotAuthenticated);
        };

        self.verify_entry(ctx, signature, auth_data)
    }
}
