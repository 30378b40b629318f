//! NFT-gated authenticator
//!
//! Wraps a [`SignatureVerifier`] and adds an ownership post-condition: the
//! signer must hold exactly one unit of the asset bound at initialization.
//! Holding the asset lets its owner act for the account that registered the
//! authenticator; transferring the asset transfers that right.

use crate::authenticator::Authenticator;
use crate::params::AuthenticatorParams;
use std::sync::Arc;
use tollgate_core::{
    AccountAddress, Amount, AssetId, AuthContext, AuthenticationData, AuthenticationResult,
    AuthenticatorType, BalanceOracle, Gas, Message, MessageScope, Result, SignatureVerifier,
    TollgateError, Tx,
};
use tracing::{debug, trace};

/// Registry key of [`NftAuthenticator`].
pub const NFT_AUTHENTICATOR_TYPE: &str = "NFTAuthenticator";

/// Holding required for ownership. Ownership is binary, not a threshold.
pub const REQUIRED_NFT_UNITS: Amount = 1;

/// Signature verification gated on holding a non-fungible asset.
#[derive(Debug, Clone)]
pub struct NftAuthenticator {
    balances: Arc<dyn BalanceOracle>,
    verifier: Arc<dyn SignatureVerifier>,
    static_gas: Gas,
    asset: Option<AssetId>,
}

impl NftAuthenticator {
    /// Template with injected dependencies and no asset bound.
    pub fn new(
        balances: Arc<dyn BalanceOracle>,
        verifier: Arc<dyn SignatureVerifier>,
        params: &AuthenticatorParams,
    ) -> Self {
        Self {
            balances,
            verifier,
            static_gas: params.nft_static_gas,
            asset: None,
        }
    }

    /// Asset bound by `initialize`, if any.
    pub fn asset(&self) -> Option<&AssetId> {
        self.asset.as_ref()
    }

    /// Bind `asset` directly, without going through config bytes.
    pub fn with_asset(&self, asset: AssetId) -> Self {
        Self {
            asset: Some(asset),
            ..self.clone()
        }
    }
}

impl Authenticator for NftAuthenticator {
    fn authenticator_type(&self) -> AuthenticatorType {
        AuthenticatorType::new(NFT_AUTHENTICATOR_TYPE)
    }

    /// Own overhead only; signature verification meters itself.
    fn static_gas(&self) -> Gas {
        self.static_gas
    }

    fn initialize(&self, config: &[u8]) -> Result<Box<dyn Authenticator>> {
        let asset = AssetId::from_config_bytes(config)?;
        Ok(Box::new(self.with_asset(asset)))
    }

    fn authentication_data(
        &self,
        ctx: &mut AuthContext,
        tx: &Tx,
        scope: MessageScope,
        simulate: bool,
    ) -> Result<AuthenticationData> {
        self.verifier.authentication_data(ctx, tx, scope, simulate)
    }

    fn authenticate(
        &self,
        ctx: &mut AuthContext,
        account: &AccountAddress,
        message: &Message,
        auth_data: &AuthenticationData,
    ) -> Result<AuthenticationResult> {
        let asset = self.asset.as_ref().ok_or_else(|| {
            TollgateError::config("NFT authenticator used before an asset was bound")
        })?;

        let Some(signature) = auth_data.first_signature() else {
            debug!(account = %account, "No signatures to authenticate against");
            return Ok(AuthenticationResult::NotAuthenticated);
        };

        let pub_key = signature.pub_key;
        let signer = pub_key.address();

        let result = self
            .verifier
            .verify_signature(ctx, &signer, &pub_key, message, auth_data)?;
        if !result.is_authenticated() {
            debug!(
                account = %account,
                signer = %signer,
                "Signature rejected, skipping ownership check"
            );
            return Ok(result);
        }

        let held = self.balances.balance(ctx, &signer, asset)?;
        trace!(signer = %signer, asset = %asset, held, "Ownership check");
        if held != REQUIRED_NFT_UNITS {
            debug!(account = %account, signer = %signer, "Signer does not hold the gating asset");
            return Ok(AuthenticationResult::NotAuthenticated);
        }

        Ok(result)
    }
}
