//! Authenticator registry
//!
//! Templates are registered once while the application is wired up. The
//! builder is the only way to register, so a built manager is read-only and
//! can be shared across transaction-processing threads without locking.

use crate::authenticator::Authenticator;
use crate::params::AuthenticatorParams;
use crate::signature::SIGNATURE_VERIFICATION_TYPE;
use std::collections::BTreeMap;
use std::sync::Arc;
use tollgate_core::{AuthenticatorType, Result, TollgateError};
use tracing::debug;

/// Collects templates during application start.
#[derive(Debug)]
pub struct AuthenticatorManagerBuilder {
    templates: BTreeMap<AuthenticatorType, Arc<dyn Authenticator>>,
    default_type: AuthenticatorType,
}

impl AuthenticatorManagerBuilder {
    fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            default_type: AuthenticatorType::new(SIGNATURE_VERIFICATION_TYPE),
        }
    }

    /// Add a template; a second template of the same type is rejected.
    pub fn register_authenticator(
        &mut self,
        template: impl Authenticator + 'static,
    ) -> Result<&mut Self> {
        let authenticator_type = template.authenticator_type();
        if self.templates.contains_key(&authenticator_type) {
            return Err(TollgateError::duplicate_type(authenticator_type.as_str()));
        }

        debug!(
            authenticator_type = %authenticator_type,
            static_gas = template.static_gas(),
            "Registering authenticator"
        );
        self.templates.insert(authenticator_type, Arc::new(template));
        Ok(self)
    }

    /// Type used for accounts without stored authenticators.
    pub fn default_type(&mut self, authenticator_type: impl Into<AuthenticatorType>) -> &mut Self {
        self.default_type = authenticator_type.into();
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> AuthenticatorManager {
        AuthenticatorManager {
            templates: self.templates,
            default_type: self.default_type,
        }
    }
}

/// Resolves stored `(type, config)` pairs into ready authenticators.
#[derive(Debug)]
pub struct AuthenticatorManager {
    templates: BTreeMap<AuthenticatorType, Arc<dyn Authenticator>>,
    default_type: AuthenticatorType,
}

impl AuthenticatorManager {
    pub fn builder() -> AuthenticatorManagerBuilder {
        AuthenticatorManagerBuilder::new()
    }

    /// Builder whose default type comes from `params`.
    pub fn builder_with_params(params: &AuthenticatorParams) -> AuthenticatorManagerBuilder {
        let mut builder = AuthenticatorManagerBuilder::new();
        builder.default_type(params.default_authenticator_type.as_str());
        builder
    }

    /// Initialize a copy of the template registered under `authenticator_type`.
    ///
    /// The registered template is never modified.
    pub fn resolve(
        &self,
        authenticator_type: &AuthenticatorType,
        config: &[u8],
    ) -> Result<Box<dyn Authenticator>> {
        let template = self.template(authenticator_type)?;
        let authenticator = template.initialize(config)?;
        debug!(authenticator_type = %authenticator_type, "Resolved authenticator");
        Ok(authenticator)
    }

    /// The registered template for `authenticator_type`.
    pub fn template(&self, authenticator_type: &AuthenticatorType) -> Result<&dyn Authenticator> {
        self.templates
            .get(authenticator_type)
            .map(|template| template.as_ref())
            .ok_or_else(|| TollgateError::unknown_type(authenticator_type.as_str()))
    }

    /// Template used for accounts that registered nothing.
    pub fn default_authenticator(&self) -> Result<Arc<dyn Authenticator>> {
        self.templates
            .get(&self.default_type)
            .cloned()
            .ok_or_else(|| TollgateError::unknown_type(self.default_type.as_str()))
    }

    pub fn default_type(&self) -> &AuthenticatorType {
        &self.default_type
    }

    /// Registered types in sorted order.
    pub fn registered_types(&self) -> impl Iterator<Item = &AuthenticatorType> {
        self.templates.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nft::{NftAuthenticator, NFT_AUTHENTICATOR_TYPE};
    use crate::signature::SignatureVerificationAuthenticator;
    use tollgate_testkit::MemoryBank;

    fn manager() -> AuthenticatorManager {
        let params = AuthenticatorParams::default();
        let sva = SignatureVerificationAuthenticator::with_default_extractor(&params);
        let nft = NftAuthenticator::new(
            Arc::new(MemoryBank::new()),
            Arc::new(sva.clone()),
            &params,
        );

        let mut builder = AuthenticatorManager::builder();
        builder
            .register_authenticator(sva)
            .unwrap()
            .register_authenticator(nft)
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let params = AuthenticatorParams::default();
        let mut builder = AuthenticatorManager::builder();
        builder
            .register_authenticator(SignatureVerificationAuthenticator::with_default_extractor(
                &params,
            ))
            .unwrap();

        let err = builder
            .register_authenticator(SignatureVerificationAuthenticator::with_default_extractor(
                &params,
            ))
            .unwrap_err();
        assert_eq!(err, TollgateError::duplicate_type(SIGNATURE_VERIFICATION_TYPE));
    }

    #[test]
    fn test_resolve_unknown_type() {
        let err = manager()
            .resolve(&AuthenticatorType::new("SpendLimit"), b"")
            .unwrap_err();
        assert_eq!(err, TollgateError::unknown_type("SpendLimit"));
    }

    #[test]
    fn test_resolve_binds_config() {
        let manager = manager();
        let nft_type = AuthenticatorType::new(NFT_AUTHENTICATOR_TYPE);
        let resolved = manager.resolve(&nft_type, b"factory/alice/nft").unwrap();
        assert_eq!(resolved.authenticator_type(), nft_type);
    }

    #[test]
    fn test_resolve_propagates_config_error() {
        let err = manager()
            .resolve(&AuthenticatorType::new(SIGNATURE_VERIFICATION_TYPE), b"short")
            .unwrap_err();
        assert!(matches!(err, TollgateError::Config { .. }));
    }

    #[test]
    fn test_registered_types_and_default() {
        let manager = manager();
        let types: Vec<_> = manager.registered_types().map(|t| t.as_str()).collect();
        assert_eq!(types, vec![NFT_AUTHENTICATOR_TYPE, SIGNATURE_VERIFICATION_TYPE]);
        assert_eq!(
            manager.default_authenticator().unwrap().authenticator_type().as_str(),
            SIGNATURE_VERIFICATION_TYPE
        );
    }

    #[test]
    fn test_missing_default_is_unknown_type() {
        let mut builder = AuthenticatorManager::builder();
        builder.default_type("Passkey");
        let err = builder.build().default_authenticator().unwrap_err();
        assert!(matches!(err, TollgateError::UnknownAuthenticatorType { .. }));
    }

    #[test]
    fn test_default_type_follows_params() {
        let params = AuthenticatorParams {
            default_authenticator_type: NFT_AUTHENTICATOR_TYPE.to_string(),
            ..AuthenticatorParams::default()
        };
        let sva = SignatureVerificationAuthenticator::with_default_extractor(&params);
        let nft = NftAuthenticator::new(
            Arc::new(MemoryBank::new()),
            Arc::new(sva.clone()),
            &params,
        );

        let mut builder = AuthenticatorManager::builder_with_params(&params);
        builder
            .register_authenticator(sva)
            .unwrap()
            .register_authenticator(nft)
            .unwrap();
        let manager = builder.build();

        assert_eq!(manager.default_type().as_str(), NFT_AUTHENTICATOR_TYPE);
        assert_eq!(
            manager.default_authenticator().unwrap().authenticator_type().as_str(),
            NFT_AUTHENTICATOR_TYPE
        );
        assert_eq!(
            AuthenticatorManager::builder_with_params(&AuthenticatorParams::default())
                .build()
                .default_type()
                .as_str(),
            SIGNATURE_VERIFICATION_TYPE
        );
    }

    #[test]
    fn test_manager_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthenticatorManager>();
    }
}
