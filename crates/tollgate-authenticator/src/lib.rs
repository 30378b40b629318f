//! Tollgate Authenticators
//!
//! Pluggable authentication policies for ledger accounts. An account binds
//! one or more authenticators, each stored as a `(type, config)` pair; the
//! host resolves them through the [`AuthenticatorManager`] and runs them in
//! the [`AuthenticationPipeline`] before and after message execution.
//!
//! Two policies ship with the crate:
//! - [`SignatureVerificationAuthenticator`]: ed25519 signature over the sign bytes
//! - [`NftAuthenticator`]: a valid signature from whoever holds exactly one
//!   unit of a bound non-fungible asset
//!
//! Authentication only reads state. A rejection is
//! `Ok(AuthenticationResult::NotAuthenticated)`; errors are reserved for
//! malformed configuration, transactions and failing ledger services.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

pub mod authenticator;
pub mod manager;
pub mod nft;
pub mod params;
pub mod pipeline;
pub mod signature;
pub mod store;

pub use authenticator::Authenticator;
pub use manager::{AuthenticatorManager, AuthenticatorManagerBuilder};
pub use nft::{NftAuthenticator, NFT_AUTHENTICATOR_TYPE, REQUIRED_NFT_UNITS};
pub use params::AuthenticatorParams;
pub use pipeline::{AuthenticatedMessage, AuthenticationPipeline};
pub use signature::{
    DefaultSignatureExtractor, SignatureVerificationAuthenticator, SIGNATURE_VERIFICATION_TYPE,
};
pub use store::{AuthenticatorStore, InitializedAuthenticator, StoredAuthenticator};
