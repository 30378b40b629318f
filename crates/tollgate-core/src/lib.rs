//! Tollgate Core
//!
//! Foundation types shared by every authenticator: identifiers and the
//! address-derivation rule, transactions and the signer/signature pairs
//! extracted from them, the per-transaction gas meter, authentication and
//! confirmation outcomes, the unified error type, configuration traits, and
//! the interfaces of the ledger services authenticators consume.
//!
//! This crate contains no policy logic.

#![forbid(unsafe_code)]

/// Configuration loading and validation
pub mod config;

/// Per-transaction execution context
pub mod context;

/// Interfaces to ledger services (balances, decoding, signature checks)
pub mod effects;

/// Unified error handling
pub mod errors;

/// Gas metering
pub mod gas;

/// Account, asset and authenticator identifiers
pub mod identifiers;

/// Public keys and address derivation
pub mod keys;

/// Authentication and confirmation outcomes
pub mod outcome;

/// Transactions and authentication data
pub mod tx;

pub use context::AuthContext;
pub use effects::{Amount, BalanceOracle, SignatureExtractor, SignatureVerifier};
pub use errors::{Result, TollgateError};
pub use gas::{Gas, GasMeter};
pub use identifiers::{AccountAddress, AssetId, AuthenticatorId, AuthenticatorType};
pub use keys::PublicKey;
pub use outcome::{AuthenticationResult, ConfirmationResult};
pub use tx::{sign_bytes, AuthenticationData, Message, MessageScope, SignatureV2, Tx};
