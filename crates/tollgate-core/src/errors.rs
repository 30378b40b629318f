//! Unified error system for Tollgate
//!
//! A single error type covers every failure the authentication framework can
//! surface. Business rejections are not errors: an authenticator that declines
//! a message returns `AuthenticationResult::NotAuthenticated` inside `Ok`.

use serde::{Deserialize, Serialize};

/// Unified error type for all Tollgate operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TollgateError {
    /// Stored or submitted authenticator configuration is structurally invalid
    #[error("Invalid authenticator config: {message}")]
    Config {
        /// Error message describing the malformed configuration
        message: String,
    },

    /// No authenticator template is registered under the requested type
    #[error("Unknown authenticator type: {authenticator_type}")]
    UnknownAuthenticatorType {
        /// The type identifier that failed to resolve
        authenticator_type: String,
    },

    /// A second template was registered under an existing type
    #[error("Authenticator type already registered: {authenticator_type}")]
    DuplicateAuthenticatorType {
        /// The type identifier registered twice
        authenticator_type: String,
    },

    /// A consumed service (balance oracle, verifier, decoder) failed
    #[error("Dependency error: {message}")]
    Dependency {
        /// Error message describing the infrastructural failure
        message: String,
    },

    /// The transaction gas meter was exhausted
    #[error("Out of gas in {descriptor}: limit {limit}, consumed {consumed}")]
    OutOfGas {
        /// What was being charged when the limit was hit
        descriptor: String,
        /// Gas limit of the meter
        limit: u64,
        /// Gas consumed, including the rejected charge
        consumed: u64,
    },

    /// The transaction or its signature material is malformed
    #[error("Invalid transaction: {message}")]
    InvalidTransaction {
        /// Error message describing the malformed transaction
        message: String,
    },

    /// No authenticator accepted the message
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Reason shown to the submitter; never says which check failed
        message: String,
    },

    /// A post-execution confirmation blocked the transaction
    #[error("Execution blocked: {reason}")]
    ExecutionBlocked {
        /// Reason reported by the authenticator
        reason: String,
    },

    /// An authenticator vetoed its own removal
    #[error("Authenticator removal vetoed: {message}")]
    RemovalVetoed {
        /// Error message from the vetoing authenticator
        message: String,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },

    /// A configured limit would be exceeded
    #[error("Limit exceeded: {message}")]
    LimitExceeded {
        /// Error message describing the limit
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },
}

impl TollgateError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown authenticator type error
    pub fn unknown_type(authenticator_type: impl Into<String>) -> Self {
        Self::UnknownAuthenticatorType {
            authenticator_type: authenticator_type.into(),
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate_type(authenticator_type: impl Into<String>) -> Self {
        Self::DuplicateAuthenticatorType {
            authenticator_type: authenticator_type.into(),
        }
    }

    /// Create a dependency error
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency {
            message: message.into(),
        }
    }

    /// Create an invalid transaction error
    pub fn invalid_transaction(message: impl Into<String>) -> Self {
        Self::InvalidTransaction {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an execution blocked error
    pub fn execution_blocked(reason: impl Into<String>) -> Self {
        Self::ExecutionBlocked {
            reason: reason.into(),
        }
    }

    /// Create a removal vetoed error
    pub fn removal_vetoed(message: impl Into<String>) -> Self {
        Self::RemovalVetoed {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::LimitExceeded {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether this is an ordinary authorization failure rather than a fault
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Standard Result type for Tollgate operations
pub type Result<T> = std::result::Result<T, TollgateError>;

impl From<bincode::Error> for TollgateError {
    fn from(err: bincode::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for TollgateError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            _ => Self::dependency(err.to_string()),
        }
    }
}
