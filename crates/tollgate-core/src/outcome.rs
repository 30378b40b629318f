//! Authentication and confirmation outcomes
//!
//! Both types describe business decisions. Faults travel separately as
//! `TollgateError` in the surrounding `Result`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision from `Authenticator::authenticate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticationResult {
    /// The candidate account is authorized for the message.
    Authenticated,
    /// Rejected. An expected outcome, not an error.
    NotAuthenticated,
}

impl AuthenticationResult {
    /// Returns `true` if the message was authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Map a boolean check onto a result.
    pub fn from_check(passed: bool) -> Self {
        if passed {
            Self::Authenticated
        } else {
            Self::NotAuthenticated
        }
    }
}

impl fmt::Display for AuthenticationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::NotAuthenticated => write!(f, "not authenticated"),
        }
    }
}

/// Decision from the post-execution confirmation hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationResult {
    /// Execution effects are acceptable.
    Confirm,
    /// Execution must be reverted.
    Block { reason: String },
}

impl ConfirmationResult {
    pub fn confirm() -> Self {
        Self::Confirm
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self::Block {
            reason: reason.into(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirm)
    }

    /// Returns the block reason, if blocked.
    pub fn block_reason(&self) -> Option<&str> {
        match self {
            Self::Confirm => None,
            Self::Block { reason } => Some(reason),
        }
    }
}
