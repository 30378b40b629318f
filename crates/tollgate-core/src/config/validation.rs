//! Configuration validation utilities

use crate::TollgateError;
use std::fmt;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is required but missing or empty
    Required { field: String },
    /// Value is below its minimum
    TooSmall { field: String, min: u64, actual: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { field } => {
                write!(f, "Field '{field}' is required but missing")
            }
            ValidationError::TooSmall { field, min, actual } => {
                write!(f, "Field '{field}' must be at least {min} (got {actual})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for TollgateError {
    fn from(err: ValidationError) -> Self {
        TollgateError::config(err.to_string())
    }
}

/// Configuration validator that accumulates validation failures
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a string value is present
    pub fn non_empty(&mut self, field_name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: field_name.to_string(),
            });
        }
        self
    }

    /// Validate that a number is at least `min`
    pub fn at_least(&mut self, field_name: &str, value: u64, min: u64) -> &mut Self {
        if value < min {
            self.errors.push(ValidationError::TooSmall {
                field: field_name.to_string(),
                min,
                actual: value,
            });
        }
        self
    }

    /// First failure, if any
    pub fn result(self) -> ValidationResult {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Get all validation errors
    pub fn all_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_collects_failures() {
        let mut validator = ConfigValidator::new();
        validator
            .non_empty("default_authenticator_type", "")
            .at_least("ed25519_verify_cost", 0, 1)
            .at_least("nft_static_gas", 1000, 0);

        let errors = validator.all_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[1],
            ValidationError::TooSmall {
                field: "ed25519_verify_cost".to_string(),
                min: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_validation_error_becomes_config_error() {
        let err: TollgateError = ValidationError::Required {
            field: "x".to_string(),
        }
        .into();
        assert!(matches!(err, TollgateError::Config { .. }));
    }
}
