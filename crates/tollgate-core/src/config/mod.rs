//! Configuration loading and validation

pub mod traits;
pub mod validation;

pub use traits::{parse_u64, TollgateConfig, ENV_PREFIX};
pub use validation::{ConfigValidator, ValidationError, ValidationResult};
