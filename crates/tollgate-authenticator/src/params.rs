//! Gas and limit parameters for the authenticator module

use crate::signature::SIGNATURE_VERIFICATION_TYPE;
use serde::{Deserialize, Serialize};
use tollgate_core::config::{parse_u64, ConfigValidator, TollgateConfig};
use tollgate_core::{Gas, Result, TollgateError};

/// Parameters shared by the authenticators and the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticatorParams {
    /// Static gas of the signature-verification authenticator
    pub signature_static_gas: Gas,
    /// Gas charged per ed25519 verification
    pub ed25519_verify_cost: Gas,
    /// Static gas of the NFT authenticator
    pub nft_static_gas: Gas,
    /// Maximum stored authenticators per account
    pub max_authenticators_per_account: u64,
    /// Type used for accounts with no stored authenticator
    pub default_authenticator_type: String,
}

impl Default for AuthenticatorParams {
    fn default() -> Self {
        Self {
            signature_static_gas: 100,
            ed25519_verify_cost: 590,
            nft_static_gas: 1000,
            max_authenticators_per_account: 15,
            default_authenticator_type: SIGNATURE_VERIFICATION_TYPE.to_string(),
        }
    }
}

impl TollgateConfig for AuthenticatorParams {
    fn from_toml_str(content: &str) -> Result<Self> {
        let params: Self = toml::from_str(content)
            .map_err(|e| TollgateError::config(format!("Invalid TOML: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "signature_static_gas" => self.signature_static_gas = parse_u64(key, value)?,
            "ed25519_verify_cost" => self.ed25519_verify_cost = parse_u64(key, value)?,
            "nft_static_gas" => self.nft_static_gas = parse_u64(key, value)?,
            "max_authenticators_per_account" => {
                self.max_authenticators_per_account = parse_u64(key, value)?;
            }
            "default_authenticator_type" => self.default_authenticator_type = value.to_string(),
            _ => {
                return Err(TollgateError::config(format!(
                    "unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let mut validator = ConfigValidator::new();
        validator
            .at_least("ed25519_verify_cost", self.ed25519_verify_cost, 1)
            .at_least(
                "max_authenticators_per_account",
                self.max_authenticators_per_account,
                1,
            )
            .non_empty("default_authenticator_type", &self.default_authenticator_type);
        validator.result()?;
        Ok(())
    }
}
