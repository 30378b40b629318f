//! Account, asset and authenticator identifiers

use crate::errors::{Result, TollgateError};
use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Ledger account address.
///
/// Derived from a public key as the first 20 bytes of its SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(pub [u8; 20]);

impl AccountAddress {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    /// Derive the address that owns `public_key`.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = Sha256::digest(public_key.as_bytes());
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&digest[..Self::LEN]);
        Self(bytes)
    }

    /// Create from raw bytes, checking the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            TollgateError::invalid_transaction(format!(
                "address must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = TollgateError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| TollgateError::invalid_transaction(format!("invalid address hex: {e}")))?;
        Self::from_slice(&bytes)
    }
}

/// Registry key identifying an authenticator kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticatorType(String);

impl AuthenticatorType {
    /// Create a new authenticator type identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuthenticatorType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AuthenticatorType {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AuthenticatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asset (denomination) identifier, e.g. `factory/<creator>/nft`.
///
/// The string is opaque: it carries no version or schema tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse an asset identifier stored as an authenticator config blob.
    ///
    /// The blob must be non-empty UTF-8.
    pub fn from_config_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(TollgateError::config("asset identifier is empty"));
        }
        let value = std::str::from_utf8(bytes)
            .map_err(|e| TollgateError::config(format!("asset identifier is not UTF-8: {e}")))?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bytes persisted in the authenticator record.
    pub fn to_config_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one stored authenticator record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticatorId(pub u64);

impl fmt::Display for AuthenticatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_round_trip() {
        let address = AccountAddress([7u8; 20]);
        let parsed: AccountAddress = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_address_rejects_wrong_length() {
        assert!(AccountAddress::from_slice(&[1u8; 19]).is_err());
        assert!("abcd".parse::<AccountAddress>().is_err());
    }

    #[test]
    fn test_asset_id_from_config_bytes() {
        let asset = AssetId::from_config_bytes(b"factory/alice/nft").unwrap();
        assert_eq!(asset.as_str(), "factory/alice/nft");
        assert_eq!(asset.to_config_bytes(), b"factory/alice/nft".to_vec());
    }

    #[test]
    fn test_asset_id_rejects_malformed_bytes() {
        assert!(matches!(
            AssetId::from_config_bytes(b""),
            Err(TollgateError::Config { .. })
        ));
        assert!(matches!(
            AssetId::from_config_bytes(&[0xff, 0xfe]),
            Err(TollgateError::Config { .. })
        ));
    }
}
