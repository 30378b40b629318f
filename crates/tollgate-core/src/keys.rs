//! Public keys and the address-derivation rule

use crate::errors::{Result, TollgateError};
use crate::identifiers::AccountAddress;
use ed25519_dalek::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ed25519 public key declared by a transaction signature.
///
/// Construction validates that the bytes encode a curve point, so a
/// `PublicKey` can always be turned into a verifying key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Byte length of an encoded key.
    pub const LEN: usize = 32;

    /// Parse and validate an encoded key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| {
            TollgateError::config(format!(
                "public key must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| TollgateError::config(format!("invalid ed25519 public key: {e}")))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Address of the account controlled by this key.
    pub fn address(&self) -> AccountAddress {
        AccountAddress::from_public_key(self)
    }

    /// Check `signature` over `message`.
    ///
    /// Malformed signature bytes verify as `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify_strict(message, &signature).is_ok()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key.to_bytes())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signing_key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    #[test]
    fn test_verify_valid_signature() {
        let key = signing_key(1);
        let public_key = PublicKey::from(key.verifying_key());
        let signature = key.sign(b"sign bytes");

        assert!(public_key.verify(b"sign bytes", &signature.to_bytes()));
        assert!(!public_key.verify(b"other bytes", &signature.to_bytes()));
    }

    #[test]
    fn test_verify_rejects_malformed_signature() {
        let public_key = PublicKey::from(signing_key(2).verifying_key());
        assert!(!public_key.verify(b"sign bytes", &[0u8; 10]));
        assert!(!public_key.verify(b"sign bytes", &[]));
    }

    #[test]
    fn test_from_bytes_checks_length() {
        let err = PublicKey::from_bytes(&[1u8; 33]).unwrap_err();
        assert!(matches!(err, TollgateError::Config { .. }));
    }

    #[test]
    fn test_address_is_deterministic_and_distinct() {
        let alice = PublicKey::from(signing_key(3).verifying_key());
        let bob = PublicKey::from(signing_key(4).verifying_key());
        assert_eq!(alice.address(), alice.address());
        assert_ne!(alice.address(), bob.address());
    }
}
