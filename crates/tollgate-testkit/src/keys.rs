//! Key test helpers
//!
//! Deterministic ed25519 keys derived from seed strings, so every test run
//! signs with the same keys and derives the same addresses.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use tollgate_core::{AccountAddress, Message, PublicKey};

/// Key test fixture for consistent test key generation
#[derive(Debug, Clone)]
pub struct KeyTestFixture {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyTestFixture {
    /// Create a new key fixture with deterministic generation from a seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Create a key fixture from a seed string
    pub fn from_seed_string(seed: &str) -> Self {
        let mut seed_bytes = [0u8; 32];
        seed_bytes.copy_from_slice(&Sha256::digest(seed.as_bytes()));
        Self::from_seed(&seed_bytes)
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self.verifying_key)
    }

    /// Address derived from this key
    pub fn address(&self) -> AccountAddress {
        self.public_key().address()
    }

    /// A message of `type_url` whose only signer is this key's address
    pub fn message(&self, type_url: &str) -> Message {
        Message::new(type_url, vec![self.address()], Vec::new())
    }

    /// Raw signature bytes over `bytes`
    pub fn sign(&self, bytes: &[u8]) -> Vec<u8> {
        self.signing_key.sign(bytes).to_bytes().to_vec()
    }
}

/// Keys for `count` parties seeded from `base_seed`
pub fn test_keys_seeded(count: usize, base_seed: &str) -> Vec<KeyTestFixture> {
    (0..count)
        .map(|i| KeyTestFixture::from_seed_string(&format!("{base_seed}-{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_keys_are_deterministic() {
        let first = KeyTestFixture::from_seed_string("alice");
        let second = KeyTestFixture::from_seed_string("alice");
        assert_eq!(first.public_key(), second.public_key());
        assert_eq!(first.address(), second.address());
        assert_ne!(
            first.address(),
            KeyTestFixture::from_seed_string("bob").address()
        );
    }

    #[test]
    fn test_signature_verifies_with_public_key() {
        let key = KeyTestFixture::from_seed_string("alice");
        let signature = key.sign(b"payload");
        assert!(key.public_key().verify(b"payload", &signature));
        assert!(!key.public_key().verify(b"other payload", &signature));
    }

    #[test]
    fn test_message_is_signed_by_owner() {
        let key = KeyTestFixture::from_seed_string("alice");
        let message = key.message("/bank.MsgSend");
        assert_eq!(message.primary_signer(), Some(&key.address()));
    }

    #[test]
    fn test_seeded_key_sets() {
        let keys = test_keys_seeded(3, "party");
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[1].address(), test_keys_seeded(2, "party")[1].address());
    }
}
