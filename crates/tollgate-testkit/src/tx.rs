//! Signed transaction builder
//!
//! Signatures are produced in `build`, after every message is known, so the
//! sign doc they cover is the final one.

use crate::keys::KeyTestFixture;
use tollgate_core::{sign_bytes, Message, SignatureV2, Tx};

#[derive(Debug, Clone)]
enum PendingSignature {
    Signed {
        key: KeyTestFixture,
        sequence: u64,
    },
    /// Empty signature data, as submitted by gas-estimation clients
    Simulated {
        key: KeyTestFixture,
        sequence: u64,
    },
}

/// Builder for transactions signed by test keys.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    chain_id: String,
    memo: String,
    messages: Vec<Message>,
    signatures: Vec<PendingSignature>,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    /// Chain id used by default and by test contexts
    pub const DEFAULT_CHAIN_ID: &'static str = "tollgate-test";

    pub fn new() -> Self {
        Self {
            chain_id: Self::DEFAULT_CHAIN_ID.to_string(),
            memo: String::new(),
            messages: Vec::new(),
            signatures: Vec::new(),
        }
    }

    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Append a signature slot signed by `key` at sequence 0
    pub fn sign(self, key: &KeyTestFixture) -> Self {
        self.sign_with_sequence(key, 0)
    }

    pub fn sign_with_sequence(mut self, key: &KeyTestFixture, sequence: u64) -> Self {
        self.signatures.push(PendingSignature::Signed {
            key: key.clone(),
            sequence,
        });
        self
    }

    /// Append a slot declaring `key` with empty signature data
    pub fn simulated_signature(mut self, key: &KeyTestFixture) -> Self {
        self.signatures.push(PendingSignature::Simulated {
            key: key.clone(),
            sequence: 0,
        });
        self
    }

    pub fn build(self) -> Tx {
        let mut tx = Tx {
            chain_id: self.chain_id,
            messages: self.messages,
            memo: self.memo,
            signatures: Vec::new(),
        };
        let sign_doc = tx.sign_doc().expect("test transaction encodes");

        tx.signatures = self
            .signatures
            .into_iter()
            .map(|pending| match pending {
                PendingSignature::Signed { key, sequence } => SignatureV2 {
                    pub_key: key.public_key(),
                    data: key.sign(&sign_bytes(&sign_doc, sequence)),
                    sequence,
                },
                PendingSignature::Simulated { key, sequence } => SignatureV2 {
                    pub_key: key.public_key(),
                    data: Vec::new(),
                    sequence,
                },
            })
            .collect();
        tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_cover_final_sign_doc() {
        let alice = KeyTestFixture::from_seed_string("alice");
        let tx = TxBuilder::new()
            .sign_with_sequence(&alice, 4)
            .message(alice.message("/bank.MsgSend"))
            .memo("late memo")
            .build();

        let signature = &tx.signatures[0];
        assert_eq!(signature.sequence, 4);
        let bytes = sign_bytes(&tx.sign_doc().unwrap(), 4);
        assert!(alice.public_key().verify(&bytes, &signature.data));
    }

    #[test]
    fn test_simulated_signature_is_empty() {
        let alice = KeyTestFixture::from_seed_string("alice");
        let tx = TxBuilder::new()
            .message(alice.message("/bank.MsgSend"))
            .simulated_signature(&alice)
            .build();

        assert!(tx.signatures[0].data.is_empty());
        assert_eq!(tx.signatures[0].pub_key, alice.public_key());
    }

    #[test]
    fn test_chain_id_is_signed() {
        let alice = KeyTestFixture::from_seed_string("alice");
        let tx = TxBuilder::new()
            .chain_id("other-chain")
            .message(alice.message("/bank.MsgSend"))
            .sign(&alice)
            .build();

        let mut replayed = tx.clone();
        replayed.chain_id = TxBuilder::DEFAULT_CHAIN_ID.to_string();
        let bytes = sign_bytes(&replayed.sign_doc().unwrap(), 0);
        assert!(!alice.public_key().verify(&bytes, &tx.signatures[0].data));
    }
}
