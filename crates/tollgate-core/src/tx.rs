//! Transactions, messages and transaction-scoped authentication data

use crate::errors::{Result, TollgateError};
use crate::identifiers::AccountAddress;
use crate::keys::PublicKey;
use serde::{Deserialize, Serialize};

/// A message carried by a transaction.
///
/// The body is opaque to authentication; only the signer list matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Type URL used by the host router, e.g. `/bank.MsgSend`
    pub type_url: String,
    /// Accounts on whose behalf the message executes
    pub signers: Vec<AccountAddress>,
    /// Encoded message body
    pub value: Vec<u8>,
}

impl Message {
    pub fn new(type_url: impl Into<String>, signers: Vec<AccountAddress>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            signers,
            value,
        }
    }

    /// The account this message acts for.
    pub fn primary_signer(&self) -> Option<&AccountAddress> {
        self.signers.first()
    }
}

/// One signature slot of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureV2 {
    /// Key the signature claims to be made with
    pub pub_key: PublicKey,
    /// Raw signature bytes (empty in simulation)
    pub data: Vec<u8>,
    /// Sequence committed into the sign bytes
    pub sequence: u64,
}

/// A transaction as handed to the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub chain_id: String,
    pub messages: Vec<Message>,
    pub memo: String,
    /// Signature slot `i` belongs to `signers()[i]`
    pub signatures: Vec<SignatureV2>,
}

#[derive(Serialize)]
struct SignDoc<'a> {
    chain_id: &'a str,
    messages: &'a [Message],
    memo: &'a str,
}

impl Tx {
    /// Distinct message signers in first-appearance order.
    pub fn signers(&self) -> Vec<AccountAddress> {
        let mut signers: Vec<AccountAddress> = Vec::new();
        for signer in self.messages.iter().flat_map(|message| message.signers.iter()) {
            if !signers.contains(signer) {
                signers.push(*signer);
            }
        }
        signers
    }

    /// Canonical encoding of the signed body, shared by every signature slot.
    pub fn sign_doc(&self) -> Result<Vec<u8>> {
        self.sign_doc_for(&self.chain_id)
    }

    /// Signed body bound to `chain_id` rather than the chain the transaction
    /// claims. Verifiers pass the executing chain here so a signature made
    /// for another chain never matches.
    pub fn sign_doc_for(&self, chain_id: &str) -> Result<Vec<u8>> {
        let doc = SignDoc {
            chain_id,
            messages: &self.messages,
            memo: &self.memo,
        };
        Ok(bincode::serialize(&doc)?)
    }
}

/// Bytes a signature with `sequence` must cover.
pub fn sign_bytes(sign_doc: &[u8], sequence: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(sign_doc.len() + 8);
    bytes.extend_from_slice(sign_doc);
    bytes.extend_from_slice(&sequence.to_be_bytes());
    bytes
}

/// Which part of a transaction authentication data is extracted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageScope {
    /// Not scoped to a single message (simulation / global extraction)
    Global,
    /// The message at this index
    Message(usize),
}

impl MessageScope {
    /// Raw sentinel used by hosts for `Global`.
    pub const GLOBAL_SENTINEL: i64 = -1;

    /// Interpret a host-supplied index; `-1` means `Global`.
    pub fn from_raw(index: i64) -> Result<Self> {
        match index {
            Self::GLOBAL_SENTINEL => Ok(Self::Global),
            index if index >= 0 => usize::try_from(index)
                .map(Self::Message)
                .map_err(|_| TollgateError::invalid_transaction("message index overflow")),
            index => Err(TollgateError::invalid_transaction(format!(
                "invalid message index {index}"
            ))),
        }
    }
}

/// Signers paired with their signatures for one authentication cycle.
///
/// Position `i` in `signers` corresponds to position `i` in `signatures`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationData {
    signers: Vec<AccountAddress>,
    signatures: Vec<SignatureV2>,
    sign_doc: Vec<u8>,
    simulate: bool,
}

impl AuthenticationData {
    /// Pair signers with signatures; the lists must have equal length.
    pub fn new(
        signers: Vec<AccountAddress>,
        signatures: Vec<SignatureV2>,
        sign_doc: Vec<u8>,
        simulate: bool,
    ) -> Result<Self> {
        if signers.len() != signatures.len() {
            return Err(TollgateError::invalid_transaction(format!(
                "{} signers but {} signatures",
                signers.len(),
                signatures.len()
            )));
        }
        Ok(Self {
            signers,
            signatures,
            sign_doc,
            simulate,
        })
    }

    /// Data with no signers, as produced by signature-less execution paths.
    pub fn empty(simulate: bool) -> Self {
        Self {
            signers: Vec::new(),
            signatures: Vec::new(),
            sign_doc: Vec::new(),
            simulate,
        }
    }

    pub fn signers(&self) -> &[AccountAddress] {
        &self.signers
    }

    pub fn signatures(&self) -> &[SignatureV2] {
        &self.signatures
    }

    pub fn sign_doc(&self) -> &[u8] {
        &self.sign_doc
    }

    pub fn is_simulation(&self) -> bool {
        self.simulate
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// The signer/signature pair at `index`.
    pub fn get(&self, index: usize) -> Option<(&AccountAddress, &SignatureV2)> {
        Some((self.signers.get(index)?, self.signatures.get(index)?))
    }

    pub fn first_signature(&self) -> Option<&SignatureV2> {
        self.signatures.first()
    }

    /// The signature in the slot of `account`.
    pub fn signature_for(&self, account: &AccountAddress) -> Option<&SignatureV2> {
        let index = self.signers.iter().position(|signer| signer == account)?;
        self.signatures.get(index)
    }

    /// The first signature declaring `pub_key`.
    pub fn signature_by_key(&self, pub_key: &PublicKey) -> Option<&SignatureV2> {
        self.signatures
            .iter()
            .find(|signature| signature.pub_key == *pub_key)
    }

    /// Sign bytes for a signature carrying `sequence`.
    pub fn sign_bytes(&self, sequence: u64) -> Vec<u8> {
        sign_bytes(&self.sign_doc, sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;

    fn key(seed: u8) -> PublicKey {
        PublicKey::from(SigningKey::from_bytes(&[seed; 32]).verifying_key())
    }

    fn tx_with_signers(signers: &[&[AccountAddress]]) -> Tx {
        Tx {
            chain_id: "tollgate-test".to_string(),
            messages: signers
                .iter()
                .map(|s| Message::new("/test.Msg", s.to_vec(), vec![]))
                .collect(),
            memo: String::new(),
            signatures: vec![],
        }
    }

    #[test]
    fn test_signers_are_distinct_in_order() {
        let a = AccountAddress([1; 20]);
        let b = AccountAddress([2; 20]);
        let tx = tx_with_signers(&[&[b], &[a, b], &[a]]);
        assert_eq!(tx.signers(), vec![b, a]);
    }

    #[test]
    fn test_sign_doc_depends_on_chain_id() {
        let a = AccountAddress([1; 20]);
        let tx = tx_with_signers(&[&[a]]);
        let mut other = tx.clone();
        other.chain_id = "other-chain".to_string();
        assert_ne!(tx.sign_doc().unwrap(), other.sign_doc().unwrap());
    }

    #[test]
    fn test_sign_doc_for_ignores_claimed_chain() {
        let a = AccountAddress([1; 20]);
        let tx = tx_with_signers(&[&[a]]);
        let mut other = tx.clone();
        other.chain_id = "other-chain".to_string();
        assert_eq!(tx.sign_doc().unwrap(), other.sign_doc_for("tollgate-test").unwrap());
        assert_ne!(
            other.sign_doc().unwrap(),
            other.sign_doc_for("tollgate-test").unwrap()
        );
    }

    #[test]
    fn test_message_scope_from_raw() {
        assert_eq!(MessageScope::from_raw(-1).unwrap(), MessageScope::Global);
        assert_eq!(MessageScope::from_raw(3).unwrap(), MessageScope::Message(3));
        assert!(MessageScope::from_raw(-2).is_err());
    }

    #[test]
    fn test_authentication_data_rejects_unequal_lists() {
        let signature = SignatureV2 {
            pub_key: key(1),
            data: vec![],
            sequence: 0,
        };
        let result = AuthenticationData::new(vec![], vec![signature], vec![], false);
        assert!(matches!(
            result,
            Err(TollgateError::InvalidTransaction { .. })
        ));
    }

    #[test]
    fn test_empty_data_access_is_guarded() {
        let data = AuthenticationData::empty(false);
        assert!(data.is_empty());
        assert!(data.first_signature().is_none());
        assert!(data.get(0).is_none());
        assert!(data.signature_for(&AccountAddress([0; 20])).is_none());
    }

    #[test]
    fn test_signature_lookup() {
        let alice = key(1);
        let bob = key(2);
        let data = AuthenticationData::new(
            vec![alice.address(), bob.address()],
            vec![
                SignatureV2 {
                    pub_key: alice,
                    data: vec![1],
                    sequence: 0,
                },
                SignatureV2 {
                    pub_key: bob,
                    data: vec![2],
                    sequence: 4,
                },
            ],
            b"doc".to_vec(),
            false,
        )
        .unwrap();

        assert_eq!(data.signature_for(&bob.address()).unwrap().data, vec![2]);
        assert_eq!(data.signature_by_key(&alice).unwrap().data, vec![1]);
        assert_eq!(data.sign_bytes(4), sign_bytes(b"doc", 4));
    }
}
