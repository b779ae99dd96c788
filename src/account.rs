// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Accounts pair an address with PEM-encoded private key material and
//! produce the signed message envelopes the depository and market services
//! verify.
//!
//! The signer is decoded from the key material at signing time and is never
//! persisted. Nonces are always supplied by the caller: freshness has to be
//! negotiated against the external service's counter, and a locally chosen
//! nonce would race across concurrent invocations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use p256::ecdsa::signature::{Signer as _, Verifier as _};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys;

/// A local identity: an address and its PEM-encoded private key.
///
/// This struct is also the wallet's on-disk record; `privKey` matches the
/// field name the stored JSON carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    #[serde(rename = "privKey")]
    pub priv_key: Vec<u8>,
}

/// Signed wrapper around a nonce and payload, submitted base64-encoded.
///
/// Field order is the wire order; the receiving service re-derives the
/// signer's identity from `publicKey` and `signature`, not from a separately
/// transmitted address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub nonce: u64,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub signature: String,
}

/// The exact byte sequence covered by an envelope signature: the decimal
/// rendering of the nonce followed by every payload part in order.
fn message_bytes(nonce: u64, parts: &[&str]) -> Vec<u8> {
    let mut buf = nonce.to_string().into_bytes();
    for part in parts {
        buf.extend_from_slice(part.as_bytes());
    }
    buf
}

impl Account {
    /// Generate a new account with a fresh P-256 keypair.
    pub fn create() -> Result<Self> {
        let key = keys::generate();
        let address = keys::address_of(&key.public_key());
        let priv_key = keys::encode(&key)?;

        tracing::debug!(%address, "generated new account");
        Ok(Self { address, priv_key })
    }

    /// Build an account from existing PEM-encoded private key bytes.
    ///
    /// The input bytes are kept verbatim as the key material; the address is
    /// always recomputed from the decoded public half, never read from
    /// storage.
    pub fn import_from(priv_key: Vec<u8>) -> Result<Self> {
        let key = keys::decode(&priv_key)?;
        let address = keys::address_of(&key.public_key());
        Ok(Self { address, priv_key })
    }

    /// Sign `nonce` plus the payload parts and return the base64-encoded
    /// envelope.
    ///
    /// The serialized envelope has a stable field order (`nonce`,
    /// `publicKey`, `signature`), so independent implementations produce
    /// byte-identical output for identical inputs.
    pub fn sign_and_encode(&self, nonce: u64, parts: &[&str]) -> Result<String> {
        let key = keys::decode(&self.priv_key)?;
        let signer = SigningKey::from(&key);

        let message = message_bytes(nonce, parts);
        let signature: Signature = signer
            .try_sign(&message)
            .map_err(|e| Error::Signing(e.to_string()))?;

        let public_point = key.public_key().to_encoded_point(false);
        let envelope = SignedEnvelope {
            nonce,
            public_key: BASE64.encode(public_point.as_bytes()),
            signature: BASE64.encode(signature.to_der().as_bytes()),
        };

        let json = serde_json::to_vec(&envelope).map_err(|e| Error::Signing(e.to_string()))?;
        Ok(BASE64.encode(json))
    }
}

impl SignedEnvelope {
    /// Decode an envelope from its base64 wire form.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let json = BASE64
            .decode(encoded)
            .map_err(|e| Error::Signing(format!("invalid envelope encoding: {e}")))?;
        serde_json::from_slice(&json).map_err(|e| Error::Signing(format!("invalid envelope: {e}")))
    }

    /// Check the signature against the embedded public key for the given
    /// payload parts.
    pub fn verify(&self, parts: &[&str]) -> Result<()> {
        let key_bytes = BASE64
            .decode(&self.public_key)
            .map_err(|e| Error::Signing(format!("invalid public key encoding: {e}")))?;
        let public = keys::public_key_from_sec1(&key_bytes)?;

        let sig_bytes = BASE64
            .decode(&self.signature)
            .map_err(|e| Error::Signing(format!("invalid signature encoding: {e}")))?;
        let signature = Signature::from_der(&sig_bytes)
            .map_err(|e| Error::Signing(format!("invalid signature: {e}")))?;

        VerifyingKey::from(&public)
            .verify(&message_bytes(self.nonce, parts), &signature)
            .map_err(|e| Error::Signing(format!("signature verification failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_produces_signer_ready_account() {
        let account = Account::create().unwrap();

        assert!(account.address.starts_with("0x"));
        assert_eq!(account.address.len(), 42);
        assert!(!account.priv_key.is_empty());

        // The stored material must decode back to the same address.
        let reimported = Account::import_from(account.priv_key.clone()).unwrap();
        assert_eq!(reimported.address, account.address);
    }

    #[test]
    fn import_keeps_input_bytes_verbatim() {
        let original = Account::create().unwrap();
        let imported = Account::import_from(original.priv_key.clone()).unwrap();

        assert_eq!(imported.priv_key, original.priv_key);
        assert_eq!(imported.address, original.address);
    }

    #[test]
    fn import_rejects_malformed_key() {
        let result = Account::import_from(b"-----BEGIN NOTHING-----".to_vec());
        assert!(matches!(result, Err(Error::KeyDecode(_))));
    }

    #[test]
    fn sign_and_encode_produces_verifiable_envelope() {
        let account = Account::create().unwrap();
        let encoded = account.sign_and_encode(7, &["abc"]).unwrap();

        let envelope = SignedEnvelope::from_base64(&encoded).unwrap();
        assert_eq!(envelope.nonce, 7);
        assert!(!envelope.public_key.is_empty());
        assert!(!envelope.signature.is_empty());

        envelope.verify(&["abc"]).unwrap();
    }

    #[test]
    fn envelope_fails_verification_for_different_payload() {
        let account = Account::create().unwrap();
        let encoded = account.sign_and_encode(1, &["payload"]).unwrap();

        let envelope = SignedEnvelope::from_base64(&encoded).unwrap();
        assert!(envelope.verify(&["tampered"]).is_err());
    }

    #[test]
    fn repeated_signing_is_verifiable_but_not_byte_stable() {
        // ECDSA uses randomized nonces, so two signatures over the same
        // input may differ; both must verify.
        let account = Account::create().unwrap();

        let first = SignedEnvelope::from_base64(&account.sign_and_encode(3, &["x"]).unwrap()).unwrap();
        let second = SignedEnvelope::from_base64(&account.sign_and_encode(3, &["x"]).unwrap()).unwrap();

        first.verify(&["x"]).unwrap();
        second.verify(&["x"]).unwrap();
        assert_eq!(first.public_key, second.public_key);
    }

    #[test]
    fn signing_covers_every_part_in_order() {
        let account = Account::create().unwrap();
        let encoded = account.sign_and_encode(9, &["ab", "cd"]).unwrap();
        let envelope = SignedEnvelope::from_base64(&encoded).unwrap();

        envelope.verify(&["ab", "cd"]).unwrap();
        // Same concatenation split differently still verifies; reordering
        // does not.
        envelope.verify(&["abcd"]).unwrap();
        assert!(envelope.verify(&["cd", "ab"]).is_err());
    }

    #[test]
    fn envelope_wire_field_order_is_stable() {
        let account = Account::create().unwrap();
        let encoded = account.sign_and_encode(5, &["v"]).unwrap();

        let json = BASE64.decode(&encoded).unwrap();
        let text = String::from_utf8(json).unwrap();

        let nonce_at = text.find("\"nonce\"").unwrap();
        let key_at = text.find("\"publicKey\"").unwrap();
        let sig_at = text.find("\"signature\"").unwrap();
        assert!(nonce_at < key_at && key_at < sig_at);
    }

    #[test]
    fn sign_with_corrupt_material_fails_with_key_decode() {
        let account = Account {
            address: "0x0000000000000000000000000000000000000000".to_string(),
            priv_key: b"garbage".to_vec(),
        };
        assert!(matches!(account.sign_and_encode(1, &["x"]), Err(Error::KeyDecode(_))));
    }
}
