// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Error taxonomy shared by the wallet, signing, and request-building paths.
//!
//! None of these represent a retryable transient condition; retry policy
//! (e.g. re-fetching a nonce after a rejected submission) is the caller's
//! decision.

/// Errors raised by wallet, key, signing, and request operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid private key: {0}")]
    KeyDecode(String),

    #[error("invalid public key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("account {0} not found")]
    NotFound(String),

    #[error("corrupt account record {address}: {reason}")]
    CorruptRecord { address: String, reason: String },

    #[error("account file {expected} holds address {found}")]
    AddressMismatch { expected: String, found: String },

    #[error("nonce fetch failed: {0}")]
    NonceFetch(String),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Result type for wallet and signing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = Error::NotFound("0xabc".to_string());
        assert_eq!(err.to_string(), "account 0xabc not found");

        let err = Error::AddressMismatch {
            expected: "0xaaa".to_string(),
            found: "0xbbb".to_string(),
        };
        assert_eq!(err.to_string(), "account file 0xaaa holds address 0xbbb");

        let err = Error::CorruptRecord {
            address: "0xccc".to_string(),
            reason: "truncated".to_string(),
        };
        assert!(err.to_string().contains("0xccc"));
        assert!(err.to_string().contains("truncated"));
    }
}
