// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Builds the form-encoded request bodies the depository and market
//! services expect for their create operations.
//!
//! The signed paths resolve an account from the wallet, fetch the current
//! nonce, and sign the domain payload; the untrusted depository path carries
//! the bare payload and stays a separate constructor so the two trust modes
//! cannot be confused at the call site.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::account::Account;
use crate::error::{Error, Result};
use crate::nonce::NonceFetcher;
use crate::wallet::LocalWallet;

/// Content record notarized by the depository service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDepository {
    pub name: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// Hash of the notarized file.
    #[serde(rename = "contentID")]
    pub content_id: String,
    #[serde(rename = "trustedTimestamp")]
    pub trusted_timestamp: String,
    pub platform: String,
}

impl ValueDepository {
    /// Build a record stamped with the current Unix time.
    pub fn new(name: &str, content_type: &str, content_id: &str, platform: &str) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type.to_string(),
            content_id: content_id.to_string(),
            trusted_timestamp: Utc::now().timestamp().to_string(),
            platform: platform.to_string(),
        }
    }

    /// Base64 of the record's JSON serialization.
    pub fn to_base64(&self) -> Result<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| Error::Transport(format!("encode depository value: {e}")))?;
        Ok(BASE64.encode(json))
    }
}

fn encode_form(pairs: &[(&str, &str)]) -> String {
    let mut body = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        body.append_pair(key, value);
    }
    body.finish()
}

/// Untrusted depository body: the bare payload under `value`, no account or
/// signature involved. Deliberately a free function so the weaker trust mode
/// cannot be mistaken for the signed builder paths.
pub fn untrusted_depository_form(payload: &ValueDepository) -> Result<String> {
    let value = payload.to_base64()?;
    Ok(encode_form(&[("value", &value)]))
}

/// Composes signed create-request bodies.
pub struct SignedRequestBuilder<'a, N: NonceFetcher> {
    wallet: &'a LocalWallet,
    nonce_fetcher: &'a N,
}

impl<'a, N: NonceFetcher> SignedRequestBuilder<'a, N> {
    pub fn new(wallet: &'a LocalWallet, nonce_fetcher: &'a N) -> Self {
        Self {
            wallet,
            nonce_fetcher,
        }
    }

    /// Signed depository body for the wallet account stored under `address`:
    /// `message=<envelope>&value=<payload>`.
    pub fn depository_form(&self, address: &str, payload: &ValueDepository) -> Result<String> {
        let account = self.wallet.get(address)?;
        self.depository_form_for(&account, payload)
    }

    /// Signed depository body for an account held in memory (e.g. a
    /// throwaway identity that was never stored).
    pub fn depository_form_for(
        &self,
        account: &Account,
        payload: &ValueDepository,
    ) -> Result<String> {
        let value = payload.to_base64()?;
        let nonce = self.nonce_fetcher.fetch(&account.address)?;
        let message = account.sign_and_encode(nonce, &[&value])?;

        tracing::debug!(address = %account.address, nonce, "built signed depository request");
        Ok(encode_form(&[("message", &message), ("value", &value)]))
    }

    /// Signed market registration body: `message=<envelope>&url=<repo-url>`.
    pub fn market_repo_form(&self, address: &str, repo_url: &str) -> Result<String> {
        let account = self.wallet.get(address)?;
        let nonce = self.nonce_fetcher.fetch(&account.address)?;
        let message = account.sign_and_encode(nonce, &[repo_url])?;

        tracing::debug!(address = %account.address, nonce, "built signed market request");
        Ok(encode_form(&[("message", &message), ("url", repo_url)]))
    }
}
