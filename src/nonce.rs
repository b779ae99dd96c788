// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Nonce queries against the depository and market services.
//!
//! Nonces are authoritative on the service side; nothing is cached or
//! incremented locally, and every signing operation re-fetches.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Source of the next nonce the external service will accept for an address.
pub trait NonceFetcher {
    fn fetch(&self, account: &str) -> Result<u64>;
}

#[derive(Debug, Deserialize)]
struct NonceResponse {
    nonce: u64,
}

/// Blocking HTTP nonce fetcher: GET `<host><path>?account=<address>`.
pub struct HttpNonceFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpNonceFetcher {
    /// Build a fetcher for the given host and nonce-query path.
    ///
    /// `insecure` disables TLS certificate verification for development
    /// endpoints; leave it off everywhere else.
    pub fn new(host: &str, path: &str, insecure: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| Error::NonceFetch(format!("build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{host}{path}"),
        })
    }
}

impl NonceFetcher for HttpNonceFetcher {
    fn fetch(&self, account: &str) -> Result<u64> {
        tracing::debug!(%account, endpoint = %self.endpoint, "fetching current nonce");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("account", account)])
            .send()
            .map_err(|e| Error::NonceFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::NonceFetch(format!(
                "expected success status, got {}",
                status.as_u16()
            )));
        }

        let body: NonceResponse = response
            .json()
            .map_err(|e| Error::NonceFetch(format!("undecodable nonce response: {e}")))?;

        Ok(body.nonce)
    }
}
