// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Form-encoded HTTP submission for the depository and market services.
//!
//! Credentials are explicit arguments on every call; there is no ambient
//! process-wide token.

use std::time::Duration;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer credential for authenticated service calls.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    // Never log the token itself.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Blocking HTTP transport for form submissions.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport. `insecure` disables TLS certificate verification
    /// for development endpoints; leave it off everywhere else.
    pub fn new(insecure: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| Error::Transport(format!("build http client: {e}")))?;

        Ok(Self { client })
    }

    /// POST an `application/x-www-form-urlencoded` body and return the
    /// response body on success.
    pub fn post_form(
        &self,
        url: &str,
        body: String,
        token: Option<&BearerToken>,
    ) -> Result<String> {
        tracing::debug!(%url, "submitting form request");

        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Transport(format!(
                "expected success status, got {}: {text}",
                status.as_u16()
            )));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_debug_is_redacted() {
        let token = BearerToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "BearerToken(***)");
        assert_eq!(token.as_str(), "secret-value");
    }

    #[test]
    fn transport_builds_with_both_tls_modes() {
        assert!(HttpTransport::new(false).is_ok());
        assert!(HttpTransport::new(true).is_ok());
    }
}
