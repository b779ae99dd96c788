// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! # Runtime Configuration Constants
//!
//! Environment variable names, default paths, and service endpoint paths.
//! Configuration is read from the environment at invocation time; command
//! flags always win over the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `BCWALLET_HOME` | Wallet directory holding account files | `$HOME/.bcwallet/wallet` |
//! | `BCWALLET_DEPOSITORY_HOST` | Base URL of the depository service | Required unless `--host` given |
//! | `BCWALLET_MARKET_HOST` | Base URL of the market service | Required unless `--host` given |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the wallet home directory.
pub const WALLET_HOME_ENV: &str = "BCWALLET_HOME";

/// Environment variable naming the depository service base URL.
pub const DEPOSITORY_HOST_ENV: &str = "BCWALLET_DEPOSITORY_HOST";

/// Environment variable naming the market service base URL.
pub const MARKET_HOST_ENV: &str = "BCWALLET_MARKET_HOST";

/// Wallet directory relative to `$HOME` when nothing overrides it.
pub const WALLET_HOME_DIR: &str = ".bcwallet/wallet";

// ========== Service Endpoint Paths ==========

/// Create a depository (signed).
pub const CREATE_DEPOSITORY: &str = "/basic/putValue";
/// Create a depository (untrusted, unsigned).
pub const CREATE_UNTRUSTED_DEPOSITORY: &str = "/basic/putUntrustValue";
/// Current depository nonce for an account.
pub const DEPOSITORY_CURRENT_NONCE: &str = "/basic/currentNonce";
/// Register a market repository.
pub const CREATE_REPOSITORY: &str = "/market/repo";
/// Current market nonce for an account.
pub const MARKET_CURRENT_NONCE: &str = "/market/nonce";

/// Resolve the wallet home: explicit flag, then `BCWALLET_HOME`, then
/// `$HOME/.bcwallet/wallet`.
pub fn wallet_home(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = env::var(WALLET_HOME_ENV) {
        return PathBuf::from(dir);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(WALLET_HOME_DIR)
}

/// Resolve a service host: explicit flag first, then the named environment
/// variable.
pub fn resolve_host(flag: Option<String>, env_key: &str) -> Option<String> {
    flag.or_else(|| env::var(env_key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_wire_contract() {
        assert_eq!(CREATE_DEPOSITORY, "/basic/putValue");
        assert_eq!(CREATE_UNTRUSTED_DEPOSITORY, "/basic/putUntrustValue");
        assert_eq!(DEPOSITORY_CURRENT_NONCE, "/basic/currentNonce");
        assert_eq!(CREATE_REPOSITORY, "/market/repo");
        assert_eq!(MARKET_CURRENT_NONCE, "/market/nonce");
    }

    #[test]
    fn explicit_flag_wins_over_environment() {
        let flagged = wallet_home(Some(PathBuf::from("/tmp/explicit")));
        assert_eq!(flagged, PathBuf::from("/tmp/explicit"));

        let host = resolve_host(Some("https://flagged".to_string()), "BCWALLET_UNSET_VAR");
        assert_eq!(host.as_deref(), Some("https://flagged"));
    }

    #[test]
    fn missing_host_resolves_to_none() {
        assert_eq!(resolve_host(None, "BCWALLET_DEFINITELY_UNSET"), None);
    }
}
