// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! bcwallet - Wallet and signed-request client library
//!
//! This crate manages local P-256 accounts in a file-backed wallet and
//! builds the signed form requests the depository and market services
//! accept.
//!
//! ## Modules
//!
//! - `wallet` - File-backed account store keyed by address
//! - `account` - Accounts and signed message envelopes
//! - `keys` - Key generation, PEM/DER codec, address derivation
//! - `nonce` - Per-address nonce queries against the services
//! - `request` - Signed and untrusted request-body construction
//! - `transport` - Form-POST submission with explicit credentials

pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod keys;
pub mod nonce;
pub mod request;
pub mod transport;
pub mod wallet;

pub use account::{Account, SignedEnvelope};
pub use error::{Error, Result};
pub use nonce::{HttpNonceFetcher, NonceFetcher};
pub use request::{SignedRequestBuilder, ValueDepository};
pub use wallet::LocalWallet;
