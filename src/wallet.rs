// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! File-backed wallet: one JSON record per account, named by address.
//!
//! ## Storage Layout
//!
//! ```text
//! <home>/
//!   0x<addr-1>    # {"address": "0x<addr-1>", "privKey": [...]}
//!   0x<addr-2>
//! ```
//!
//! Writes are open-truncate-write-close with no partial-write recovery; a
//! crash mid-write leaves a corrupt record, which `get` rejects rather than
//! silently accepts. No lock is held across check-then-act sequences, so
//! concurrent multi-process mutation of the same address is last-writer-wins.
//! Addresses come from fresh random keys, so distinct processes creating
//! accounts never collide on a filename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::account::Account;
use crate::error::{Error, Result};
use crate::keys;

/// Directory-backed mapping from address to account record.
#[derive(Debug, Clone)]
pub struct LocalWallet {
    home: PathBuf,
}

impl LocalWallet {
    /// Open a wallet rooted at `home`, creating the directory (and any
    /// missing parents) if absent. A trailing path separator is trimmed.
    pub fn open(home: impl AsRef<Path>) -> Result<Self> {
        let home = home.as_ref();
        let home = match home.to_str() {
            Some(s) => PathBuf::from(s.trim_end_matches('/')),
            None => home.to_path_buf(),
        };

        fs::create_dir_all(&home)
            .map_err(|e| Error::Storage(format!("mkdir wallet home dir: {e}")))?;

        Ok(Self { home })
    }

    /// The wallet root directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    fn account_path(&self, address: &str) -> PathBuf {
        self.home.join(address)
    }

    /// Write the account record to the file named by its address,
    /// overwriting any existing record for that address.
    pub fn store(&self, account: &Account) -> Result<()> {
        let bytes = serde_json::to_vec(account)
            .map_err(|e| Error::Storage(format!("invalid account: {e}")))?;

        fs::write(self.account_path(&account.address), bytes)
            .map_err(|e| Error::Storage(format!("write account file: {e}")))?;

        tracing::debug!(address = %account.address, "stored account");
        Ok(())
    }

    /// Load the account stored under `address`.
    ///
    /// The embedded address is re-verified against the filename, and the key
    /// material is decoded to prove the record is signer-ready. Corrupt
    /// records fail loudly; they are never repaired or discarded here.
    pub fn get(&self, address: &str) -> Result<Account> {
        let bytes = match fs::read(self.account_path(address)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(address.to_string()));
            }
            Err(e) => return Err(Error::Storage(format!("read account file: {e}"))),
        };

        let account: Account =
            serde_json::from_slice(&bytes).map_err(|e| Error::CorruptRecord {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        if account.address != address {
            return Err(Error::AddressMismatch {
                expected: address.to_string(),
                found: account.address,
            });
        }

        keys::decode(&account.priv_key).map_err(|e| Error::CorruptRecord {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        Ok(account)
    }

    /// List stored account addresses in directory-enumeration order.
    ///
    /// Subdirectories and entries that do not hold a valid account record
    /// for their own filename are skipped. Callers needing a deterministic
    /// order must sort.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.home)
            .map_err(|e| Error::Storage(format!("read wallet dir: {e}")))?;

        let mut addresses = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Storage(format!("read wallet dir: {e}")))?;
            if entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            let valid = fs::read(entry.path())
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Account>(&bytes).ok())
                .is_some_and(|account| account.address == name);
            if valid {
                addresses.push(name);
            } else {
                tracing::debug!(entry = %name, "skipping non-account entry in wallet dir");
            }
        }

        Ok(addresses)
    }

    /// Delete the named accounts, stopping at the first failure.
    ///
    /// Not atomic across addresses: accounts removed before the failing one
    /// stay removed, accounts after it stay untouched.
    pub fn delete_many<I, S>(&self, addresses: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for address in addresses {
            let address = address.as_ref();
            match fs::remove_file(self.account_path(address)) {
                Ok(()) => tracing::info!(%address, "account deleted"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(Error::NotFound(address.to_string()));
                }
                Err(e) => {
                    return Err(Error::Storage(format!("delete account {address}: {e}")));
                }
            }
        }
        Ok(())
    }
}
