// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 The Bcwallet Authors

//! Command-line interface: account management plus depository and market
//! create flows.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::account::Account;
use crate::config;
use crate::error::{Error, Result};
use crate::nonce::HttpNonceFetcher;
use crate::request::{self, SignedRequestBuilder, ValueDepository};
use crate::transport::{BearerToken, HttpTransport};
use crate::wallet::LocalWallet;

#[derive(Debug, Parser)]
#[command(name = "bcwallet")]
#[command(about = "Wallet and signed-request client for the blockchain platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage local accounts
    #[command(subcommand)]
    Account(AccountCommands),
    /// Depository content notarization
    #[command(subcommand)]
    Depository(DepositoryCommands),
    /// Market repository registration
    #[command(subcommand)]
    Market(MarketCommands),
}

#[derive(Debug, Args)]
pub struct WalletOpts {
    /// Wallet directory (defaults to BCWALLET_HOME, then ~/.bcwallet/wallet)
    #[arg(long, value_name = "DIR")]
    pub wallet: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// Create an account, generating a keypair unless --pk provides one
    Create {
        /// PEM private key file to import instead of generating a new key
        #[arg(long, value_name = "FILE")]
        pk: Option<PathBuf>,
        #[command(flatten)]
        wallet: WalletOpts,
    },
    /// List account addresses stored in the wallet
    List {
        #[command(flatten)]
        wallet: WalletOpts,
    },
    /// Delete accounts by address (stops at the first failure)
    Delete {
        /// Account addresses to delete
        #[arg(required = true, value_name = "ADDRESS")]
        addresses: Vec<String>,
        #[command(flatten)]
        wallet: WalletOpts,
    },
}

#[derive(Debug, Args)]
pub struct ServiceOpts {
    /// Service base URL (falls back to the matching environment variable)
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,
    /// Bearer token for authenticated endpoints
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
    /// Skip TLS certificate verification (development endpoints only)
    #[arg(long)]
    pub insecure: bool,
}

#[derive(Debug, Subcommand)]
pub enum DepositoryCommands {
    /// Notarize a content record
    Create {
        /// Depot name
        #[arg(long)]
        name: String,
        /// Content MIME type
        #[arg(long, value_name = "TYPE")]
        content_type: String,
        /// Content identifier (file hash)
        #[arg(long, value_name = "ID")]
        content_id: String,
        /// Source platform
        #[arg(long)]
        platform: String,
        /// Submit without an endorsing signature
        #[arg(long)]
        untrusted: bool,
        /// Wallet account to sign with; a throwaway key is generated if omitted
        #[arg(long, value_name = "ADDRESS")]
        account: Option<String>,
        #[command(flatten)]
        wallet: WalletOpts,
        #[command(flatten)]
        service: ServiceOpts,
    },
}

#[derive(Debug, Subcommand)]
pub enum MarketCommands {
    /// Register a repository with the market service
    CreateRepo {
        /// Wallet account endorsing the registration
        #[arg(long, value_name = "ADDRESS")]
        account: String,
        /// Repository URL to register
        #[arg(long, value_name = "URL")]
        repo_url: String,
        #[command(flatten)]
        wallet: WalletOpts,
        #[command(flatten)]
        service: ServiceOpts,
    },
}

/// Execute a parsed command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Account(cmd) => run_account(cmd),
        Commands::Depository(cmd) => run_depository(cmd),
        Commands::Market(cmd) => run_market(cmd),
    }
}

fn open_wallet(opts: WalletOpts) -> Result<LocalWallet> {
    LocalWallet::open(config::wallet_home(opts.wallet))
}

fn require_host(flag: Option<String>, env_key: &str) -> Result<String> {
    config::resolve_host(flag, env_key)
        .ok_or_else(|| Error::Transport("no host provided".to_string()))
}

fn bearer(token: Option<String>) -> Option<BearerToken> {
    token.map(BearerToken::new)
}

fn run_account(cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::Create { pk, wallet } => {
            let wallet = open_wallet(wallet)?;
            let account = match pk {
                Some(path) => {
                    let bytes = fs::read(&path)
                        .map_err(|e| Error::Storage(format!("read key file: {e}")))?;
                    Account::import_from(bytes)?
                }
                None => Account::create()?,
            };
            wallet.store(&account)?;
            println!("account/{} created", account.address);
        }
        AccountCommands::List { wallet } => {
            let wallet = open_wallet(wallet)?;
            for address in wallet.list()? {
                println!("{address}");
            }
        }
        AccountCommands::Delete { addresses, wallet } => {
            let wallet = open_wallet(wallet)?;
            wallet.delete_many(&addresses)?;
            for address in &addresses {
                println!("account \"{address}\" deleted");
            }
        }
    }
    Ok(())
}

fn run_depository(cmd: DepositoryCommands) -> Result<()> {
    let DepositoryCommands::Create {
        name,
        content_type,
        content_id,
        platform,
        untrusted,
        account,
        wallet,
        service,
    } = cmd;

    let host = require_host(service.host, config::DEPOSITORY_HOST_ENV)?;
    let transport = HttpTransport::new(service.insecure)?;
    let token = bearer(service.token);
    let payload = ValueDepository::new(&name, &content_type, &content_id, &platform);

    let (path, body) = if untrusted {
        (
            config::CREATE_UNTRUSTED_DEPOSITORY,
            request::untrusted_depository_form(&payload)?,
        )
    } else {
        let wallet = open_wallet(wallet)?;
        let fetcher =
            HttpNonceFetcher::new(&host, config::DEPOSITORY_CURRENT_NONCE, service.insecure)?;
        let builder = SignedRequestBuilder::new(&wallet, &fetcher);

        let body = match account {
            Some(address) => builder.depository_form(&address, &payload)?,
            // No wallet account named: endorse with a throwaway identity.
            None => builder.depository_form_for(&Account::create()?, &payload)?,
        };
        (config::CREATE_DEPOSITORY, body)
    };

    let response = transport.post_form(&format!("{host}{path}"), body, token.as_ref())?;
    print!("{response}");
    Ok(())
}

fn run_market(cmd: MarketCommands) -> Result<()> {
    let MarketCommands::CreateRepo {
        account,
        repo_url,
        wallet,
        service,
    } = cmd;

    let host = require_host(service.host, config::MARKET_HOST_ENV)?;
    let transport = HttpTransport::new(service.insecure)?;
    let token = bearer(service.token);

    let wallet = open_wallet(wallet)?;
    let fetcher = HttpNonceFetcher::new(&host, config::MARKET_CURRENT_NONCE, service.insecure)?;
    let builder = SignedRequestBuilder::new(&wallet, &fetcher);

    println!("creating repository with account {account} endorsement");
    let body = builder.market_repo_form(&account, &repo_url)?;

    let response = transport.post_form(
        &format!("{host}{}", config::CREATE_REPOSITORY),
        body,
        token.as_ref(),
    )?;
    print!("{response}");
    Ok(())
}
