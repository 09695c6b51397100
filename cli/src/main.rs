// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Keel CLI
//!
//! Entry point for the `keel` binary. Opens the wallet database in the data
//! directory, runs one command against it and exits.
//!
//! Sessions outlive the process: `keel unlock` writes a session that later
//! `keel sign` or `keel send` invocations pick up until it expires or
//! `keel lock` ends it.

mod cli;
mod ledger_http;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use keel_wallet::{
    policy, SledStore, SystemClock, Transaction, WalletConfig, WalletFacade, WalletSummary,
};

use cli::{Commands, GlobalArgs, KeelCli};
use ledger_http::HttpLedgerClient;

/// Database directory name inside `--data-dir`.
const DB_DIR: &str = "wallet.db";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = KeelCli::parse();
    logging::init_logging("keel=warn,keel_wallet=info", cli.global.log_format);

    run(&cli.global, cli.command).await
}

/// Opens the sled-backed wallet under `global.data_dir`.
fn open_wallet(global: &GlobalArgs) -> Result<WalletFacade> {
    let data_dir = &global.data_dir;
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory: {}", data_dir.display()))?;

    let db_path = data_dir.join(DB_DIR);
    let store = SledStore::open(&db_path)
        .with_context(|| format!("failed to open wallet database at {}", db_path.display()))?;
    restrict_permissions(data_dir)?;
    tracing::debug!(path = %db_path.display(), "wallet database opened");

    let config = WalletConfig::default()
        .with_session_duration(Duration::from_secs(global.session_minutes.saturating_mul(60)));
    Ok(WalletFacade::with_config(
        Arc::new(store),
        Arc::new(SystemClock),
        config,
    ))
}

async fn run(global: &GlobalArgs, command: Commands) -> Result<()> {
    let as_json = global.json;
    let open = || open_wallet(global);

    match command {
        Commands::Version => print_version(),
        Commands::CheckPassword(args) => {
            let score = policy::score(&args.password);
            println!("{}", serde_json::to_string_pretty(&score)?);
        }
        Commands::Create(args) => {
            let created = open()?
                .create_wallet(&args.password)
                .context("failed to create wallet")?;
            if as_json {
                let out = json!({
                    "address": created.summary.address,
                    "publicKey": created.summary.public_key,
                    "mnemonic": created.mnemonic.as_str(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_summary("Wallet created.", &created.summary);
                println!();
                println!("Recovery phrase (write it down, it is not shown again):");
                println!("  {}", created.mnemonic.as_str());
            }
        }
        Commands::Import(args) => {
            let summary = open()?
                .import_wallet(&args.mnemonic, &args.password)
                .context("failed to import wallet")?;
            emit_summary("Wallet imported.", &summary, as_json)?;
        }
        Commands::Unlock(args) => {
            let wallet = open()?;
            let summary = wallet.unlock(&args.password).context("failed to unlock wallet")?;
            emit_summary("Wallet unlocked.", &summary, as_json)?;
            if let Some(expires_at) = wallet.session_expires_at()? {
                if !as_json {
                    println!("  Expires at     : {}", expires_at.to_rfc3339());
                }
            }
        }
        Commands::Lock => {
            open()?.lock()?;
            if !as_json {
                println!("Wallet locked.");
            }
        }
        Commands::Status => {
            let wallet = open()?;
            let status = wallet.state()?.summary();
            let expires_at = wallet.session_expires_at()?;
            if as_json {
                let out = json!({
                    "state": status.state,
                    "address": status.address,
                    "expiresAt": expires_at.map(|t| t.to_rfc3339()),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("State          : {}", status.state);
                if let Some(address) = &status.address {
                    println!("Address        : {address}");
                }
                if let Some(expires_at) = expires_at {
                    println!("Expires at     : {}", expires_at.to_rfc3339());
                }
            }
        }
        Commands::Delete(args) => {
            if !args.yes {
                bail!("refusing to delete the wallet without --yes");
            }
            open()?.delete_wallet().context("failed to delete wallet")?;
            if !as_json {
                println!("Wallet deleted.");
            }
        }
        Commands::ChangePassword(args) => {
            open()?
                .change_password(&args.old_password, &args.new_password)
                .context("failed to change password")?;
            if !as_json {
                println!("Password changed.");
            }
        }
        Commands::ExportMnemonic(args) => {
            let phrase = open()?.export_mnemonic(&args.password)?;
            println!("{}", phrase.as_str());
        }
        Commands::ExportKey(args) => {
            let secret = open()?.export_private_key(&args.password)?;
            println!("{}", secret.as_str());
        }
        Commands::Sign(args) => {
            let tx = open()?
                .build_and_sign_transaction(&args.to, args.amount, args.nonce)
                .context("failed to sign transaction")?;
            emit_transaction(&tx, None, as_json)?;
        }
        Commands::Send(args) => {
            let wallet = open()?;
            let ledger = HttpLedgerClient::new(&args.ledger_url)?;
            let receipt = wallet
                .send_transfer(&ledger, &args.to, args.amount)
                .await
                .with_context(|| format!("failed to send transfer via {}", args.ledger_url))?;
            emit_transaction(&receipt.transaction, Some(&receipt.response), as_json)?;
        }
    }
    Ok(())
}

fn print_summary(headline: &str, summary: &WalletSummary) {
    println!("{headline}");
    println!("  Address        : {}", summary.address);
    println!("  Public key     : {}", summary.public_key);
}

fn emit_summary(headline: &str, summary: &WalletSummary, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_summary(headline, summary);
    }
    Ok(())
}

fn emit_transaction(tx: &Transaction, response: Option<&str>, as_json: bool) -> Result<()> {
    let digest = hex::encode(tx.digest()?);
    let signature = tx.signature_hex().unwrap_or_default();

    if as_json {
        let out = json!({
            "sender": tx.sender.to_hex(),
            "receiver": tx.receiver.to_hex(),
            "nonce": tx.nonce,
            "data": tx.data,
            "digest": digest,
            "signature": signature,
            "response": response,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Sender         : {}", tx.sender);
        println!("Receiver       : {}", tx.receiver);
        println!("Nonce          : {}", tx.nonce);
        println!("Data           : {}", tx.data);
        println!("Digest         : {digest}");
        println!("Signature      : {signature}");
        if let Some(response) = response {
            println!("Ledger         : {response}");
        }
    }
    Ok(())
}

/// The database holds the encrypted wallet and the live session key.
#[cfg(unix)]
fn restrict_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
        .with_context(|| format!("failed to restrict permissions on {}", dir.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

fn print_version() {
    println!("keel         {}", env!("CARGO_PKG_VERSION"));
    println!("record fmt   v{}", keel_wallet::config::WALLET_RECORD_VERSION);
    println!("rustc        {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
