//! # CLI Interface
//!
//! Command-line structure for `keel`, via `clap` derive. Every secret can
//! come from the environment instead of a flag so it stays out of shell
//! history.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Keel wallet.
///
/// Creates, unlocks and signs with a single encrypted wallet kept in a
/// local data directory.
#[derive(Parser, Debug)]
#[command(name = "keel", about = "Keel wallet", version, propagate_version = true)]
pub struct KeelCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Directory holding the wallet database. Created if missing.
    #[arg(long, short = 'd', env = "KEEL_DATA_DIR", default_value = ".keel", global = true)]
    pub data_dir: PathBuf,

    /// Minutes an unlocked session stays live.
    #[arg(long, env = "KEEL_SESSION_MINUTES", default_value_t = 30, global = true)]
    pub session_minutes: u64,

    /// Log output format.
    #[arg(long, env = "KEEL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Print results as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new wallet. Prints the recovery phrase once.
    Create(PasswordArgs),
    /// Restore a wallet from its recovery phrase.
    Import(ImportArgs),
    /// Unlock the wallet for a session.
    Unlock(PasswordArgs),
    /// End the session.
    Lock,
    /// Show whether a wallet exists and whether it is unlocked.
    Status,
    /// Delete the wallet and its session. Irreversible without the phrase.
    Delete(DeleteArgs),
    /// Re-encrypt the wallet under a new password.
    ChangePassword(ChangePasswordArgs),
    /// Print the recovery phrase.
    ExportMnemonic(PasswordArgs),
    /// Print the hex private key.
    ExportKey(PasswordArgs),
    /// Sign a transfer offline with an explicit nonce.
    Sign(SignArgs),
    /// Sign a transfer with a fresh nonce and submit it to the ledger.
    Send(SendArgs),
    /// Score a password against the creation policy.
    CheckPassword(CheckPasswordArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct PasswordArgs {
    /// Wallet password.
    #[arg(long, env = "KEEL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Twelve-word recovery phrase, space separated.
    #[arg(long, env = "KEEL_MNEMONIC", hide_env_values = true)]
    pub mnemonic: String,

    /// Password to seal the imported wallet with.
    #[arg(long, env = "KEEL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Confirm deletion.
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Current password.
    #[arg(long, env = "KEEL_PASSWORD", hide_env_values = true)]
    pub old_password: String,

    /// New password.
    #[arg(long, env = "KEEL_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: String,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Receiver address, 64 hex characters.
    #[arg(long)]
    pub to: String,

    /// Amount in base units.
    #[arg(long)]
    pub amount: u64,

    /// Sender account nonce to sign with.
    #[arg(long)]
    pub nonce: u64,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Receiver address, 64 hex characters.
    #[arg(long)]
    pub to: String,

    /// Amount in base units.
    #[arg(long)]
    pub amount: u64,

    /// Base URL of the ledger proxy.
    #[arg(long, env = "KEEL_LEDGER_URL", default_value = "http://127.0.0.1:8080")]
    pub ledger_url: String,
}

#[derive(Args, Debug)]
pub struct CheckPasswordArgs {
    /// Password to score. Not stored anywhere.
    #[arg(long, env = "KEEL_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        KeelCli::command().debug_assert();
    }

    #[test]
    fn parses_send_with_defaults() {
        let cli = KeelCli::try_parse_from([
            "keel",
            "send",
            "--to",
            "00000000000000000000000000000000000000000000000000000000000000ff",
            "--amount",
            "5",
            "--ledger-url",
            "http://ledger.test",
        ])
        .unwrap();

        assert_eq!(cli.global.session_minutes, 30);
        assert_eq!(cli.global.log_format, LogFormat::Pretty);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.amount, 5);
                assert_eq!(args.ledger_url, "http://ledger.test");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = KeelCli::try_parse_from([
            "keel",
            "status",
            "--data-dir",
            "/tmp/w",
            "--log-format",
            "json",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.global.data_dir, PathBuf::from("/tmp/w"));
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert!(cli.global.json);
    }

    #[test]
    fn change_password_flags() {
        let cli = KeelCli::try_parse_from([
            "keel",
            "change-password",
            "--old-password",
            "a",
            "--new-password",
            "b",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::ChangePassword(_)));
    }
}
