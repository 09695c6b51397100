//! # Structured Logging
//!
//! Sets up the `tracing` subscriber: pretty or JSON lines, filtered by
//! `RUST_LOG` when it is set.
//!
//! Everything goes to stderr. Stdout is reserved for command output such
//! as addresses, signatures and `--json` payloads, so it can be piped.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for a terminal.
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Install the global subscriber. Call once, first thing in `main()`.
///
/// `default_directive` applies when `RUST_LOG` is unset, e.g.
/// `"keel=warn,keel_wallet=info"`.
pub fn init_logging(default_directive: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .without_time(),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    tracing::debug!(?format, "logging initialized");
}
