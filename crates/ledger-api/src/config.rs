//! # Server Configuration
//!
//! `ledgerd` is configured by command-line flags, each with an environment
//! variable fallback. `RUST_LOG` overrides the default `info` filter.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use ledger_core::Hash;
use ledger_registry::RegistryConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::state::AppConfig;

/// Ledger provisioning server.
///
/// Creates accounts and defines assets in batches against an in-memory
/// registry bound to one blockchain.
#[derive(Parser, Debug, Clone)]
#[command(name = "ledgerd", version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, env = "LEDGER_LISTEN", default_value = "0.0.0.0:1999")]
    pub listen: SocketAddr,

    /// Hex hash of the genesis block of the chain assets are defined on.
    #[arg(long, env = "LEDGER_GENESIS_HASH")]
    pub genesis_hash: Hash,

    /// Bound on a whole batch, in milliseconds. Must be at least 1.
    #[arg(
        long,
        env = "LEDGER_BATCH_DEADLINE_MS",
        default_value_t = 30_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub batch_deadline_ms: u64,

    /// Maximum number of items accepted in one batch.
    #[arg(long, env = "LEDGER_MAX_BATCH_SIZE", default_value_t = crate::state::DEFAULT_MAX_BATCH_SIZE)]
    pub max_batch_size: usize,

    /// Log output format.
    #[arg(long, env = "LEDGER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            batch_deadline: Duration::from_millis(self.batch_deadline_ms),
            max_batch_size: self.max_batch_size,
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            genesis_hash: self.genesis_hash,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "a0a1a2a3a4a5a6a7a8a9aaabacadaeafb0b1b2b3b4b5b6b7b8b9babbbcbdbebf";

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["ledgerd", "--genesis-hash", GENESIS]).unwrap();
        assert_eq!(cli.listen, "0.0.0.0:1999".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.genesis_hash.to_hex(), GENESIS);
        assert_eq!(cli.app_config().batch_deadline, Duration::from_secs(30));
        assert_eq!(cli.app_config().max_batch_size, 1000);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(cli.registry_config().genesis_hash, cli.genesis_hash);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "ledgerd",
            "--genesis-hash",
            GENESIS,
            "--listen",
            "127.0.0.1:8080",
            "--batch-deadline-ms",
            "250",
            "--max-batch-size",
            "10",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.listen.port(), 8080);
        assert_eq!(cli.app_config().batch_deadline, Duration::from_millis(250));
        assert_eq!(cli.app_config().max_batch_size, 10);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_malformed_genesis_hash() {
        assert!(Cli::try_parse_from(["ledgerd", "--genesis-hash", "abcd"]).is_err());
        assert!(Cli::try_parse_from(["ledgerd", "--genesis-hash", "zz"]).is_err());
    }

    #[test]
    fn rejects_zero_batch_deadline() {
        let err = Cli::try_parse_from(["ledgerd", "--genesis-hash", GENESIS, "--batch-deadline-ms", "0"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let cli = Cli::try_parse_from(["ledgerd", "--genesis-hash", GENESIS, "--batch-deadline-ms", "1"]).unwrap();
        assert_eq!(cli.app_config().batch_deadline, Duration::from_millis(1));
    }
}
