//! Indexer configuration, read from the process environment.
//!
//! Only `CONTROLLER_ID` is mandatory; everything else has a testnet-friendly
//! default.

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint.
    pub rpc_url: String,
    /// Donation controller contract address (Strkey).
    pub controller_id: String,
    /// SQLite database location.
    pub database_url: String,
    /// Port for the REST API.
    pub api_port: u16,
    /// Seconds between RPC polls.
    pub poll_interval_secs: u64,
    /// Page size for `getEvents`.
    pub events_per_page: u32,
    /// Ledger to start from when no cursor has been saved yet.
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            rpc_url: env_or("RPC_URL", "https://soroban-testnet.stellar.org"),
            controller_id: env_var("CONTROLLER_ID").map_err(|_| {
                IndexerError::Config("CONTROLLER_ID environment variable is required".to_string())
            })?,
            database_url: env_or("DATABASE_URL", "sqlite:./donation_events.db"),
            api_port: parse_env("API_PORT", "3001")?,
            poll_interval_secs: parse_env("POLL_INTERVAL_SECS", "5")?,
            events_per_page: parse_env("EVENTS_PER_PAGE", "100")?,
            start_ledger: parse_env("START_LEDGER", "0")?,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| IndexerError::Config(format!("Missing env var: {key}")))
}

fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    env_or(key, default)
        .parse()
        .map_err(|_| IndexerError::Config(format!("Invalid {key}")))
}
