//! Configuration module
//!
//! Flags override environment variables (`.env` is loaded by `main`),
//! which override the defaults in [`crate::constants`].

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::constants;

/// Command line interface
#[derive(Debug, Parser)]
#[command(name = "fraud-dashboard", version, about = "Batched transaction fraud classification console")]
pub struct Cli {
    /// Transaction CSV file
    #[arg(long, env = "DASHBOARD_DATA_PATH", default_value = constants::DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Prediction endpoint (HTTP POST)
    #[arg(long, env = "PREDICT_ENDPOINT_URL", default_value = constants::DEFAULT_ENDPOINT_URL)]
    pub endpoint: String,

    /// Rows per batch
    #[arg(long, env = "PREDICT_BATCH_SIZE", default_value_t = constants::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Rows visible at startup
    #[arg(long, env = "DASHBOARD_VISIBLE_COUNT", default_value_t = constants::DEFAULT_VISIBLE_COUNT)]
    pub visible: usize,

    /// Show-more increment
    #[arg(long, env = "DASHBOARD_SHOW_MORE", default_value_t = constants::DEFAULT_SHOW_MORE)]
    pub increment: usize,

    /// Request timeout in seconds
    #[arg(long, env = "PREDICT_TIMEOUT_SECS", default_value_t = constants::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Run predictions over the initial window, print, and exit
    #[arg(long)]
    pub once: bool,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Transaction CSV file
    pub data_path: PathBuf,

    /// Prediction endpoint URL
    pub endpoint_url: String,

    /// Rows per dispatch batch
    pub batch_size: usize,

    /// Initial view window
    pub visible_count: usize,

    /// Initial show-more increment
    pub show_more: usize,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Show-more debounce window
    pub debounce: Duration,

    /// Artificial Show Data delay
    pub show_delay: Duration,

    /// One-shot mode
    pub once: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("endpoint URL must start with http:// or https://: {0}")]
    InvalidEndpoint(String),
}

impl Config {
    /// Build configuration from parsed flags (env fallbacks already applied by clap)
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if !(cli.endpoint.starts_with("http://") || cli.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(cli.endpoint));
        }

        Ok(Self {
            data_path: cli.data,
            endpoint_url: cli.endpoint,
            batch_size: cli.batch_size,
            visible_count: cli.visible,
            show_more: cli.increment,
            request_timeout: Duration::from_secs(cli.timeout),
            debounce: Duration::from_millis(constants::get_debounce_ms()),
            show_delay: Duration::from_millis(constants::get_show_delay_ms()),
            once: cli.once,
        })
    }

    /// Load configuration from the process arguments and environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }
}
