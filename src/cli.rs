//! Command-line interface parsing for the Pokedex
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! validated `StartupConfig` for the REPL.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::api::client::DEFAULT_BASE_URL;

/// Largest page size the API accepts for listings
const MAX_PAGE_SIZE: u32 = 1000;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache TTL must be positive
    #[error("Invalid cache TTL: must be at least 1 second")]
    InvalidCacheTtl,

    /// The request timeout must be positive
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,

    /// The page size is outside what the API serves
    #[error("Invalid page size: {0}. Must be between 1 and 1000")]
    InvalidPageSize(u32),
}

/// Pokedex - browse the PokeAPI and catch Pokemon from your terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by the PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Seconds a cached response is kept (also the cache sweep interval)
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub cache_ttl: u64,

    /// Seconds to wait for a single API request
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Base URL of the API
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Items per listing page
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub page_size: u32,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Lifetime of a cached response
    pub cache_ttl: Duration,
    /// Per-request network timeout
    pub request_timeout: Duration,
    /// API base URL without a trailing slash
    pub base_url: String,
    /// Items per listing page
    pub page_size: u32,
    /// Whether debug logging is on
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            verbose: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if a value is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.cache_ttl == 0 {
            return Err(CliError::InvalidCacheTtl);
        }
        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout);
        }
        if cli.page_size == 0 || cli.page_size > MAX_PAGE_SIZE {
            return Err(CliError::InvalidPageSize(cli.page_size));
        }

        Ok(StartupConfig {
            cache_ttl: Duration::from_secs(cli.cache_ttl),
            request_timeout: Duration::from_secs(cli.timeout),
            base_url: cli.base_url.trim_end_matches('/').to_string(),
            page_size: cli.page_size,
            verbose: cli.verbose,
        })
    }
}
