//! Server configuration from environment variables.

use hexboard_core::DEFAULT_ATTEMPTS;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Ceiling on the search budget a client may request
pub const DEFAULT_MAX_ATTEMPTS: usize = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid SERVER_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidCount { var: &'static str, value: String },

    #[error("HEXBOARD_ATTEMPTS ({default}) exceeds HEXBOARD_MAX_ATTEMPTS ({max})")]
    DefaultAboveMax { default: usize, max: usize },
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Search budget used when a request does not name one
    pub default_attempts: usize,
    /// Largest search budget a request may use
    pub max_attempts: usize,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `HEXBOARD_ATTEMPTS` and `HEXBOARD_MAX_ATTEMPTS`,
    /// falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("SERVER_ADDR").ok(),
            std::env::var("HEXBOARD_ATTEMPTS").ok(),
            std::env::var("HEXBOARD_MAX_ATTEMPTS").ok(),
        )
    }

    fn from_values(
        addr: Option<String>,
        attempts: Option<String>,
        max_attempts: Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr_value = addr.unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;

        let default_attempts = parse_count("HEXBOARD_ATTEMPTS", attempts, DEFAULT_ATTEMPTS)?;
        let max_attempts = parse_count("HEXBOARD_MAX_ATTEMPTS", max_attempts, DEFAULT_MAX_ATTEMPTS)?;
        if default_attempts > max_attempts {
            return Err(ConfigError::DefaultAboveMax {
                default: default_attempts,
                max: max_attempts,
            });
        }

        Ok(Self {
            addr,
            default_attempts,
            max_attempts,
        })
    }
}

fn parse_count(var: &'static str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidCount { var, value }),
        },
    }
}
