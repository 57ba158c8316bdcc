use crate::handlers::validation::dnsmx::DEFAULT_DOH_ENDPOINT;
use crate::worker::{DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_TIMEOUT};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: String, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub doh_endpoint: String,
    pub doh_timeout: Duration,
    pub chunk_size: usize,
    pub chunk_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            doh_timeout: Duration::from_secs(5),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_timeout: DEFAULT_CHUNK_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chunk_size: usize = parse_or(&lookup, "BATCH_CHUNK_SIZE", defaults.chunk_size)?;
        if chunk_size == 0 {
            return Err(ConfigError::Invalid {
                key: "BATCH_CHUNK_SIZE".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            doh_endpoint: lookup("DOH_ENDPOINT").unwrap_or(defaults.doh_endpoint),
            doh_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DOH_TIMEOUT_SECS",
                defaults.doh_timeout.as_secs(),
            )?),
            chunk_size,
            chunk_timeout: Duration::from_secs(parse_or(
                &lookup,
                "BATCH_CHUNK_TIMEOUT_SECS",
                defaults.chunk_timeout.as_secs(),
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}
