//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: unset variables fall back to defaults,
//! but a present-and-invalid value exits startup with a clear error.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Runtime configuration for the beacon API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// Seconds between dispatch ticks.
    pub dispatch_interval_secs: u64,
    /// Outbound delivery request timeout in seconds.
    pub delivery_timeout_secs: u64,
    /// Reject private/internal subscriber hosts at registration time.
    pub block_internal_hosts: bool,
    /// Log filter used when `RUST_LOG` is not set.
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8000)?,
            dispatch_interval_secs: parse_var("DISPATCH_INTERVAL_SECS", 5)?,
            delivery_timeout_secs: parse_var("DELIVERY_TIMEOUT_SECS", 10)?,
            block_internal_hosts: parse_var("BLOCK_INTERNAL_HOSTS", false)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        if config.dispatch_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DISPATCH_INTERVAL_SECS",
                message: "interval must be at least 1 second".to_string(),
            });
        }

        Ok(config)
    }

    /// Dispatch interval as a `Duration`.
    #[must_use]
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_secs(self.dispatch_interval_secs)
    }

    /// Delivery timeout as a `Duration`.
    #[must_use]
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }
}

/// Parse an optional environment variable, falling back to `default` when the
/// variable is unset.
fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
            var,
            message: format!("{e} (got {raw:?})"),
        }),
        Err(_) => Ok(default),
    }
}
