//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid provider base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid provider timeout")]
    InvalidTimeout,

    #[error("Turn cap must be 0 (unbounded) or an even number of at least 2")]
    InvalidTurnCap,

    #[error("Sweep interval must be positive when idle eviction is enabled")]
    InvalidSweepInterval,

    #[error("Idle TTL must be longer than the provider timeout")]
    IdleTtlTooShort,

    #[error("No CORS origin configured")]
    NoCorsOrigin,
}
