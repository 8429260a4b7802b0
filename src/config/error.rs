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

    #[error("Fallback question limit must be at least 1")]
    InvalidFallbackLimit,

    #[error("Minimum name length must be at least 1")]
    InvalidMinNameLength,

    #[error("Invalid cookie name: {0}")]
    InvalidCookieName(String),

    #[error("Session idle timeout must be at least one second")]
    InvalidIdleTimeout,
}
