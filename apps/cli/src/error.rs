//! # CLI Error Types
//!
//! Configuration failures. Everything else at the binary's top level is
//! carried as `anyhow::Error` with context; pricing refusals are not errors
//! here at all, they are printed as `ErrorResponse` JSON.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or validating [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    /// Values parsed but do not make sense together.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
