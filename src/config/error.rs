//! Configuration error types.

use thiserror::Error;

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration value missing: {0}")]
    MissingRequired(&'static str),

    #[error("DATABASE_URL must be a postgres:// or postgresql:// URL")]
    InvalidDatabaseUrl,

    #[error("min_connections must not exceed max_connections")]
    InvalidPoolSize,

    #[error("Connection pool is unreasonably large")]
    PoolSizeTooLarge,

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("JWT secret must be at least 32 bytes in production")]
    WeakJwtSecret,

    #[error("From email address is invalid")]
    InvalidFromEmail,

    #[error("SMTP delivery requires smtp_host and smtp_username")]
    IncompleteSmtpConfig,
}
