//! # Error Types Module
//!
//! Typed errors for the parts of the bot that can fail before the dispatcher
//! starts. Per-update failures are carried as `anyhow::Error` and logged by the
//! dispatcher instead.

use thiserror::Error;

/// Errors raised while reading process configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
}

/// Errors raised while building a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog entry has an empty name")]
    EmptyName,
    #[error("duplicate catalog entry: {0}")]
    DuplicateName(String),
    /// The name would be indistinguishable from the back control
    #[error("catalog entry name is reserved: {0}")]
    ReservedName(String),
    /// Telegram rejects callback data longer than 64 bytes
    #[error("catalog entry name {name:?} is {len} bytes, callback data allows at most 64")]
    CallbackTooLong { name: String, len: usize },
}
