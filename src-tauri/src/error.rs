//! Application-level error type returned by all Tauri command handlers.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so the
//! frontend can pattern-match on a stable `kind` string.

use crate::config::ConfigError;
use crate::store::StoreError;

/// Top-level error returned by Tauri command handlers.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// Required invoice fields are missing; the save was not performed.
    #[error("{0}")]
    Validation(String),

    /// The login form did not match the configured credential pair.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// A requested resource (history entry, line item) was not found.
    #[error("{0}")]
    NotFound(String),

    /// A generic I/O or lock failure, stringified at the system boundary.
    #[error("{0}")]
    Io(String),

    /// `billing.toml` could not be read or failed validation.
    #[error("{0}")]
    Config(String),

    /// The print view template failed to render.
    #[error("{0}")]
    Render(String),

    /// The local key-value store could not be read or written.
    #[error("{0}")]
    Storage(String),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    /// Convert an [`std::io::Error`] into an [`AppError::Io`].
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        Self::Render(e.to_string())
    }
}
