//! Error types and handling for the tool hub.
//!
//! This module defines a unified error type that can represent errors from
//! configuration, the client registry and the transport layer, so the
//! binaries have a single type to bubble up to `main`.

use thiserror::Error;

/// A specialized Result type for tool hub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the tool hub.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the client registry.
    #[error("Registry error: {0}")]
    Registry(#[from] crate::client::RegistryError),

    /// Error originating from the server transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or process management.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
