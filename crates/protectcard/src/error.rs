//! Error types for protectcard.
//!
//! This module defines the error types shared by the content server, the
//! preference store and the client session, with enough context for logs
//! and user-facing messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for protectcard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Preference Store Errors ===
    /// Failed to open or create the preference database.
    #[error("failed to open preference database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A preference database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Content Errors ===
    /// The content document could not be read from disk.
    #[error("failed to read content document at {path}: {source}")]
    ContentRead {
        /// Path to the content document.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The content server could not be reached or answered with an error.
    #[error("failed to fetch content from {url}: {message}")]
    ContentFetch {
        /// URL that was requested.
        url: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A scenario id did not resolve against the loaded content.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    // === Server Errors ===
    /// The HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URI component contained a malformed escape sequence.
    #[error("malformed URI component: {0}")]
    UriMalformed(String),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for protectcard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a content fetch error for the given URL.
    #[must_use]
    pub fn content_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContentFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the content document could not be loaded.
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::ContentRead { .. } | Self::ContentFetch { .. } | Self::Json(_)
        )
    }
}
