//! Error types for the layout editor.
//!
//! Pure tree operations never fail: malformed protocol messages are ignored
//! and malformed persisted trees fall back to a fresh leaf. What remains are
//! the impure edges, modeled here with `thiserror`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from the binary's main logic
//!   - [`DocumentError`] - Reading or writing the screen document
//!   - [`ConfigError`](crate::config::ConfigError) - Invalid config file
//!   - [`LoggingError`](crate::logging::LoggingError) - Log file setup
//!   - [`TuiError`](crate::view::TuiError) - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Screen document could not be read or written.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Config file exists but is unusable.
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("{0}")]
    Terminal(#[from] crate::view::TuiError),
}

/// Failures persisting a screen document.
///
/// A document that reads fine but does not parse is not an error: the
/// layout falls back to a fresh leaf.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File exists but could not be read.
    #[error("Failed to read {path:?}: {source}")]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File could not be written or moved into place.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
