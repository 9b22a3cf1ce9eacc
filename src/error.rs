//! Error types for basekit
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using BaseError
pub type Result<T> = std::result::Result<T, BaseError>;

/// Unified error type for basekit operations
#[derive(Debug, Error)]
pub enum BaseError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File size query failed: {0}")]
    SizeQuery(#[source] std::io::Error),

    #[error("Short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Operation on a closed file handle")]
    Closed,

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Memory Errors
    // -------------------------------------------------------------------------
    #[error("Arena exhausted: requested {requested} bytes, {remaining} remaining")]
    AllocationExhausted { requested: usize, remaining: usize },

    #[error("Range {start}..={end} out of bounds for string of size {size}")]
    BoundsViolation { start: usize, end: usize, size: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
