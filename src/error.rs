//! Error types for the Lexgate library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`LexgateError`] enum.
//!
//! # Examples
//!
//! ```
//! use lexgate::error::{LexgateError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexgateError::config("missing word-list manifest"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexgate operations.
#[derive(Error, Debug)]
pub enum LexgateError {
    /// I/O errors (file operations, directory traversal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (missing manifests, invalid settings, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Word-list / lexicon errors
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Corpus layout errors (missing folders, empty batches, etc.)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Text analysis errors (tokenization, run detection, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LexgateError.
pub type Result<T> = std::result::Result<T, LexgateError>;

impl LexgateError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LexgateError::Config(msg.into())
    }

    /// Create a new lexicon error.
    pub fn lexicon<S: Into<String>>(msg: S) -> Self {
        LexgateError::Lexicon(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        LexgateError::Corpus(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexgateError::Analysis(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        LexgateError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexgateError::Other(msg.into())
    }
}
