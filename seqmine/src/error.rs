//! Error types for seqmine

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed sequence database input
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Relative minimum support outside (0, 1]
    #[error("Invalid minimum support: {0} (expected a value in (0, 1])")]
    InvalidSupport(f64),

    /// Top-k mining asked for zero patterns
    #[error("Invalid k for top-k mining: {0}")]
    InvalidTopK(usize),

    /// Inconsistent miner configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error while reading a database or writing patterns
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
