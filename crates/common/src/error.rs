//! Error types shared across subseq crates.

use std::path::PathBuf;

/// Top-level error type for subseq configuration and glue code.
#[derive(Debug, thiserror::Error)]
pub enum SubseqError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required path: {name} (pass --{flag} or set paths.{name} in the config file)")]
    MissingPath { name: &'static str, flag: &'static str },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using SubseqError.
pub type SubseqResult<T> = Result<T, SubseqError>;

impl SubseqError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn missing_path(name: &'static str, flag: &'static str) -> Self {
        Self::MissingPath { name, flag }
    }
}
