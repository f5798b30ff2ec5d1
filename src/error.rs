//! Error types shared by the store, the CSV codec and the dispatcher.
//!
//! Every variant renders as the diagnostic line the shell prints, so the
//! dispatcher can report a failed command with `to_string()`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MinimatError>;

#[derive(Error, Debug)]
pub enum MinimatError {
    #[error("Could not parse command")]
    Parse,

    #[error("Unknown variable")]
    UnknownName { name: String },

    #[error("Unknown variable or command")]
    UnknownCommand(String),

    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Invalid scalar multiplication")]
    InvalidScalarMultiplication,

    #[error("Invalid name: {name} (letters, digits and '_', at most {max_len} characters)")]
    InvalidName { name: String, max_len: usize },

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Out of memory: could not store '{name}'")]
    StorageExhausted { name: String },

    #[error("Could not access file '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration file '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl MinimatError {
    /// True for mistakes in the typed command, false for resource and I/O failures.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            MinimatError::StorageExhausted { .. }
                | MinimatError::File { .. }
                | MinimatError::Config { .. }
        )
    }

    pub(crate) fn file(path: impl Into<String>, source: io::Error) -> Self {
        MinimatError::File {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        MinimatError::Config {
            path: path.into(),
            source: source.into(),
        }
    }
}
