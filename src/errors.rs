use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures common snapshot and storage failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}

pub type Result<T> = StdResult<T, CoreError>;
