use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the stores to their callers.
#[derive(Debug, Error)]
pub enum DocketError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocketError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// A data row that does not map onto the record schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("column {column} is empty")]
    Empty { column: &'static str },
    #[error("column {column} is not a valid integer: {value:?}")]
    Integer { column: &'static str, value: String },
}

pub type DocketResult<T> = Result<T, DocketError>;
