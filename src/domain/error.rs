use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure category of a load, used by callers to tell "fix your schema"
/// apart from "fix your data".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Io,
    Schema,
    Execution,
    Config,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    /// Header or first data row could not be read.
    IoError(String),
    /// Table creation rejected by the store.
    SchemaError(String),
    /// Statement preparation or row insertion failed.
    ExecutionError(String),
    ConfigError(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::IoError(_) => ErrorKind::Io,
            AppError::SchemaError(_) => ErrorKind::Schema,
            AppError::ExecutionError(_) => ErrorKind::Execution,
            AppError::ConfigError(_) => ErrorKind::Config,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::SchemaError(msg) => write!(f, "Schema error: {}", msg),
            AppError::ExecutionError(msg) => write!(f, "Execution error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
