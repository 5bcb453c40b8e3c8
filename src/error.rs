use serde::Serialize;
use std::fmt;

/// Error types raised by the reminder core.
///
/// Most store operations swallow these and log them instead; they surface
/// directly only from backends, validation and parsing helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Errors related to the key-value persistence medium
    Storage(String),
    /// Errors encoding or decoding the persisted collection
    Serialization(String),
    /// Errors related to caller-supplied data
    Validation(String),
    /// Errors starting or reconfiguring the file logger
    Logging(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Logging(msg) => write!(f, "Logging error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Serialization(error.to_string())
    }
}

// Convenience constructors
impl AppError {
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn logging<S: Into<String>>(msg: S) -> Self {
        AppError::Logging(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
