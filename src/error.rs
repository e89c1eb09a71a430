//! Global error handling for folder-to-llm
//!
//! Only failures that abort the whole run end up here. Per-file read
//! problems and unlistable directories are recovered inside the scanner.

use std::io;
use thiserror::Error;

/// Global error type for folder-to-llm operations
#[derive(Error, Debug)]
pub enum FolderToLlmError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writer errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// Path not found or not a directory
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for folder-to-llm operations
pub type Result<T> = std::result::Result<T, FolderToLlmError>;

/// Creates a FolderToLlmError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FolderToLlmError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
