//! Global error handling for dirbundle
//!
//! Only conditions that must stop a run live here. Per-file read failures
//! are captured as [`FileStatus::Error`](crate::types::FileStatus) by the
//! walker and never surface as a `BundleError`.

use std::io;
use thiserror::Error;

/// Global error type for dirbundle operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON rule file errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Root path to scan does not exist
    #[error("Root path not found: {0}")]
    RootNotFound(String),

    /// Root path exists but is not a directory
    #[error("Root path is not a directory: {0}")]
    NotADirectory(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for dirbundle operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Creates a BundleError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::BundleError::$error_type(format!($($arg)*))
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

// The binary returns io::Result, keep the conversion around for it
impl From<BundleError> for io::Error {
    fn from(err: BundleError) -> Self {
        let kind = match &err {
            BundleError::Io(e) => e.kind(),
            BundleError::RootNotFound(_) => io::ErrorKind::NotFound,
            BundleError::InvalidArgument(_) | BundleError::NotADirectory(_) => {
                io::ErrorKind::InvalidInput
            }
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, InvalidArgument, "expected positive value, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected positive value, got -1"
        );
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: io::Error = crate::error!(RootNotFound, "/nope").into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("/nope"));
    }
}
