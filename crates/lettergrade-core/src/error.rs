//! Error types and exit codes for lettergrade
//!
//! Exit codes:
//! - 0: Success (submission accepted)
//! - 1: Generic failure (submission rejected, I/O)
//! - 2: Usage error (bad flags/args, invalid config values)
//! - 3: Data error (reference answers unavailable, broken config file)

use std::path::PathBuf;
use thiserror::Error;

use crate::grade::{Fault, Rejection};

/// Exit codes for the lettergrade CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - reference or config data is broken (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur outside of a grading verdict
#[derive(Error, Debug)]
pub enum LetterError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("reference answers for variant {variant} unavailable at {key}: {reason}")]
    ReferenceUnavailable {
        variant: u32,
        key: String,
        reason: String,
    },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("submission rejected: {kind}")]
    Rejected { kind: String, fault: Fault },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl LetterError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        LetterError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        LetterError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        LetterError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Surface a rejected verdict as a process-level failure
    pub fn rejected(rejection: &Rejection) -> Self {
        LetterError::Rejected {
            kind: rejection.kind().to_string(),
            fault: rejection.fault(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LetterError::UnknownFormat(_)
            | LetterError::UsageError(_)
            | LetterError::InvalidValue { .. } => ExitCode::Usage,

            LetterError::ReferenceUnavailable { .. }
            | LetterError::InvalidConfig { .. }
            | LetterError::AlreadyExists { .. }
            | LetterError::Rejected {
                fault: Fault::Operator,
                ..
            } => ExitCode::Data,

            LetterError::Rejected {
                fault: Fault::Student,
                ..
            }
            | LetterError::Io(_)
            | LetterError::Json(_)
            | LetterError::FailedOperationWithTarget { .. }
            | LetterError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            LetterError::UnknownFormat(_) => "unknown_format",
            LetterError::UsageError(_) => "usage_error",
            LetterError::InvalidValue { .. } => "invalid_value",
            LetterError::ReferenceUnavailable { .. } => "reference_unavailable",
            LetterError::InvalidConfig { .. } => "invalid_config",
            LetterError::AlreadyExists { .. } => "already_exists",
            LetterError::Rejected { .. } => "rejected",
            LetterError::Io(_) => "io_error",
            LetterError::Json(_) => "json_error",
            LetterError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            LetterError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
                "exit_code": self.exit_code() as i32,
            }
        })
    }
}

/// Result type alias for lettergrade operations
pub type Result<T> = std::result::Result<T, LetterError>;
