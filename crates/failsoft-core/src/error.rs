//! Error types and error code constants for failsoft.
//!
//! This module provides a unified error type (`FailsoftError`) that bridges
//! domain-specific errors from the splicer and the JavaScript rewriter into a
//! common format suitable for exit codes and JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments or invalid input (bad flags, non-UTF-8 source)
//! - `3`: Resolution errors (input file or node executable not found)
//! - `4`: Rewrite errors (parser failure, conflicting edits)
//! - `5`: Execution failed (the rewritten program exited non-zero)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;

use thiserror::Error;

use crate::edit::SpliceError;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Stable error codes, used both as process exit codes and in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments or input from the caller.
    InvalidArguments = 2,
    /// Something named by the caller could not be found.
    ResolutionError = 3,
    /// The source could not be rewritten.
    RewriteError = 4,
    /// The rewritten program ran and failed.
    ExecFailed = 5,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum FailsoftError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The source text could not be accepted.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// No usable Node.js executable.
    #[error("node executable not found: {message}")]
    NodeNotFound { message: String },

    /// Rewriting failed.
    #[error("rewrite failed: {message}")]
    RewriteFailed { message: String },

    /// The rewritten program exited unsuccessfully.
    #[error("execution failed: {program} exited with code {exit_code}")]
    ExecFailed { program: String, exit_code: i32 },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&FailsoftError> for OutputErrorCode {
    fn from(err: &FailsoftError) -> Self {
        match err {
            FailsoftError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            FailsoftError::InvalidInput { .. } => OutputErrorCode::InvalidArguments,
            FailsoftError::FileNotFound { .. } => OutputErrorCode::ResolutionError,
            FailsoftError::NodeNotFound { .. } => OutputErrorCode::ResolutionError,
            FailsoftError::RewriteFailed { .. } => OutputErrorCode::RewriteError,
            FailsoftError::ExecFailed { .. } => OutputErrorCode::ExecFailed,
            FailsoftError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<FailsoftError> for OutputErrorCode {
    fn from(err: FailsoftError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Bridges
// ============================================================================

impl From<SpliceError> for FailsoftError {
    fn from(err: SpliceError) -> Self {
        FailsoftError::RewriteFailed {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for FailsoftError {
    fn from(err: std::io::Error) -> Self {
        FailsoftError::InternalError {
            message: format!("IO error: {}", err),
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl FailsoftError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        FailsoftError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        FailsoftError::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        FailsoftError::FileNotFound { path: path.into() }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        FailsoftError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
