// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the JavaScript rewriter.

use failsoft_core::edit::SpliceError;
use failsoft_core::error::FailsoftError;
use thiserror::Error;

/// Errors from [`crate::transpile`] and friends.
///
/// Syntax errors in the input are not errors here: malformed regions are
/// left untouched and the rest of the file is still rewritten.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// The input bytes are not valid UTF-8.
    #[error("source is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// The JavaScript grammar could not be loaded into the parser.
    #[error("failed to load JavaScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree.
    #[error("parser returned no syntax tree")]
    ParseFailed,

    /// The collected edits could not be spliced.
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Result type for rewriter operations.
pub type TranspileResult<T> = Result<T, TranspileError>;

impl From<TranspileError> for FailsoftError {
    fn from(err: TranspileError) -> Self {
        match err {
            TranspileError::InvalidUtf8 { .. } => FailsoftError::invalid_input(err.to_string()),
            TranspileError::Language(_) => FailsoftError::internal(err.to_string()),
            TranspileError::ParseFailed | TranspileError::Splice(_) => {
                FailsoftError::RewriteFailed {
                    message: err.to_string(),
                }
            }
        }
    }
}
