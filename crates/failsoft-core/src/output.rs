//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, edit order)
//! 3. **Versioned:** Schema version in response enables forward compatibility
//!
//! Edits are reported in source order with byte spans into the *input* text,
//! 1-indexed line/column of the edit start, and the replaced and inserted
//! text.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{FailsoftError, OutputErrorCode};
use crate::patch::Edit;
use crate::text::LineIndex;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Edit Info
// ============================================================================

/// One applied edit, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditInfo {
    /// Start byte offset in the input (inclusive).
    pub start: usize,
    /// End byte offset in the input (exclusive).
    pub end: usize,
    /// 1-indexed line of `start`.
    pub line: u32,
    /// 1-indexed column of `start`, in characters.
    pub col: u32,
    /// Input text covered by the edit (empty for insertions).
    pub old_text: String,
    /// Text spliced in.
    pub new_text: String,
}

impl EditInfo {
    /// Describe `edit` against `index`.
    pub fn from_edit(index: &LineIndex<'_>, source: &str, edit: &Edit) -> Self {
        let (line, col) = index.position(edit.from());
        EditInfo {
            start: edit.from(),
            end: edit.to(),
            line,
            col,
            old_text: source
                .get(edit.from()..edit.to())
                .unwrap_or_default()
                .to_string(),
            new_text: edit.text.clone(),
        }
    }
}

/// Describe a batch of edits in source order.
pub fn describe_edits(source: &str, edits: &[Edit]) -> Vec<EditInfo> {
    let index = LineIndex::new(source);
    let mut infos: Vec<EditInfo> = edits
        .iter()
        .map(|edit| EditInfo::from_edit(&index, source, edit))
        .collect();
    infos.sort_by_key(|info| (info.start, info.end));
    infos
}

// ============================================================================
// Response Structs
// ============================================================================

/// Response for a successful rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspileResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Name of the input (`<stdin>`, `<code>` or the file path).
    pub source_name: String,
    /// Number of edits applied.
    pub edit_count: usize,
    /// The edits, in source order.
    pub edits: Vec<EditInfo>,
    /// The rewritten source.
    pub output: String,
}

impl TranspileResponse {
    /// Build a response for `source` rewritten to `output` by `edits`.
    pub fn new(
        source_name: impl Into<String>,
        source: &str,
        edits: &[Edit],
        output: impl Into<String>,
    ) -> Self {
        let edits = describe_edits(source, edits);
        TranspileResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            source_name: source_name.into(),
            edit_count: edits.len(),
            edits,
            output: output.into(),
        }
    }
}

/// Error information carried in an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code (also the process exit code).
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a FailsoftError.
    pub fn from_error(err: &FailsoftError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let details = match err {
            FailsoftError::FileNotFound { path } => Some(serde_json::json!({ "path": path })),
            FailsoftError::ExecFailed { program, exit_code } => Some(serde_json::json!({
                "program": program,
                "exit_code": exit_code
            })),
            _ => None,
        };
        ErrorInfo {
            code,
            message: err.to_string(),
            details,
        }
    }
}

/// Response for any failed invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a FailsoftError.
    pub fn from_error(err: &FailsoftError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
///
/// This is the single JSON output path for the CLI.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
