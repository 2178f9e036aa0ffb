//! Command-line front door.
//!
//! The binary in `main.rs` parses arguments and delegates here:
//!
//! 1. [`read_input`] loads the source from a file, a `-c` literal or stdin
//! 2. [`render`] rewrites it and formats the result as text, diff or JSON
//! 3. [`exec_with_node`] optionally pipes the rewritten program into Node.js
//!
//! Everything here returns [`FailsoftError`] so the binary can map failures to
//! stable exit codes.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::ValueEnum;
use failsoft_core::diff::generate_line_diff;
use failsoft_core::error::FailsoftError;
use failsoft_core::output::TranspileResponse;

/// Output format selected with `--format`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The rewritten source.
    #[default]
    Text,
    /// Line-level unified diff between input and output.
    Diff,
    /// JSON response with the edit list and the output.
    Json,
}

/// Where the source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Code(String),
    Stdin,
}

impl InputSource {
    /// Pick the source from the parsed arguments.
    pub fn from_args(file: Option<PathBuf>, code: Option<String>) -> Result<Self, FailsoftError> {
        match (file, code) {
            (Some(_), Some(_)) => Err(FailsoftError::invalid_args(
                "a FILE and --code cannot be given together",
            )),
            (Some(path), None) => Ok(InputSource::File(path)),
            (None, Some(code)) => Ok(InputSource::Code(code)),
            (None, None) => Ok(InputSource::Stdin),
        }
    }

    /// Label used in diff headers and JSON responses.
    pub fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Code(_) => "<code>".to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// A loaded source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub text: String,
}

/// Load the source text, reading stdin from `stdin` when needed.
pub fn read_input(source: &InputSource, stdin: &mut impl Read) -> Result<Input, FailsoftError> {
    let bytes = match source {
        InputSource::File(path) => read_file(path)?,
        InputSource::Code(code) => code.clone().into_bytes(),
        InputSource::Stdin => {
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf)?;
            buf
        }
    };
    let name = source.name();
    let text = String::from_utf8(bytes).map_err(|e| {
        FailsoftError::invalid_input(format!(
            "{name} is not valid UTF-8 (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })?;
    tracing::debug!(source = %name, bytes = text.len(), "read input");
    Ok(Input { name, text })
}

fn read_file(path: &Path) -> Result<Vec<u8>, FailsoftError> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FailsoftError::file_not_found(path.display().to_string()),
        _ => FailsoftError::internal(format!("failed to read {}: {}", path.display(), e)),
    })
}

/// A rewritten input.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub output: String,
    pub response: TranspileResponse,
}

/// Rewrite `input`.
pub fn rewrite(input: &Input) -> Result<Rewritten, FailsoftError> {
    let (output, edits) = failsoft_js::transpile_with_edits(&input.text)?;
    tracing::info!(source = %input.name, edits = edits.len(), "rewrote input");
    let response = TranspileResponse::new(&input.name, &input.text, &edits, output.as_str());
    Ok(Rewritten { output, response })
}

/// Format a rewrite for stdout.
pub fn render(
    input: &Input,
    rewritten: &Rewritten,
    format: OutputFormat,
) -> Result<String, FailsoftError> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n", rewritten.output)),
        OutputFormat::Diff => Ok(generate_line_diff(
            &input.name,
            &input.text,
            &rewritten.output,
        )),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&rewritten.response)
                .map_err(|e| FailsoftError::internal(e.to_string()))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Run `program` with `node`, feeding it over stdin.
///
/// The child inherits stdout and stderr. A non-zero exit (or death by signal)
/// is reported as [`FailsoftError::ExecFailed`].
pub fn exec_with_node(node: &Path, program: &str) -> Result<(), FailsoftError> {
    let node_display = node.display().to_string();
    tracing::debug!(node = %node_display, bytes = program.len(), "executing rewritten program");

    let mut child = Command::new(node)
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| FailsoftError::internal(format!("failed to spawn {node_display}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(program.as_bytes()) {
            Ok(()) => {}
            // The child may exit without reading its input.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => return Err(e.into()),
        }
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(FailsoftError::ExecFailed {
            program: node_display,
            exit_code: status.code().unwrap_or(-1),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
