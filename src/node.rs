//! Node.js executable resolution for `--exec`.
//!
//! ## Resolution Order
//!
//! 1. Explicit `--node` flag
//! 2. `$FAILSOFT_NODE` environment variable
//! 3. `node`, then `nodejs`, from `$PATH`
//!
//! The first candidate that exists and is executable wins. When none does,
//! the error message lists every step that was attempted.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use failsoft_core::error::FailsoftError;

/// Environment variable naming the Node.js executable.
pub const NODE_ENV_VAR: &str = "FAILSOFT_NODE";

/// Executable names searched on `$PATH`, in order.
const NODE_NAMES: &[&str] = &["node", "nodejs"];

// ============================================================================
// Resolution Trace
// ============================================================================

/// A single step in the resolution process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStep {
    /// Source being checked (e.g., "--node flag", "$PATH").
    pub source: String,
    /// What was found (if anything).
    pub found: Option<PathBuf>,
    /// Why this step failed.
    pub failure_reason: String,
}

impl ResolutionStep {
    /// A source that was not set.
    pub fn not_set(source: impl Into<String>) -> Self {
        ResolutionStep {
            source: source.into(),
            found: None,
            failure_reason: "not set".to_string(),
        }
    }

    /// A source that was searched without finding anything.
    pub fn not_found(source: impl Into<String>) -> Self {
        ResolutionStep {
            source: source.into(),
            found: None,
            failure_reason: "not found".to_string(),
        }
    }

    /// A source that named a path that cannot be used.
    pub fn rejected(source: impl Into<String>, path: PathBuf, reason: impl Into<String>) -> Self {
        ResolutionStep {
            source: source.into(),
            found: Some(path),
            failure_reason: reason.into(),
        }
    }
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.source)?;
        if let Some(ref path) = self.found {
            write!(f, "{} - ", path.display())?;
        }
        write!(f, "{}", self.failure_reason)
    }
}

/// Trace of all resolution steps attempted.
#[derive(Debug, Clone, Default)]
pub struct ResolutionTrace {
    pub steps: Vec<ResolutionStep>,
}

impl ResolutionTrace {
    pub fn new() -> Self {
        ResolutionTrace { steps: Vec::new() }
    }

    pub fn add(&mut self, step: ResolutionStep) {
        tracing::debug!(%step, "node resolution step");
        self.steps.push(step);
    }

    /// Format the trace for display, one numbered step per line.
    pub fn format_trace(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Where the resolved executable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSource {
    CliFlag,
    EnvVar,
    Path,
}

/// A resolved Node.js executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeExecutable {
    pub path: PathBuf,
    pub source: NodeSource,
}

/// Inputs to node resolution.
#[derive(Debug, Clone, Default)]
pub struct NodeOptions {
    /// Path given with `--node`.
    pub explicit: Option<PathBuf>,
    /// Value of `$FAILSOFT_NODE`.
    pub env_override: Option<OsString>,
}

impl NodeOptions {
    /// Options for `explicit`, reading the override from the environment.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        NodeOptions {
            explicit,
            env_override: std::env::var_os(NODE_ENV_VAR),
        }
    }
}

/// Resolve the Node.js executable.
pub fn resolve_node(options: &NodeOptions) -> Result<NodeExecutable, FailsoftError> {
    let mut trace = ResolutionTrace::new();

    // An explicit flag is final: falling through to $PATH would hide a typo.
    if let Some(ref path) = options.explicit {
        return match check_candidate(path) {
            Ok(path) => Ok(found(path, NodeSource::CliFlag)),
            Err(reason) => {
                trace.add(ResolutionStep::rejected("--node flag", path.clone(), reason));
                Err(not_found(&trace))
            }
        };
    }
    trace.add(ResolutionStep::not_set("--node flag"));

    let env_source = format!("${NODE_ENV_VAR}");
    match options.env_override.as_ref().filter(|value| !value.is_empty()) {
        Some(value) => {
            let path = PathBuf::from(value);
            match check_candidate(&path) {
                Ok(path) => return Ok(found(path, NodeSource::EnvVar)),
                Err(reason) => trace.add(ResolutionStep::rejected(env_source, path, reason)),
            }
        }
        None => trace.add(ResolutionStep::not_set(env_source)),
    }

    for name in NODE_NAMES {
        if let Ok(path) = which::which(name) {
            match check_candidate(&path) {
                Ok(path) => return Ok(found(path, NodeSource::Path)),
                Err(reason) => trace.add(ResolutionStep::rejected("$PATH", path, reason)),
            }
        }
    }
    trace.add(ResolutionStep::not_found(format!(
        "$PATH ({})",
        NODE_NAMES.join("/")
    )));

    Err(not_found(&trace))
}

fn found(path: PathBuf, source: NodeSource) -> NodeExecutable {
    tracing::debug!(path = %path.display(), ?source, "resolved node executable");
    NodeExecutable { path, source }
}

fn not_found(trace: &ResolutionTrace) -> FailsoftError {
    FailsoftError::NodeNotFound {
        message: trace.format_trace(),
    }
}

/// Canonical path of `path` if it is an existing executable file.
fn check_candidate(path: &Path) -> Result<PathBuf, &'static str> {
    let canonical = path.canonicalize().map_err(|_| "path does not exist")?;
    if !canonical.is_file() {
        return Err("not a file");
    }
    if !is_executable(&canonical) {
        return Err("not executable");
    }
    Ok(canonical)
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

// ============================================================================
// Tests
// ============================================================================
