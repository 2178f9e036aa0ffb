//! Binary entry point for the failsoft CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Rewrite a file and print the result
//! failsoft app.js
//!
//! # Rewrite a literal snippet
//! failsoft -c 'foo.bar.baz()'
//!
//! # Rewrite stdin and show what changed
//! cat app.js | failsoft --format diff
//!
//! # Rewrite and run with Node.js
//! failsoft --exec app.js
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use failsoft::cli::{exec_with_node, read_input, render, rewrite, InputSource, OutputFormat};
use failsoft::error::{FailsoftError, OutputErrorCode};
use failsoft::node::{resolve_node, NodeOptions};
use failsoft::output::{emit_response, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Rewrite JavaScript so property reads, calls and undeclared identifiers
/// evaluate to `undefined` instead of throwing.
#[derive(Parser, Debug)]
#[command(
    name = "failsoft",
    version,
    about = "Rewrite JavaScript so reads fail soft to undefined"
)]
struct Cli {
    /// JavaScript file to rewrite (reads stdin when neither FILE nor --code is given).
    #[arg(value_name = "FILE", conflicts_with = "code")]
    file: Option<PathBuf>,

    /// JavaScript source given directly on the command line.
    #[arg(short = 'c', long = "code", value_name = "SOURCE")]
    code: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Run the rewritten program with Node.js instead of printing it.
    #[arg(long, conflicts_with = "format")]
    exec: bool,

    /// Node.js executable for --exec (overrides $FAILSOFT_NODE and $PATH).
    #[arg(long, value_name = "PATH")]
    node: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Write logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level, cli.log_json);

    let json_errors = cli.format == OutputFormat::Json;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            if json_errors {
                let response = ErrorResponse::from_error(&err);
                let _ = emit_response(&response, &mut io::stdout());
                let _ = io::stdout().flush();
            } else {
                eprintln!("failsoft: {err}");
            }
            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), FailsoftError> {
    let source = InputSource::from_args(cli.file, cli.code)?;
    let input = read_input(&source, &mut io::stdin().lock())?;
    let rewritten = rewrite(&input)?;

    if cli.exec {
        let node = resolve_node(&NodeOptions::from_env(cli.node))?;
        return exec_with_node(&node.path, &rewritten.output);
    }

    let rendered = render(&input, &rewritten, cli.format)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
