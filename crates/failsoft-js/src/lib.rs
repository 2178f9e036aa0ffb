// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! JavaScript rewriter that makes reads fail soft.
//!
//! Every member access, indexed access and call chain in a value-read position
//! becomes an optional chain, and every read of a possibly undeclared bare
//! identifier is wrapped in a `typeof` guard, so evaluating the rewritten
//! program yields `undefined` where the original would have thrown:
//!
//! ```
//! let out = failsoft_js::transpile("foo.bar").unwrap();
//! assert_eq!(out, "(typeof foo === \"undefined\" ? void 0 : foo)?.bar");
//! ```
//!
//! Write targets are never touched (`a.b = c` keeps its `.`), bytes outside the
//! edits are reproduced exactly, and regions the parser could not make sense
//! of are left as they are.
//!
//! # Modules
//!
//! - [`parse`]: tree-sitter provider and error-region queries
//! - [`kind`]: closed node-kind vocabulary
//! - [`walk`]: pre-order walker
//! - [`classify`]: read-position and compound-target predicates
//! - [`scope`]: scope approximator
//! - [`chain`]: reference-chain decomposition
//! - [`rewrite`]: the rewriting pass

pub mod chain;
pub mod classify;
pub mod error;
pub mod kind;
pub mod parse;
pub mod rewrite;
pub mod scope;
pub mod walk;

pub use error::{TranspileError, TranspileResult};
pub use rewrite::{analyze, RewriteReport};

use failsoft_core::edit::splice;
use failsoft_core::patch::Edit;

/// Rewrite `source` so its reads fail soft.
pub fn transpile(source: &str) -> TranspileResult<String> {
    Ok(transpile_with_edits(source)?.0)
}

/// Rewrite `source`, also returning the applied edits in source order.
pub fn transpile_with_edits(source: &str) -> TranspileResult<(String, Vec<Edit>)> {
    let report = analyze(source)?;
    let output = splice(source, report.edits.iter().cloned())?;
    tracing::debug!(edits = report.edits.len(), "transpiled source");
    Ok((output, report.edits))
}

/// Rewrite raw bytes, rejecting input that is not UTF-8.
pub fn transpile_bytes(source: &[u8]) -> TranspileResult<String> {
    let text = std::str::from_utf8(source).map_err(|e| TranspileError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    transpile(text)
}
