//! failsoft: rewrite JavaScript so reads fail soft to `undefined`.
//!
//! Member accesses, indexed accesses and calls in read positions become
//! optional chains, and reads of possibly undeclared identifiers are wrapped
//! in `typeof` guards. The engine lives in [`failsoft_js`]; the
//! language-agnostic infrastructure (spans, edits, diff, errors, JSON output)
//! lives in `failsoft-core` and is re-exported here.

// Core infrastructure - re-exported from failsoft-core
pub use failsoft_core::diff;
pub use failsoft_core::edit;
pub use failsoft_core::error;
pub use failsoft_core::output;
pub use failsoft_core::patch;
pub use failsoft_core::text;

// JavaScript engine
pub use failsoft_js as js;
pub use failsoft_js::{transpile, transpile_bytes, transpile_with_edits};

// Front door
pub mod cli;
pub mod node;
