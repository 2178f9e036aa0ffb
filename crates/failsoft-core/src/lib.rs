//! Core infrastructure for failsoft.
//!
//! This crate provides language-agnostic infrastructure:
//! - Byte spans and edit primitives
//! - The edit batch collector and text splicer
//! - Error types and error codes
//! - JSON output types for CLI responses
//! - Text position utilities and line diff generation

pub mod diff;
pub mod edit;
pub mod error;
pub mod output;
pub mod patch;
pub mod text;
