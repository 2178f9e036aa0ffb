// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Syntax tree provider: tree-sitter with the JavaScript grammar.
//!
//! [`ParsedSource`] owns the concrete syntax tree for one source text and
//! offers the small navigation vocabulary the rewriter needs on top of
//! [`tree_sitter::Node`]: node text, the field a child occupies in its parent,
//! and error-region queries.

use tree_sitter::{Node, Parser, Tree};

use crate::error::{TranspileError, TranspileResult};
use crate::kind::NodeKind;

/// A parsed JavaScript source text.
pub struct ParsedSource<'src> {
    source: &'src str,
    tree: Tree,
}

impl<'src> ParsedSource<'src> {
    /// Parse `source` with the JavaScript grammar.
    pub fn parse(source: &'src str) -> TranspileResult<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
        let tree = parser
            .parse(source, None)
            .ok_or(TranspileError::ParseFailed)?;
        let parsed = ParsedSource { source, tree };
        tracing::debug!(
            bytes = source.len(),
            has_error = parsed.root().has_error(),
            "parsed source"
        );
        Ok(parsed)
    }

    /// The source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The root `program` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`.
    pub fn text(&self, node: &Node<'_>) -> &'src str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// True when the whole tree parsed without ERROR or MISSING nodes.
    pub fn is_clean(&self) -> bool {
        !self.root().has_error()
    }
}

/// The field name `node` occupies in its parent, if any.
pub fn field_of(node: &Node<'_>) -> Option<&'static str> {
    let parent = node.parent()?;
    let mut cursor = parent.walk();
    if !cursor.goto_first_child() {
        return None;
    }
    loop {
        if cursor.node().id() == node.id() {
            return cursor.field_name();
        }
        if !cursor.goto_next_sibling() {
            return None;
        }
    }
}

/// Named children of `node`, in source order.
pub fn named_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// True when `node` must not be rewritten because of a nearby syntax error.
///
/// A node is tainted when it is (or contains) an ERROR or MISSING node, when
/// an ERROR node encloses it within its statement, or when the nearest
/// statement-level ancestor (a direct child of the program or of a block)
/// contains an error. Statements beyond that one are not consulted, so a
/// broken statement inside a function body leaves its siblings rewritable.
pub fn in_error_region(node: &Node<'_>) -> bool {
    if node.has_error() || node.is_missing() {
        return true;
    }
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if NodeKind::of(&parent).is_statement_container() {
            return current.has_error();
        }
        if parent.is_error() {
            return true;
        }
        current = parent;
    }
    false
}
