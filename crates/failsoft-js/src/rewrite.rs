// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The rewriting pass: walker, classifier, scopes and chains together.
//!
//! [`Rewriter`] is a [`Visitor`] over the whole tree. For every reference root
//! in a read position it hands the chain to [`chain::decompose`]; for a bare
//! identifier that is the target of a statement-level compound assignment it
//! emits the existence guard
//!
//! ```text
//! x += y;   =>   if (typeof x !== "undefined") {x += y;}
//! ```
//!
//! Everything else is visited and left alone.
//!
//! # Two Cooperating Passes
//!
//! Chain decomposition follows only the object/callee spine, while the walker
//! keeps visiting every node, which is how call arguments and index
//! expressions get rewritten. The nodes accepted as chain roots and the nodes
//! consumed as spine are disjoint: a spine node's parent is a member, subscript
//! or call expression, none of which is a read context. [`RewriteReport`]
//! records both sets and the invariant is asserted in debug builds.

use std::collections::HashSet;

use failsoft_core::edit::{EditBatch, EditPrimitive};
use failsoft_core::patch::{Edit, Span};
use tree_sitter::Node;

use crate::chain::{self, span_of};
use crate::classify::{is_compound_assignment_target, is_read_position, is_reference_root};
use crate::error::TranspileResult;
use crate::kind::NodeKind;
use crate::parse::{in_error_region, ParsedSource};
use crate::scope::ScopeApproximator;
use crate::walk::{walk_tree, VisitResult, Visitor};

/// Outcome of one rewriting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    /// Edits in source order.
    pub edits: Vec<Edit>,
    /// Spans of the nodes accepted as chain roots, in visit order.
    pub roots: Vec<Span>,
    /// Spans of the nodes consumed as chain spine, in visit order.
    pub spine: Vec<Span>,
    /// Number of ERROR regions left untouched.
    pub skipped_error_regions: usize,
}

/// Visitor that collects the edits for one parsed source.
pub struct Rewriter<'p, 'src> {
    parsed: &'p ParsedSource<'src>,
    scopes: ScopeApproximator<'src>,
    batch: EditBatch<'src>,
    root_ids: HashSet<usize>,
    spine_ids: HashSet<usize>,
    roots: Vec<Span>,
    spine: Vec<Span>,
    skipped_error_regions: usize,
}

impl<'p, 'src> Rewriter<'p, 'src> {
    pub fn new(parsed: &'p ParsedSource<'src>) -> Self {
        Rewriter {
            parsed,
            scopes: ScopeApproximator::new(parsed.source()),
            batch: EditBatch::new(parsed.source()),
            root_ids: HashSet::new(),
            spine_ids: HashSet::new(),
            roots: Vec::new(),
            spine: Vec::new(),
            skipped_error_regions: 0,
        }
    }

    /// Walk the whole tree.
    pub fn run(mut self) -> RewriteReport {
        let parsed = self.parsed;
        walk_tree(parsed.root(), &mut self);
        self.finish()
    }

    fn finish(self) -> RewriteReport {
        debug_assert!(
            self.root_ids.is_disjoint(&self.spine_ids),
            "a node was both a chain root and chain spine"
        );
        tracing::debug!(
            edits = self.batch.len(),
            roots = self.roots.len(),
            skipped_error_regions = self.skipped_error_regions,
            "collected edits"
        );
        RewriteReport {
            edits: self.batch.sorted_edits(),
            roots: self.roots,
            spine: self.spine,
            skipped_error_regions: self.skipped_error_regions,
        }
    }

    fn rewrite_chain(&mut self, root: Node<'_>) {
        self.root_ids.insert(root.id());
        self.roots.push(span_of(&root));

        let mut edits = Vec::new();
        let mut spine = Vec::new();
        chain::decompose(self.parsed, &mut self.scopes, root, &mut edits, &mut spine);

        for node in spine {
            self.spine_ids.insert(node.id());
            self.spine.push(span_of(&node));
        }
        for edit in edits {
            self.batch.add(edit);
        }
    }

    fn guard_compound_target(&mut self, target: Node<'_>) {
        let Some(statement) = target.parent().and_then(|assignment| assignment.parent()) else {
            return;
        };
        if in_error_region(&statement) {
            return;
        }
        let name = self.parsed.text(&target);
        if self.scopes.is_bound(name, target) {
            return;
        }
        let (open, close) = if closes_if_before_else(&statement) {
            ("{", "}}")
        } else {
            ("", "}")
        };
        self.batch.add(EditPrimitive::Replace {
            span: span_of(&target),
            new_text: format!("{open}if (typeof {name} !== \"undefined\") {{{name}"),
        });
        self.batch.add(EditPrimitive::InsertAfter {
            anchor_span: span_of(&statement),
            text: close.to_string(),
        });
    }
}

impl<'tree> Visitor<'tree> for Rewriter<'_, '_> {
    fn visit(&mut self, node: Node<'tree>) -> VisitResult {
        if node.is_error() {
            self.skipped_error_regions += 1;
            tracing::debug!(
                start = node.start_byte(),
                end = node.end_byte(),
                "skipping error region"
            );
            return VisitResult::SkipChildren;
        }
        if !is_reference_root(&node) {
            return VisitResult::Continue;
        }
        if is_read_position(&node) {
            if !in_error_region(&node) {
                self.rewrite_chain(node);
            }
        } else if is_compound_assignment_target(&node) {
            self.guard_compound_target(node);
        }
        VisitResult::Continue
    }
}

/// True when `statement` is the last thing in the consequence of an `if` that
/// has an `else`.
///
/// Wrapping such a statement in a new `if (...) {...}` would steal the
/// `else`, so the guard gets an extra brace pair.
fn closes_if_before_else(statement: &Node<'_>) -> bool {
    let mut ancestor = statement.parent();
    while let Some(node) = ancestor {
        if NodeKind::of(&node) == NodeKind::IfStatement
            && node.child_by_field_name("alternative").is_some()
            && node
                .child_by_field_name("consequence")
                .is_some_and(|c| c.end_byte() == statement.end_byte())
        {
            return true;
        }
        ancestor = node.parent();
    }
    false
}

/// Parse `source` and collect its edits.
pub fn analyze(source: &str) -> TranspileResult<RewriteReport> {
    let parsed = ParsedSource::parse(source)?;
    Ok(Rewriter::new(&parsed).run())
}
