// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Pre-order tree walker.
//!
//! [`walk_tree`] visits every node of a subtree exactly once, parents before
//! children and children in source order, anonymous tokens included. It drives
//! a [`TreeCursor`](tree_sitter::TreeCursor) instead of recursing, so deeply
//! nested input cannot overflow the stack.

use tree_sitter::Node;

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    SkipChildren,
}

/// A callback invoked once per node.
pub trait Visitor<'tree> {
    fn visit(&mut self, node: Node<'tree>) -> VisitResult;
}

impl<'tree, F> Visitor<'tree> for F
where
    F: FnMut(Node<'tree>) -> VisitResult,
{
    fn visit(&mut self, node: Node<'tree>) -> VisitResult {
        self(node)
    }
}

/// Visit `root` and its descendants in pre-order.
pub fn walk_tree<'tree, V: Visitor<'tree>>(root: Node<'tree>, visitor: &mut V) {
    let mut cursor = root.walk();
    loop {
        let descend = visitor.visit(cursor.node()) == VisitResult::Continue;
        if descend && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Every node of the subtree rooted at `root`, in pre-order.
pub fn collect_nodes<'tree>(root: Node<'tree>) -> Vec<Node<'tree>> {
    let mut nodes = Vec::new();
    walk_tree(root, &mut |node: Node<'tree>| {
        nodes.push(node);
        VisitResult::Continue
    });
    nodes
}
