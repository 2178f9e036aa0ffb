// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Reference-chain rewriter.
//!
//! A chain such as `a.b[c].d()` is decomposed from the outermost operation
//! inwards, one edit per operation:
//!
//! | Operation     | Edit |
//! |---------------|------|
//! | `obj.prop`    | replace the `.` token with `?.` |
//! | `obj[expr]`   | insert `?.` before `[` |
//! | `callee(...)` | insert `?.` before the argument list |
//! | `name`        | replace with a `typeof` guard, unless already bound |
//!
//! Operations that are already optional (`a?.b`) emit nothing but still
//! descend. The spine stops without edits at `super` (`super.x`, `super(...)`),
//! at dynamic `import(...)` and at tagged templates, where an optional chain
//! would not parse.
//!
//! Only the object/callee spine is followed. Index expressions and call
//! arguments are not part of the chain; the walker reaches them on its own.

use failsoft_core::edit::EditPrimitive;
use failsoft_core::patch::Span;
use tree_sitter::Node;

use crate::classify::is_reference_root;
use crate::kind::NodeKind;
use crate::parse::ParsedSource;
use crate::scope::ScopeApproximator;

/// The optional-chaining operator.
pub const OPTIONAL: &str = "?.";

/// Guarded read of a possibly undeclared identifier.
pub fn guarded_read(name: &str) -> String {
    format!("(typeof {name} === \"undefined\" ? void 0 : {name})")
}

/// Decompose the chain rooted at `root`.
///
/// `spine` receives every node the decomposition descended into (the root
/// itself excluded).
pub fn decompose<'tree>(
    parsed: &ParsedSource<'_>,
    scopes: &mut ScopeApproximator<'_>,
    root: Node<'tree>,
    edits: &mut Vec<EditPrimitive>,
    spine: &mut Vec<Node<'tree>>,
) {
    let mut current = root;
    loop {
        let next = match NodeKind::of(&current) {
            NodeKind::MemberExpression => {
                let object = current.child_by_field_name("object");
                if !is_optional(&current) {
                    if object.is_some_and(|o| NodeKind::of(&o) == NodeKind::Super) {
                        return;
                    }
                    if let Some(dot) = token(&current, NodeKind::Dot) {
                        edits.push(EditPrimitive::Replace {
                            span: span_of(&dot),
                            new_text: OPTIONAL.to_string(),
                        });
                    }
                }
                object
            }
            NodeKind::SubscriptExpression => {
                let object = current.child_by_field_name("object");
                if !is_optional(&current) {
                    if object.is_some_and(|o| NodeKind::of(&o) == NodeKind::Super) {
                        return;
                    }
                    if let Some(bracket) = token(&current, NodeKind::LeftBracket) {
                        edits.push(EditPrimitive::InsertBefore {
                            anchor_span: span_of(&bracket),
                            text: OPTIONAL.to_string(),
                        });
                    }
                }
                object
            }
            NodeKind::CallExpression => {
                let Some(arguments) = current
                    .child_by_field_name("arguments")
                    .filter(|a| NodeKind::of(a) == NodeKind::Arguments)
                else {
                    // Tagged template.
                    return;
                };
                let Some(function) = current.child_by_field_name("function") else {
                    return;
                };
                if matches!(NodeKind::of(&function), NodeKind::Super | NodeKind::Import) {
                    return;
                }
                if !is_optional(&current) {
                    edits.push(EditPrimitive::InsertBefore {
                        anchor_span: span_of(&arguments),
                        text: OPTIONAL.to_string(),
                    });
                }
                Some(function)
            }
            NodeKind::Identifier => {
                let name = parsed.text(&current);
                if !scopes.is_bound(name, current) {
                    edits.push(EditPrimitive::Replace {
                        span: span_of(&current),
                        new_text: guarded_read(name),
                    });
                }
                return;
            }
            _ => return,
        };
        match next.filter(is_reference_root) {
            Some(node) => {
                spine.push(node);
                current = node;
            }
            None => return,
        }
    }
}

/// Byte span of a node.
pub fn span_of(node: &Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn is_optional(node: &Node<'_>) -> bool {
    node.child_by_field_name("optional_chain").is_some()
}

fn token<'tree>(node: &Node<'tree>, kind: NodeKind) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| NodeKind::of(child) == kind);
    found
}
