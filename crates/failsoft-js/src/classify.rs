// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node classifier: which nodes sit in a value-read position.
//!
//! A node is rewritten only when it is a reference root (identifier, member
//! access, indexed access or call) *and* its immediate syntactic context reads
//! its value. Write targets never classify as reads, so `a.b = c` keeps its
//! `.` while `c` is guarded.
//!
//! | Parent                            | Read when the node is... |
//! |-----------------------------------|--------------------------|
//! | `expression_statement`            | the statement expression |
//! | `assignment_expression`           | `right`, outside chained assignments |
//! | `arguments`                       | any argument |
//! | `parenthesized_expression`        | the operand |
//! | `update_expression`               | `argument` |
//! | `augmented_assignment_expression` | `right` |
//! | `binary_expression`               | `left` or `right` |
//! | `variable_declarator`             | `value` |
//! | `for_in_statement`                | `right` (the iterated expression) |
//! | `array`                           | any element |
//! | `pair`                            | `value` |
//! | `return_statement`                | the argument |
//! | `arrow_function`                  | `body` |
//! | `assignment_pattern`              | `right` (a parameter default) |

use tree_sitter::Node;

use crate::kind::NodeKind;
use crate::parse::field_of;

/// The syntactic context that makes a node a value read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadPosition {
    ExpressionStatement,
    AssignmentValue,
    CallArgument,
    ParenthesizedOperand,
    UpdateOperand,
    CompoundAssignmentValue,
    BinaryOperand,
    DeclaratorInitializer,
    LoopIterable,
    ArrayElement,
    PropertyValue,
    ReturnValue,
    ArrowBody,
    ParameterDefault,
}

/// True for the shapes that can be the outermost node of a chain.
pub fn is_reference_root(node: &Node<'_>) -> bool {
    node.is_named() && NodeKind::of(node).is_reference_root()
}

/// Classify the position `node` occupies in its parent.
pub fn read_position(node: &Node<'_>) -> Option<ReadPosition> {
    let parent = node.parent()?;
    let field = field_of(node);
    let position = match NodeKind::of(&parent) {
        NodeKind::ExpressionStatement => ReadPosition::ExpressionStatement,
        NodeKind::AssignmentExpression if field == Some("right") && !is_chained(&parent) => {
            ReadPosition::AssignmentValue
        }
        NodeKind::Arguments => ReadPosition::CallArgument,
        NodeKind::ParenthesizedExpression => ReadPosition::ParenthesizedOperand,
        NodeKind::UpdateExpression if field == Some("argument") => ReadPosition::UpdateOperand,
        NodeKind::AugmentedAssignmentExpression if field == Some("right") => {
            ReadPosition::CompoundAssignmentValue
        }
        NodeKind::BinaryExpression if matches!(field, Some("left" | "right")) => {
            ReadPosition::BinaryOperand
        }
        NodeKind::VariableDeclarator if field == Some("value") => {
            ReadPosition::DeclaratorInitializer
        }
        NodeKind::ForInStatement if field == Some("right") => ReadPosition::LoopIterable,
        NodeKind::Array => ReadPosition::ArrayElement,
        NodeKind::Pair if field == Some("value") => ReadPosition::PropertyValue,
        NodeKind::ReturnStatement => ReadPosition::ReturnValue,
        NodeKind::ArrowFunction if field == Some("body") => ReadPosition::ArrowBody,
        NodeKind::AssignmentPattern if field == Some("right") => ReadPosition::ParameterDefault,
        NodeKind::Program
        | NodeKind::StatementBlock
        | NodeKind::IfStatement
        | NodeKind::ForInStatement
        | NodeKind::Identifier
        | NodeKind::MemberExpression
        | NodeKind::SubscriptExpression
        | NodeKind::CallExpression
        | NodeKind::AssignmentExpression
        | NodeKind::AugmentedAssignmentExpression
        | NodeKind::UpdateExpression
        | NodeKind::BinaryExpression
        | NodeKind::Pair
        | NodeKind::VariableDeclaration
        | NodeKind::LexicalDeclaration
        | NodeKind::VariableDeclarator
        | NodeKind::FormalParameters
        | NodeKind::AssignmentPattern
        | NodeKind::RestPattern
        | NodeKind::FunctionDeclaration
        | NodeKind::FunctionExpression
        | NodeKind::GeneratorFunctionDeclaration
        | NodeKind::GeneratorFunction
        | NodeKind::MethodDefinition
        | NodeKind::ArrowFunction
        | NodeKind::Dot
        | NodeKind::LeftBracket
        | NodeKind::OptionalChain
        | NodeKind::Super
        | NodeKind::Import
        | NodeKind::Error
        | NodeKind::Other => return None,
    };
    Some(position)
}

/// True for the inner link of a chained assignment (`b.c = d` in
/// `a = b.c = d`). Its value is only passed on to the next target, and the
/// whole chain is left as written.
fn is_chained(assignment: &Node<'_>) -> bool {
    assignment
        .parent()
        .is_some_and(|parent| NodeKind::of(&parent) == NodeKind::AssignmentExpression)
}

/// True when the node's value is consumed by its context.
pub fn is_read_position(node: &Node<'_>) -> bool {
    read_position(node).is_some()
}

/// True for a bare identifier that is the target of a compound assignment
/// forming a whole expression statement (`x += y;`).
pub fn is_compound_assignment_target(node: &Node<'_>) -> bool {
    if NodeKind::of(node) != NodeKind::Identifier || field_of(node) != Some("left") {
        return false;
    }
    let Some(assignment) = node.parent() else {
        return false;
    };
    if NodeKind::of(&assignment) != NodeKind::AugmentedAssignmentExpression {
        return false;
    }
    assignment
        .parent()
        .is_some_and(|stmt| NodeKind::of(&stmt) == NodeKind::ExpressionStatement)
}
