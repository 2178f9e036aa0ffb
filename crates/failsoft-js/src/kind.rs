// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Closed vocabulary of the grammar node kinds the rewriter cares about.
//!
//! The JavaScript grammar reports kinds as strings. They are mapped once into
//! [`NodeKind`] so every classification and rewrite decision is an exhaustive
//! `match`. Kinds the rewriter never inspects collapse into
//! [`NodeKind::Other`] and pass through untouched.
//!
//! | Group        | Kinds |
//! |--------------|-------|
//! | Chain roots  | `Identifier`, `MemberExpression`, `SubscriptExpression`, `CallExpression` |
//! | Read contexts| `ExpressionStatement`, `AssignmentExpression`, `Arguments`, ... |
//! | Binders      | function kinds, `ArrowFunction`, `ForInStatement`, declarations |
//! | Tokens       | `Dot`, `LeftBracket`, `OptionalChain`, `Super`, `Import` |

use tree_sitter::Node;

/// A grammar node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Containers
    Program,
    StatementBlock,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    ForInStatement,

    // Chain roots
    Identifier,
    MemberExpression,
    SubscriptExpression,
    CallExpression,

    // Expressions that establish read positions
    AssignmentExpression,
    AugmentedAssignmentExpression,
    UpdateExpression,
    BinaryExpression,
    ParenthesizedExpression,
    Arguments,
    Array,
    Pair,

    // Declarations and parameters
    VariableDeclaration,
    LexicalDeclaration,
    VariableDeclarator,
    FormalParameters,
    AssignmentPattern,
    RestPattern,

    // Functions
    FunctionDeclaration,
    FunctionExpression,
    GeneratorFunctionDeclaration,
    GeneratorFunction,
    MethodDefinition,
    ArrowFunction,

    // Tokens and keywords
    Dot,
    LeftBracket,
    OptionalChain,
    Super,
    Import,

    /// A parser error node.
    Error,
    /// Any kind the rewriter does not inspect.
    Other,
}

impl NodeKind {
    /// Map a grammar kind string.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "statement_block" => NodeKind::StatementBlock,
            "expression_statement" => NodeKind::ExpressionStatement,
            "return_statement" => NodeKind::ReturnStatement,
            "if_statement" => NodeKind::IfStatement,
            "for_in_statement" => NodeKind::ForInStatement,
            "identifier" => NodeKind::Identifier,
            "member_expression" => NodeKind::MemberExpression,
            "subscript_expression" => NodeKind::SubscriptExpression,
            "call_expression" => NodeKind::CallExpression,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "augmented_assignment_expression" => NodeKind::AugmentedAssignmentExpression,
            "update_expression" => NodeKind::UpdateExpression,
            "binary_expression" => NodeKind::BinaryExpression,
            "parenthesized_expression" => NodeKind::ParenthesizedExpression,
            "arguments" => NodeKind::Arguments,
            "array" => NodeKind::Array,
            "pair" => NodeKind::Pair,
            "variable_declaration" => NodeKind::VariableDeclaration,
            "lexical_declaration" => NodeKind::LexicalDeclaration,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "formal_parameters" => NodeKind::FormalParameters,
            "assignment_pattern" => NodeKind::AssignmentPattern,
            "rest_pattern" => NodeKind::RestPattern,
            "function_declaration" => NodeKind::FunctionDeclaration,
            "function_expression" => NodeKind::FunctionExpression,
            "generator_function_declaration" => NodeKind::GeneratorFunctionDeclaration,
            "generator_function" => NodeKind::GeneratorFunction,
            "method_definition" => NodeKind::MethodDefinition,
            "arrow_function" => NodeKind::ArrowFunction,
            "." => NodeKind::Dot,
            "[" => NodeKind::LeftBracket,
            "optional_chain" => NodeKind::OptionalChain,
            "super" => NodeKind::Super,
            "import" => NodeKind::Import,
            "ERROR" => NodeKind::Error,
            _ => NodeKind::Other,
        }
    }

    /// Kind of a tree node.
    pub fn of(node: &Node<'_>) -> Self {
        NodeKind::from_kind(node.kind())
    }

    /// Shapes that can be the outermost node of a reference chain.
    pub fn is_reference_root(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::MemberExpression
                | NodeKind::SubscriptExpression
                | NodeKind::CallExpression
        )
    }

    /// Function forms whose `body` is scoped by a `parameters` list.
    pub fn is_function(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::GeneratorFunctionDeclaration
                | NodeKind::GeneratorFunction
                | NodeKind::MethodDefinition
        )
    }

    /// Function declarations hoisted to the top of their block.
    pub fn is_hoisted_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration | NodeKind::GeneratorFunctionDeclaration
        )
    }

    /// Containers whose children are statements.
    pub fn is_statement_container(self) -> bool {
        matches!(self, NodeKind::Program | NodeKind::StatementBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_kinds() {
        assert_eq!(NodeKind::from_kind("member_expression"), NodeKind::MemberExpression);
        assert_eq!(NodeKind::from_kind("."), NodeKind::Dot);
        assert_eq!(NodeKind::from_kind("ERROR"), NodeKind::Error);
    }

    #[test]
    fn unknown_kinds_are_other() {
        assert_eq!(NodeKind::from_kind("class_declaration"), NodeKind::Other);
        assert_eq!(NodeKind::from_kind("template_string"), NodeKind::Other);
        assert_eq!(NodeKind::from_kind("function"), NodeKind::Other);
    }

    #[test]
    fn groups() {
        assert!(NodeKind::CallExpression.is_reference_root());
        assert!(!NodeKind::AssignmentExpression.is_reference_root());
        assert!(NodeKind::MethodDefinition.is_function());
        assert!(!NodeKind::ArrowFunction.is_function());
        assert!(NodeKind::GeneratorFunctionDeclaration.is_hoisted_declaration());
        assert!(!NodeKind::FunctionExpression.is_hoisted_declaration());
        assert!(NodeKind::StatementBlock.is_statement_container());
    }
}
