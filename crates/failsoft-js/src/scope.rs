// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Scope approximator: is an identifier already bound?
//!
//! This is a one-pass syntactic heuristic, not a scope resolver. Starting at
//! the identifier, it walks up the ancestor chain and at each level asks one
//! question, depending on how the current node hangs off its parent:
//!
//! - **function body**: does the parameter list name it? (plain, defaulted
//!   and rest parameters)
//! - **arrow body**: same, including a bare single parameter (`x => x`)
//! - **for-in/for-of body**: is it the loop variable?
//! - **anything else**: does an *earlier* sibling assign it as a statement
//!   (`x = ...`) or declare it as the first declarator (`var x, y` binds only
//!   `x`), or does *any* sibling declare a function of that name (hoisting)?
//!
//! The first hit wins. Reaching the root yields [`Binding::Global`]. Block and
//! function scopes are not distinguished and shadowing is not tracked.
//!
//! # Scope Tables
//!
//! Sibling questions are answered from a [`ScopeTable`] built lazily per
//! parent node on first use and cached for the rest of the rewrite: one pass
//! collects hoisted function names, the ordered list of statement-level
//! bindings with their start offsets, and later queries are lookups.

use std::collections::{HashMap, HashSet};

use tree_sitter::Node;

use crate::kind::NodeKind;
use crate::parse::{field_of, named_children};

/// How a name was found to be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A parameter of an enclosing function or arrow function.
    Parameter,
    /// The variable of an enclosing for-in/for-of loop.
    LoopVariable,
    /// The first declarator of an earlier `var`/`let`/`const` declaration.
    Declaration,
    /// An earlier plain assignment statement.
    Assignment,
    /// A function declaration anywhere in an enclosing block.
    HoistedFunction,
    /// Not found in any enclosing scope.
    Global,
}

impl Binding {
    /// True for every outcome except [`Binding::Global`].
    pub fn is_bound(self) -> bool {
        self != Binding::Global
    }
}

/// Bindings introduced by the children of one parent node.
#[derive(Debug, Default)]
pub struct ScopeTable {
    hoisted: HashSet<String>,
    /// `(start offset, name, binding)` in source order.
    ordered: Vec<(usize, String, Binding)>,
}

impl ScopeTable {
    /// Collect the bindings among the named children of `parent`.
    pub fn build(source: &str, parent: &Node<'_>) -> Self {
        let mut table = ScopeTable::default();
        for child in named_children(parent) {
            match NodeKind::of(&child) {
                kind if kind.is_hoisted_declaration() => {
                    if let Some(name) = child.child_by_field_name("name") {
                        table.hoisted.insert(text(source, &name).to_string());
                    }
                }
                NodeKind::ExpressionStatement => {
                    let target = child
                        .named_child(0)
                        .filter(|expr| NodeKind::of(expr) == NodeKind::AssignmentExpression)
                        .and_then(|expr| expr.child_by_field_name("left"))
                        .filter(|left| NodeKind::of(left) == NodeKind::Identifier);
                    if let Some(left) = target {
                        table.push(&child, text(source, &left), Binding::Assignment);
                    }
                }
                NodeKind::VariableDeclaration | NodeKind::LexicalDeclaration => {
                    let first = named_children(&child)
                        .into_iter()
                        .find(|d| NodeKind::of(d) == NodeKind::VariableDeclarator)
                        .and_then(|d| d.child_by_field_name("name"))
                        .filter(|name| NodeKind::of(name) == NodeKind::Identifier);
                    if let Some(name) = first {
                        table.push(&child, text(source, &name), Binding::Declaration);
                    }
                }
                _ => {}
            }
        }
        table
    }

    fn push(&mut self, statement: &Node<'_>, name: &str, binding: Binding) {
        self.ordered
            .push((statement.start_byte(), name.to_string(), binding));
    }

    /// Resolve `name` for a reference whose sibling starts at `before`.
    pub fn lookup(&self, name: &str, before: usize) -> Option<Binding> {
        if self.hoisted.contains(name) {
            return Some(Binding::HoistedFunction);
        }
        self.ordered
            .iter()
            .take_while(|(start, _, _)| *start < before)
            .find(|(_, bound, _)| bound == name)
            .map(|(_, _, binding)| *binding)
    }
}

/// Answers binding questions for one source, caching per-level tables.
pub struct ScopeApproximator<'src> {
    source: &'src str,
    tables: HashMap<usize, ScopeTable>,
}

impl<'src> ScopeApproximator<'src> {
    pub fn new(source: &'src str) -> Self {
        ScopeApproximator {
            source,
            tables: HashMap::new(),
        }
    }

    /// Number of cached scope tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Resolve `name` as seen from `start`.
    pub fn binding(&mut self, name: &str, start: Node<'_>) -> Binding {
        let mut current = start;
        while let Some(parent) = current.parent() {
            let in_body = field_of(&current) == Some("body");
            let found = match NodeKind::of(&parent) {
                kind if kind.is_function() && in_body => self
                    .parameter_binding(parent.child_by_field_name("parameters"), name),
                NodeKind::ArrowFunction if in_body => self.parameter_binding(
                    parent
                        .child_by_field_name("parameters")
                        .or_else(|| parent.child_by_field_name("parameter")),
                    name,
                ),
                NodeKind::ForInStatement if in_body => parent
                    .child_by_field_name("left")
                    .filter(|left| {
                        NodeKind::of(left) == NodeKind::Identifier
                            && text(self.source, left) == name
                    })
                    .map(|_| Binding::LoopVariable),
                _ => self.sibling_binding(&parent, current.start_byte(), name),
            };
            if let Some(binding) = found {
                tracing::trace!(ident = name, ?binding, "resolved binding");
                return binding;
            }
            current = parent;
        }
        Binding::Global
    }

    /// True when `name` is bound as seen from `start`.
    pub fn is_bound(&mut self, name: &str, start: Node<'_>) -> bool {
        self.binding(name, start).is_bound()
    }

    fn parameter_binding(&self, params: Option<Node<'_>>, name: &str) -> Option<Binding> {
        let params = params?;
        parameter_names(self.source, &params)
            .contains(&name)
            .then_some(Binding::Parameter)
    }

    fn sibling_binding(&mut self, parent: &Node<'_>, before: usize, name: &str) -> Option<Binding> {
        let source = self.source;
        self.tables
            .entry(parent.id())
            .or_insert_with(|| ScopeTable::build(source, parent))
            .lookup(name, before)
    }
}

/// Names bound by a parameter list (or a bare arrow parameter).
pub fn parameter_names<'src>(source: &'src str, params: &Node<'_>) -> Vec<&'src str> {
    if NodeKind::of(params) == NodeKind::Identifier {
        return vec![text(source, params)];
    }
    named_children(params)
        .iter()
        .filter_map(|param| {
            let ident = match NodeKind::of(param) {
                NodeKind::Identifier => Some(*param),
                NodeKind::RestPattern => param.named_child(0),
                NodeKind::AssignmentPattern => param.child_by_field_name("left"),
                _ => None,
            }?;
            (NodeKind::of(&ident) == NodeKind::Identifier).then(|| text(source, &ident))
        })
        .collect()
}

fn text<'src>(source: &'src str, node: &Node<'_>) -> &'src str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParsedSource;
    use crate::walk::collect_nodes;

    /// Every identifier spelled `name` in the tree.
    fn identifiers<'p>(parsed: &'p ParsedSource<'_>, name: &str) -> Vec<Node<'p>> {
        collect_nodes(parsed.root())
            .into_iter()
            .filter(|node| node.kind() == "identifier" && parsed.text(node) == name)
            .collect()
    }

    /// Binding of the `nth` identifier spelled `name` in `source`.
    fn binding_at(source: &str, name: &str, nth: usize) -> Binding {
        let parsed = ParsedSource::parse(source).unwrap();
        let found = identifiers(&parsed, name);
        ScopeApproximator::new(source).binding(name, found[nth])
    }

    /// Binding of the last identifier spelled `name` in `source`.
    fn binding_of(source: &str, name: &str) -> Binding {
        let parsed = ParsedSource::parse(source).unwrap();
        let found = identifiers(&parsed, name);
        let node = *found.last().expect("identifier present");
        ScopeApproximator::new(source).binding(name, node)
    }

    mod parameters {
        use super::*;

        #[test]
        fn function_parameter() {
            assert_eq!(binding_of("function foo(bar){return bar}", "bar"), Binding::Parameter);
        }

        #[test]
        fn defaulted_and_rest_parameters() {
            assert_eq!(binding_of("function f(a = 1){ return a }", "a"), Binding::Parameter);
            assert_eq!(binding_of("(a, ...rest) => rest", "rest"), Binding::Parameter);
        }

        #[test]
        fn bare_arrow_parameter() {
            assert_eq!(binding_of("x => x", "x"), Binding::Parameter);
        }

        #[test]
        fn outer_function_parameter() {
            assert_eq!(
                binding_of("function f(a){ return function(){ return a } }", "a"),
                Binding::Parameter
            );
        }

        #[test]
        fn method_parameter() {
            assert_eq!(
                binding_of("class C { m(p) { return p } }", "p"),
                Binding::Parameter
            );
        }
    }

    mod siblings {
        use super::*;

        #[test]
        fn loop_variable() {
            assert_eq!(binding_of("for (var k of o) k", "k"), Binding::LoopVariable);
        }

        #[test]
        fn earlier_declaration_and_assignment() {
            assert_eq!(binding_of("var a = 1; a", "a"), Binding::Declaration);
            assert_eq!(binding_of("let a = 1; a", "a"), Binding::Declaration);
            assert_eq!(binding_of("a = 1; a", "a"), Binding::Assignment);
        }

        #[test]
        fn later_declaration_does_not_bind() {
            assert_eq!(binding_at("a; var a = 1", "a", 0), Binding::Global);
        }

        #[test]
        fn only_first_declarator_binds() {
            assert_eq!(binding_of("var a = 1, b = 2; b", "b"), Binding::Global);
        }

        #[test]
        fn function_declarations_are_hoisted() {
            assert_eq!(binding_at("f(); function f(){}", "f", 0), Binding::HoistedFunction);
        }

        #[test]
        fn unknown_name_is_global() {
            assert_eq!(binding_of("missing", "missing"), Binding::Global);
            assert!(!Binding::Global.is_bound());
        }
    }

    #[test]
    fn tables_are_cached_per_level() {
        let source = "var a = 1; a; a";
        let parsed = ParsedSource::parse(source).unwrap();
        let root = parsed.root();
        let second = root.named_child(1).unwrap().named_child(0).unwrap();
        let third = root.named_child(2).unwrap().named_child(0).unwrap();

        let mut scopes = ScopeApproximator::new(source);
        assert!(scopes.is_bound("a", second));
        let tables = scopes.table_count();
        assert!(scopes.is_bound("a", second));
        assert_eq!(scopes.table_count(), tables);

        // Only the new statement level is built; the program table is reused.
        assert!(scopes.is_bound("a", third));
        assert_eq!(scopes.table_count(), tables + 1);
    }

    #[test]
    fn parameter_names_collects_all_forms() {
        let source = "function f(a, b = 2, {d}, ...c) {}";
        let parsed = ParsedSource::parse(source).unwrap();
        let params = parsed
            .root()
            .named_child(0)
            .and_then(|f| f.child_by_field_name("parameters"))
            .unwrap();
        assert_eq!(parameter_names(source, &params), vec!["a", "b", "c"]);
    }
}
