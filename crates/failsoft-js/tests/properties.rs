//! Property-based tests for the rewriter.
//!
//! Generated programs check that:
//! 1. A chain in read position gets exactly one `?.` per operation, in source
//!    order, plus a guard on its unknown base identifier
//! 2. Assignment targets, and whole chained assignments whatever their tail,
//!    are byte-identical
//! 3. Output of clean input re-parses without errors
//! 4. No node is both a chain root and part of another chain's spine

use failsoft_js::parse::ParsedSource;
use failsoft_js::{analyze, transpile};
use proptest::prelude::*;

// -- Code Generation Strategies --

/// A JavaScript identifier that is never a reserved word.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("id_[a-z0-9]{0,5}").unwrap()
}

/// A property name used after `.`.
fn property_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("p_[a-z0-9]{0,4}").unwrap()
}

/// One access or call operation.
#[derive(Debug, Clone)]
enum Op {
    Dot(String),
    Index(u32),
    Call,
    CallWithLiteral(u32),
}

impl Op {
    fn source(&self) -> String {
        match self {
            Op::Dot(name) => format!(".{name}"),
            Op::Index(n) => format!("[{n}]"),
            Op::Call => "()".to_string(),
            Op::CallWithLiteral(n) => format!("({n})"),
        }
    }

    fn rewritten(&self) -> String {
        match self {
            Op::Dot(name) => format!("?.{name}"),
            Op::Index(n) => format!("?.[{n}]"),
            Op::Call => "?.()".to_string(),
            Op::CallWithLiteral(n) => format!("?.({n})"),
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        property_strategy().prop_map(Op::Dot),
        (0u32..100).prop_map(Op::Index),
        Just(Op::Call),
        (0u32..100).prop_map(Op::CallWithLiteral),
    ]
}

/// A base identifier followed by at least one operation.
fn chain_strategy() -> impl Strategy<Value = (String, Vec<Op>)> {
    (identifier_strategy(), prop::collection::vec(op_strategy(), 1..6))
}

/// A write target: member or index accesses only.
fn target_strategy() -> impl Strategy<Value = String> {
    (
        identifier_strategy(),
        prop::collection::vec(
            prop_oneof![
                property_strategy().prop_map(|p| format!(".{p}")),
                (0u32..10).prop_map(|n| format!("[{n}]")),
            ],
            1..4,
        ),
    )
        .prop_map(|(base, ops)| format!("{base}{}", ops.concat()))
}

fn chain_source(base: &str, ops: &[Op]) -> String {
    format!("{base}{}", ops.iter().map(Op::source).collect::<String>())
}

fn guard(name: &str) -> String {
    format!("(typeof {name} === \"undefined\" ? void 0 : {name})")
}

/// One statement built from a few shapes that mix reads and writes.
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        chain_strategy().prop_map(|(b, ops)| chain_source(&b, &ops)),
        (target_strategy(), chain_strategy())
            .prop_map(|(t, (b, ops))| format!("{t} = {}", chain_source(&b, &ops))),
        (identifier_strategy(), chain_strategy())
            .prop_map(|(n, (b, ops))| format!("var {n} = {}", chain_source(&b, &ops))),
        (identifier_strategy(), chain_strategy(), chain_strategy()).prop_map(
            |(f, (b1, o1), (b2, o2))| format!(
                "{f}({}, {})",
                chain_source(&b1, &o1),
                chain_source(&b2, &o2)
            )
        ),
        (identifier_strategy(), chain_strategy())
            .prop_map(|(n, (b, ops))| format!("{n} += {}", chain_source(&b, &ops))),
        (chain_strategy(), chain_strategy()).prop_map(|((b1, o1), (b2, o2))| format!(
            "if ({}) {{ {} }}",
            chain_source(&b1, &o1),
            chain_source(&b2, &o2)
        )),
        (identifier_strategy(), chain_strategy()).prop_map(|(p, (b, ops))| format!(
            "function f_{p}({p}) {{ return {} }}",
            chain_source(&b, &ops)
        )),
    ]
}

fn program_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(statement_strategy(), 1..6).prop_map(|stmts| stmts.join(";\n"))
}

// -- Properties --

proptest! {
    #[test]
    fn read_chain_gets_one_marker_per_operation((base, ops) in chain_strategy()) {
        let source = chain_source(&base, &ops);
        let expected = format!(
            "{}{}",
            guard(&base),
            ops.iter().map(Op::rewritten).collect::<String>()
        );
        let output = transpile(&source).unwrap();
        prop_assert_eq!(output.matches("?.").count(), ops.len());
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn assignment_target_is_byte_identical(target in target_strategy(), (base, ops) in chain_strategy()) {
        let source = format!("{target} = {}", chain_source(&base, &ops));
        let output = transpile(&source).unwrap();
        let prefix = format!("{target} = ");
        prop_assert!(output.starts_with(&prefix), "target rewritten: {}", output);
    }

    #[test]
    fn chained_assignment_is_unchanged(
        first in identifier_strategy(),
        middle in prop::collection::vec(target_strategy(), 1..4),
        (base, ops) in chain_strategy(),
        bare_tail in any::<bool>(),
    ) {
        let tail = if bare_tail { base } else { chain_source(&base, &ops) };
        let source = format!("{first} = {} = {tail}", middle.join(" = "));
        prop_assert_eq!(transpile(&source).unwrap(), source);
    }

    #[test]
    fn clean_input_yields_clean_output(program in program_strategy()) {
        let parsed = ParsedSource::parse(&program).unwrap();
        prop_assume!(parsed.is_clean());
        let output = transpile(&program).unwrap();
        let reparsed = ParsedSource::parse(&output).unwrap();
        prop_assert!(reparsed.is_clean(), "broken output: {}", output);
    }

    #[test]
    fn roots_and_spine_are_disjoint(program in program_strategy()) {
        let report = analyze(&program).unwrap();
        for root in &report.roots {
            prop_assert!(!report.spine.contains(root), "{} is root and spine", root);
        }
    }
}
