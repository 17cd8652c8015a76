//! Property tests for the structural invariants the parser guarantees on
//! every tree: span containment, determinism, and diagnostic ordering.

use genero_syntax::ast::NodeId;
use genero_syntax::{lexer, parser};
use proptest::prelude::*;

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("avoid reserved words", |s| {
        genero_core::lang::keywords::from_str(s).is_none()
            && genero_core::lang::operators::from_word(s).is_none()
            && genero_core::lang::types::from_str(s).is_none()
    })
}

/// Small random-but-valid modules: declarations plus a main block.
fn module_strategy() -> impl Strategy<Value = String> {
    (
        ident_strategy(),
        ident_strategy(),
        0u16..1000,
        prop::collection::vec(ident_strategy(), 1..4),
    )
        .prop_map(|(var, target, number, params)| {
            format!(
                "DEFINE {var} INTEGER\nFUNCTION work({params})\nLET {target} = {var} + {number}\nRETURN {target}\nEND FUNCTION\nMAIN\nCALL work({number}) RETURNING {var}\nEND MAIN\n",
                var = var,
                target = target,
                number = number,
                params = params.join(", "),
            )
        })
}

proptest! {
    #[test]
    fn spans_are_ordered_and_contained(source in module_strategy()) {
        let tokens = lexer::lex(&source).expect("generated source lexes");
        let parse = parser::parse_module(&tokens);
        for raw in 0..parse.ast.len() as u32 {
            let id = NodeId::from_raw(raw);
            let node = parse.ast.node(id);
            prop_assert!(node.span.end >= node.span.start);
            let mut last_start = None;
            for &child in &node.children {
                let c = parse.ast.node(child);
                prop_assert!(c.span.start >= node.span.start);
                prop_assert!(c.span.end <= node.span.end);
                if let Some(prev) = last_start {
                    prop_assert!(c.span.start >= prev, "children must stay ordered by start");
                }
                last_start = Some(c.span.start);
            }
        }
    }

    #[test]
    fn reparsing_is_deterministic(source in module_strategy()) {
        let tokens = lexer::lex(&source).expect("generated source lexes");
        let first = parser::parse_module(&tokens);
        let second = parser::parse_module(&tokens);
        prop_assert_eq!(first.ast, second.ast);
        prop_assert_eq!(first.diagnostics, second.diagnostics);
    }
}
