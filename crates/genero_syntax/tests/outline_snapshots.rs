//! Outline rendering snapshots over small but representative modules.

use genero_syntax::{lexer, outline, parser};

fn render(source: &str) -> String {
    let tokens = lexer::lex(source).expect("lexing should succeed");
    let parse = parser::parse_module(&tokens);
    outline::render(&parse.ast)
}

#[test]
fn minimal_main_outline() {
    let source = "MAIN\n  DISPLAY \"hi\"\nEND MAIN\n";
    insta::assert_snapshot!(render(source), @r###"
    module [0..29]
      main [0..28]
        display [7..19]
    "###);
}

#[test]
fn function_with_locals_outline() {
    let source = "FUNCTION f(x)\nDEFINE y INTEGER\nLET y = x\nEND FUNCTION\n";
    insta::assert_snapshot!(render(source), @r###"
    module [0..54]
      function f [0..53]
        define [14..30]
          variables y [21..30]
        let [31..40]
    "###);
}

#[test]
fn incomplete_block_is_marked() {
    let source = "MAIN\nIF a THEN\n";
    insta::assert_snapshot!(render(source), @r###"
    module [0..15]
      main [0..15] (incomplete)
        if [5..15] (incomplete)
    "###);
}
