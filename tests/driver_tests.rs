//! Driver-level tests over the pure command cores, the way the CLI uses
//! them.

use genero::cli::commands::{check_source, complete_source, outline_source};

#[test]
fn check_reports_ordered_messages() {
    let diagnostics = check_source("MAIN\nIF a THEN\n");
    let messages: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
    insta::assert_snapshot!(messages.join("\n"), @r###"
    error: expected 'end if'
    error: expected 'end main'
    "###);
}

#[test]
fn check_is_quiet_on_a_clean_module() {
    let diagnostics = check_source("MAIN\nDISPLAY \"ready\"\nEND MAIN\n");
    assert!(diagnostics.is_empty(), "diagnostics: {:?}", diagnostics);
}

#[test]
fn outline_names_functions() {
    let rendered = outline_source(
        "MAIN\nCALL setup()\nEND MAIN\nFUNCTION setup()\nDEFINE ready INTEGER\nEND FUNCTION\n",
    )
    .expect("outline renders");
    assert!(rendered.contains("function setup"));
    assert!(rendered.contains("variables ready"));
}

#[test]
fn completion_through_the_driver() {
    let source = "MAIN\nDEFINE total INTEGER\nLET total = ";
    let rendered = complete_source(source, source.len()).expect("completion renders");
    assert!(rendered.lines().any(|l| l.starts_with("total\t")));
    assert!(rendered.lines().any(|l| l.starts_with("NOTFOUND\t")));
}
