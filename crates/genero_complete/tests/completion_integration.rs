//! End-to-end completion queries over parsed modules, exercising the public
//! API the way a host editor would.

use genero_complete::{
    CompletionAnalyzer, CompletionCatalog, DatabaseProvider, MemberKind, MemberResult, Providers,
    SliceReverseTokenizer,
};
use genero_syntax::{lexer, parser};

fn members_at(source: &str, cursor: usize) -> Vec<MemberResult> {
    let tokens = lexer::lex(source).expect("lexing succeeds");
    let module = parser::parse_module(&tokens);
    let catalog = CompletionCatalog::new();
    let analyzer = CompletionAnalyzer::new(&catalog, &module, Providers::default());
    let reverse = SliceReverseTokenizer::new(&tokens);
    analyzer.members_at(cursor, &reverse)
}

#[test]
fn record_member_access_lists_fields() {
    let source = "MAIN\nDEFINE rec RECORD id INTEGER, cust_name CHAR(20) END RECORD\nLET rec.";
    let members = members_at(source, source.len());
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["cust_name", "id"]);
    assert!(members.iter().all(|m| m.kind == MemberKind::RecordField));
}

#[test]
fn sqlca_members_come_from_the_system_catalog() {
    let source = "MAIN\nLET x = sqlca.";
    let members = members_at(source, source.len());
    assert!(members.iter().any(|m| m.name == "sqlcode"), "members: {:?}", members);
}

#[test]
fn member_access_through_array_index() {
    let source =
        "MAIN\nDEFINE rows DYNAMIC ARRAY OF RECORD id INTEGER, total DECIMAL(10,2) END RECORD\nLET rows[1].";
    let members = members_at(source, source.len());
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["id", "total"]);
}

#[test]
fn user_type_alias_resolves_to_record_members() {
    let source = "TYPE customer_t RECORD id INTEGER, city CHAR(10) END RECORD\nMAIN\nDEFINE c customer_t\nLET c.";
    let members = members_at(source, source.len());
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["city", "id"]);
}

#[test]
fn define_type_position_beats_generic_fallback() {
    let source = "MAIN\nDEFINE amount ";
    let members = members_at(source, source.len());
    assert!(members.iter().any(|m| m.name == "decimal"));
    // The generic statement list is not mixed in.
    assert!(!members.iter().any(|m| m.name == "while"));
}

#[test]
fn unknown_context_falls_back_to_keywords_not_an_error() {
    let source = "MAIN\n)";
    let members = members_at(source, source.len());
    assert!(members.iter().any(|m| m.name == "let"));
}

struct FakeDb;

impl DatabaseProvider for FakeDb {
    fn columns(&self, table: &str) -> Vec<MemberResult> {
        if table.eq_ignore_ascii_case("customer") {
            vec![
                MemberResult::new("cust_id", "integer", MemberKind::DbColumn, genero_complete::member::CompletionSource::Provider),
                MemberResult::new("cust_name", "char(30)", MemberKind::DbColumn, genero_complete::member::CompletionSource::Provider),
            ]
        } else {
            Vec::new()
        }
    }

    fn tables(&self) -> Vec<MemberResult> {
        vec![MemberResult::new(
            "customer",
            "table",
            MemberKind::DbTable,
            genero_complete::member::CompletionSource::Provider,
        )]
    }
}

#[test]
fn like_clause_uses_the_database_provider() {
    let source = "MAIN\nDEFINE c LIKE ";
    let tokens = lexer::lex(source).unwrap();
    let module = parser::parse_module(&tokens);
    let catalog = CompletionCatalog::new();
    let db = FakeDb;
    let providers = Providers {
        database: Some(&db),
        ..Providers::default()
    };
    let analyzer = CompletionAnalyzer::new(&catalog, &module, providers);
    let reverse = SliceReverseTokenizer::new(&tokens);

    let members = analyzer.members_at(source.len(), &reverse);
    assert!(members.iter().any(|m| m.name == "customer"), "members: {:?}", members);

    // And the column position after `LIKE customer.`.
    let source = "MAIN\nDEFINE c LIKE customer.";
    let tokens = lexer::lex(source).unwrap();
    let module = parser::parse_module(&tokens);
    let db = FakeDb;
    let providers = Providers {
        database: Some(&db),
        ..Providers::default()
    };
    let analyzer = CompletionAnalyzer::new(&catalog, &module, providers);
    let reverse = SliceReverseTokenizer::new(&tokens);
    let members = analyzer.members_at(source.len(), &reverse);
    assert!(members.iter().any(|m| m.name == "cust_id"), "members: {:?}", members);
}

#[test]
fn mimicking_record_members_resolve_through_the_provider() {
    let source = "MAIN\nDEFINE r RECORD LIKE customer.*\nLET r.";
    let tokens = lexer::lex(source).unwrap();
    let module = parser::parse_module(&tokens);
    let catalog = CompletionCatalog::new();
    let db = FakeDb;
    let providers = Providers {
        database: Some(&db),
        ..Providers::default()
    };
    let analyzer = CompletionAnalyzer::new(&catalog, &module, providers);
    let reverse = SliceReverseTokenizer::new(&tokens);
    let members = analyzer.members_at(source.len(), &reverse);
    assert!(members.iter().any(|m| m.name == "cust_name"), "members: {:?}", members);
}
