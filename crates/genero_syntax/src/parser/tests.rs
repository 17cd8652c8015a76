#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on correctness of specific syntactic forms and on the
/// parser's error recovery behavior (avoiding cascaded errors).
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::lexer;

    fn parse_str(source: &str) -> ModuleParse {
        let tokens = lexer::lex(source).expect("lexing should succeed");
        parse_module(&tokens)
    }

    fn find_nodes<'p>(parse: &'p ModuleParse, pred: impl Fn(&NodeKind) -> bool) -> Vec<NodeId> {
        (0..parse.ast.len() as u32)
            .map(NodeId::from_raw)
            .filter(|&id| pred(&parse.ast.node(id).kind))
            .collect()
    }

    #[test]
    fn minimal_module_parses_clean() {
        let parse = parse_str("MAIN DISPLAY \"hi\" END MAIN");
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);
        let root = parse.root.expect("module root");
        assert!(matches!(parse.ast.node(root).kind, NodeKind::Module(_)));

        let mains = find_nodes(&parse, |k| matches!(k, NodeKind::MainBlock(_)));
        assert_eq!(mains.len(), 1);
        let main = mains[0];
        assert!(parse.ast.node(main).complete);
        match &parse.ast.node(main).kind {
            NodeKind::MainBlock(data) => assert_eq!(data.name, "main"),
            _ => unreachable!(),
        }
        let displays = find_nodes(&parse, |k| matches!(k, NodeKind::Display(_)));
        assert_eq!(displays.len(), 1);
        assert_eq!(parse.ast.node(displays[0]).parent, Some(main));
    }

    #[test]
    fn unterminated_if_reports_one_error() {
        let parse = parse_str("MAIN\nIF a THEN\nLET b = 1\n");
        let ifs = find_nodes(&parse, |k| matches!(k, NodeKind::If { .. }));
        assert_eq!(ifs.len(), 1);
        assert!(!parse.ast.node(ifs[0]).complete);
        let end_if_errors: Vec<_> = parse
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error && d.message.contains("end if"))
            .collect();
        assert_eq!(end_if_errors.len(), 1, "diagnostics: {:?}", parse.diagnostics);
    }

    #[test]
    fn decimal_constraint_renders_canonically() {
        let parse = parse_str("DEFINE x DECIMAL(10,2)\nMAIN\nEND MAIN\n");
        let refs = find_nodes(&parse, |k| matches!(k, NodeKind::TypeReference(_)));
        assert_eq!(refs.len(), 1);
        match &parse.ast.node(refs[0]).kind {
            NodeKind::TypeReference(data) => assert_eq!(data.display(), "decimal(10, 2)"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn datetime_qualifier_range_is_checked() {
        let parse = parse_str("DEFINE d DATETIME YEAR TO SECOND\n");
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);

        let bad = parse_str("DEFINE d DATETIME SECOND TO YEAR\n");
        assert!(bad.diagnostics.iter().any(|d| d.message.contains("finer")));
    }

    #[test]
    fn fraction_scale_only_on_trailing_qualifier() {
        let ok = parse_str("DEFINE d DATETIME HOUR TO FRACTION(3)\n");
        assert!(ok.diagnostics.is_empty(), "diagnostics: {:?}", ok.diagnostics);

        let bad = parse_str("DEFINE d DATETIME HOUR TO SECOND(3)\n");
        assert_eq!(bad.diagnostics.len(), 1);
        assert!(bad.diagnostics[0].message.contains("fraction"));
    }

    #[test]
    fn static_array_dimensions_default_to_sentinel() {
        let parse = parse_str("DEFINE a ARRAY [] OF INTEGER, b ARRAY[5] OF INTEGER\n");
        let arrays = find_nodes(&parse, |k| matches!(k, NodeKind::ArrayType { .. }));
        assert_eq!(arrays.len(), 2);
        let dims: Vec<[u16; 3]> = arrays
            .iter()
            .map(|&id| match &parse.ast.node(id).kind {
                NodeKind::ArrayType { kind } => kind.dimensions(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(dims[0], [DIMENSION_DEFAULT; 3]);
        assert_eq!(dims[1], [5, DIMENSION_DEFAULT, DIMENSION_DEFAULT]);
    }

    #[test]
    fn dynamic_array_dimension_bounds() {
        let ok = parse_str("DEFINE a DYNAMIC ARRAY OF INTEGER\n");
        assert!(ok.diagnostics.is_empty());
        let arrays = find_nodes(&ok, |k| matches!(k, NodeKind::ArrayType { .. }));
        match &ok.ast.node(arrays[0]).kind {
            NodeKind::ArrayType { kind: ArrayKind::Dynamic { dimension } } => {
                assert_eq!(*dimension, 1)
            }
            other => panic!("expected a dynamic array, got {:?}", other),
        }

        let bad = parse_str("DEFINE a DYNAMIC ARRAY WITH DIMENSION 4 OF INTEGER\n");
        assert!(bad.diagnostics.iter().any(|d| d.message.contains("1, 2 or 3")));
    }

    #[test]
    fn duplicate_record_field_is_fatal() {
        let parse = parse_str("DEFINE r RECORD a INT, a INT END RECORD\n");
        let errors: Vec<_> = parse
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'a'"), "message: {}", errors[0].message);
        let records = find_nodes(&parse, |k| matches!(k, NodeKind::Record(_)));
        assert!(!parse.ast.node(records[0]).complete);
        // Both fields are still in the tree; the member table keeps the first.
        match &parse.ast.node(records[0]).kind {
            NodeKind::Record(data) => assert_eq!(data.members.len(), 1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn duplicate_module_constant_warns_and_first_wins() {
        let parse = parse_str("CONSTANT x = 1\nCONSTANT x = 2\nMAIN\nEND MAIN\n");
        let warnings: Vec<_> = parse
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning && d.message.contains("'x'"))
            .collect();
        assert_eq!(warnings.len(), 1);
        // Both constant statements appear in the AST.
        let defs = find_nodes(&parse, |k| matches!(k, NodeKind::ConstantItem(_)));
        assert_eq!(defs.len(), 2);
        // The retained binding is the first one.
        let root = parse.root.expect("root");
        match &parse.ast.node(root).kind {
            NodeKind::Module(data) => {
                let sym = data.constants.get("x").expect("constant bound");
                assert_eq!(sym.node, defs[0]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn define_break_sequence_leaves_cursor_before_end() {
        // A trailing comma would normally demand another definition; the
        // break sequence hands END FUNCTION back to the block parser.
        let parse = parse_str("FUNCTION f()\nDEFINE a INTEGER,\nEND FUNCTION\n");
        let funcs = find_nodes(&parse, |k| matches!(k, NodeKind::FunctionBlock(_)));
        assert_eq!(funcs.len(), 1);
        assert!(
            parse.ast.node(funcs[0]).complete,
            "END FUNCTION must still terminate the block: {:?}",
            parse.diagnostics
        );
    }

    #[test]
    fn function_locals_and_params_are_bound() {
        let parse = parse_str(
            "FUNCTION add(a, b)\nDEFINE total INTEGER\nLET total = a + b\nRETURN total\nEND FUNCTION\n",
        );
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);
        let funcs = find_nodes(&parse, |k| matches!(k, NodeKind::FunctionBlock(_)));
        match &parse.ast.node(funcs[0]).kind {
            NodeKind::FunctionBlock(data) => {
                assert_eq!(data.params.len(), 2);
                assert!(data.tables.variables.contains("total"));
                assert!(data.tables.variables.contains("A"), "params bind case-insensitively");
            }
            _ => unreachable!(),
        }
        let root = parse.root.expect("root");
        match &parse.ast.node(root).kind {
            NodeKind::Module(data) => assert!(data.functions.contains("ADD")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn exit_outside_matching_block_warns() {
        let parse = parse_str("MAIN\nWHILE a\nEXIT FOR\nEND WHILE\nEND MAIN\n");
        assert!(
            parse
                .diagnostics
                .iter()
                .any(|d| d.severity == Severity::Warning && d.message.contains("exit for")),
            "diagnostics: {:?}",
            parse.diagnostics
        );
    }

    #[test]
    fn module_order_violation_is_reported_but_attached() {
        let parse = parse_str("MAIN\nEND MAIN\nIMPORT FGL utils\n");
        assert!(parse.diagnostics.iter().any(|d| d.message.contains("cannot appear")));
        let imports = find_nodes(&parse, |k| matches!(k, NodeKind::Import(_)));
        assert_eq!(imports.len(), 1, "the import node is still attached");
    }

    #[test]
    fn declare_cursor_binds_into_module_cursors() {
        let parse = parse_str(
            "MAIN\nDECLARE c1 CURSOR FOR SELECT cust_name INTO v FROM customer WHERE id = 1\nEND MAIN\n",
        );
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);
        let root = parse.root.expect("root");
        match &parse.ast.node(root).kind {
            NodeKind::Module(data) => assert!(data.cursors.contains("c1")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn update_statement_is_rejected_not_silently_skipped() {
        let parse = parse_str("MAIN\nUPDATE customer SET name = \"x\"\nEND MAIN\n");
        assert!(
            parse
                .diagnostics
                .iter()
                .any(|d| d.message.contains("not supported")),
            "diagnostics: {:?}",
            parse.diagnostics
        );
        let nodes = find_nodes(&parse, |k| matches!(k, NodeKind::UnsupportedSql(_)));
        assert_eq!(nodes.len(), 1);
        // The enclosing MAIN still terminates.
        let mains = find_nodes(&parse, |k| matches!(k, NodeKind::MainBlock(_)));
        assert!(parse.ast.node(mains[0]).complete);
    }

    #[test]
    fn include_directives_accumulate_on_the_module() {
        let parse = parse_str("&include \"globals.4gl\"\n&include \"globals.4gl\"\nMAIN\nEND MAIN\n");
        let root = parse.root.expect("root");
        match &parse.ast.node(root).kind {
            NodeKind::Module(data) => {
                assert_eq!(data.includes.len(), 1);
                assert_eq!(data.includes["globals.4gl"].len(), 2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn globals_names_are_visible_module_wide() {
        let parse = parse_str("GLOBALS\nDEFINE g_total INTEGER\nEND GLOBALS\nMAIN\nEND MAIN\n");
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);
        let root = parse.root.expect("root");
        match &parse.ast.node(root).kind {
            NodeKind::Module(data) => {
                let sym = data.variables.get("g_total").expect("global visible");
                assert_eq!(sym.scope, Scope::Global);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn spans_nest_within_parents() {
        let parse = parse_str(
            "GLOBALS\nDEFINE g INTEGER\nEND GLOBALS\nMAIN\nIF a > 1 THEN\nCALL f(a, b) RETURNING c\nEND IF\nEND MAIN\n",
        );
        for raw in 0..parse.ast.len() as u32 {
            let id = NodeId::from_raw(raw);
            let node = parse.ast.node(id);
            assert!(node.span.end >= node.span.start);
            for &child in &node.children {
                let c = parse.ast.node(child);
                assert!(
                    c.span.start >= node.span.start && c.span.end <= node.span.end,
                    "child {:?} {:?} escapes parent {:?} {:?}",
                    parse.ast.node(child).kind.label(),
                    c.span,
                    node.kind.label(),
                    node.span
                );
            }
        }
    }

    #[test]
    fn parse_is_deterministic() {
        let tokens = lexer::lex("MAIN\nLET a = b + 1\nDISPLAY a, \"done\"\nEND MAIN\n").unwrap();
        let first = parse_module(&tokens);
        let second = parse_module(&tokens);
        assert_eq!(first.ast, second.ast);
        assert_eq!(first.diagnostics, second.diagnostics);
    }

    #[test]
    fn let_statement_collects_target_and_values() {
        let parse = parse_str("MAIN\nLET rec.total = price * qty, 7\nEND MAIN\n");
        assert!(parse.diagnostics.is_empty(), "diagnostics: {:?}", parse.diagnostics);
        let lets = find_nodes(&parse, |k| matches!(k, NodeKind::Let(_)));
        match &parse.ast.node(lets[0]).kind {
            NodeKind::Let(data) => {
                let target = data.target.expect("target");
                match &parse.ast.node(target).kind {
                    NodeKind::NameExpr(n) => assert_eq!(n.display(), "rec.total"),
                    _ => panic!("expected a name expression target"),
                }
                assert_eq!(data.values.len(), 2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn call_degrades_to_name_when_no_parens() {
        let parse = parse_str("MAIN\nCALL cleanup\nEND MAIN\n");
        let calls = find_nodes(&parse, |k| matches!(k, NodeKind::Call(_)));
        match &parse.ast.node(calls[0]).kind {
            NodeKind::Call(data) => {
                let callee = data.callee.expect("callee");
                assert!(matches!(parse.ast.node(callee).kind, NodeKind::NameExpr(_)));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn malformed_call_reports_but_keeps_partial_structure() {
        let parse = parse_str("MAIN\nLET x = f(1, 2\nEND MAIN\n");
        let calls = find_nodes(&parse, |k| matches!(k, NodeKind::FunctionCall(_)));
        assert_eq!(calls.len(), 1);
        assert!(!parse.ast.node(calls[0]).complete);
        assert!(parse.diagnostics.iter().any(|d| d.message.contains("')'")));
    }

    #[test]
    fn fragment_consumption_reports_how_far_the_window_parsed() {
        let tokens = lexer::lex("DEFINE x INTEGER LET y = 1").unwrap();
        let fragment = parse_define_fragment(&tokens);
        assert!(fragment.node.is_some());
        // The define stops before LET: consumed covers exactly three tokens.
        assert_eq!(fragment.consumed, 3);
        assert!(fragment.complete);
    }
}
