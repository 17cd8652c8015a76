// Module assembly: the strict top-level ordering state machine.
//
// A module is `compiler options → imports → schema → member definitions
// (globals/define/constant/type) → main → functions and reports`. Each
// category may only appear once the state has reached-or-passed its
// predecessor; an out-of-order construct is reported as an error but the
// node is still attached, so the tree stays useful under editing.
//
// Module, globals, and block symbol tables are populated incrementally as
// each construct resolves, with scope labels stamped at binding time.

/// Top-level ordering states, in required source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NodesProcessed {
    None,
    CompilerOption,
    Imports,
    SchemaSpec,
    MemberDefinitions,
    Main,
    Body,
}

/// Break sequences marking the start of the next top-level construct.
const MODULE_BREAKS: &[&[KeywordId]] = &[
    &[KeywordId::EndKw],
    &[KeywordId::Define],
    &[KeywordId::Constant],
    &[KeywordId::TypeKw],
    &[KeywordId::Globals],
    &[KeywordId::Function],
    &[KeywordId::Report],
    &[KeywordId::MainKw],
    &[KeywordId::Import],
    &[KeywordId::Schema],
    &[KeywordId::Public],
    &[KeywordId::Private],
];

impl<'a> Parser<'a> {
    // ========================================================================
    // Module
    // ========================================================================

    fn parse_whole_module(&mut self) -> NodeId {
        let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
        let module = self
            .ast
            .alloc(NodeKind::Module(ModuleData::default()), Span::new(0, end));
        self.ast.set_root(module);
        self.module_node = Some(module);

        let mut state = NodesProcessed::None;
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            // Preprocessor lines are checked before all other dispatch.
            if self.check_punct(PunctuationId::Ampersand) {
                let directive = self.parse_preprocessor();
                self.ast.attach(module, directive);
                continue;
            }

            let access = if self.match_keyword(KeywordId::Private) {
                Some(Access::Private)
            } else if self.match_keyword(KeywordId::Public) {
                Some(Access::Public)
            } else {
                None
            };

            if self.check_keyword(KeywordId::Options) && state <= NodesProcessed::CompilerOption {
                // Module-head OPTIONS lines are compiler options; later ones
                // are runtime statements and belong to blocks.
                let node = self.parse_compiler_option();
                self.ast.attach(module, node);
                state = state.max(NodesProcessed::CompilerOption);
            } else if self.check_keyword(KeywordId::Import) {
                state = self.enforce_order(state, NodesProcessed::Imports, "import");
                let node = self.parse_import();
                self.ast.attach(module, node);
            } else if self.check_keyword(KeywordId::Schema) || self.check_keyword(KeywordId::Database) {
                state = self.enforce_order(state, NodesProcessed::SchemaSpec, "schema");
                let node = self.parse_schema_spec();
                self.ast.attach(module, node);
            } else if self.check_keyword(KeywordId::Globals) {
                state = self.enforce_order(state, NodesProcessed::MemberDefinitions, "globals");
                let node = self.parse_globals();
                self.ast.attach(module, node);
                self.mirror_globals_into_module(node, module);
            } else if self.check_keyword(KeywordId::Define) {
                state = self.enforce_order(state, NodesProcessed::MemberDefinitions, "define");
                let (node, _) = self.parse_define(access.unwrap_or_default(), MODULE_BREAKS);
                self.ast.attach(module, node);
                self.bind_declaration(node, module, Scope::Module);
            } else if self.check_keyword(KeywordId::Constant) {
                state = self.enforce_order(state, NodesProcessed::MemberDefinitions, "constant");
                let (node, _) = self.parse_constant_def(access.unwrap_or_default(), MODULE_BREAKS);
                self.ast.attach(module, node);
                self.bind_declaration(node, module, Scope::Module);
            } else if self.check_keyword(KeywordId::TypeKw) {
                state = self.enforce_order(state, NodesProcessed::MemberDefinitions, "type");
                let (node, _) = self.parse_type_def(access.unwrap_or_default(), MODULE_BREAKS);
                self.ast.attach(module, node);
                self.bind_declaration(node, module, Scope::Module);
            } else if self.check_keyword(KeywordId::MainKw) {
                state = self.enforce_order(state, NodesProcessed::Main, "main");
                let node = self.parse_main_block();
                self.ast.attach(module, node);
            } else if self.check_keyword(KeywordId::Function) {
                state = state.max(NodesProcessed::Body);
                let node = self.parse_function_block(access.unwrap_or_default(), false);
                self.ast.attach(module, node);
            } else if self.check_keyword(KeywordId::Report) {
                state = state.max(NodesProcessed::Body);
                let node = self.parse_function_block(access.unwrap_or_default(), true);
                self.ast.attach(module, node);
            } else {
                self.skip_unexpected("the module");
            }
        }

        let complete = !self.ast.children(module).is_empty();
        self.ast.set_complete(module, complete);
        module
    }

    /// Report a construct appearing before its predecessor category; the
    /// node is still attached by the caller.
    fn enforce_order(
        &mut self,
        state: NodesProcessed,
        category: NodesProcessed,
        what: &str,
    ) -> NodesProcessed {
        if category < state {
            let span = self.current_span();
            self.sink.error(
                format!("the {} section cannot appear after later module sections", what),
                span,
            );
            state
        } else {
            category.max(state)
        }
    }

    fn parse_compiler_option(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // options
        let mut options = Vec::new();
        while !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            options.push(self.peek().text());
            self.advance();
        }
        let node = self
            .ast
            .alloc(NodeKind::CompilerOption(CompilerOptionData { options }), start);
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, true);
        node
    }

    /// `IMPORT FGL modname` / `IMPORT modname`.
    fn parse_import(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // import
        self.match_keyword(KeywordId::Fgl);
        let module = self
            .expect_ident("expected a module name after 'import'")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::Import(ImportData {
                module: module.clone().unwrap_or_default(),
            }),
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, module.is_some());
        node
    }

    /// `SCHEMA dbname` / `DATABASE dbname`.
    fn parse_schema_spec(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // schema / database
        let database = self
            .expect_ident("expected a database name")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::SchemaSpec(SchemaData {
                database: database.clone().unwrap_or_default(),
            }),
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, database.is_some());
        node
    }

    /// Globals names are visible module-wide; mirror them into the module
    /// tables silently (the globals block already warned on its own
    /// duplicates, and the first definition wins either way).
    fn mirror_globals_into_module(&mut self, globals: NodeId, module: NodeId) {
        let tables = match &self.ast.node(globals).kind {
            NodeKind::Globals(data) => data.tables.clone(),
            _ => return,
        };
        if let NodeKind::Module(data) = &mut self.ast.node_mut(module).kind {
            for symbol in tables.variables.iter_sorted() {
                data.variables.insert(symbol.clone());
            }
            for symbol in tables.types.iter_sorted() {
                data.types.insert(symbol.clone());
            }
            for symbol in tables.constants.iter_sorted() {
                data.constants.insert(symbol.clone());
            }
        }
    }

    // ========================================================================
    // Main / function / report blocks
    // ========================================================================

    fn parse_main_block(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::MainBlock(FunctionBlockData {
                name: "main".to_string(),
                name_span: start,
                access: Access::Public,
                params: Vec::new(),
                tables: BlockTables::default(),
            }),
            start,
        );
        self.advance(); // main
        let ended = self.parse_block_body(node, KeywordId::MainKw);
        self.finish_block(node, KeywordId::MainKw, ended);
        node
    }

    fn parse_function_block(&mut self, access: Access, is_report: bool) -> NodeId {
        let start = self.current_span();
        let block_kw = if is_report { KeywordId::Report } else { KeywordId::Function };
        self.advance(); // function / report
        let name_entry = self.expect_ident("expected a function name");
        let (name, name_span) = name_entry.clone().unwrap_or_default();

        let data = FunctionBlockData {
            name: name.clone(),
            name_span,
            access,
            params: Vec::new(),
            tables: BlockTables::default(),
        };
        let node = self.ast.alloc(
            if is_report {
                NodeKind::ReportBlock(data)
            } else {
                NodeKind::FunctionBlock(data)
            },
            start,
        );

        // Parameter list.
        let mut params = Vec::new();
        if self.match_punct(PunctuationId::LeftParen) {
            if !self.check_punct(PunctuationId::RightParen) {
                params = self.ident_list("expected a parameter name");
            }
            self.expect_punct(PunctuationId::RightParen, "expected ')' after the parameters");
        }
        for (param, span) in &params {
            let symbol = Symbol {
                name: param.clone(),
                node,
                kind: SymbolKind::Variable,
                scope: Scope::Parameter,
                span: *span,
            };
            let clashed = match &mut self.ast.node_mut(node).kind {
                NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) => {
                    data.params.push((param.clone(), *span));
                    data.tables.variables.insert(symbol).is_some()
                }
                _ => false,
            };
            if clashed {
                self.sink.warning(
                    format!("parameter '{}' is defined more than once", param),
                    *span,
                );
            }
        }

        let ended = self.parse_block_body(node, block_kw);
        self.finish_block(node, block_kw, ended);

        // Bind the function name into the module table.
        if let (Some(module), false) = (self.module_node, name.is_empty()) {
            let symbol = Symbol {
                name: name.clone(),
                node,
                kind: if is_report { SymbolKind::Report } else { SymbolKind::Function },
                scope: Scope::Module,
                span: name_span,
            };
            let clashed = match &mut self.ast.node_mut(module).kind {
                NodeKind::Module(data) => data.functions.insert(symbol).is_some(),
                _ => false,
            };
            if clashed {
                self.sink.warning(
                    format!("'{}' is defined more than once in this module", name),
                    name_span,
                );
            }
        }
        node
    }

    /// Shared body loop for main/function/report blocks: local declarations
    /// bind into the block's tables, everything else is a statement.
    fn parse_block_body(&mut self, node: NodeId, block_kw: KeywordId) -> BlockEnd {
        let breaks: &[&[KeywordId]] = &[
            &[KeywordId::EndKw],
            &[KeywordId::Define],
            &[KeywordId::Constant],
            &[KeywordId::TypeKw],
            &[KeywordId::Function],
            &[KeywordId::Report],
        ];
        let ctx = StatementContext::default();
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                return BlockEnd::Eof;
            }
            if self.at_block_end(block_kw) {
                self.consume_block_end(block_kw);
                return BlockEnd::Terminated;
            }
            if self.check_keyword(KeywordId::Define) {
                let (decl, _) = self.parse_define(Access::Public, breaks);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Local);
            } else if self.check_keyword(KeywordId::Constant) {
                let (decl, _) = self.parse_constant_def(Access::Public, breaks);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Local);
            } else if self.check_keyword(KeywordId::TypeKw) {
                let (decl, _) = self.parse_type_def(Access::Public, breaks);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Local);
            } else {
                match self.try_parse_statement(&ctx) {
                    Some(stmt) => self.ast.attach(node, stmt),
                    None => self.skip_unexpected("this block"),
                }
            }
        }
    }
}
