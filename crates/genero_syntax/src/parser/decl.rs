/// Declaration parsing methods: `DEFINE`, `CONSTANT`, `TYPE`, `GLOBALS`.
///
/// Each declaration statement parses a comma-separated list of definitions,
/// terminated either by exhausting the list or by matching a caller-supplied
/// **break sequence**: an ordered keyword lookahead (e.g. `END FUNCTION`)
/// signaling that the next construct has started. A matched break sequence
/// consumes nothing: the caller resumes its own dispatch.
///
/// Name binding is *not* done here; the enclosing container (module,
/// globals block, function block) binds the declared names and stamps scope
/// labels, so the same declaration syntax serves every scope.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    /// `DEFINE name [, name]* type [, ...]`.
    ///
    /// Returns the node and whether a break sequence terminated the list.
    fn parse_define(&mut self, access: Access, breaks: &[&[KeywordId]]) -> (NodeId, bool) {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Define { access }, start);
        self.advance(); // define
        self.skip_newlines();

        let mut matched_break = false;
        let mut any = false;
        let mut all_complete = true;
        loop {
            let def = self.parse_variable_definition();
            all_complete &= self.ast.node(def).complete;
            self.ast.attach(node, def);
            any = true;
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
            if self.matches_break_sequence(breaks) {
                matched_break = true;
                break;
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, any && all_complete);
        (node, matched_break)
    }

    /// One `name [, name]* type` item of a `DEFINE`.
    fn parse_variable_definition(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::VariableDef(VariableDefData {
                names: Vec::new(),
                type_ref: None,
            }),
            start,
        );

        let mut names = Vec::new();
        loop {
            match self.expect_ident("expected a variable name") {
                Some(entry) => names.push(entry),
                None => {
                    self.ast.extend_span(node, self.prev_end());
                    if let NodeKind::VariableDef(data) = &mut self.ast.node_mut(node).kind {
                        data.names = names;
                    }
                    return node;
                }
            }
            // A comma continues the name list only when another name follows;
            // otherwise it separates definitions and belongs to the caller.
            if self.check_punct(PunctuationId::Comma)
                && matches!(self.peek_skipping_newlines(1).kind, TokenKind::Ident(_))
                && self.name_list_continues()
            {
                self.advance();
                self.skip_newlines();
                continue;
            }
            break;
        }
        self.skip_newlines();
        let type_ref = self.parse_type_reference();
        let complete = self.ast.node(type_ref).complete;
        self.ast.attach(node, type_ref);
        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::VariableDef(data) = &mut self.ast.node_mut(node).kind {
            data.names = names;
            data.type_ref = Some(type_ref);
        }
        self.ast.set_complete(node, complete);
        node
    }

    /// Lookahead for `, name` continuing the current name list: the name
    /// must itself be followed by a comma or a type start, not by `=`.
    fn name_list_continues(&self) -> bool {
        // after `, ident`: another comma means more names; a type name or
        // record/array/like keyword means the shared type follows.
        let after = &self.peek_skipping_newlines(2).kind;
        !matches!(after, TokenKind::Operator(OperatorId::Equals))
    }

    /// `CONSTANT name [type] = literal [, ...]`.
    fn parse_constant_def(&mut self, access: Access, breaks: &[&[KeywordId]]) -> (NodeId, bool) {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::ConstantDef { access }, start);
        self.advance(); // constant
        self.skip_newlines();

        let mut matched_break = false;
        let mut any = false;
        let mut all_complete = true;
        loop {
            let item = self.parse_constant_item();
            all_complete &= self.ast.node(item).complete;
            self.ast.attach(node, item);
            any = true;
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
            if self.matches_break_sequence(breaks) {
                matched_break = true;
                break;
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, any && all_complete);
        (node, matched_break)
    }

    fn parse_constant_item(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::ConstantItem(ConstantItemData {
                name: String::new(),
                name_span: start,
                type_name: None,
                value: None,
            }),
            start,
        );
        let (name, name_span) = match self.expect_ident("expected a constant name") {
            Some(entry) => entry,
            None => return node,
        };

        // Optional builtin type between the name and `=`. A constraint
        // still needs to parse so `CONSTANT c CHAR(3) = "abc"` works.
        let mut type_name = None;
        if !self.check_op(OperatorId::Equals) {
            let spelling = self.peek().text();
            if let Some(info) = builtin_types::from_str(&spelling) {
                self.advance();
                match self.verify_valid_constraint(info.constraint) {
                    Ok(Some(c)) => type_name = Some(format!("{}{}", info.canonical, c)),
                    Ok(None) => type_name = Some(info.canonical.to_string()),
                    Err(()) => {
                        self.fill_constant_item(node, name, name_span, None, None);
                        return node;
                    }
                }
            }
        }

        if !self.expect_op(OperatorId::Equals, "expected '=' after the constant name") {
            self.fill_constant_item(node, name, name_span, type_name, None);
            return node;
        }
        self.skip_newlines();
        let value = self.try_parse_expression(&[TokenKind::Punctuation(PunctuationId::Comma)]);
        match value {
            Some(v) => {
                self.ast.attach(node, v);
                self.ast.extend_span(node, self.prev_end());
                self.fill_constant_item(node, name, name_span, type_name, Some(v));
                self.ast.set_complete(node, true);
            }
            None => {
                let span = self.current_span();
                self.sink.error("expected a literal value for the constant", span);
                self.fill_constant_item(node, name, name_span, type_name, None);
            }
        }
        node
    }

    fn fill_constant_item(
        &mut self,
        node: NodeId,
        name: String,
        name_span: Span,
        type_name: Option<String>,
        value: Option<NodeId>,
    ) {
        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::ConstantItem(data) = &mut self.ast.node_mut(node).kind {
            data.name = name;
            data.name_span = name_span;
            data.type_name = type_name;
            data.value = value;
        }
    }

    /// `TYPE name type-ref [, ...]`.
    fn parse_type_def(&mut self, access: Access, breaks: &[&[KeywordId]]) -> (NodeId, bool) {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::TypeDef { access }, start);
        self.advance(); // type
        self.skip_newlines();

        let mut matched_break = false;
        let mut any = false;
        let mut all_complete = true;
        loop {
            let item = self.parse_type_item();
            all_complete &= self.ast.node(item).complete;
            self.ast.attach(node, item);
            any = true;
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
            if self.matches_break_sequence(breaks) {
                matched_break = true;
                break;
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, any && all_complete);
        (node, matched_break)
    }

    fn parse_type_item(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::TypeItem(TypeItemData {
                name: String::new(),
                name_span: start,
                type_ref: None,
            }),
            start,
        );
        let (name, name_span) = match self.expect_ident("expected a type name") {
            Some(entry) => entry,
            None => return node,
        };
        self.skip_newlines();
        let type_ref = self.parse_type_reference();
        let complete = self.ast.node(type_ref).complete;
        self.ast.attach(node, type_ref);
        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::TypeItem(data) = &mut self.ast.node_mut(node).kind {
            data.name = name;
            data.name_span = name_span;
            data.type_ref = Some(type_ref);
        }
        self.ast.set_complete(node, complete);
        node
    }

    /// `GLOBALS "file"` or `GLOBALS decls END GLOBALS`.
    fn parse_globals(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Globals(GlobalsData::default()), start);
        self.advance(); // globals
        self.skip_newlines();

        if let TokenKind::StringLit(file) = &self.peek().kind {
            let file = file.clone();
            self.advance();
            self.ast.extend_span(node, self.prev_end());
            if let NodeKind::Globals(data) = &mut self.ast.node_mut(node).kind {
                data.filename = Some(file);
            }
            self.ast.set_complete(node, true);
            return node;
        }

        const BREAKS: &[&[KeywordId]] = &[
            &[KeywordId::EndKw, KeywordId::Globals],
            &[KeywordId::Define],
            &[KeywordId::Constant],
            &[KeywordId::TypeKw],
        ];
        loop {
            self.skip_newlines();
            if self.at_block_end(KeywordId::Globals) || self.is_at_end() {
                break;
            }
            if self.check_keyword(KeywordId::Define) {
                let (decl, _) = self.parse_define(Access::Public, BREAKS);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Global);
            } else if self.check_keyword(KeywordId::Constant) {
                let (decl, _) = self.parse_constant_def(Access::Public, BREAKS);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Global);
            } else if self.check_keyword(KeywordId::TypeKw) {
                let (decl, _) = self.parse_type_def(Access::Public, BREAKS);
                self.ast.attach(node, decl);
                self.bind_declaration(decl, node, Scope::Global);
            } else {
                self.skip_unexpected("a globals block");
            }
        }

        if self.at_block_end(KeywordId::Globals) {
            self.consume_block_end(KeywordId::Globals);
            self.ast.set_complete(node, true);
        } else {
            let span = self.current_span();
            self.sink.error("expected 'end globals'", span);
        }
        self.ast.extend_span(node, self.prev_end());
        node
    }

    // ========================================================================
    // Symbol binding
    // ========================================================================

    /// Collect the names declared by a `DEFINE`/`CONSTANT`/`TYPE` node.
    fn declared_symbols(&self, decl: NodeId, scope: Scope) -> Vec<Symbol> {
        let mut out = Vec::new();
        match &self.ast.node(decl).kind {
            NodeKind::Define { .. } => {
                for &child in self.ast.children(decl) {
                    if let NodeKind::VariableDef(data) = &self.ast.node(child).kind {
                        for (name, span) in &data.names {
                            out.push(Symbol {
                                name: name.clone(),
                                node: child,
                                kind: SymbolKind::Variable,
                                scope,
                                span: *span,
                            });
                        }
                    }
                }
            }
            NodeKind::ConstantDef { .. } => {
                for &child in self.ast.children(decl) {
                    if let NodeKind::ConstantItem(data) = &self.ast.node(child).kind {
                        if !data.name.is_empty() {
                            out.push(Symbol {
                                name: data.name.clone(),
                                node: child,
                                kind: SymbolKind::Constant,
                                scope,
                                span: data.name_span,
                            });
                        }
                    }
                }
            }
            NodeKind::TypeDef { .. } => {
                for &child in self.ast.children(decl) {
                    if let NodeKind::TypeItem(data) = &self.ast.node(child).kind {
                        if !data.name.is_empty() {
                            out.push(Symbol {
                                name: data.name.clone(),
                                node: child,
                                kind: SymbolKind::Type,
                                scope,
                                span: data.name_span,
                            });
                        }
                    }
                }
            }
            _ => {}
        }
        out
    }

    /// Bind a declaration's names into `container`'s tables, stamping
    /// `scope`. A duplicate within one table is a **warning**; the first
    /// definition wins.
    fn bind_declaration(&mut self, decl: NodeId, container: NodeId, scope: Scope) {
        let symbols = self.declared_symbols(decl, scope);
        let mut clashes = Vec::new();
        for symbol in symbols {
            let name = symbol.name.clone();
            let span = symbol.span;
            let kind = symbol.kind;
            let clashed = match (&mut self.ast.node_mut(container).kind, kind) {
                (NodeKind::Module(data), SymbolKind::Variable) => data.variables.insert(symbol).is_some(),
                (NodeKind::Module(data), SymbolKind::Constant) => data.constants.insert(symbol).is_some(),
                (NodeKind::Module(data), SymbolKind::Type) => data.types.insert(symbol).is_some(),
                (NodeKind::Globals(data), SymbolKind::Variable) => data.tables.variables.insert(symbol).is_some(),
                (NodeKind::Globals(data), SymbolKind::Constant) => data.tables.constants.insert(symbol).is_some(),
                (NodeKind::Globals(data), SymbolKind::Type) => data.tables.types.insert(symbol).is_some(),
                (
                    NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data),
                    SymbolKind::Variable,
                ) => data.tables.variables.insert(symbol).is_some(),
                (
                    NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data),
                    SymbolKind::Constant,
                ) => data.tables.constants.insert(symbol).is_some(),
                (
                    NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data),
                    SymbolKind::Type,
                ) => data.tables.types.insert(symbol).is_some(),
                _ => false,
            };
            if clashed {
                clashes.push((name, span));
            }
        }
        for (name, span) in clashes {
            self.sink
                .warning(format!("'{}' is defined more than once in this scope", name), span);
        }
    }
}
