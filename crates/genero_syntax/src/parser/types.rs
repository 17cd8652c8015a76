/// Type-reference parsing methods.
///
/// This chunk resolves the three exclusive type-reference shapes:
/// - scalar type name plus optional constraint (`DECIMAL(10,2)`,
///   `DATETIME YEAR TO SECOND`, user type names),
/// - `LIKE [db:]table.column` mimicry,
/// - a nested array or record definition.
///
/// A malformed constraint is a **fatal** error for the type reference: the
/// node is returned incomplete and the error is reported exactly once.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// Parse a type reference. Always returns a node; `complete` reflects
    /// whether the full shape was recognized.
    fn parse_type_reference(&mut self) -> NodeId {
        let start = self.current_span();

        if self.check_keyword(KeywordId::Dynamic) || self.check_keyword(KeywordId::Array) {
            let node = self.ast.alloc(
                NodeKind::TypeReference(TypeRefData { shape: TypeShape::Nested }),
                start,
            );
            let array = self.parse_array_type();
            let ok = self.ast.node(array).complete;
            self.ast.attach(node, array);
            self.ast.set_complete(node, ok);
            return node;
        }

        if self.check_keyword(KeywordId::RecordKw) {
            let node = self.ast.alloc(
                NodeKind::TypeReference(TypeRefData { shape: TypeShape::Nested }),
                start,
            );
            let record = self.parse_record_definition();
            let ok = self.ast.node(record).complete;
            self.ast.attach(node, record);
            self.ast.set_complete(node, ok);
            return node;
        }

        // `LIKE` lexes as a word operator, not a keyword.
        if self.check_op(OperatorId::Like) {
            return self.parse_like_reference();
        }

        self.parse_scalar_type_reference()
    }

    /// `LIKE [db:]table.column`.
    fn parse_like_reference(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::TypeReference(TypeRefData {
                shape: TypeShape::Like {
                    database: None,
                    table: String::new(),
                    column: String::new(),
                },
            }),
            start,
        );
        self.advance(); // like

        let mut database = None;
        let mut table = match self.expect_ident("expected a table name after 'like'") {
            Some((name, _)) => name,
            None => {
                self.ast.extend_span(node, self.prev_end());
                return node;
            }
        };
        if self.match_punct(PunctuationId::Colon) {
            database = Some(table);
            table = match self.expect_ident("expected a table name after the database qualifier") {
                Some((name, _)) => name,
                None => {
                    self.ast.extend_span(node, self.prev_end());
                    return node;
                }
            };
        }
        if !self.expect_punct(PunctuationId::Dot, "expected '.' in 'like table.column'") {
            self.ast.extend_span(node, self.prev_end());
            return node;
        }
        let column = match self.expect_ident("expected a column name after '.'") {
            Some((name, _)) => name,
            None => {
                self.ast.extend_span(node, self.prev_end());
                return node;
            }
        };

        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::TypeReference(data) = &mut self.ast.node_mut(node).kind {
            data.shape = TypeShape::Like { database, table, column };
        }
        self.ast.set_complete(node, true);
        node
    }

    /// Builtin or user-defined scalar name with optional constraint.
    fn parse_scalar_type_reference(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::TypeReference(TypeRefData {
                shape: TypeShape::Scalar {
                    name: String::new(),
                    builtin: None,
                    constraint: None,
                },
            }),
            start,
        );

        let spelling = match &self.peek().kind {
            TokenKind::Keyword(_) | TokenKind::Ident(_) => self.peek().text(),
            _ => {
                let span = self.current_span();
                self.sink.error("expected a type name", span);
                return node;
            }
        };
        let builtin = builtin_types::from_str(&spelling);
        // Non-type keywords are not type names.
        if builtin.is_none() && matches!(self.peek().kind, TokenKind::Keyword(_)) {
            let span = self.current_span();
            self.sink
                .error(format!("expected a type name, found '{}'", spelling), span);
            return node;
        }
        self.advance();

        let (name, complete, constraint) = match builtin {
            Some(info) => {
                let canonical = info.canonical.to_string();
                match self.verify_valid_constraint(info.constraint) {
                    Ok(constraint) => (canonical, true, constraint),
                    Err(()) => {
                        self.recover_malformed_constraint();
                        (canonical, false, None)
                    }
                }
            }
            None => (spelling, true, None),
        };

        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::TypeReference(data) = &mut self.ast.node_mut(node).kind {
            data.shape = TypeShape::Scalar {
                name,
                builtin: builtin.map(|i| i.id),
                constraint,
            };
        }
        self.ast.set_complete(node, complete);
        node
    }

    /// Check the constraint grammar for one scalar keyword. `Err(())` means
    /// the error was already reported and the type reference is fatal.
    fn verify_valid_constraint(
        &mut self,
        kind: ConstraintKind,
    ) -> Result<Option<TypeConstraint>, ()> {
        match kind {
            ConstraintKind::None => {
                if self.check_punct(PunctuationId::LeftParen) {
                    let span = self.current_span();
                    self.sink
                        .error("this type does not take a size or precision", span);
                    return Err(());
                }
                Ok(None)
            }
            ConstraintKind::Arguments { min, max } => {
                if !self.check_punct(PunctuationId::LeftParen) {
                    return Ok(None);
                }
                self.advance(); // (
                let mut args = Vec::new();
                loop {
                    match self.parse_constraint_number() {
                        Some(n) => args.push(n),
                        None => {
                            let span = self.current_span();
                            self.sink.error("expected a number in the type constraint", span);
                            return Err(());
                        }
                    }
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
                if !self.match_punct(PunctuationId::RightParen) {
                    let span = self.current_span();
                    self.sink.error("expected ')' to close the type constraint", span);
                    return Err(());
                }
                let lower = min.max(1) as usize;
                if args.len() < lower || args.len() > max as usize {
                    let span = self.current_span();
                    self.sink.error(
                        format!(
                            "wrong number of type arguments: expected {} to {}, found {}",
                            lower,
                            max,
                            args.len()
                        ),
                        span,
                    );
                    return Err(());
                }
                Ok(Some(TypeConstraint::Arguments(args)))
            }
            ConstraintKind::DatetimeRange => {
                let from = self.parse_time_qualifier("expected a datetime qualifier")?;
                if !self.expect_keyword(KeywordId::To, "expected 'to' in the datetime qualifier") {
                    return Err(());
                }
                let to = self.parse_time_qualifier("expected a datetime qualifier after 'to'")?;
                let scale = self.parse_trailing_scale(to)?;
                self.check_qualifier_order(from, to)?;
                Ok(Some(TypeConstraint::DatetimeRange { from, to, scale }))
            }
            ConstraintKind::IntervalRange => {
                let from = self.parse_time_qualifier("expected an interval qualifier")?;
                let from_precision = if self.check_punct(PunctuationId::LeftParen) {
                    self.advance();
                    let n = match self.parse_constraint_number() {
                        Some(n) => n as u32,
                        None => {
                            let span = self.current_span();
                            self.sink.error("expected a precision number", span);
                            return Err(());
                        }
                    };
                    if !self.match_punct(PunctuationId::RightParen) {
                        let span = self.current_span();
                        self.sink.error("expected ')' after the precision", span);
                        return Err(());
                    }
                    Some(n)
                } else {
                    None
                };
                if !self.expect_keyword(KeywordId::To, "expected 'to' in the interval qualifier") {
                    return Err(());
                }
                let to = self.parse_time_qualifier("expected an interval qualifier after 'to'")?;
                let scale = self.parse_trailing_scale(to)?;
                self.check_qualifier_order(from, to)?;
                Ok(Some(TypeConstraint::IntervalRange {
                    from,
                    from_precision,
                    to,
                    scale,
                }))
            }
        }
    }

    /// Swallow the rest of a malformed constraint so its tokens don't leak
    /// into the enclosing dispatch as a diagnostic cascade.
    fn recover_malformed_constraint(&mut self) {
        if !self.check_punct(PunctuationId::LeftParen) {
            return;
        }
        let mut depth = 0usize;
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::LeftParen) {
                depth += 1;
            } else if self.check_punct(PunctuationId::RightParen) {
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return;
                }
            } else if matches!(self.peek().kind, TokenKind::Newline) {
                return;
            }
            self.advance();
        }
    }

    fn parse_constraint_number(&mut self) -> Option<u64> {
        match &self.peek().kind {
            TokenKind::Number(text) => {
                let value = text.parse::<u64>().ok()?;
                self.advance();
                Some(value)
            }
            _ => None,
        }
    }

    fn parse_time_qualifier(&mut self, msg: &str) -> Result<TimeQualifier, ()> {
        let spelling = self.peek().text();
        match TimeQualifier::from_str(&spelling) {
            Some(q) => {
                self.advance();
                Ok(q)
            }
            None => {
                let span = self.current_span();
                self.sink.error(format!("{}, found '{}'", msg, spelling), span);
                Err(())
            }
        }
    }

    /// A fraction scale is only legal on the trailing qualifier.
    fn parse_trailing_scale(&mut self, to: TimeQualifier) -> Result<Option<u32>, ()> {
        if !self.check_punct(PunctuationId::LeftParen) {
            return Ok(None);
        }
        if to != TimeQualifier::Fraction {
            let span = self.current_span();
            self.sink
                .error("a scale is only legal on a trailing 'fraction' qualifier", span);
            return Err(());
        }
        self.advance(); // (
        let n = match self.parse_constraint_number() {
            Some(n) => n as u32,
            None => {
                let span = self.current_span();
                self.sink.error("expected a fraction scale number", span);
                return Err(());
            }
        };
        if !self.match_punct(PunctuationId::RightParen) {
            let span = self.current_span();
            self.sink.error("expected ')' after the fraction scale", span);
            return Err(());
        }
        Ok(Some(n))
    }

    fn check_qualifier_order(&mut self, from: TimeQualifier, to: TimeQualifier) -> Result<(), ()> {
        if from.rank() > to.rank() {
            let span = self.current_span();
            self.sink.error(
                format!(
                    "qualifier '{}' must not be finer than '{}'",
                    from.as_str(),
                    to.as_str()
                ),
                span,
            );
            return Err(());
        }
        Ok(())
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    /// Distinguish the three array shapes by lookahead and parse one.
    fn parse_array_type(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::ArrayType { kind: ArrayKind::Java },
            start,
        );

        let kind = if self.match_keyword(KeywordId::Dynamic) {
            if !self.expect_keyword(KeywordId::Array, "expected 'array' after 'dynamic'") {
                return node;
            }
            let mut dimension = 1u8;
            if self.match_keyword(KeywordId::With) {
                if !self.expect_keyword(KeywordId::Dimension, "expected 'dimension' after 'with'") {
                    return node;
                }
                match self.parse_constraint_number() {
                    Some(n @ 1..=3) => dimension = n as u8,
                    Some(n) => {
                        let span = self.current_span();
                        self.sink.error(
                            format!("a dynamic array dimension must be 1, 2 or 3, found {}", n),
                            span,
                        );
                        return node;
                    }
                    None => {
                        let span = self.current_span();
                        self.sink.error("expected a dimension number", span);
                        return node;
                    }
                }
            }
            ArrayKind::Dynamic { dimension }
        } else {
            self.advance(); // array
            if !self.expect_punct(PunctuationId::LeftBracket, "expected '[' after 'array'") {
                return node;
            }
            if self.match_punct(PunctuationId::RightBracket) {
                ArrayKind::Java
            } else {
                let mut dims = [DIMENSION_DEFAULT; 3];
                let mut count = 0usize;
                loop {
                    match self.parse_constraint_number() {
                        Some(n) if count < 3 => {
                            dims[count] = n as u16;
                            count += 1;
                        }
                        Some(_) => {
                            let span = self.current_span();
                            self.sink.error("an array has at most three dimensions", span);
                            return node;
                        }
                        None => {
                            let span = self.current_span();
                            self.sink.error("expected an array dimension", span);
                            return node;
                        }
                    }
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                }
                if !self.expect_punct(PunctuationId::RightBracket, "expected ']' after the array dimensions") {
                    return node;
                }
                ArrayKind::Static { dims }
            }
        };

        if !self.expect_keyword(KeywordId::Of, "expected 'of' in the array type") {
            return node;
        }
        self.skip_newlines();
        let element = self.parse_type_reference();
        let element_ok = self.ast.node(element).complete;
        self.ast.attach(node, element);
        self.ast.extend_span(node, self.prev_end());
        if let NodeKind::ArrayType { kind: slot } = &mut self.ast.node_mut(node).kind {
            *slot = kind;
        }
        self.ast.set_complete(node, element_ok);
        node
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// `RECORD LIKE [db:]table.*` or `RECORD field type, ... END RECORD`.
    ///
    /// Duplicate field names are a **hard** syntax error, unlike top-level
    /// duplicate declarations which only warn.
    fn parse_record_definition(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Record(RecordData {
                mimic: None,
                members: SymbolMap::new(),
            }),
            start,
        );
        self.advance(); // record

        if self.check_op(OperatorId::Like) {
            self.advance();
            let mut database = None;
            let mut table = match self.expect_ident("expected a table name after 'record like'") {
                Some((name, _)) => name,
                None => return node,
            };
            if self.match_punct(PunctuationId::Colon) {
                database = Some(table);
                table = match self.expect_ident("expected a table name after the database qualifier") {
                    Some((name, _)) => name,
                    None => return node,
                };
            }
            if !self.expect_punct(PunctuationId::Dot, "expected '.' in 'record like table.*'") {
                return node;
            }
            // The `*` lexes as the star operator.
            if !self.expect_op(OperatorId::Star, "expected '*' in 'record like table.*'") {
                return node;
            }
            self.ast.extend_span(node, self.prev_end());
            if let NodeKind::Record(data) = &mut self.ast.node_mut(node).kind {
                data.mimic = Some((database, table));
            }
            self.ast.set_complete(node, true);
            return node;
        }

        let mut fields: Vec<(String, Span, NodeId)> = Vec::new();
        let mut fatal = false;
        loop {
            self.skip_newlines();
            if self.at_block_end(KeywordId::RecordKw) || self.is_at_end() {
                break;
            }
            let (name, name_span) = match self.expect_ident("expected a record field name") {
                Some(entry) => entry,
                None => {
                    fatal = true;
                    // Resync inside the record rather than aborting the
                    // whole declaration list.
                    self.advance();
                    continue;
                }
            };
            self.skip_newlines();
            let type_ref = self.parse_type_reference();
            let field = self.ast.alloc(
                NodeKind::RecordField(RecordFieldData {
                    name: name.clone(),
                    name_span,
                    type_ref: Some(type_ref),
                }),
                name_span,
            );
            self.ast.attach(field, type_ref);
            self.ast.extend_span(field, self.prev_end());
            self.ast.set_complete(field, self.ast.node(type_ref).complete);
            self.ast.attach(node, field);
            fields.push((name, name_span, field));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        if self.at_block_end(KeywordId::RecordKw) {
            self.consume_block_end(KeywordId::RecordKw);
        } else {
            let span = self.current_span();
            self.sink.error("expected 'end record'", span);
            fatal = true;
        }
        self.ast.extend_span(node, self.prev_end());

        // Bind fields; a duplicate is fatal for the record definition.
        let mut duplicate = None;
        if let NodeKind::Record(data) = &mut self.ast.node_mut(node).kind {
            for (name, name_span, field) in &fields {
                let clash = data
                    .members
                    .insert(Symbol {
                        name: name.clone(),
                        node: *field,
                        kind: SymbolKind::RecordField,
                        scope: Scope::RecordField,
                        span: *name_span,
                    })
                    .is_some();
                if clash && duplicate.is_none() {
                    duplicate = Some((name.clone(), *name_span));
                }
            }
        }
        if let Some((name, span)) = duplicate {
            self.sink.error(
                format!("record field '{}' is defined more than once", name),
                span,
            );
            fatal = true;
        }
        self.ast.set_complete(node, !fatal);
        node
    }
}
