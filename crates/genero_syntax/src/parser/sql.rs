/// Embedded-SQL parsing methods.
///
/// Only `SELECT` has a body parser; it is a structural capture (column
/// expressions, `INTO` targets, table list, bounded `WHERE`/`GROUP`/`ORDER`/
/// `HAVING` clauses), not a SQL-92 validator. `UPDATE`, `INSERT`, and
/// `DELETE` are recognized and rejected with a "not supported" diagnostic
/// so they never silently fall through as unexpected tokens.
impl<'a> Parser<'a> {
    // ========================================================================
    // SELECT
    // ========================================================================

    fn parse_select(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Select(SelectData {
                distinct: false,
                columns: Vec::new(),
                into: Vec::new(),
                tables: Vec::new(),
                where_clause: None,
            }),
            start,
        );
        self.advance(); // select
        self.skip_newlines();

        let distinct = if self.match_keyword(KeywordId::Distinct) {
            true
        } else {
            self.match_keyword(KeywordId::All);
            false
        };

        // Column list: `*` or expressions. A bare `*` lexes as the star
        // operator, so it is handled before the expression engine runs.
        let mut columns = Vec::new();
        loop {
            self.skip_newlines();
            if self.check_op(OperatorId::Star) {
                let span = self.current_span();
                self.advance();
                let star = self.ast.alloc(
                    NodeKind::TokenExpr(TokenExprData { text: "*".to_string() }),
                    span,
                );
                self.ast.set_complete(star, true);
                self.ast.attach(node, star);
                columns.push(star);
            } else {
                match self.try_parse_expression(&[
                    TokenKind::Punctuation(PunctuationId::Comma),
                    TokenKind::Keyword(KeywordId::From),
                    TokenKind::Keyword(KeywordId::Into),
                ]) {
                    Some(col) => {
                        self.ast.attach(node, col);
                        columns.push(col);
                    }
                    None => {
                        let span = self.current_span();
                        self.sink.error("expected a select column", span);
                        break;
                    }
                }
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        let into = if self.match_keyword(KeywordId::Into) {
            self.skip_newlines();
            let vars = self.parse_variable_list();
            for &v in &vars {
                self.ast.attach(node, v);
            }
            vars
        } else {
            Vec::new()
        };

        let mut complete = !columns.is_empty();
        let mut tables = Vec::new();
        if self.expect_keyword(KeywordId::From, "expected 'from' in the select statement") {
            self.skip_newlines();
            loop {
                match self.expect_ident("expected a table name") {
                    Some((name, _)) => {
                        // Optional alias: `FROM customer c`.
                        if matches!(self.peek().kind, TokenKind::Ident(_)) {
                            self.advance();
                        }
                        tables.push(name);
                    }
                    None => {
                        complete = false;
                        break;
                    }
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
                self.skip_newlines();
            }
        } else {
            complete = false;
        }

        let where_clause = if self.match_keyword(KeywordId::Where) {
            self.skip_newlines();
            let e = self.try_parse_expression(&[
                TokenKind::Keyword(KeywordId::Group),
                TokenKind::Keyword(KeywordId::Order),
                TokenKind::Keyword(KeywordId::Having),
            ]);
            match e {
                Some(e) => {
                    self.ast.attach(node, e);
                    Some(e)
                }
                None => {
                    let span = self.current_span();
                    self.sink.error("expected a condition after 'where'", span);
                    complete = false;
                    None
                }
            }
        } else {
            None
        };

        // GROUP BY / ORDER BY / HAVING: structural capture of the
        // expression lists; nothing downstream consumes them yet.
        while self.check_keyword(KeywordId::Group) || self.check_keyword(KeywordId::Order) {
            self.advance();
            self.expect_keyword(KeywordId::By, "expected 'by'");
            let exprs = self.parse_expression_list(&[
                TokenKind::Keyword(KeywordId::Group),
                TokenKind::Keyword(KeywordId::Order),
                TokenKind::Keyword(KeywordId::Having),
            ]);
            for &e in &exprs {
                self.ast.attach(node, e);
            }
            // ASC/DESC trail order-by lists.
            while self.match_keyword(KeywordId::Asc) || self.match_keyword(KeywordId::Desc) {}
        }
        if self.match_keyword(KeywordId::Having) {
            if let Some(e) = self.try_parse_expression(&[]) {
                self.ast.attach(node, e);
            }
        }

        if let NodeKind::Select(data) = &mut self.ast.node_mut(node).kind {
            data.distinct = distinct;
            data.columns = columns;
            data.into = into;
            data.tables = tables;
            data.where_clause = where_clause;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        node
    }

    // ========================================================================
    // Recognized-but-unsupported statements
    // ========================================================================

    /// `UPDATE` / `INSERT` / `DELETE`: reject explicitly and resynchronize
    /// at the next line.
    fn parse_unsupported_sql(&mut self, kw: KeywordId) -> NodeId {
        let start = self.current_span();
        let node = self
            .ast
            .alloc(NodeKind::UnsupportedSql(UnsupportedSqlData { keyword: kw }), start);
        self.sink.error(
            format!(
                "'{}' statements are not supported by this analyzer",
                genero_core::lang::keywords::as_str(kw)
            ),
            start,
        );
        // Consume through the end of the statement line.
        while !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            if self.check_punct(PunctuationId::Semicolon) {
                break;
            }
            self.advance();
        }
        self.ast.extend_span(node, self.prev_end());
        node
    }
}
