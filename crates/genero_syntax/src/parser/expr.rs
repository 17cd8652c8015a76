/// Expression parsing methods.
///
/// This chunk implements the structural expression engine: one operand
/// (paren group, literal run, function call, or name) optionally preceded by
/// unary operators, then zero or more `operator operand` continuations.
/// Operators are accumulated as flat token runs: **no precedence or
/// associativity is computed**; this parser records structure, it does not
/// evaluate.
///
/// ## Notes
/// - The head operand node *is* the expression: every appended piece
///   (operator run or operand) becomes a child and extends the head's span.
/// - `breaks` bounds a sub-parse: an operator listed there terminates the
///   expression instead of splicing (e.g. `USING` inside an `EXECUTE`).
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse one expression, bounded by `breaks`.
    ///
    /// Returns `None` when no operand starts at the cursor. On a mid-
    /// expression failure (missing operand after an operator, unclosed
    /// paren) the partial structure is returned with `complete == false` so
    /// the caller can resynchronize at the next statement boundary.
    fn try_parse_expression(&mut self, breaks: &[TokenKind]) -> Option<NodeId> {
        let head = if self.peek_is_unary_operator() {
            // Leading unary run: the run node becomes the expression head.
            let run = self.parse_operator_run(breaks);
            self.skip_newlines();
            match self.try_parse_operand() {
                Some(operand) => {
                    self.ast.attach(run, operand);
                    self.ast.set_complete(run, true);
                    run
                }
                None => {
                    let span = self.current_span();
                    self.sink.error("expected an expression", span);
                    return Some(run);
                }
            }
        } else {
            self.try_parse_operand()?
        };

        loop {
            let op = match self.peek().kind.operator_id() {
                Some(op) => op,
                None => break,
            };
            if breaks.contains(&self.peek().kind) {
                break;
            }
            if matches!(operators::info_for(op).fixity, operators::Fixity::Postfix) {
                // `CLIPPED` trails its operand with no right-hand side; a
                // binary operator may still follow it.
                let span = self.current_span();
                let text = self.peek().text();
                self.advance();
                let run = self
                    .ast
                    .alloc(NodeKind::TokenExpr(TokenExprData { text }), span);
                self.ast.set_complete(run, true);
                self.ast.attach(head, run);
                continue;
            }
            if !operators::is_binary(op) {
                break;
            }
            let run = self.parse_operator_run(breaks);
            self.ast.set_complete(run, true);
            self.ast.attach(head, run);
            self.skip_newlines();
            match self.try_parse_operand() {
                Some(operand) => self.ast.attach(head, operand),
                None => {
                    let span = self.current_span();
                    self.sink.error("expected an expression", span);
                    self.ast.set_complete(head, false);
                    return Some(head);
                }
            }
        }
        Some(head)
    }

    fn peek_is_unary_operator(&self) -> bool {
        self.peek()
            .kind
            .operator_id()
            .is_some_and(operators::is_unary)
    }

    /// Consume a run of adjacent operator tokens into one token-expression
    /// node (`a + -b` produces the run `+ -`).
    fn parse_operator_run(&mut self, breaks: &[TokenKind]) -> NodeId {
        let start = self.current_span();
        let mut text = String::new();
        let mut end = start.end;
        while self.peek().kind.operator_id().is_some() && !breaks.contains(&self.peek().kind) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&self.peek().text());
            end = self.peek().span.end;
            self.advance();
        }
        self.ast.alloc(
            NodeKind::TokenExpr(TokenExprData { text }),
            Span::new(start.start, end),
        )
    }

    /// Parse a single operand, or return `None` if the cursor is not at one.
    fn try_parse_operand(&mut self) -> Option<NodeId> {
        match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::LeftParen) => Some(self.parse_paren_expression()),
            TokenKind::StringLit(_) | TokenKind::CharLit(_) | TokenKind::IncompleteString(_) => {
                Some(self.parse_string_expression())
            }
            TokenKind::Number(text) => {
                let text = text.clone();
                let span = self.current_span();
                self.advance();
                let id = self
                    .ast
                    .alloc(NodeKind::TokenExpr(TokenExprData { text }), span);
                self.ast.set_complete(id, true);
                Some(id)
            }
            TokenKind::Keyword(KeywordId::Null) => {
                let span = self.current_span();
                self.advance();
                let id = self.ast.alloc(
                    NodeKind::TokenExpr(TokenExprData { text: "null".to_string() }),
                    span,
                );
                self.ast.set_complete(id, true);
                Some(id)
            }
            TokenKind::Ident(_) => {
                let (node, _is_call) = self.parse_callable();
                Some(node)
            }
            _ => None,
        }
    }

    fn parse_paren_expression(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::ParenExpr, start);
        self.advance(); // (
        self.skip_newlines();
        if let Some(inner) =
            self.try_parse_expression(&[TokenKind::Punctuation(PunctuationId::RightParen)])
        {
            self.ast.attach(node, inner);
        }
        self.skip_newlines();
        if self.expect_punct(PunctuationId::RightParen, "expected ')' to close the expression") {
            self.ast.set_complete(node, true);
        }
        let end = self.prev_end();
        self.ast.extend_span(node, end);
        node
    }

    /// Accumulate adjacent string-literal tokens into one value.
    fn parse_string_expression(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::StringExpr(StringExprData { value: String::new() }),
            start,
        );
        let mut value = String::new();
        let mut complete = true;
        loop {
            match &self.peek().kind {
                TokenKind::StringLit(s) | TokenKind::CharLit(s) => {
                    value.push_str(s);
                    self.advance();
                }
                TokenKind::IncompleteString(s) => {
                    value.push_str(s);
                    self.advance();
                    complete = false;
                    break;
                }
                _ => break,
            }
        }
        let end = self.prev_end();
        self.ast.extend_span(node, end);
        if let NodeKind::StringExpr(data) = &mut self.ast.node_mut(node).kind {
            data.value = value;
        }
        self.ast.set_complete(node, complete);
        node
    }

    /// Parse a name reference with member/index suffix pieces
    /// (`rec.field[i].total`).
    fn parse_name_expression(&mut self) -> NodeId {
        let start = self.current_span();
        let base = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                name
            }
            // Callers only enter on an identifier; anything else is a bug in
            // the dispatch, surface it as an incomplete empty name.
            _ => String::new(),
        };
        let node = self.ast.alloc(
            NodeKind::NameExpr(NameExprData {
                base,
                pieces: Vec::new(),
            }),
            start,
        );
        self.ast.set_complete(node, true);

        loop {
            if self.check_punct(PunctuationId::Dot) {
                self.advance();
                match &self.peek().kind {
                    TokenKind::Ident(member) => {
                        let member = member.clone();
                        self.advance();
                        if let NodeKind::NameExpr(data) = &mut self.ast.node_mut(node).kind {
                            data.pieces.push(NamePiece::Member(member));
                        }
                    }
                    _ => {
                        let span = self.current_span();
                        self.sink.error("expected a member name after '.'", span);
                        self.ast.set_complete(node, false);
                        break;
                    }
                }
            } else if self.check_punct(PunctuationId::LeftBracket) {
                self.advance();
                self.skip_newlines();
                let mut exprs = Vec::new();
                loop {
                    match self.try_parse_expression(&[
                        TokenKind::Punctuation(PunctuationId::Comma),
                        TokenKind::Punctuation(PunctuationId::RightBracket),
                    ]) {
                        Some(e) => {
                            self.ast.attach(node, e);
                            exprs.push(e);
                        }
                        None => break,
                    }
                    if !self.match_punct(PunctuationId::Comma) {
                        break;
                    }
                    self.skip_newlines();
                }
                if !self.expect_punct(PunctuationId::RightBracket, "expected ']' after index expression") {
                    self.ast.set_complete(node, false);
                    break;
                }
                if let NodeKind::NameExpr(data) = &mut self.ast.node_mut(node).kind {
                    data.pieces.push(NamePiece::Index { exprs });
                }
            } else {
                break;
            }
        }
        let end = self.prev_end();
        self.ast.extend_span(node, end);
        node
    }

    /// Parse a name that may be a function call.
    ///
    /// Returns the node plus whether it is a call. A name followed by `(` is
    /// committed as a call; if the argument list is malformed the call node
    /// is returned incomplete (the error has already been reported), so the
    /// caller never needs to re-parse.
    fn parse_callable(&mut self) -> (NodeId, bool) {
        let name_node = self.parse_name_expression();
        if !self.check_punct(PunctuationId::LeftParen) {
            return (name_node, false);
        }
        let name = match &self.ast.node(name_node).kind {
            NodeKind::NameExpr(data) => data.display(),
            _ => String::new(),
        };
        let start = self.ast.node(name_node).span;
        let call = self.ast.alloc(
            NodeKind::FunctionCall(FunctionCallData {
                name,
                args: Vec::new(),
            }),
            start,
        );
        self.ast.attach(call, name_node);
        self.advance(); // (
        self.skip_newlines();
        let mut args = Vec::new();
        if !self.check_punct(PunctuationId::RightParen) {
            loop {
                match self.try_parse_expression(&[
                    TokenKind::Punctuation(PunctuationId::Comma),
                    TokenKind::Punctuation(PunctuationId::RightParen),
                ]) {
                    Some(arg) => {
                        self.ast.attach(call, arg);
                        args.push(arg);
                    }
                    None => {
                        let span = self.current_span();
                        self.sink.error("expected a function argument", span);
                        break;
                    }
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
                self.skip_newlines();
            }
        }
        let closed = self.expect_punct(PunctuationId::RightParen, "expected ')' to close the call");
        let end = self.prev_end();
        self.ast.extend_span(call, end);
        if let NodeKind::FunctionCall(data) = &mut self.ast.node_mut(call).kind {
            data.args = args;
        }
        self.ast.set_complete(call, closed);
        (call, true)
    }

    /// Comma-separated expression list, each bounded by `breaks`.
    fn parse_expression_list(&mut self, breaks: &[TokenKind]) -> Vec<NodeId> {
        let mut list = Vec::new();
        loop {
            match self.try_parse_expression(breaks) {
                Some(e) => list.push(e),
                None => break,
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        list
    }

    /// Comma-separated variable references (`a, rec.b[i]`), used by
    /// `RETURNING`/`INTO`/`USING` clauses.
    fn parse_variable_list(&mut self) -> Vec<NodeId> {
        let mut list = Vec::new();
        while matches!(self.peek().kind, TokenKind::Ident(_)) {
            list.push(self.parse_name_expression());
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        list
    }
}
