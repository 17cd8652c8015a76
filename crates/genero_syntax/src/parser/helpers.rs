/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// peeking/consuming tokens, matching/expecting keywords and punctuation,
/// newline handling, and break-sequence lookahead.
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the cursor is past the last token or at
    /// [`TokenKind::Eof`]. Fragment windows need not end with an Eof token.
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || matches!(self.tokens[self.pos].kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it (the synthetic Eof
    /// token past the end of a fragment window).
    fn peek(&self) -> &Token {
        if self.pos < self.tokens.len() {
            &self.tokens[self.pos]
        } else {
            &self.eof
        }
    }

    /// Return the `n`-th non-newline token at or after the cursor without
    /// consuming anything (`n = 0` is the current non-newline token).
    fn peek_skipping_newlines(&self, n: usize) -> &Token {
        let mut remaining = n;
        let mut pos = self.pos;
        loop {
            if pos >= self.tokens.len() {
                return &self.eof;
            }
            let token = &self.tokens[pos];
            if !matches!(token.kind, TokenKind::Newline) {
                if remaining == 0 || matches!(token.kind, TokenKind::Eof) {
                    return token;
                }
                remaining -= 1;
            }
            pos += 1;
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        if self.pos == 0 {
            &self.eof
        } else {
            &self.tokens[self.pos - 1]
        }
    }

    /// End offset of the most recently consumed token.
    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek().kind, TokenKind::Newline) {
            self.advance();
        }
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the expected keyword or report an error. Returns whether the
    /// keyword was present; the caller decides how fatal its absence is.
    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> bool {
        if self.match_keyword(id) {
            true
        } else {
            let span = self.current_span();
            self.sink.error(format!("{}, found {:?}", msg, self.peek().kind), span);
            false
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> bool {
        if self.match_op(id) {
            true
        } else {
            let span = self.current_span();
            self.sink.error(format!("{}, found {:?}", msg, self.peek().kind), span);
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> bool {
        if self.match_punct(id) {
            true
        } else {
            let span = self.current_span();
            self.sink.error(format!("{}, found {:?}", msg, self.peek().kind), span);
            false
        }
    }

    /// Consume an identifier, reporting an error when absent.
    fn expect_ident(&mut self, msg: &str) -> Option<(String, Span)> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.current_span();
                self.advance();
                Some((name, span))
            }
            _ => {
                let span = self.current_span();
                self.sink.error(format!("{}, found {:?}", msg, self.peek().kind), span);
                None
            }
        }
    }

    /// Identifier list: `a, b, c`. Stops before the first non-comma
    /// continuation. Returns at least one name or reports an error.
    fn ident_list(&mut self, msg: &str) -> Vec<(String, Span)> {
        let mut names = Vec::new();
        loop {
            match self.expect_ident(msg) {
                Some(entry) => names.push(entry),
                None => break,
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        names
    }

    /// Return `true` if the upcoming non-newline tokens match the `END kw`
    /// terminator of the current block.
    fn at_block_end(&self, end_kw: KeywordId) -> bool {
        self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::EndKw)
            && self.peek_skipping_newlines(1).kind.is_keyword(end_kw)
    }

    /// Consume `END kw` (which [`at_block_end`] already verified is next).
    fn consume_block_end(&mut self, end_kw: KeywordId) {
        self.skip_newlines();
        self.match_keyword(KeywordId::EndKw);
        self.skip_newlines();
        self.match_keyword(end_kw);
    }

    /// Return `true` if the upcoming non-newline tokens match any of the
    /// given break sequences. Consumes nothing: the caller's caller resumes
    /// its own dispatch at the sequence's first token.
    fn matches_break_sequence(&self, sequences: &[&[KeywordId]]) -> bool {
        sequences.iter().any(|seq| {
            seq.iter()
                .enumerate()
                .all(|(i, kw)| self.peek_skipping_newlines(i).kind.is_keyword(*kw))
        })
    }

    /// Skip one offending token with a diagnostic. Bounds error cascades to
    /// one diagnostic per bad token.
    fn skip_unexpected(&mut self, context: &str) {
        let span = self.current_span();
        let found = self.peek().text();
        self.sink
            .error(format!("unexpected '{}' in {}", found, context), span);
        self.advance();
    }

    /// Consume a trailing `;` if present after a successfully parsed
    /// statement.
    fn eat_statement_terminator(&mut self) {
        self.match_punct(PunctuationId::Semicolon);
    }
}
