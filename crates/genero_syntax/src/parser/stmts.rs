/// Statement parsing methods.
///
/// This chunk is the statement factory: a single keyword-indexed dispatch
/// plus one self-contained production per statement kind. Block statements
/// share the `END <keyword>` terminator convention; inside a block an
/// unrecognized token is skipped with one diagnostic rather than aborting
/// the block, which bounds error cascades to one message per bad token.
///
/// Loop constructs thread `StatementContext::valid_exits` downward so nested
/// `EXIT`/`CONTINUE` statements can be checked against the enclosing
/// construct kind; a mismatch is a warning, not a parse failure.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statement dispatch
    // ========================================================================

    /// Parse one statement if the cursor is at one.
    fn try_parse_statement(&mut self, ctx: &StatementContext) -> Option<NodeId> {
        // Preprocessor lines are recognized at every dispatch point.
        if self.check_punct(PunctuationId::Ampersand) {
            return Some(self.parse_preprocessor());
        }
        let kw = self.peek().kind.keyword_id()?;
        let node = match kw {
            KeywordId::If => self.parse_if(ctx),
            KeywordId::While => self.parse_while(ctx),
            KeywordId::For => self.parse_for(ctx),
            KeywordId::Foreach => self.parse_foreach(ctx),
            KeywordId::Case => self.parse_case(ctx),
            KeywordId::Try => self.parse_try(ctx),
            KeywordId::Menu => self.parse_menu(ctx),
            KeywordId::Dialog => self.parse_dialog(ctx),
            KeywordId::Construct => self.parse_construct(ctx),
            KeywordId::Display => self.parse_display(ctx),
            KeywordId::Input => self.parse_input(ctx),
            KeywordId::Prompt => self.parse_prompt(),
            KeywordId::Call => self.parse_call(),
            KeywordId::Let => self.parse_let(),
            KeywordId::Return => self.parse_return(),
            KeywordId::Exit => self.parse_exit(ctx),
            KeywordId::Continue => self.parse_continue(ctx),
            KeywordId::Message => self.parse_message(false),
            KeywordId::ErrorKw => self.parse_message(true),
            KeywordId::Sleep => self.parse_sleep(),
            KeywordId::Goto => self.parse_goto(),
            KeywordId::Label => self.parse_label(),
            KeywordId::Defer => self.parse_defer(),
            KeywordId::Whenever => self.parse_whenever(),
            KeywordId::Initialize => self.parse_initialize(),
            KeywordId::Options => self.parse_options_stmt(),
            KeywordId::Load => self.parse_load(false),
            KeywordId::Unload => self.parse_load(true),
            KeywordId::Create => self.parse_create_table(),
            KeywordId::Declare => self.parse_declare_cursor(),
            KeywordId::Prepare => self.parse_prepare(),
            KeywordId::Execute => self.parse_execute(),
            KeywordId::Open => self.parse_open(),
            KeywordId::Fetch => self.parse_fetch(),
            KeywordId::Close => self.parse_close(),
            KeywordId::Free => self.parse_free(),
            KeywordId::Select => self.parse_select(),
            KeywordId::Update | KeywordId::Insert | KeywordId::Delete => {
                self.parse_unsupported_sql(kw)
            }
            _ => return None,
        };
        self.eat_statement_terminator();
        Some(node)
    }

    // ========================================================================
    // Block plumbing
    // ========================================================================

    /// Parse statements until the block terminator, a stop keyword, or end
    /// of input.
    fn parse_statement_block(
        &mut self,
        parent: NodeId,
        end_kw: KeywordId,
        stops: &[KeywordId],
        ctx: &StatementContext,
    ) -> BlockEnd {
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                return BlockEnd::Eof;
            }
            if self.at_block_end(end_kw) {
                self.consume_block_end(end_kw);
                return BlockEnd::Terminated;
            }
            if let Some(kw) = self.peek().kind.keyword_id() {
                if stops.contains(&kw) {
                    return BlockEnd::Stopped;
                }
            }
            match self.try_parse_statement(ctx) {
                Some(stmt) => self.ast.attach(parent, stmt),
                None => self.skip_unexpected("this block"),
            }
        }
    }

    /// Close out a block node: extend the span and report a missing
    /// terminator when the block ran off the end of input.
    fn finish_block(&mut self, node: NodeId, end_kw: KeywordId, ended: BlockEnd) {
        if ended == BlockEnd::Eof {
            let span = self.current_span();
            self.sink.error(
                format!("expected 'end {}'", genero_core::lang::keywords::as_str(end_kw)),
                span,
            );
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, ended == BlockEnd::Terminated);
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    fn parse_if(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::If { condition: None }, start);
        self.advance(); // if
        let condition = self.try_parse_expression(&[TokenKind::Keyword(KeywordId::Then)]);
        if let Some(cond) = condition {
            self.ast.attach(node, cond);
            if let NodeKind::If { condition: slot } = &mut self.ast.node_mut(node).kind {
                *slot = Some(cond);
            }
        } else {
            let span = self.current_span();
            self.sink.error("expected a condition after 'if'", span);
        }
        self.expect_keyword(KeywordId::Then, "expected 'then' after the if condition");

        let mut ended = self.parse_statement_block(node, KeywordId::If, &[KeywordId::Else], ctx);
        if ended == BlockEnd::Stopped {
            let else_span = self.current_span();
            self.advance(); // else
            let else_block = self.ast.alloc(NodeKind::ElseBlock, else_span);
            ended = self.parse_statement_block(else_block, KeywordId::If, &[], ctx);
            self.ast.extend_span(else_block, self.prev_end());
            self.ast.set_complete(else_block, ended == BlockEnd::Terminated);
            self.ast.attach(node, else_block);
        }
        self.finish_block(node, KeywordId::If, ended);
        node
    }

    fn parse_while(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::While { condition: None }, start);
        self.advance(); // while
        if let Some(cond) = self.try_parse_expression(&[]) {
            self.ast.attach(node, cond);
            if let NodeKind::While { condition: slot } = &mut self.ast.node_mut(node).kind {
                *slot = Some(cond);
            }
        } else {
            let span = self.current_span();
            self.sink.error("expected a condition after 'while'", span);
        }
        let inner = ctx.with(KeywordId::While);
        let ended = self.parse_statement_block(node, KeywordId::While, &[], &inner);
        self.finish_block(node, KeywordId::While, ended);
        node
    }

    fn parse_for(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::For(ForData {
                counter: String::new(),
                from: None,
                to: None,
                step: None,
            }),
            start,
        );
        self.advance(); // for
        let counter = self
            .expect_ident("expected a counter variable after 'for'")
            .map(|(name, _)| name)
            .unwrap_or_default();
        self.expect_op(OperatorId::Equals, "expected '=' after the for counter");
        let from = self.try_parse_expression(&[TokenKind::Keyword(KeywordId::To)]);
        if let Some(e) = from {
            self.ast.attach(node, e);
        }
        self.expect_keyword(KeywordId::To, "expected 'to' in the for header");
        let to = self.try_parse_expression(&[TokenKind::Keyword(KeywordId::Step)]);
        if let Some(e) = to {
            self.ast.attach(node, e);
        }
        // Optional signed STEP; the expression engine handles the sign.
        let step = if self.match_keyword(KeywordId::Step) {
            let e = self.try_parse_expression(&[]);
            if let Some(e) = e {
                self.ast.attach(node, e);
            } else {
                let span = self.current_span();
                self.sink.error("expected a step value after 'step'", span);
            }
            e
        } else {
            None
        };
        if let NodeKind::For(data) = &mut self.ast.node_mut(node).kind {
            data.counter = counter;
            data.from = from;
            data.to = to;
            data.step = step;
        }
        let inner = ctx.with(KeywordId::For);
        let ended = self.parse_statement_block(node, KeywordId::For, &[], &inner);
        self.finish_block(node, KeywordId::For, ended);
        node
    }

    fn parse_foreach(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Foreach(ForeachData {
                cursor: String::new(),
                using: Vec::new(),
                into: Vec::new(),
            }),
            start,
        );
        self.advance(); // foreach
        let cursor = self
            .expect_ident("expected a cursor name after 'foreach'")
            .map(|(name, _)| name)
            .unwrap_or_default();
        let using = if self.match_op(OperatorId::Using) {
            let vars = self.parse_variable_list();
            for &v in &vars {
                self.ast.attach(node, v);
            }
            vars
        } else {
            Vec::new()
        };
        let into = if self.match_keyword(KeywordId::Into) {
            let vars = self.parse_variable_list();
            for &v in &vars {
                self.ast.attach(node, v);
            }
            vars
        } else {
            Vec::new()
        };
        if let NodeKind::Foreach(data) = &mut self.ast.node_mut(node).kind {
            data.cursor = cursor;
            data.using = using;
            data.into = into;
        }
        let inner = ctx.with(KeywordId::Foreach);
        let ended = self.parse_statement_block(node, KeywordId::Foreach, &[], &inner);
        self.finish_block(node, KeywordId::Foreach, ended);
        node
    }

    fn parse_case(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Case { subject: None }, start);
        self.advance(); // case
        if !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            if let Some(subject) = self.try_parse_expression(&[]) {
                self.ast.attach(node, subject);
                if let NodeKind::Case { subject: slot } = &mut self.ast.node_mut(node).kind {
                    *slot = Some(subject);
                }
            }
        }
        let inner = ctx.with(KeywordId::Case);
        let mut ended = BlockEnd::Eof;
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            if self.at_block_end(KeywordId::Case) {
                self.consume_block_end(KeywordId::Case);
                ended = BlockEnd::Terminated;
                break;
            }
            if self.check_keyword(KeywordId::When) {
                let branch_start = self.current_span();
                self.advance();
                let branch = self.ast.alloc(
                    NodeKind::WhenBranch(WhenBranchData {
                        condition: None,
                        is_otherwise: false,
                    }),
                    branch_start,
                );
                if let Some(cond) = self.try_parse_expression(&[]) {
                    self.ast.attach(branch, cond);
                    if let NodeKind::WhenBranch(data) = &mut self.ast.node_mut(branch).kind {
                        data.condition = Some(cond);
                    }
                } else {
                    let span = self.current_span();
                    self.sink.error("expected a condition after 'when'", span);
                }
                let end = self.parse_statement_block(
                    branch,
                    KeywordId::Case,
                    &[KeywordId::When, KeywordId::Otherwise],
                    &inner,
                );
                self.ast.extend_span(branch, self.prev_end());
                self.ast.set_complete(branch, true);
                self.ast.attach(node, branch);
                if end == BlockEnd::Terminated {
                    ended = BlockEnd::Terminated;
                    break;
                }
                if end == BlockEnd::Eof {
                    break;
                }
            } else if self.check_keyword(KeywordId::Otherwise) {
                let branch_start = self.current_span();
                self.advance();
                let branch = self.ast.alloc(
                    NodeKind::WhenBranch(WhenBranchData {
                        condition: None,
                        is_otherwise: true,
                    }),
                    branch_start,
                );
                let end = self.parse_statement_block(branch, KeywordId::Case, &[], &inner);
                self.ast.extend_span(branch, self.prev_end());
                self.ast.set_complete(branch, true);
                self.ast.attach(node, branch);
                ended = end;
                break;
            } else {
                self.skip_unexpected("a case statement");
            }
        }
        self.finish_block(node, KeywordId::Case, ended);
        node
    }

    fn parse_try(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::TryBlock, start);
        self.advance(); // try
        let mut ended = self.parse_statement_block(node, KeywordId::Try, &[KeywordId::Catch], ctx);
        if ended == BlockEnd::Stopped {
            let catch_span = self.current_span();
            self.advance(); // catch
            let catch = self.ast.alloc(NodeKind::CatchBlock, catch_span);
            ended = self.parse_statement_block(catch, KeywordId::Try, &[], ctx);
            self.ast.extend_span(catch, self.prev_end());
            self.ast.set_complete(catch, ended == BlockEnd::Terminated);
            self.ast.attach(node, catch);
        }
        self.finish_block(node, KeywordId::Try, ended);
        node
    }

    // ========================================================================
    // UI blocks
    // ========================================================================

    fn parse_menu(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Menu { title: None }, start);
        self.advance(); // menu
        if matches!(self.peek().kind, TokenKind::StringLit(_) | TokenKind::CharLit(_)) {
            let title = self.parse_string_expression();
            self.ast.attach(node, title);
            if let NodeKind::Menu { title: slot } = &mut self.ast.node_mut(node).kind {
                *slot = Some(title);
            }
        }
        let inner = ctx.with(KeywordId::Menu);
        let mut ended = BlockEnd::Eof;
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            if self.at_block_end(KeywordId::Menu) {
                self.consume_block_end(KeywordId::Menu);
                ended = BlockEnd::Terminated;
                break;
            }
            let option_start = self.current_span();
            let kind = if self.match_keyword(KeywordId::Before) {
                self.expect_keyword(KeywordId::Menu, "expected 'menu' after 'before'");
                MenuOptionKind::Before
            } else if self.match_keyword(KeywordId::Command) {
                if self.match_keyword(KeywordId::Key) {
                    self.expect_punct(PunctuationId::LeftParen, "expected '(' after 'key'");
                    let name = self.peek().text();
                    if !self.is_at_end() {
                        self.advance();
                    }
                    self.expect_punct(PunctuationId::RightParen, "expected ')' after the key name");
                    // An optional caption may still follow the key clause.
                    if matches!(self.peek().kind, TokenKind::StringLit(_) | TokenKind::CharLit(_)) {
                        self.advance();
                    }
                    MenuOptionKind::Key { name }
                } else {
                    let name = match &self.peek().kind {
                        TokenKind::StringLit(s) | TokenKind::CharLit(s) => {
                            let s = s.clone();
                            self.advance();
                            // Optional help text string.
                            if matches!(self.peek().kind, TokenKind::StringLit(_) | TokenKind::CharLit(_)) {
                                self.advance();
                            }
                            s
                        }
                        _ => {
                            let span = self.current_span();
                            self.sink.error("expected an option name after 'command'", span);
                            String::new()
                        }
                    };
                    MenuOptionKind::Command { name }
                }
            } else if self.match_keyword(KeywordId::On) {
                self.expect_keyword(KeywordId::Action, "expected 'action' after 'on'");
                let name = self
                    .expect_ident("expected an action name")
                    .map(|(n, _)| n)
                    .unwrap_or_default();
                MenuOptionKind::Action { name }
            } else {
                self.skip_unexpected("a menu block");
                continue;
            };
            let option = self
                .ast
                .alloc(NodeKind::MenuOption(MenuOptionData { kind }), option_start);
            let end = self.parse_statement_block(
                option,
                KeywordId::Menu,
                &[KeywordId::Command, KeywordId::On, KeywordId::Before],
                &inner,
            );
            self.ast.extend_span(option, self.prev_end());
            self.ast.set_complete(option, true);
            self.ast.attach(node, option);
            match end {
                BlockEnd::Terminated => {
                    ended = BlockEnd::Terminated;
                    break;
                }
                BlockEnd::Eof => break,
                BlockEnd::Stopped => continue,
            }
        }
        self.finish_block(node, KeywordId::Menu, ended);
        node
    }

    /// Shared `BEFORE x` / `AFTER x` / `ON ACTION name` event-block loop for
    /// `DIALOG`, block-form `CONSTRUCT`, `INPUT`, and `DISPLAY ARRAY`.
    fn parse_ui_event_blocks(
        &mut self,
        node: NodeId,
        block_kw: KeywordId,
        ctx: &StatementContext,
    ) -> BlockEnd {
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                return BlockEnd::Eof;
            }
            if self.at_block_end(block_kw) {
                self.consume_block_end(block_kw);
                return BlockEnd::Terminated;
            }
            let event_start = self.current_span();
            let kind = if self.match_keyword(KeywordId::Before) {
                self.expect_keyword(block_kw, "expected the block keyword after 'before'");
                DialogEventKind::BeforeDialog
            } else if self.match_keyword(KeywordId::After) {
                self.expect_keyword(block_kw, "expected the block keyword after 'after'");
                DialogEventKind::AfterDialog
            } else if self.match_keyword(KeywordId::On) {
                self.expect_keyword(KeywordId::Action, "expected 'action' after 'on'");
                let name = self
                    .expect_ident("expected an action name")
                    .map(|(n, _)| n)
                    .unwrap_or_default();
                DialogEventKind::OnAction { name }
            } else {
                self.skip_unexpected("this interactive block");
                continue;
            };
            let event = self
                .ast
                .alloc(NodeKind::DialogEvent(DialogEventData { kind }), event_start);
            let end = self.parse_statement_block(
                event,
                block_kw,
                &[KeywordId::Before, KeywordId::After, KeywordId::On],
                ctx,
            );
            self.ast.extend_span(event, self.prev_end());
            self.ast.set_complete(event, true);
            self.ast.attach(node, event);
            match end {
                BlockEnd::Terminated => return BlockEnd::Terminated,
                BlockEnd::Eof => return BlockEnd::Eof,
                BlockEnd::Stopped => continue,
            }
        }
    }

    fn parse_dialog(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Dialog, start);
        self.advance(); // dialog
        let inner = ctx.with(KeywordId::Dialog);
        let ended = self.parse_ui_event_blocks(node, KeywordId::Dialog, &inner);
        self.finish_block(node, KeywordId::Dialog, ended);
        node
    }

    fn parse_construct(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Construct(ConstructData {
                by_name: false,
                target: None,
                columns: Vec::new(),
            }),
            start,
        );
        self.advance(); // construct
        let by_name = if self.match_keyword(KeywordId::By) {
            self.expect_keyword(KeywordId::Name, "expected 'name' after 'by'");
            true
        } else {
            false
        };
        let target = if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let t = self.parse_name_expression();
            self.ast.attach(node, t);
            Some(t)
        } else {
            let span = self.current_span();
            self.sink.error("expected a target variable after 'construct'", span);
            None
        };
        self.expect_keyword(KeywordId::On, "expected 'on' in the construct statement");
        let mut columns = Vec::new();
        while matches!(self.peek().kind, TokenKind::Ident(_)) {
            let col = self.parse_name_expression();
            if let NodeKind::NameExpr(data) = &self.ast.node(col).kind {
                columns.push(data.display());
            }
            self.ast.attach(node, col);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            self.skip_newlines();
        }
        if self.match_keyword(KeywordId::From) {
            let fields = self.parse_variable_list();
            for &f in &fields {
                self.ast.attach(node, f);
            }
        }
        if let NodeKind::Construct(data) = &mut self.ast.node_mut(node).kind {
            data.by_name = by_name;
            data.target = target;
            data.columns = columns;
        }
        // Block form: event blocks through END CONSTRUCT.
        if self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::Before)
            || self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::After)
            || self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::On)
            || self.at_block_end(KeywordId::Construct)
        {
            let inner = ctx.with(KeywordId::Construct);
            let ended = self.parse_ui_event_blocks(node, KeywordId::Construct, &inner);
            self.finish_block(node, KeywordId::Construct, ended);
        } else {
            self.ast.extend_span(node, self.prev_end());
            self.ast.set_complete(node, true);
        }
        node
    }

    fn parse_display(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Display(DisplayData { by_name: false }), start);
        self.advance(); // display

        if self.match_keyword(KeywordId::By) {
            self.expect_keyword(KeywordId::Name, "expected 'name' after 'by'");
            let values = self.parse_expression_list(&[]);
            for &v in &values {
                self.ast.attach(node, v);
            }
            if let NodeKind::Display(data) = &mut self.ast.node_mut(node).kind {
                data.by_name = true;
            }
            self.ast.extend_span(node, self.prev_end());
            self.ast.set_complete(node, !values.is_empty());
            return node;
        }

        if self.check_keyword(KeywordId::Array) {
            // DISPLAY ARRAY arr TO screen-array: block form.
            self.advance();
            if let Some(arr) = self.try_parse_operand() {
                self.ast.attach(node, arr);
            }
            self.expect_keyword(KeywordId::To, "expected 'to' after the display array");
            if matches!(self.peek().kind, TokenKind::Ident(_)) {
                let screen = self.parse_name_expression();
                self.ast.attach(node, screen);
            }
            let inner = ctx.with(KeywordId::Display);
            let ended = self.parse_ui_event_blocks(node, KeywordId::Display, &inner);
            self.finish_block(node, KeywordId::Display, ended);
            return node;
        }

        let values = self.parse_expression_list(&[]);
        for &v in &values {
            self.ast.attach(node, v);
        }
        if values.is_empty() {
            let span = self.current_span();
            self.sink.error("expected an expression after 'display'", span);
        }
        if self.match_keyword(KeywordId::To) {
            let targets = self.parse_variable_list();
            for &t in &targets {
                self.ast.attach(node, t);
            }
        } else if self.match_keyword(KeywordId::At) {
            let coords = self.parse_expression_list(&[]);
            for &c in &coords {
                self.ast.attach(node, c);
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, !values.is_empty());
        node
    }

    fn parse_input(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Input(InputData {
                by_name: false,
                without_defaults: false,
            }),
            start,
        );
        self.advance(); // input
        let by_name = if self.match_keyword(KeywordId::By) {
            self.expect_keyword(KeywordId::Name, "expected 'name' after 'by'");
            true
        } else {
            false
        };
        let targets = self.parse_variable_list();
        for &t in &targets {
            self.ast.attach(node, t);
        }
        if targets.is_empty() {
            let span = self.current_span();
            self.sink.error("expected input targets", span);
        }
        let without_defaults = if self.match_keyword(KeywordId::Without) {
            self.expect_keyword(KeywordId::Defaults, "expected 'defaults' after 'without'");
            true
        } else {
            false
        };
        if self.match_keyword(KeywordId::From) {
            let fields = self.parse_variable_list();
            for &f in &fields {
                self.ast.attach(node, f);
            }
        }
        if let NodeKind::Input(data) = &mut self.ast.node_mut(node).kind {
            data.by_name = by_name;
            data.without_defaults = without_defaults;
        }
        if self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::Before)
            || self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::After)
            || self.peek_skipping_newlines(0).kind.is_keyword(KeywordId::On)
            || self.at_block_end(KeywordId::Input)
        {
            let inner = ctx.with(KeywordId::Input);
            let ended = self.parse_ui_event_blocks(node, KeywordId::Input, &inner);
            self.finish_block(node, KeywordId::Input, ended);
        } else {
            self.ast.extend_span(node, self.prev_end());
            self.ast.set_complete(node, !targets.is_empty());
        }
        node
    }

    fn parse_prompt(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Prompt(PromptData {
                message: None,
                target: None,
            }),
            start,
        );
        self.advance(); // prompt
        let message = self.try_parse_expression(&[TokenKind::Keyword(KeywordId::For)]);
        if let Some(m) = message {
            self.ast.attach(node, m);
        } else {
            let span = self.current_span();
            self.sink.error("expected a prompt message", span);
        }
        let ok = self.expect_keyword(KeywordId::For, "expected 'for' in the prompt statement");
        // Optional CHAR modifier: PROMPT ... FOR CHAR variable.
        self.match_keyword(KeywordId::Char);
        let target = if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let t = self.parse_name_expression();
            self.ast.attach(node, t);
            Some(t)
        } else {
            let span = self.current_span();
            self.sink.error("expected a variable to prompt into", span);
            None
        };
        if let NodeKind::Prompt(data) = &mut self.ast.node_mut(node).kind {
            data.message = message;
            data.target = target;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, ok && target.is_some());
        node
    }

    // ========================================================================
    // Simple statements
    // ========================================================================

    fn parse_call(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Call(CallData {
                callee: None,
                returning: Vec::new(),
            }),
            start,
        );
        self.advance(); // call
        let callee = if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let (c, _is_call) = self.parse_callable();
            self.ast.attach(node, c);
            Some(c)
        } else {
            let span = self.current_span();
            self.sink.error("expected a function name after 'call'", span);
            None
        };
        let returning = if self.match_keyword(KeywordId::Returning) {
            self.skip_newlines();
            let vars = self.parse_variable_list();
            if vars.is_empty() {
                let span = self.current_span();
                self.sink.error("expected variables after 'returning'", span);
            }
            for &v in &vars {
                self.ast.attach(node, v);
            }
            vars
        } else {
            Vec::new()
        };
        if let NodeKind::Call(data) = &mut self.ast.node_mut(node).kind {
            data.callee = callee;
            data.returning = returning;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, callee.is_some());
        node
    }

    fn parse_let(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Let(LetData {
                target: None,
                values: Vec::new(),
            }),
            start,
        );
        self.advance(); // let
        let target = if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let t = self.parse_name_expression();
            self.ast.attach(node, t);
            Some(t)
        } else {
            let span = self.current_span();
            self.sink.error("expected a variable after 'let'", span);
            None
        };
        let ok = self.expect_op(OperatorId::Equals, "expected '=' in the let statement");
        self.skip_newlines();
        let values = if ok {
            let list = self.parse_expression_list(&[]);
            if list.is_empty() {
                let span = self.current_span();
                self.sink.error("expected an expression after '='", span);
            }
            for &v in &list {
                self.ast.attach(node, v);
            }
            list
        } else {
            Vec::new()
        };
        let complete = target.is_some() && ok && !values.is_empty();
        if let NodeKind::Let(data) = &mut self.ast.node_mut(node).kind {
            data.target = target;
            data.values = values;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        node
    }

    fn parse_return(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Return { values: Vec::new() }, start);
        self.advance(); // return
        let values = self.parse_expression_list(&[]);
        for &v in &values {
            self.ast.attach(node, v);
        }
        if let NodeKind::Return { values: slot } = &mut self.ast.node_mut(node).kind {
            *slot = values;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, true);
        node
    }

    /// Targets legal after `EXIT` / `CONTINUE`.
    const LOOP_JUMP_TARGETS: &'static [KeywordId] = &[
        KeywordId::For,
        KeywordId::While,
        KeywordId::Foreach,
        KeywordId::Case,
        KeywordId::Menu,
        KeywordId::Dialog,
        KeywordId::Construct,
        KeywordId::Input,
        KeywordId::Display,
        KeywordId::Program,
    ];

    fn parse_exit(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        self.advance(); // exit
        let target = self.peek().kind.keyword_id();
        let node = match target {
            Some(kw) if Self::LOOP_JUMP_TARGETS.contains(&kw) => {
                self.advance();
                let node = self
                    .ast
                    .alloc(NodeKind::Exit(LoopJumpData { target: kw }), start);
                if kw == KeywordId::Program {
                    // Optional exit code expression.
                    if !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
                        if let Some(code) = self.try_parse_expression(&[]) {
                            self.ast.attach(node, code);
                        }
                    }
                } else if !ctx.valid_exits.contains(&kw) {
                    self.sink.warning(
                        format!(
                            "'exit {}' has no enclosing {} block",
                            genero_core::lang::keywords::as_str(kw),
                            genero_core::lang::keywords::as_str(kw)
                        ),
                        start,
                    );
                }
                self.ast.set_complete(node, true);
                node
            }
            _ => {
                let span = self.current_span();
                self.sink.error("expected a block keyword after 'exit'", span);
                self.ast
                    .alloc(NodeKind::Exit(LoopJumpData { target: KeywordId::Program }), start)
            }
        };
        self.ast.extend_span(node, self.prev_end());
        node
    }

    fn parse_continue(&mut self, ctx: &StatementContext) -> NodeId {
        let start = self.current_span();
        self.advance(); // continue
        let target = self.peek().kind.keyword_id();
        let node = match target {
            Some(kw) if Self::LOOP_JUMP_TARGETS.contains(&kw) && kw != KeywordId::Program => {
                self.advance();
                if !ctx.valid_exits.contains(&kw) {
                    self.sink.warning(
                        format!(
                            "'continue {}' has no enclosing {} block",
                            genero_core::lang::keywords::as_str(kw),
                            genero_core::lang::keywords::as_str(kw)
                        ),
                        start,
                    );
                }
                let node = self
                    .ast
                    .alloc(NodeKind::Continue(LoopJumpData { target: kw }), start);
                self.ast.set_complete(node, true);
                node
            }
            _ => {
                let span = self.current_span();
                self.sink
                    .error("expected a loop keyword after 'continue'", span);
                self.ast
                    .alloc(NodeKind::Continue(LoopJumpData { target: KeywordId::For }), start)
            }
        };
        self.ast.extend_span(node, self.prev_end());
        node
    }

    fn parse_message(&mut self, is_error: bool) -> NodeId {
        let start = self.current_span();
        self.advance(); // message / error
        let node = if is_error {
            self.ast.alloc(NodeKind::ErrorStmt { values: Vec::new() }, start)
        } else {
            self.ast.alloc(NodeKind::Message { values: Vec::new() }, start)
        };
        let values = self.parse_expression_list(&[]);
        if values.is_empty() {
            let span = self.current_span();
            self.sink.error("expected an expression to display", span);
        }
        for &v in &values {
            self.ast.attach(node, v);
        }
        match &mut self.ast.node_mut(node).kind {
            NodeKind::Message { values: slot } | NodeKind::ErrorStmt { values: slot } => {
                *slot = values.clone();
            }
            _ => {}
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, !values.is_empty());
        node
    }

    fn parse_sleep(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(NodeKind::Sleep { seconds: None }, start);
        self.advance(); // sleep
        match self.try_parse_expression(&[]) {
            Some(e) => {
                self.ast.attach(node, e);
                if let NodeKind::Sleep { seconds } = &mut self.ast.node_mut(node).kind {
                    *seconds = Some(e);
                }
                self.ast.set_complete(node, true);
            }
            None => {
                let span = self.current_span();
                self.sink.error("expected a number of seconds after 'sleep'", span);
            }
        }
        self.ast.extend_span(node, self.prev_end());
        node
    }

    fn parse_goto(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // goto
        // Optional label colon: GOTO :label.
        self.match_punct(PunctuationId::Colon);
        let label = self
            .expect_ident("expected a label after 'goto'")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::Goto {
                label: label.clone().unwrap_or_default(),
            },
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, label.is_some());
        node
    }

    fn parse_label(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // label
        let name = self
            .expect_ident("expected a label name")
            .map(|(n, _)| n);
        let ok = self.expect_punct(PunctuationId::Colon, "expected ':' after the label name");
        let node = self.ast.alloc(
            NodeKind::Label {
                name: name.clone().unwrap_or_default(),
            },
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, name.is_some() && ok);
        node
    }

    fn parse_defer(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // defer
        let what = if self.match_keyword(KeywordId::Interrupt) {
            Some(KeywordId::Interrupt)
        } else if self.match_keyword(KeywordId::Quit) {
            Some(KeywordId::Quit)
        } else {
            let span = self.current_span();
            self.sink
                .error("expected 'interrupt' or 'quit' after 'defer'", span);
            None
        };
        let node = self.ast.alloc(
            NodeKind::Defer {
                what: what.unwrap_or(KeywordId::Interrupt),
            },
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, what.is_some());
        node
    }

    fn parse_whenever(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // whenever

        // Condition: ERROR | NOT FOUND | SQLERROR | WARNING | ANY ERROR.
        let condition = if self.check_keyword(KeywordId::ErrorKw) {
            self.advance();
            "error".to_string()
        } else if self.check_op(OperatorId::Not) {
            self.advance();
            match self.expect_ident("expected 'found' after 'not'") {
                Some((w, _)) => format!("not {}", w.to_ascii_lowercase()),
                None => "not".to_string(),
            }
        } else if let TokenKind::Ident(word) = &self.peek().kind {
            let mut condition = word.to_ascii_lowercase();
            self.advance();
            // ANY ERROR
            if condition == "any" && self.check_keyword(KeywordId::ErrorKw) {
                self.advance();
                condition.push_str(" error");
            }
            condition
        } else {
            let span = self.current_span();
            self.sink.error("expected a condition after 'whenever'", span);
            String::new()
        };

        // Action: CONTINUE | STOP | CALL name | GOTO label.
        let action = if self.match_keyword(KeywordId::Continue) {
            "continue".to_string()
        } else if self.match_keyword(KeywordId::Stop) {
            "stop".to_string()
        } else if self.match_keyword(KeywordId::Call) {
            match self.expect_ident("expected a function name after 'call'") {
                Some((n, _)) => format!("call {}", n),
                None => "call".to_string(),
            }
        } else if self.match_keyword(KeywordId::Goto) {
            self.match_punct(PunctuationId::Colon);
            match self.expect_ident("expected a label after 'goto'") {
                Some((n, _)) => format!("goto {}", n),
                None => "goto".to_string(),
            }
        } else {
            let span = self.current_span();
            self.sink.error("expected an action after the whenever condition", span);
            String::new()
        };

        let complete = !condition.is_empty() && !action.is_empty();
        let node = self.ast.alloc(
            NodeKind::Whenever(WheneverData { condition, action }),
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        node
    }

    fn parse_initialize(&mut self) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Initialize(InitializeData {
                targets: Vec::new(),
                to_null: false,
            }),
            start,
        );
        self.advance(); // initialize
        let targets = self.parse_variable_list();
        if targets.is_empty() {
            let span = self.current_span();
            self.sink.error("expected variables after 'initialize'", span);
        }
        for &t in &targets {
            self.ast.attach(node, t);
        }
        let mut to_null = false;
        let mut ok = true;
        if self.match_keyword(KeywordId::To) {
            ok = self.expect_keyword(KeywordId::Null, "expected 'null' after 'to'");
            to_null = ok;
        } else if self.check_op(OperatorId::Like) {
            let like = self.parse_like_reference();
            self.ast.attach(node, like);
        } else {
            let span = self.current_span();
            self.sink
                .error("expected 'to null' or 'like' in the initialize statement", span);
            ok = false;
        }
        if let NodeKind::Initialize(data) = &mut self.ast.node_mut(node).kind {
            data.targets = targets;
            data.to_null = to_null;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, ok);
        node
    }

    /// Runtime `OPTIONS` statement: structural word capture to end of line.
    fn parse_options_stmt(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // options
        let mut options = Vec::new();
        while !matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            options.push(self.peek().text());
            self.advance();
        }
        let node = self.ast.alloc(NodeKind::Options { options }, start);
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, true);
        node
    }

    fn parse_load(&mut self, is_unload: bool) -> NodeId {
        let start = self.current_span();
        let node = self.ast.alloc(
            NodeKind::Load(LoadData {
                file: None,
                table: None,
                delimiter: None,
                is_unload,
            }),
            start,
        );
        self.advance(); // load / unload
        let ok = if is_unload {
            self.expect_keyword(KeywordId::To, "expected 'to' after 'unload'")
        } else {
            self.expect_keyword(KeywordId::From, "expected 'from' after 'load'")
        };
        let file = self.try_parse_expression(&[TokenKind::Keyword(KeywordId::Delimiter)]);
        if let Some(f) = file {
            self.ast.attach(node, f);
        } else {
            let span = self.current_span();
            self.sink.error("expected a file expression", span);
        }
        let delimiter = if self.match_keyword(KeywordId::Delimiter) {
            match &self.peek().kind {
                TokenKind::StringLit(s) | TokenKind::CharLit(s) => {
                    let s = s.clone();
                    self.advance();
                    Some(s)
                }
                _ => {
                    let span = self.current_span();
                    self.sink.error("expected a delimiter string", span);
                    None
                }
            }
        } else {
            None
        };
        let mut table = None;
        let mut complete = ok && file.is_some();
        if is_unload {
            // The unload source is a full SELECT statement.
            if self.check_keyword(KeywordId::Select) {
                let select = self.parse_select();
                self.ast.attach(node, select);
            } else {
                let span = self.current_span();
                self.sink.error("expected a select statement after the unload file", span);
                complete = false;
            }
        } else if self.match_keyword(KeywordId::Insert) {
            if self.expect_keyword(KeywordId::Into, "expected 'into' after 'insert'") {
                table = self.expect_ident("expected a table name").map(|(n, _)| n);
                complete &= table.is_some();
            } else {
                complete = false;
            }
        } else {
            let span = self.current_span();
            self.sink.error("expected 'insert into' in the load statement", span);
            complete = false;
        }
        if let NodeKind::Load(data) = &mut self.ast.node_mut(node).kind {
            data.file = file;
            data.table = table;
            data.delimiter = delimiter;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        node
    }

    fn parse_create_table(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // create
        let temp = self.match_keyword(KeywordId::Temp);
        let ok = self.expect_keyword(KeywordId::Table, "expected 'table' after 'create'");
        let table = self
            .expect_ident("expected a table name")
            .map(|(n, _)| n)
            .unwrap_or_default();
        let node = self.ast.alloc(
            NodeKind::CreateTable(CreateTableData {
                table: table.clone(),
                temp,
            }),
            start,
        );
        // Column list is captured structurally: balance parens and move on.
        let mut balanced = true;
        if self.expect_punct(PunctuationId::LeftParen, "expected '(' after the table name") {
            let mut depth = 1usize;
            while depth > 0 && !self.is_at_end() {
                if self.check_punct(PunctuationId::LeftParen) {
                    depth += 1;
                } else if self.check_punct(PunctuationId::RightParen) {
                    depth -= 1;
                }
                self.advance();
            }
            if depth > 0 {
                let span = self.current_span();
                self.sink.error("expected ')' to close the column list", span);
                balanced = false;
            }
        } else {
            balanced = false;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast
            .set_complete(node, ok && balanced && !table.is_empty());
        node
    }

    // ========================================================================
    // Cursors and dynamic SQL
    // ========================================================================

    fn parse_declare_cursor(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // declare
        let name_entry = self.expect_ident("expected a cursor name after 'declare'");
        let (name, name_span) = name_entry.clone().unwrap_or_default();
        let scroll = self.match_keyword(KeywordId::Scroll);
        let ok = self.expect_keyword(KeywordId::Cursor, "expected 'cursor' in the declare statement");
        let hold = if self.match_keyword(KeywordId::With) {
            self.expect_keyword(KeywordId::Hold, "expected 'hold' after 'with'")
        } else {
            false
        };
        let node = self.ast.alloc(
            NodeKind::DeclareCursor(DeclareCursorData {
                name: name.clone(),
                name_span,
                scroll,
                hold,
                prepared: None,
                select: None,
            }),
            start,
        );
        let mut complete = ok && name_entry.is_some();
        if self.expect_keyword(KeywordId::For, "expected 'for' in the declare statement") {
            self.skip_newlines();
            if self.check_keyword(KeywordId::Select) {
                let select = self.parse_select();
                let select_ok = self.ast.node(select).complete;
                self.ast.attach(node, select);
                if let NodeKind::DeclareCursor(data) = &mut self.ast.node_mut(node).kind {
                    data.select = Some(select);
                }
                complete &= select_ok;
            } else if let Some((stmt_id, _)) = self.expect_ident("expected a select or prepared statement id") {
                if let NodeKind::DeclareCursor(data) = &mut self.ast.node_mut(node).kind {
                    data.prepared = Some(stmt_id);
                }
            } else {
                complete = false;
            }
        } else {
            complete = false;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        self.bind_cursor(node, &name, name_span);
        node
    }

    fn parse_prepare(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // prepare
        let name_entry = self.expect_ident("expected a statement id after 'prepare'");
        let (name, name_span) = name_entry.clone().unwrap_or_default();
        let node = self.ast.alloc(
            NodeKind::Prepare(PrepareData {
                name: name.clone(),
                name_span,
                source: None,
            }),
            start,
        );
        let mut complete = name_entry.is_some();
        if self.expect_keyword(KeywordId::From, "expected 'from' in the prepare statement") {
            match self.try_parse_expression(&[]) {
                Some(source) => {
                    self.ast.attach(node, source);
                    if let NodeKind::Prepare(data) = &mut self.ast.node_mut(node).kind {
                        data.source = Some(source);
                    }
                }
                None => {
                    let span = self.current_span();
                    self.sink.error("expected an expression after 'from'", span);
                    complete = false;
                }
            }
        } else {
            complete = false;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        self.bind_cursor(node, &name, name_span);
        node
    }

    fn parse_execute(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // execute
        let node = self.ast.alloc(
            NodeKind::Execute(ExecuteData {
                name: None,
                immediate: None,
                using: Vec::new(),
                into: Vec::new(),
            }),
            start,
        );
        let mut complete = true;
        if self.match_keyword(KeywordId::Immediate) {
            match self.try_parse_expression(&[]) {
                Some(e) => {
                    self.ast.attach(node, e);
                    if let NodeKind::Execute(data) = &mut self.ast.node_mut(node).kind {
                        data.immediate = Some(e);
                    }
                }
                None => {
                    let span = self.current_span();
                    self.sink.error("expected an expression after 'immediate'", span);
                    complete = false;
                }
            }
        } else {
            let name = self.expect_ident("expected a statement id after 'execute'");
            complete = name.is_some();
            if let Some((name, _)) = name {
                if let NodeKind::Execute(data) = &mut self.ast.node_mut(node).kind {
                    data.name = Some(name);
                }
            }
            let using = if self.match_op(OperatorId::Using) {
                let vars = self.parse_variable_list();
                for &v in &vars {
                    self.ast.attach(node, v);
                }
                vars
            } else {
                Vec::new()
            };
            let into = if self.match_keyword(KeywordId::Into) {
                let vars = self.parse_variable_list();
                for &v in &vars {
                    self.ast.attach(node, v);
                }
                vars
            } else {
                Vec::new()
            };
            if let NodeKind::Execute(data) = &mut self.ast.node_mut(node).kind {
                data.using = using;
                data.into = into;
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, complete);
        node
    }

    fn parse_open(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // open
        let cursor = self
            .expect_ident("expected a cursor name after 'open'")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::Open(OpenData {
                cursor: cursor.clone().unwrap_or_default(),
                using: Vec::new(),
            }),
            start,
        );
        if self.match_op(OperatorId::Using) {
            let vars = self.parse_variable_list();
            for &v in &vars {
                self.ast.attach(node, v);
            }
            if let NodeKind::Open(data) = &mut self.ast.node_mut(node).kind {
                data.using = vars;
            }
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, cursor.is_some());
        node
    }

    fn parse_fetch(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // fetch
        let direction = if self.match_keyword(KeywordId::Next) {
            Some(FetchDirection::Next)
        } else if self.match_keyword(KeywordId::Previous) {
            Some(FetchDirection::Previous)
        } else if self.match_keyword(KeywordId::Prior) {
            Some(FetchDirection::Prior)
        } else if self.match_keyword(KeywordId::First) {
            Some(FetchDirection::First)
        } else if self.match_keyword(KeywordId::Last) {
            Some(FetchDirection::Last)
        } else if self.match_keyword(KeywordId::Current) {
            Some(FetchDirection::Current)
        } else {
            None
        };
        let node = self.ast.alloc(
            NodeKind::Fetch(FetchData {
                direction,
                cursor: String::new(),
                into: Vec::new(),
            }),
            start,
        );
        // ABSOLUTE / RELATIVE carry a position expression.
        if self.check_keyword(KeywordId::Absolute) || self.check_keyword(KeywordId::Relative) {
            let relative = self.check_keyword(KeywordId::Relative);
            self.advance();
            match self.try_parse_expression(&[]) {
                Some(e) => {
                    self.ast.attach(node, e);
                    if let NodeKind::Fetch(data) = &mut self.ast.node_mut(node).kind {
                        data.direction = Some(if relative {
                            FetchDirection::Relative(e)
                        } else {
                            FetchDirection::Absolute(e)
                        });
                    }
                }
                None => {
                    let span = self.current_span();
                    self.sink.error("expected a position expression", span);
                }
            }
        }
        let cursor = self
            .expect_ident("expected a cursor name in the fetch statement")
            .map(|(n, _)| n);
        let into = if self.match_keyword(KeywordId::Into) {
            let vars = self.parse_variable_list();
            for &v in &vars {
                self.ast.attach(node, v);
            }
            vars
        } else {
            Vec::new()
        };
        if let NodeKind::Fetch(data) = &mut self.ast.node_mut(node).kind {
            data.cursor = cursor.clone().unwrap_or_default();
            data.into = into;
        }
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, cursor.is_some());
        node
    }

    fn parse_close(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // close
        let cursor = self
            .expect_ident("expected a cursor name after 'close'")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::Close {
                cursor: cursor.clone().unwrap_or_default(),
            },
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, cursor.is_some());
        node
    }

    fn parse_free(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // free
        let name = self
            .expect_ident("expected a cursor or statement id after 'free'")
            .map(|(n, _)| n);
        let node = self.ast.alloc(
            NodeKind::Free {
                name: name.clone().unwrap_or_default(),
            },
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, name.is_some());
        node
    }

    /// Bind a cursor / prepared-statement name into the module cursor table.
    fn bind_cursor(&mut self, node: NodeId, name: &str, name_span: Span) {
        if name.is_empty() {
            return;
        }
        let Some(module) = self.module_node else { return };
        let symbol = Symbol {
            name: name.to_string(),
            node,
            kind: SymbolKind::Cursor,
            scope: Scope::Module,
            span: name_span,
        };
        let clashed = match &mut self.ast.node_mut(module).kind {
            NodeKind::Module(data) => data.cursors.insert(symbol).is_some(),
            _ => false,
        };
        if clashed {
            self.sink.warning(
                format!("cursor '{}' is declared more than once", name),
                name_span,
            );
        }
    }

    // ========================================================================
    // Preprocessor
    // ========================================================================

    /// `&include "file"` and other `&` directives.
    fn parse_preprocessor(&mut self) -> NodeId {
        let start = self.current_span();
        self.advance(); // &
        let directive = match &self.peek().kind {
            TokenKind::Ident(word) => {
                let word = word.to_ascii_lowercase();
                self.advance();
                word
            }
            _ => {
                let span = self.current_span();
                self.sink.error("expected a preprocessor directive after '&'", span);
                String::new()
            }
        };
        let argument = match &self.peek().kind {
            TokenKind::StringLit(s) | TokenKind::CharLit(s) => {
                let s = s.clone();
                self.advance();
                Some(s)
            }
            TokenKind::Ident(s) => {
                let s = s.clone();
                self.advance();
                Some(s)
            }
            _ => None,
        };
        let node = self.ast.alloc(
            NodeKind::Preprocessor(PreprocessorData {
                directive: directive.clone(),
                argument: argument.clone(),
            }),
            start,
        );
        self.ast.extend_span(node, self.prev_end());
        self.ast.set_complete(node, !directive.is_empty());

        // Record include targets for the caller to resolve externally.
        if directive == "include" {
            if let (Some(file), Some(module)) = (argument, self.module_node) {
                let span = self.ast.node(node).span;
                if let NodeKind::Module(data) = &mut self.ast.node_mut(module).kind {
                    data.includes.entry(file).or_default().push(span);
                }
            }
        }
        node
    }
}

/// How a statement block's inner loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEnd {
    /// `END <keyword>` was consumed.
    Terminated,
    /// A caller-owned stop keyword is next (not consumed).
    Stopped,
    /// Ran off the end of input.
    Eof,
}
