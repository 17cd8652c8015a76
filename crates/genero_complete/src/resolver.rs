//! Context dispatch: classify the construct containing the cursor.
//!
//! [`CompletionAnalyzer::members_at`] tries each per-construct backward
//! state machine in a fixed priority order: **the order is the contract**;
//! reordering changes which of two overlapping contexts wins and requires
//! explicit sign-off:
//!
//! 1. member access (`expr.`)
//! 2. type-constraint (`DECIMAL(`, `DATETIME ... TO`)
//! 3. literal macro (`MDY(`, `DATETIME(`, `INTERVAL(`)
//! 4. preprocessor line (`&...`)
//! 5. function/report definition signature
//! 6. constant definition
//! 7. define / type definition (context-map driven)
//! 8. `LET` statement
//! 9. `CALL` statement
//! 10. fallback: access-modifier position, then the generic keyword list
//!
//! Every sub-resolver either produces a completion list (context identified,
//! stop) or reports "not this context", letting the next machine try.

use crate::catalog::CompletionCatalog;
use crate::contexts;
use crate::member::{CompletionSource, MemberKind, MemberResult};
use crate::reverse::{tokens_before, ReverseTokenizer};
use genero_core::lang::keywords::{self, KeywordId};
use genero_syntax::ast::{NodeId, NodeKind};
use genero_syntax::lexer::{Token, TokenKind};
use genero_syntax::parser::ModuleParse;
use genero_syntax::symbols::SymbolMap;

/// Host-supplied schema access for `LIKE table.column` and record mimicry.
pub trait DatabaseProvider {
    /// Column completions for one table.
    fn columns(&self, table: &str) -> Vec<MemberResult>;
    /// All table names.
    fn tables(&self) -> Vec<MemberResult>;
}

/// Host callback hooks. All optional; the resolver degrades to module-local
/// results when a hook is absent.
#[derive(Default)]
pub struct Providers<'a> {
    /// Cross-file user types visible at an offset.
    pub additional_types: Option<&'a dyn Fn(usize) -> Vec<MemberResult>>,
    /// Database schema access.
    pub database: Option<&'a dyn DatabaseProvider>,
}

/// One completion query session over one parsed module.
pub struct CompletionAnalyzer<'a> {
    pub(crate) catalog: &'a CompletionCatalog,
    pub(crate) module: &'a ModuleParse,
    pub(crate) providers: Providers<'a>,
}

/// Tokens strictly before the cursor, nearest-first, with newline-skipping
/// accessors. Shared by every backward state machine.
pub(crate) struct ScanWindow {
    /// Nearest-first (reverse source order).
    tokens: Vec<Token>,
}

/// How far a sub-resolver got before deciding "not this context". The
/// consumed count lets an enclosing scanner skip a fully-matched nested
/// construct instead of re-deriving it.
pub(crate) enum Outcome {
    Matched(Vec<MemberResult>),
    NotThis { consumed: usize },
}

impl ScanWindow {
    pub(crate) fn new(reverse: &dyn ReverseTokenizer, cursor: usize) -> Self {
        Self {
            tokens: tokens_before(reverse, cursor),
        }
    }

    /// The `n`-th meaningful (non-newline) token before the cursor
    /// (`n = 0` is the nearest).
    pub(crate) fn meaningful(&self, n: usize) -> Option<&Token> {
        self.tokens
            .iter()
            .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
            .nth(n)
    }

    /// `true` when the nearest token is a line break (cursor at start of a
    /// fresh line).
    pub(crate) fn at_line_start(&self) -> bool {
        matches!(
            self.tokens.first().map(|t| &t.kind),
            None | Some(TokenKind::Newline)
        )
    }

    /// Tokens of the current line, nearest-first (not crossing a newline).
    pub(crate) fn line_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .take_while(|t| !matches!(t.kind, TokenKind::Newline))
    }

    /// Search backward for `kw`, bounded by other statement-starter
    /// keywords. On success returns the tokens from the keyword to the
    /// cursor in **forward** order.
    pub(crate) fn statement_window(&self, kw: KeywordId) -> Option<Vec<Token>> {
        const SCAN_LIMIT: usize = 120;
        let mut collected: Vec<&Token> = Vec::new();
        for token in self.tokens.iter().take(SCAN_LIMIT) {
            if matches!(token.kind, TokenKind::Newline | TokenKind::Eof) {
                continue;
            }
            collected.push(token);
            if token.kind.is_keyword(kw) {
                collected.reverse();
                return Some(collected.into_iter().cloned().collect());
            }
            // A different statement boundary ends the search.
            if let Some(other) = token.kind.keyword_id() {
                if other != kw && is_statement_boundary(other) {
                    return None;
                }
            }
        }
        None
    }
}

/// Keywords that begin or terminate a statement and therefore bound any
/// backward statement scan.
pub(crate) fn is_statement_boundary(kw: KeywordId) -> bool {
    matches!(
        kw,
        KeywordId::EndKw
            | KeywordId::MainKw
            | KeywordId::Function
            | KeywordId::Report
            | KeywordId::Globals
            | KeywordId::TypeKw
            | KeywordId::Constant
            | KeywordId::Then
            | KeywordId::Else
            | KeywordId::When
            | KeywordId::Otherwise
            | KeywordId::Catch
    ) || keywords::statement_starters().any(|info| info.id == kw)
}

impl<'a> CompletionAnalyzer<'a> {
    pub fn new(catalog: &'a CompletionCatalog, module: &'a ModuleParse, providers: Providers<'a>) -> Self {
        Self {
            catalog,
            module,
            providers,
        }
    }

    /// Completion members for the context containing byte offset `index`.
    #[tracing::instrument(skip_all, fields(index))]
    pub fn members_at(&self, index: usize, reverse: &dyn ReverseTokenizer) -> Vec<MemberResult> {
        let window = ScanWindow::new(reverse, index);

        if let Some(members) = contexts::expressions::try_member_access(self, index, &window) {
            tracing::debug!("context: member access");
            return members;
        }
        if let Some(members) = contexts::define::try_type_constraint(self, &window) {
            tracing::debug!("context: type constraint");
            return members;
        }
        if let Some(members) = contexts::expressions::try_literal_macro(&window) {
            tracing::debug!("context: literal macro");
            return members;
        }
        if let Some(members) = contexts::statements::try_preprocessor(&window) {
            tracing::debug!("context: preprocessor");
            return members;
        }
        if let Some(members) = contexts::statements::try_function_definition(&window) {
            tracing::debug!("context: function signature");
            return members;
        }
        if let Some(members) = contexts::define::try_constant_context(self, &window) {
            tracing::debug!("context: constant definition");
            return members;
        }
        if let Some(members) = contexts::define::try_definition_context(self, index, &window) {
            tracing::debug!("context: define/type definition");
            return members;
        }
        if let Some(members) = contexts::statements::try_let_statement(self, index, &window) {
            tracing::debug!("context: let statement");
            return members;
        }
        if let Some(members) = contexts::statements::try_call_statement(self, index, &window) {
            tracing::debug!("context: call statement");
            return members;
        }
        tracing::debug!("context: fallback keywords");
        contexts::statements::fallback_keywords(self, &window)
    }

    // ========================================================================
    // Scope-aware name collection
    // ========================================================================

    /// The innermost main/function/report block containing `index`.
    ///
    /// A block that is still open (incomplete) is treated as extending to
    /// the cursor, so completion keeps working while the user is typing
    /// past the last parsed token of the block.
    pub(crate) fn enclosing_block(&self, index: usize) -> Option<NodeId> {
        let ast = &self.module.ast;
        let is_block = |kind: &NodeKind| {
            matches!(
                kind,
                NodeKind::MainBlock(_) | NodeKind::FunctionBlock(_) | NodeKind::ReportBlock(_)
            )
        };

        if let Some(at) = ast.node_at_offset(index.saturating_sub(1)) {
            if is_block(&ast.node(at).kind) {
                return Some(at);
            }
            if let Some(up) = ast.ancestor_where(at, |n| is_block(&n.kind)) {
                return Some(up);
            }
        }
        // Fall back to the last still-open block starting before the cursor.
        let root = self.module.root?;
        let mut best = None;
        for &child in ast.children(root) {
            let node = ast.node(child);
            if is_block(&node.kind) && node.span.start < index {
                if node.span.contains(index) || !node.complete {
                    best = Some(child);
                }
            }
        }
        best
    }

    fn push_symbols(out: &mut Vec<MemberResult>, map: &SymbolMap, kind: MemberKind) {
        for symbol in map.iter_sorted() {
            out.push(MemberResult::new(
                symbol.name.clone(),
                symbol.scope.describe(symbol.kind),
                kind,
                CompletionSource::Node(symbol.node),
            ));
        }
    }

    /// Variables visible at `index`: block locals and parameters, module
    /// variables (globals already mirrored there), system variables.
    pub(crate) fn variables_in_scope(&self, index: usize) -> Vec<MemberResult> {
        let mut out = Vec::new();
        if let Some(block) = self.enclosing_block(index) {
            if let NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) =
                &self.module.ast.node(block).kind
            {
                Self::push_symbols(&mut out, &data.tables.variables, MemberKind::Variable);
            }
        }
        if let Some(root) = self.module.root {
            if let NodeKind::Module(data) = &self.module.ast.node(root).kind {
                Self::push_symbols(&mut out, &data.variables, MemberKind::Variable);
            }
        }
        out.extend(self.catalog.system_variables());
        out
    }

    /// Constants visible at `index` (block, module, system).
    pub(crate) fn constants_in_scope(&self, index: usize) -> Vec<MemberResult> {
        let mut out = Vec::new();
        if let Some(block) = self.enclosing_block(index) {
            if let NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) =
                &self.module.ast.node(block).kind
            {
                Self::push_symbols(&mut out, &data.tables.constants, MemberKind::Constant);
            }
        }
        if let Some(root) = self.module.root {
            if let NodeKind::Module(data) = &self.module.ast.node(root).kind {
                Self::push_symbols(&mut out, &data.constants, MemberKind::Constant);
            }
        }
        out.extend(self.catalog.system_constants());
        out
    }

    /// User types visible at `index` (block, module, host provider).
    pub(crate) fn user_types_in_scope(&self, index: usize) -> Vec<MemberResult> {
        let mut out = Vec::new();
        if let Some(block) = self.enclosing_block(index) {
            if let NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) =
                &self.module.ast.node(block).kind
            {
                Self::push_symbols(&mut out, &data.tables.types, MemberKind::Type);
            }
        }
        if let Some(root) = self.module.root {
            if let NodeKind::Module(data) = &self.module.ast.node(root).kind {
                Self::push_symbols(&mut out, &data.types, MemberKind::Type);
            }
        }
        if let Some(provider) = self.providers.additional_types {
            out.extend(provider(index));
        }
        out
    }

    /// Functions and reports of the module.
    pub(crate) fn functions_in_scope(&self) -> Vec<MemberResult> {
        let mut out = Vec::new();
        if let Some(root) = self.module.root {
            if let NodeKind::Module(data) = &self.module.ast.node(root).kind {
                Self::push_symbols(&mut out, &data.functions, MemberKind::Function);
            }
        }
        out
    }

    /// Everything legal in an expression slot.
    pub(crate) fn expression_members(&self, index: usize) -> Vec<MemberResult> {
        let mut out = self.variables_in_scope(index);
        out.extend(self.constants_in_scope(index));
        out.extend(self.functions_in_scope());
        out
    }
}
