/// Parser core types and entrypoint state.
///
/// This chunk defines the [`Parser`] type plus the small shared types used
/// across the other parser chunks (statement context, parse results).
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser
///   methods in a single module while avoiding one giant source file.
/// - The parser is single-pass. Expected-alternative misses return `None`;
///   committed productions always return a node and use the diagnostic sink
///   plus the node's `complete` flag to report structural failures.

/// Context threaded into statement parsing.
///
/// Tracks which `EXIT`/`CONTINUE` targets are legal at the current nesting
/// depth; an out-of-scope target is a warning, not a parse failure.
#[derive(Debug, Clone, Default)]
pub struct StatementContext {
    valid_exits: Vec<KeywordId>,
}

impl StatementContext {
    fn with(&self, kw: KeywordId) -> StatementContext {
        let mut next = self.clone();
        if !next.valid_exits.contains(&kw) {
            next.valid_exits.push(kw);
        }
        next
    }
}

/// Result of a whole-module parse.
#[derive(Debug)]
pub struct ModuleParse {
    pub ast: Ast,
    pub root: Option<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of parsing one construct out of a token window (used by the
/// completion engine to replay productions against a backward-collected
/// window).
#[derive(Debug)]
pub struct FragmentParse {
    pub ast: Ast,
    pub node: Option<NodeId>,
    /// Tokens consumed from the start of the window.
    pub consumed: usize,
    pub complete: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    ast: Ast,
    sink: DiagnosticSink,
    /// The module node under assembly; statements bind cursors and include
    /// directives into it from any nesting depth.
    module_node: Option<NodeId>,
    /// Synthetic end-of-stream token returned past the window's last token.
    eof: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            ast: Ast::new(),
            sink: DiagnosticSink::new(),
            module_node: None,
            eof: Token::new(TokenKind::Eof, Span::new(end, end)),
        }
    }

    fn into_module_parse(self, root: Option<NodeId>) -> ModuleParse {
        ModuleParse {
            ast: self.ast,
            root,
            diagnostics: self.sink.into_vec(),
        }
    }

    fn into_fragment_parse(self, node: Option<NodeId>) -> FragmentParse {
        let complete = node.is_some_and(|id| self.ast.node(id).complete);
        FragmentParse {
            consumed: self.pos,
            complete,
            ast: self.ast,
            node,
            diagnostics: self.sink.into_vec(),
        }
    }
}
