//! Token types for the 4GL lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators (including word operators like `MOD`)
//! - `Punctuation(PunctuationId)` for structural tokens
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser and the
//!   completion engine. Use `crate::token_helpers` for ergonomic matching.
//! - Literal tokens keep their **raw spelling**: this is a structural parser
//!   and expression nodes reproduce source text in display strings.
//! - [`TokenCategory`] is derived from the kind; the reverse resolver works
//!   mostly at category granularity.

use genero_core::lang::keywords::{self, KeywordId};
use genero_core::lang::operators::OperatorId;
use genero_core::lang::punctuation::PunctuationId;

// ============================================================================
// SPANS
// ============================================================================

/// Source location span (byte offsets, half-open: `end >= start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals (raw spellings) ==========
    Ident(String),
    Number(String),
    /// Double-quoted string literal (content, unescaped).
    StringLit(String),
    /// Single-quoted literal (content, unescaped).
    CharLit(String),
    /// A string literal still open at end of input.
    IncompleteString(String),

    // ========== Layout / special ==========
    Newline,
    Eof,
}

/// Coarse classification of a token, used by the reverse context resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    NumericLiteral,
    StringLiteral,
    CharacterLiteral,
    IncompleteMultiLineStringLiteral,
    Operator,
    Punctuation,
    NewLine,
    EndOfStream,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Coarse category of this token.
    pub fn category(&self) -> TokenCategory {
        match &self.kind {
            TokenKind::Keyword(_) => TokenCategory::Keyword,
            TokenKind::Operator(_) => TokenCategory::Operator,
            TokenKind::Punctuation(_) => TokenCategory::Punctuation,
            TokenKind::Ident(_) => TokenCategory::Identifier,
            TokenKind::Number(_) => TokenCategory::NumericLiteral,
            TokenKind::StringLit(_) => TokenCategory::StringLiteral,
            TokenKind::CharLit(_) => TokenCategory::CharacterLiteral,
            TokenKind::IncompleteString(_) => TokenCategory::IncompleteMultiLineStringLiteral,
            TokenKind::Newline => TokenCategory::NewLine,
            TokenKind::Eof => TokenCategory::EndOfStream,
        }
    }

    /// Raw display text for this token (canonical spelling for ID tokens,
    /// original spelling for literals).
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Keyword(id) => keywords::as_str(*id).to_string(),
            TokenKind::Operator(id) => genero_core::lang::operators::as_str(*id).to_string(),
            TokenKind::Punctuation(id) => genero_core::lang::punctuation::as_str(*id).to_string(),
            TokenKind::Ident(s) | TokenKind::Number(s) => s.clone(),
            TokenKind::StringLit(s) => format!("\"{}\"", s),
            TokenKind::CharLit(s) => format!("'{}'", s),
            TokenKind::IncompleteString(s) => format!("\"{}", s),
            TokenKind::Newline => "\n".to_string(),
            TokenKind::Eof => String::new(),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
