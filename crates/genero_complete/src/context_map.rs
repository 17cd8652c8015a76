//! Declarative completion context map for the define/type machine.
//!
//! The map records, for a token kind or category observed immediately
//! behind the cursor, which completions may follow: optionally gated by a
//! **positional constraint**: "only valid if N tokens further back was
//! token X". The map is pure data; the state machine that walks it lives in
//! `contexts::define`.

use genero_core::lang::keywords::KeywordId;
use genero_core::lang::operators::OperatorId;
use genero_core::lang::punctuation::PunctuationId;
use genero_syntax::lexer::{Token, TokenCategory};

/// What a map trigger or constraint matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    Category(TokenCategory),
}

impl TokenMatch {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenMatch::Keyword(id) => token.kind.is_keyword(*id),
            TokenMatch::Operator(id) => token.kind.is_operator(*id),
            TokenMatch::Punctuation(id) => token.kind.is_punctuation(*id),
            TokenMatch::Category(cat) => token.category() == *cat,
        }
    }
}

/// Which name sets a matched possibility contributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicSets {
    /// Builtin scalar type names.
    pub builtin_types: bool,
    /// User types visible at the offset (module tables + host provider).
    pub user_types: bool,
    /// Database tables from the host provider.
    pub tables: bool,
    /// Columns of the `LIKE` table the scan just walked over.
    pub like_columns: bool,
}

/// One candidate keyword completion, optionally gated on a token further
/// back in the reversed stream.
#[derive(Debug, Clone, Copy)]
pub struct TokenKindWithConstraint {
    pub keyword: KeywordId,
    /// How many meaningful tokens further back the constraint applies to
    /// (0 = no constraint).
    pub tokens_previous_to_check: u8,
    pub constraint: Option<TokenMatch>,
}

impl TokenKindWithConstraint {
    pub const fn plain(keyword: KeywordId) -> Self {
        Self {
            keyword,
            tokens_previous_to_check: 0,
            constraint: None,
        }
    }

    pub const fn when_previous(keyword: KeywordId, back: u8, constraint: TokenMatch) -> Self {
        Self {
            keyword,
            tokens_previous_to_check: back,
            constraint: Some(constraint),
        }
    }
}

/// A set of completions valid when its `requires` gate (if any) holds.
#[derive(Debug, Clone)]
pub struct CompletionPossibility {
    /// Gate: (tokens further back, expected match). `None` = always.
    pub requires: Option<(u8, &'static [TokenMatch])>,
    pub keywords: &'static [TokenKindWithConstraint],
    pub sets: DynamicSets,
}

/// Map entry: trigger token → allowed-next possibilities.
#[derive(Debug, Clone)]
pub struct ContextEntry {
    pub trigger: TokenMatch,
    pub possibilities: Vec<CompletionPossibility>,
}

/// The define/type completion context map.
#[derive(Debug, Clone, Default)]
pub struct CompletionContextMap {
    entries: Vec<ContextEntry>,
}

impl CompletionContextMap {
    pub fn new(entries: Vec<ContextEntry>) -> Self {
        Self { entries }
    }

    /// The entry whose trigger matches `token`. Kind triggers win over
    /// category triggers.
    pub fn entry_for(&self, token: &Token) -> Option<&ContextEntry> {
        self.entries
            .iter()
            .find(|e| !matches!(e.trigger, TokenMatch::Category(_)) && e.trigger.matches(token))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| matches!(e.trigger, TokenMatch::Category(_)) && e.trigger.matches(token))
            })
    }
}

/// The sets of name categories valid in a type position. Shared between the
/// define and type-definition maps.
pub const TYPE_POSITION_SETS: DynamicSets = DynamicSets {
    builtin_types: true,
    user_types: true,
    tables: false,
    like_columns: false,
};
