//! The immutable completion catalog.
//!
//! One [`CompletionCatalog`] holds every static table the resolver needs:
//! the define/type context maps, the preprocessor directive list, and the
//! system variable/constant catalogs re-exported from `genero_core`. Build
//! it once at session start and pass it by reference into every
//! [`CompletionAnalyzer`](crate::resolver::CompletionAnalyzer): the
//! catalog is plain data, never mutated after construction, and therefore
//! freely shared across files and threads.

use crate::context_map::{
    CompletionContextMap, CompletionPossibility, ContextEntry, DynamicSets, TokenKindWithConstraint,
    TokenMatch, TYPE_POSITION_SETS,
};
use crate::member::{CompletionSource, MemberKind, MemberResult};
use genero_core::lang::keywords::{self, KeywordId};
use genero_core::lang::operators::OperatorId;
use genero_core::lang::punctuation::PunctuationId;
use genero_core::lang::system;
use genero_syntax::lexer::TokenCategory;

/// Preprocessor directives valid after a leading `&`.
pub const PREPROCESSOR_DIRECTIVES: &[&str] = &["include", "define", "undef", "ifdef", "ifndef", "else", "endif"];

/// Static tables shared by all completion queries.
#[derive(Debug)]
pub struct CompletionCatalog {
    define_context: CompletionContextMap,
    type_def_context: CompletionContextMap,
}

impl Default for CompletionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionCatalog {
    pub fn new() -> Self {
        Self {
            define_context: build_definition_map(KeywordId::Define),
            type_def_context: build_definition_map(KeywordId::TypeKw),
        }
    }

    pub fn define_context(&self) -> &CompletionContextMap {
        &self.define_context
    }

    pub fn type_def_context(&self) -> &CompletionContextMap {
        &self.type_def_context
    }

    /// The predefined system variables as completion results.
    pub fn system_variables(&self) -> impl Iterator<Item = MemberResult> + '_ {
        system::SYSTEM_VARIABLES.iter().map(|v| {
            MemberResult::new(v.name, v.type_name, MemberKind::Variable, CompletionSource::System)
        })
    }

    /// The predefined system constants as completion results.
    pub fn system_constants(&self) -> impl Iterator<Item = MemberResult> + '_ {
        system::SYSTEM_CONSTANTS.iter().map(|c| {
            MemberResult::new(c.name, c.type_name, MemberKind::Constant, CompletionSource::System)
        })
    }

    /// The generic statement-starter keyword list (the resolver's final
    /// fallback).
    pub fn statement_keywords(&self) -> impl Iterator<Item = MemberResult> + '_ {
        keywords::statement_starters().map(|info| MemberResult::keyword(info.canonical))
    }

    /// Builtin scalar type names.
    pub fn builtin_type_names(&self) -> impl Iterator<Item = MemberResult> + '_ {
        genero_core::lang::types::BUILTIN_TYPES
            .iter()
            .map(|t| MemberResult::new(t.canonical, "builtin type", MemberKind::Type, CompletionSource::Vocabulary))
    }
}

/// Build the context map for `DEFINE` (or `TYPE`, which shares the same
/// shape: the definition keyword differs but the positions agree).
fn build_definition_map(def_kw: KeywordId) -> CompletionContextMap {
    use TokenMatch as M;

    const TYPE_KEYWORDS: &[TokenKindWithConstraint] = &[
        TokenKindWithConstraint::plain(KeywordId::RecordKw),
        TokenKindWithConstraint::plain(KeywordId::Dynamic),
        TokenKindWithConstraint::plain(KeywordId::Array),
    ];

    const TYPE_SLOT_KEYWORDS: &[TokenKindWithConstraint] = &[
        TokenKindWithConstraint::plain(KeywordId::RecordKw),
        TokenKindWithConstraint::plain(KeywordId::Dynamic),
        TokenKindWithConstraint::plain(KeywordId::Array),
        TokenKindWithConstraint::plain(KeywordId::Like),
    ];
    const RECORD_FIELD_KEYWORDS: &[TokenKindWithConstraint] = &[
        TokenKindWithConstraint::plain(KeywordId::RecordKw),
        TokenKindWithConstraint::plain(KeywordId::Dynamic),
        TokenKindWithConstraint::plain(KeywordId::Array),
        TokenKindWithConstraint::plain(KeywordId::Like),
    ];
    const LIKE_KEYWORDS: &[TokenKindWithConstraint] =
        &[TokenKindWithConstraint::plain(KeywordId::Like)];
    const ARRAY_KEYWORDS: &[TokenKindWithConstraint] =
        &[TokenKindWithConstraint::plain(KeywordId::Array)];
    const WITH_OF_KEYWORDS: &[TokenKindWithConstraint] = &[
        TokenKindWithConstraint::plain(KeywordId::With),
        TokenKindWithConstraint::plain(KeywordId::Of),
    ];
    const DIMENSION_KEYWORDS: &[TokenKindWithConstraint] =
        &[TokenKindWithConstraint::plain(KeywordId::Dimension)];
    const OF_KEYWORDS: &[TokenKindWithConstraint] =
        &[TokenKindWithConstraint::plain(KeywordId::Of)];
    const OF_AFTER_DIMENSION_KEYWORDS: &[TokenKindWithConstraint] =
        &[TokenKindWithConstraint::when_previous(
            KeywordId::Of,
            1,
            M::Keyword(KeywordId::Dimension),
        )];

    let name_position = CompletionPossibility {
        requires: None,
        keywords: &[],
        sets: DynamicSets::default(),
    };

    let entries = vec![
        // `DEFINE |` / `TYPE |`: the name slot takes no completions.
        ContextEntry {
            trigger: M::Keyword(def_kw),
            possibilities: vec![name_position.clone()],
        },
        // `DEFINE x, |`: another name slot.
        ContextEntry {
            trigger: M::Punctuation(PunctuationId::Comma),
            possibilities: vec![name_position.clone()],
        },
        // `DEFINE x |`: the type slot: builtin/user types plus the
        // structured-type openers. Gated so a stray identifier elsewhere in
        // the statement does not look like a fresh type slot.
        ContextEntry {
            trigger: M::Category(TokenCategory::Identifier),
            possibilities: vec![
                CompletionPossibility {
                    requires: Some((
                        1,
                        &[
                            M::Keyword(KeywordId::Define),
                            M::Keyword(KeywordId::TypeKw),
                            M::Punctuation(PunctuationId::Comma),
                        ],
                    )),
                    // LIKE mimics a table column; the operator spelling
                    // is completed as a keyword.
                    keywords: TYPE_SLOT_KEYWORDS,
                    sets: TYPE_POSITION_SETS,
                },
                // A record field name is a type position too, and a nested
                // record is legal there.
                CompletionPossibility {
                    requires: Some((1, &[M::Keyword(KeywordId::RecordKw)])),
                    keywords: RECORD_FIELD_KEYWORDS,
                    sets: TYPE_POSITION_SETS,
                },
            ],
        },
        // `... OF |`: element type slot of an array.
        ContextEntry {
            trigger: M::Keyword(KeywordId::Of),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: TYPE_KEYWORDS,
                sets: TYPE_POSITION_SETS,
            }],
        },
        // `RECORD |`: a field name, or LIKE mimicry.
        ContextEntry {
            trigger: M::Keyword(KeywordId::RecordKw),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: LIKE_KEYWORDS,
                sets: DynamicSets::default(),
            }],
        },
        // `LIKE |`: database tables.
        ContextEntry {
            trigger: M::Operator(OperatorId::Like),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: &[],
                sets: DynamicSets { tables: true, ..DynamicSets::default() },
            }],
        },
        // `LIKE tab.|`: columns of that table.
        ContextEntry {
            trigger: M::Punctuation(PunctuationId::Dot),
            possibilities: vec![CompletionPossibility {
                requires: Some((2, &[M::Operator(OperatorId::Like)])),
                keywords: &[],
                sets: DynamicSets { like_columns: true, ..DynamicSets::default() },
            }],
        },
        // `DYNAMIC |`.
        ContextEntry {
            trigger: M::Keyword(KeywordId::Dynamic),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: ARRAY_KEYWORDS,
                sets: DynamicSets::default(),
            }],
        },
        // `DYNAMIC ARRAY |`: WITH DIMENSION, or OF. Gated: after a plain
        // `ARRAY` (no DYNAMIC) the only continuation is `[`.
        ContextEntry {
            trigger: M::Keyword(KeywordId::Array),
            possibilities: vec![
                CompletionPossibility {
                    requires: Some((1, &[M::Keyword(KeywordId::Dynamic)])),
                    keywords: WITH_OF_KEYWORDS,
                    sets: DynamicSets::default(),
                },
                CompletionPossibility {
                    requires: None,
                    keywords: &[],
                    sets: DynamicSets::default(),
                },
            ],
        },
        // `WITH |`.
        ContextEntry {
            trigger: M::Keyword(KeywordId::With),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: DIMENSION_KEYWORDS,
                sets: DynamicSets::default(),
            }],
        },
        // `WITH DIMENSION |`: a number; nothing to complete.
        ContextEntry {
            trigger: M::Keyword(KeywordId::Dimension),
            possibilities: vec![name_position.clone()],
        },
        // `ARRAY[2] |` / `ARRAY[] |`: OF follows a closed bracket, but
        // only when the bracket run began after ARRAY.
        ContextEntry {
            trigger: M::Punctuation(PunctuationId::RightBracket),
            possibilities: vec![CompletionPossibility {
                requires: None,
                keywords: OF_KEYWORDS,
                sets: DynamicSets::default(),
            }],
        },
        // Inside `ARRAY[10, |`: dimension numbers; nothing to complete.
        ContextEntry {
            trigger: M::Punctuation(PunctuationId::LeftBracket),
            possibilities: vec![CompletionPossibility {
                requires: Some((1, &[M::Keyword(KeywordId::Array)])),
                keywords: &[],
                sets: DynamicSets::default(),
            }],
        },
        ContextEntry {
            trigger: M::Category(TokenCategory::NumericLiteral),
            possibilities: vec![CompletionPossibility {
                requires: Some((
                    1,
                    &[
                        M::Punctuation(PunctuationId::LeftBracket),
                        M::Punctuation(PunctuationId::Comma),
                        M::Keyword(KeywordId::Dimension),
                    ],
                )),
                keywords: OF_AFTER_DIMENSION_KEYWORDS,
                sets: DynamicSets::default(),
            }],
        },
        // After a complete scalar type keyword the statement may continue
        // with a comma; no keyword completions are offered.
        ContextEntry {
            trigger: M::Category(TokenCategory::Keyword),
            possibilities: vec![name_position],
        },
    ];
    CompletionContextMap::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use genero_syntax::lexer;

    #[test]
    fn kind_triggers_win_over_category_triggers() {
        let catalog = CompletionCatalog::new();
        let tokens = lexer::lex("OF").unwrap();
        let entry = catalog.define_context().entry_for(&tokens[0]).expect("entry");
        // The OF entry, not the generic keyword entry.
        assert!(matches!(entry.trigger, TokenMatch::Keyword(KeywordId::Of)));
    }

    #[test]
    fn catalog_is_plain_data() {
        let a = CompletionCatalog::new();
        assert!(a.system_variables().any(|v| v.name == "status"));
        assert!(a.system_constants().any(|c| c.name == "NOTFOUND"));
        assert!(a.statement_keywords().any(|k| k.name == "define"));
        assert!(a.builtin_type_names().any(|t| t.name == "decimal"));
    }
}
