//! Completion result types.

use genero_syntax::ast::NodeId;

/// What a completion candidate denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Variable,
    Type,
    Constant,
    Function,
    Cursor,
    Keyword,
    RecordField,
    DbTable,
    DbColumn,
}

/// Where a completion candidate came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSource {
    /// Bound in the current module's tree.
    Node(NodeId),
    /// One of the predefined system catalogs.
    System,
    /// Static keyword vocabulary.
    Vocabulary,
    /// Supplied by a host provider callback.
    Provider,
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberResult {
    /// Display name (original casing where known).
    pub name: String,
    /// Short human-readable detail ("local variable", "integer", ...).
    pub detail: String,
    pub kind: MemberKind,
    pub source: CompletionSource,
}

impl MemberResult {
    pub fn keyword(name: &str) -> Self {
        Self {
            name: name.to_string(),
            detail: "keyword".to_string(),
            kind: MemberKind::Keyword,
            source: CompletionSource::Vocabulary,
        }
    }

    pub fn new(name: impl Into<String>, detail: impl Into<String>, kind: MemberKind, source: CompletionSource) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            kind,
            source,
        }
    }
}
