//! Expression-shaped backward contexts: member access, literal macros, and
//! the forward-replay helpers shared with the `LET`/`CALL` machines.

use crate::member::{CompletionSource, MemberKind, MemberResult};
use crate::resolver::{is_statement_boundary, CompletionAnalyzer, Outcome, ScanWindow};
use genero_core::lang::punctuation::PunctuationId;
use genero_core::lang::system;
use genero_core::lang::keywords::KeywordId;
use genero_syntax::ast::{Ast, NodeId, NodeKind, TypeShape};
use genero_syntax::lexer::{Token, TokenKind};
use genero_syntax::parser;

/// One suffix piece of a backward-collected reference chain.
enum ChainPiece {
    Member(String),
    Index,
}

/// Priority 1: `expr.` (or `expr.par` mid-member) before the cursor.
///
/// Conservative: only matches when the base name resolves to a variable (or
/// `sqlca`); a dangling dot after an unknown name falls through so the
/// define machine can treat `LIKE tab.` itself.
pub(crate) fn try_member_access(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    // Locate the dot that puts the cursor in member position.
    let chain_start = if window.meaningful(0)?.is_punctuation(PunctuationId::Dot) {
        1
    } else if window.meaningful(0)?.ident().is_some()
        && window
            .meaningful(1)
            .is_some_and(|t| t.is_punctuation(PunctuationId::Dot))
    {
        2
    } else {
        return None;
    };

    // Collect `base[.member | [..]]*` backward from the dot.
    let mut pieces: Vec<ChainPiece> = Vec::new();
    let mut pos = chain_start;
    let base = loop {
        let token = window.meaningful(pos)?;
        if token.is_punctuation(PunctuationId::RightBracket) {
            // Skip the balanced bracket group; the index expressions inside
            // are irrelevant to the member type.
            let mut depth = 0usize;
            loop {
                let t = window.meaningful(pos)?;
                if t.is_punctuation(PunctuationId::RightBracket) {
                    depth += 1;
                } else if t.is_punctuation(PunctuationId::LeftBracket) {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                pos += 1;
            }
            pos += 1;
            pieces.push(ChainPiece::Index);
            continue;
        }
        let name = token.ident()?.to_string();
        // Deeper chain?
        if window
            .meaningful(pos + 1)
            .is_some_and(|t| t.is_punctuation(PunctuationId::Dot))
        {
            pieces.push(ChainPiece::Member(name));
            pos += 2;
            continue;
        }
        break name;
    };
    pieces.reverse();

    resolve_chain_members(analyzer, index, &base, &pieces)
}

/// Resolve the static type of `base` then walk the suffix pieces to a
/// member list.
fn resolve_chain_members(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    base: &str,
    pieces: &[ChainPiece],
) -> Option<Vec<MemberResult>> {
    let ast = &analyzer.module.ast;

    let symbol_node = lookup_variable_node(analyzer, index, base);
    let mut type_ref = match symbol_node {
        Some(node) => variable_type_ref(ast, node)?,
        None => {
            // The SQL communication area is implicitly defined.
            if base.eq_ignore_ascii_case("sqlca") && pieces.is_empty() {
                return Some(sqlca_members());
            }
            return None;
        }
    };

    for piece in pieces {
        type_ref = match piece {
            ChainPiece::Member(name) => step_member(analyzer, index, type_ref, name)?,
            ChainPiece::Index => step_index(ast, type_ref)?,
        };
    }
    members_of_type(analyzer, index, type_ref)
}

/// The defining node for a variable name visible at `index`.
fn lookup_variable_node(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    name: &str,
) -> Option<NodeId> {
    let ast = &analyzer.module.ast;
    if let Some(block) = analyzer.enclosing_block(index) {
        if let NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) =
            &ast.node(block).kind
        {
            if let Some(symbol) = data.tables.variables.get(name) {
                return Some(symbol.node);
            }
        }
    }
    let root = analyzer.module.root?;
    if let NodeKind::Module(data) = &ast.node(root).kind {
        if let Some(symbol) = data.variables.get(name) {
            return Some(symbol.node);
        }
    }
    None
}

/// The type-reference node of a variable-definition (or record-field) node.
fn variable_type_ref(ast: &Ast, node: NodeId) -> Option<NodeId> {
    match &ast.node(node).kind {
        NodeKind::VariableDef(data) => data.type_ref,
        NodeKind::RecordField(data) => data.type_ref,
        _ => None,
    }
}

/// Step through `.name` on a record (or user-type alias) type.
fn step_member(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    type_ref: NodeId,
    name: &str,
) -> Option<NodeId> {
    let ast = &analyzer.module.ast;
    let resolved = resolve_alias(analyzer, index, type_ref)?;
    let record = nested_child(ast, resolved, |k| matches!(k, NodeKind::Record(_)))?;
    match &ast.node(record).kind {
        NodeKind::Record(data) => {
            let symbol = data.members.get(name)?;
            variable_type_ref(ast, symbol.node)
        }
        _ => None,
    }
}

/// Step through `[...]` on an array type.
fn step_index(ast: &Ast, type_ref: NodeId) -> Option<NodeId> {
    let array = nested_child(ast, type_ref, |k| matches!(k, NodeKind::ArrayType { .. }))?;
    ast.children(array)
        .iter()
        .copied()
        .find(|&c| matches!(ast.node(c).kind, NodeKind::TypeReference(_)))
}

/// Resolve user-type aliases (`TYPE t RECORD ... END RECORD`) to the
/// aliased type reference; builtin scalars resolve to themselves.
fn resolve_alias(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    type_ref: NodeId,
) -> Option<NodeId> {
    let ast = &analyzer.module.ast;
    match &ast.node(type_ref).kind {
        NodeKind::TypeReference(data) => match &data.shape {
            TypeShape::Scalar { name, builtin: None, .. } => {
                let item = lookup_type_item(analyzer, index, name)?;
                match &ast.node(item).kind {
                    NodeKind::TypeItem(data) => resolve_alias(analyzer, index, data.type_ref?),
                    _ => None,
                }
            }
            _ => Some(type_ref),
        },
        _ => Some(type_ref),
    }
}

fn lookup_type_item(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    name: &str,
) -> Option<NodeId> {
    let ast = &analyzer.module.ast;
    if let Some(block) = analyzer.enclosing_block(index) {
        if let NodeKind::MainBlock(data) | NodeKind::FunctionBlock(data) | NodeKind::ReportBlock(data) =
            &ast.node(block).kind
        {
            if let Some(symbol) = data.tables.types.get(name) {
                return Some(symbol.node);
            }
        }
    }
    let root = analyzer.module.root?;
    if let NodeKind::Module(data) = &ast.node(root).kind {
        if let Some(symbol) = data.types.get(name) {
            return Some(symbol.node);
        }
    }
    None
}

/// The child of a `TypeShape::Nested` reference matching `pred`.
fn nested_child(ast: &Ast, type_ref: NodeId, pred: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
    ast.children(type_ref).iter().copied().find(|&c| pred(&ast.node(c).kind))
}

/// Member list of a resolved type: record fields, mimicry columns, or
/// nothing for scalars (still a recognized member-access context).
fn members_of_type(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    type_ref: NodeId,
) -> Option<Vec<MemberResult>> {
    let ast = &analyzer.module.ast;
    let resolved = resolve_alias(analyzer, index, type_ref)?;
    if let Some(record) = nested_child(ast, resolved, |k| matches!(k, NodeKind::Record(_))) {
        if let NodeKind::Record(data) = &ast.node(record).kind {
            if let Some((_, table)) = &data.mimic {
                let provider = analyzer.providers.database?;
                return Some(provider.columns(table));
            }
            let mut out: Vec<MemberResult> = data
                .members
                .iter_sorted()
                .map(|s| {
                    MemberResult::new(
                        s.name.clone(),
                        "record field",
                        MemberKind::RecordField,
                        CompletionSource::Node(s.node),
                    )
                })
                .collect();
            out.sort_by(|a, b| a.name.cmp(&b.name));
            return Some(out);
        }
    }
    // Scalar leaf: the dot context is real, there is just nothing to offer.
    Some(Vec::new())
}

fn sqlca_members() -> Vec<MemberResult> {
    system::SQLCA_FIELDS
        .iter()
        .map(|f| MemberResult::new(f.name, f.type_name, MemberKind::RecordField, CompletionSource::System))
        .collect()
}

/// Priority 3: inside an `MDY(` / `DATETIME(` / `INTERVAL(` argument list.
/// The arguments are literals; the context is recognized with no members.
pub(crate) fn try_literal_macro(window: &ScanWindow) -> Option<Vec<MemberResult>> {
    const SCAN_LIMIT: usize = 60;
    let mut depth = 0isize;
    for n in 0..SCAN_LIMIT {
        let token = window.meaningful(n)?;
        if token.is_punctuation(PunctuationId::RightParen) {
            depth += 1;
        } else if token.is_punctuation(PunctuationId::LeftParen) {
            if depth == 0 {
                // This paren is still open at the cursor; classify by the
                // token before it.
                let opener = window.meaningful(n + 1)?;
                let is_macro = opener
                    .ident()
                    .is_some_and(|name| name.eq_ignore_ascii_case("mdy"))
                    || opener.is_keyword(KeywordId::Datetime)
                    || opener.is_keyword(KeywordId::Interval);
                return if is_macro { Some(Vec::new()) } else { None };
            }
            depth -= 1;
        } else if let Some(kw) = token.kind.keyword_id() {
            if is_statement_boundary(kw) {
                return None;
            }
        }
    }
    None
}

/// Forward-replay one expression over `tokens` (a statement sub-window in
/// forward order). Full consumption of a complete expression means the
/// cursor sits *after* it; partial consumption means the cursor is inside.
pub(crate) fn replay_expression(tokens: &[Token]) -> Outcome {
    if tokens.is_empty() {
        return Outcome::NotThis { consumed: 0 };
    }
    let fragment = parser::parse_expression_fragment(tokens);
    let consumed_meaningful = meaningful_len(&tokens[..fragment.consumed.min(tokens.len())]);
    if fragment.node.is_some() && fragment.complete && consumed_meaningful >= meaningful_len(tokens) {
        Outcome::Matched(Vec::new())
    } else {
        Outcome::NotThis {
            consumed: fragment.consumed,
        }
    }
}

/// Number of meaningful (non-layout) tokens in a window.
pub(crate) fn meaningful_len(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
        .count()
}
