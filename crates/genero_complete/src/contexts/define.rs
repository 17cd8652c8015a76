//! Definition-shaped backward contexts: type constraints, constants, and
//! the context-map-driven define/type machine.

use crate::context_map::CompletionContextMap;
use crate::member::MemberResult;
use crate::resolver::{CompletionAnalyzer, ScanWindow};
use genero_core::lang::keywords::KeywordId;
use genero_core::lang::operators::OperatorId;
use genero_core::lang::punctuation::PunctuationId;
use genero_core::lang::types::{self as builtin_types, ConstraintKind, TimeQualifier};
use genero_syntax::lexer::{Token, TokenKind};
use genero_syntax::parser;

/// Priority 2: inside a type-constraint span (`DECIMAL(`,
/// `DATETIME year TO ...`). The only candidates are constraint
/// continuation tokens.
pub(crate) fn try_type_constraint(
    _analyzer: &CompletionAnalyzer<'_>,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    const SCAN_LIMIT: usize = 16;

    // Walk back a short distance collecting constraint-plausible tokens
    // until a constrainable type keyword appears.
    let mut walked: Vec<&Token> = Vec::new();
    let mut type_info = None;
    for n in 0..SCAN_LIMIT {
        let token = window.meaningful(n)?;
        if let Some(info) = token
            .kind
            .keyword_id()
            .and_then(|kw| builtin_types::from_str(genero_core::lang::keywords::as_str(kw)))
        {
            if info.constraint != ConstraintKind::None {
                type_info = Some(info);
                break;
            }
            return None;
        }
        let plausible = matches!(
            token.kind,
            TokenKind::Number(_)
                | TokenKind::Punctuation(PunctuationId::LeftParen)
                | TokenKind::Punctuation(PunctuationId::RightParen)
                | TokenKind::Punctuation(PunctuationId::Comma)
                | TokenKind::Keyword(KeywordId::To)
                | TokenKind::Keyword(KeywordId::Year)
                | TokenKind::Keyword(KeywordId::Month)
                | TokenKind::Keyword(KeywordId::Day)
                | TokenKind::Keyword(KeywordId::Hour)
                | TokenKind::Keyword(KeywordId::Minute)
                | TokenKind::Keyword(KeywordId::Second)
                | TokenKind::Keyword(KeywordId::Fraction)
        );
        if !plausible {
            return None;
        }
        walked.push(token);
    }
    let info = type_info?;
    // Re-reverse: the constraint tokens in forward order.
    walked.reverse();
    let constraint: Vec<&Token> = walked;

    match info.constraint {
        ConstraintKind::Arguments { .. } => {
            // Only a context while the paren run is still open.
            let mut depth = 0isize;
            for t in &constraint {
                if t.is_punctuation(PunctuationId::LeftParen) {
                    depth += 1;
                } else if t.is_punctuation(PunctuationId::RightParen) {
                    depth -= 1;
                }
            }
            if depth > 0 {
                // Argument positions take numbers, not names.
                Some(Vec::new())
            } else {
                None
            }
        }
        ConstraintKind::DatetimeRange | ConstraintKind::IntervalRange => {
            datetime_constraint_members(&constraint)
        }
        ConstraintKind::None => None,
    }
}

/// Decide the next-expected token of a (possibly partial) qualifier range.
fn datetime_constraint_members(constraint: &[&Token]) -> Option<Vec<MemberResult>> {
    let mut saw_from = false;
    let mut saw_to = false;
    let mut saw_to_qualifier = false;
    let mut paren_depth = 0isize;
    for token in constraint {
        if token.is_punctuation(PunctuationId::LeftParen) {
            paren_depth += 1;
            continue;
        }
        if token.is_punctuation(PunctuationId::RightParen) {
            paren_depth -= 1;
            continue;
        }
        if paren_depth > 0 {
            continue; // precision digits
        }
        if token.is_keyword(KeywordId::To) {
            saw_to = true;
            continue;
        }
        if token
            .kind
            .keyword_id()
            .map(genero_core::lang::keywords::as_str)
            .and_then(TimeQualifier::from_str)
            .is_some()
        {
            if saw_to {
                saw_to_qualifier = true;
            } else {
                saw_from = true;
            }
        }
    }
    if paren_depth > 0 {
        // Inside a precision/scale paren: numbers only.
        return Some(Vec::new());
    }
    if saw_to_qualifier {
        // The range is complete; the cursor is past the constraint.
        return None;
    }
    if saw_to {
        return Some(qualifier_members());
    }
    if saw_from {
        return Some(vec![MemberResult::keyword("to")]);
    }
    Some(qualifier_members())
}

fn qualifier_members() -> Vec<MemberResult> {
    ["year", "month", "day", "hour", "minute", "second", "fraction"]
        .iter()
        .map(|q| MemberResult::keyword(q))
        .collect()
}

/// Priority 6: inside a `CONSTANT name [type] = literal` statement.
pub(crate) fn try_constant_context(
    analyzer: &CompletionAnalyzer<'_>,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    let tokens = window.statement_window(KeywordId::Constant)?;
    let fragment = parser::parse_constant_fragment(&tokens);
    if fragment.complete && super::expressions::meaningful_len(&tokens[..fragment.consumed.min(tokens.len())])
        >= super::expressions::meaningful_len(&tokens)
    {
        // The statement closed before the cursor.
        return None;
    }

    // Classify the slot by the nearest tokens.
    let t0 = window.meaningful(0)?;
    if t0.is_keyword(KeywordId::Constant) || t0.is_punctuation(PunctuationId::Comma) {
        // Name position.
        return Some(Vec::new());
    }
    let after_equals = tokens
        .iter()
        .any(|t| t.is_operator(OperatorId::Equals));
    if after_equals {
        // Literal position: predefined constants are the only name-shaped
        // candidates.
        return Some(analyzer.catalog.system_constants().collect());
    }
    if t0.ident().is_some()
        && window
            .meaningful(1)
            .is_some_and(|t| t.is_keyword(KeywordId::Constant) || t.is_punctuation(PunctuationId::Comma))
    {
        // After the constant's name: an optional builtin type may follow.
        return Some(analyzer.catalog.builtin_type_names().collect());
    }
    // After a type annotation: `=` is mandatory next, nothing to complete.
    Some(Vec::new())
}

/// Priority 7: the context-map-driven define / type-definition machine.
pub(crate) fn try_definition_context(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    let (map, tokens) = find_definition_statement(analyzer, window)?;

    // Forward replay disambiguates "already complete, cursor after it"
    // from "still open, cursor inside".
    let fragment = if tokens[0].is_keyword(KeywordId::Define) {
        parser::parse_define_fragment(&tokens)
    } else {
        parser::parse_type_def_fragment(&tokens)
    };
    let consumed_meaningful =
        super::expressions::meaningful_len(&tokens[..fragment.consumed.min(tokens.len())]);
    if fragment.complete && consumed_meaningful >= super::expressions::meaningful_len(&tokens) {
        return None;
    }

    run_context_map(analyzer, index, map, window)
}

fn find_definition_statement<'a>(
    analyzer: &'a CompletionAnalyzer<'_>,
    window: &ScanWindow,
) -> Option<(&'a CompletionContextMap, Vec<Token>)> {
    if let Some(tokens) = window.statement_window(KeywordId::Define) {
        return Some((analyzer.catalog.define_context(), tokens));
    }
    if let Some(tokens) = window.statement_window(KeywordId::TypeKw) {
        return Some((analyzer.catalog.type_def_context(), tokens));
    }
    None
}

/// Drive the declarative map: the token behind the cursor selects an entry,
/// the entry's possibilities gate on tokens further back, and each emitted
/// keyword may carry its own positional constraint.
fn run_context_map(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    map: &CompletionContextMap,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    let trigger = window.meaningful(0)?;
    let entry = map.entry_for(trigger)?;

    let possibility = entry.possibilities.iter().find(|p| match p.requires {
        None => true,
        Some((back, expected)) => window
            .meaningful(back as usize)
            .is_some_and(|t| expected.iter().any(|m| m.matches(t))),
    })?;

    let mut members = Vec::new();
    for candidate in possibility.keywords {
        let satisfied = match candidate.constraint {
            None => true,
            Some(m) => window
                .meaningful(candidate.tokens_previous_to_check as usize)
                .is_some_and(|t| m.matches(t)),
        };
        if satisfied {
            members.push(MemberResult::keyword(genero_core::lang::keywords::as_str(
                candidate.keyword,
            )));
        }
    }
    if possibility.sets.builtin_types {
        members.extend(analyzer.catalog.builtin_type_names());
    }
    if possibility.sets.user_types {
        members.extend(analyzer.user_types_in_scope(index));
    }
    if possibility.sets.tables {
        if let Some(db) = analyzer.providers.database {
            members.extend(db.tables());
        }
    }
    if possibility.sets.like_columns {
        if let (Some(db), Some(table)) = (
            analyzer.providers.database,
            window.meaningful(1).and_then(|t| t.ident()),
        ) {
            members.extend(db.columns(table));
        }
    }
    Some(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompletionCatalog;
    use crate::resolver::Providers;
    use crate::reverse::SliceReverseTokenizer;
    use genero_syntax::lexer;
    use genero_syntax::parser::parse_module;

    /// For every offset inside `DEFINE x, y INTEGER`, the backward
    /// classifier must agree with a forward parse stopped at that offset:
    /// no offset may be classified "not in a define" while the forward
    /// prefix parse is still incomplete.
    #[test]
    fn reverse_and_forward_agree_across_a_define() {
        let source = "DEFINE x, y INTEGER\n";
        let tokens = lexer::lex(source).unwrap();
        let module = parse_module(&tokens);
        let catalog = CompletionCatalog::new();
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);

        for offset in 7..=19usize {
            let window = crate::resolver::ScanWindow::new(&reverse, offset);
            let reverse_says_open = try_definition_context(&analyzer, offset, &window).is_some();

            // The forward prefix sees exactly the tokens the reverse scan
            // sees: everything starting before the cursor.
            let prefix: Vec<_> = tokens
                .iter()
                .filter(|t| t.span.start < offset && !matches!(t.kind, TokenKind::Eof))
                .cloned()
                .collect();
            let fragment = parser::parse_define_fragment(&prefix);
            let forward_still_open = fragment.node.is_some() && !fragment.complete
                || fragment.node.is_none();

            assert_eq!(
                reverse_says_open, forward_still_open,
                "offset {}: reverse={} forward={}",
                offset, reverse_says_open, forward_still_open
            );
        }
    }

    #[test]
    fn type_position_offers_builtin_and_structured_types() {
        let source = "DEFINE x ";
        let tokens = lexer::lex(source).unwrap();
        let module = parse_module(&tokens);
        let catalog = CompletionCatalog::new();
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());

        let members = try_definition_context(&analyzer, source.len(), &window).expect("in define");
        assert!(members.iter().any(|m| m.name == "decimal"));
        assert!(members.iter().any(|m| m.name == "record"));
        assert!(members.iter().any(|m| m.name == "dynamic"));
        assert!(members.iter().any(|m| m.name == "like"));
    }

    #[test]
    fn complete_define_is_not_a_define_context() {
        let source = "DEFINE x INTEGER\n";
        let tokens = lexer::lex(source).unwrap();
        let module = parse_module(&tokens);
        let catalog = CompletionCatalog::new();
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);
        // Cursor on the following line: the define closed on line one.
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        assert!(try_definition_context(&analyzer, source.len(), &window).is_none());
    }

    #[test]
    fn datetime_range_progression() {
        let catalog = CompletionCatalog::new();
        let module = parse_module(&[]);
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());

        let source = "DEFINE d DATETIME YEAR ";
        let tokens = lexer::lex(source).unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        let members = try_type_constraint(&analyzer, &window).expect("in constraint");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "to");

        let source = "DEFINE d DATETIME YEAR TO ";
        let tokens = lexer::lex(source).unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        let members = try_type_constraint(&analyzer, &window).expect("in constraint");
        assert!(members.iter().any(|m| m.name == "second"));

        // A finished range is no longer a constraint context.
        let source = "DEFINE d DATETIME YEAR TO SECOND ";
        let tokens = lexer::lex(source).unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        assert!(try_type_constraint(&analyzer, &window).is_none());
    }

    #[test]
    fn open_precision_paren_is_a_silent_constraint_context() {
        let catalog = CompletionCatalog::new();
        let module = parse_module(&[]);
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());

        let source = "DEFINE x DECIMAL(10, ";
        let tokens = lexer::lex(source).unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        let members = try_type_constraint(&analyzer, &window).expect("in constraint");
        assert!(members.is_empty());
    }

    #[test]
    fn constant_slots_progress() {
        let catalog = CompletionCatalog::new();
        let source = "CONSTANT max_rows ";
        let tokens = lexer::lex(source).unwrap();
        let module = parse_module(&tokens);
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        let members = try_constant_context(&analyzer, &window).expect("in constant");
        assert!(members.iter().any(|m| m.name == "integer"), "builtin types offered");

        let source = "CONSTANT max_rows = ";
        let tokens = lexer::lex(source).unwrap();
        let module = parse_module(&tokens);
        let analyzer = crate::resolver::CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);
        let window = crate::resolver::ScanWindow::new(&reverse, source.len());
        let members = try_constant_context(&analyzer, &window).expect("in constant");
        assert!(members.iter().any(|m| m.name == "TRUE"), "literal constants offered");
    }
}
