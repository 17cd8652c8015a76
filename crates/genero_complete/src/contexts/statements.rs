//! Statement-shaped backward contexts: preprocessor lines, function
//! signatures, `LET`, `CALL`, and the generic fallback.

use crate::catalog::PREPROCESSOR_DIRECTIVES;
use crate::member::MemberResult;
use crate::resolver::{CompletionAnalyzer, Outcome, ScanWindow};
use genero_core::lang::keywords::KeywordId;
use genero_core::lang::operators::OperatorId;
use genero_core::lang::punctuation::PunctuationId;
use genero_syntax::lexer::{Token, TokenKind};

/// Priority 4: a line that starts with `&` takes only the fixed directive
/// set.
pub(crate) fn try_preprocessor(window: &ScanWindow) -> Option<Vec<MemberResult>> {
    let line: Vec<&Token> = window.line_tokens().collect();
    let first_on_line = line.last()?;
    if !first_on_line.is_punctuation(PunctuationId::Ampersand) {
        return None;
    }
    if line.len() <= 2 {
        // `&|` or `&inc|`: offer the directive keywords.
        return Some(
            PREPROCESSOR_DIRECTIVES
                .iter()
                .map(|d| MemberResult::keyword(d))
                .collect(),
        );
    }
    // Past the directive word: the argument is a file name or symbol.
    Some(Vec::new())
}

/// Priority 5: inside a `FUNCTION name(...)` / `REPORT name(...)` header.
/// Name and parameter positions take no completions.
pub(crate) fn try_function_definition(window: &ScanWindow) -> Option<Vec<MemberResult>> {
    const SCAN_LIMIT: usize = 40;

    // `FUNCTION |`: the name slot.
    let t0 = window.meaningful(0)?;
    if t0.is_keyword(KeywordId::Function) || t0.is_keyword(KeywordId::Report) {
        return Some(Vec::new());
    }
    // `FUNCTION name|` or inside the parameter parens: walk back through
    // name/comma/paren tokens until the header keyword.
    for n in 0..SCAN_LIMIT {
        let token = window.meaningful(n)?;
        if token.is_keyword(KeywordId::Function) || token.is_keyword(KeywordId::Report) {
            // Everything between cursor and keyword must be header-shaped.
            return Some(Vec::new());
        }
        let header_shaped = token.ident().is_some()
            || token.is_punctuation(PunctuationId::Comma)
            || token.is_punctuation(PunctuationId::LeftParen);
        if !header_shaped {
            return None;
        }
    }
    None
}

/// Priority 8: inside a `LET target = expr [, expr]` statement.
///
/// The target slot offers variables; the expression slot offers the full
/// expression member set. A complete trailing expression (fully consumed by
/// forward replay) means the cursor is past the statement and the machine
/// declines.
pub(crate) fn try_let_statement(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    let tokens = window.statement_window(KeywordId::Let)?;
    let after_let = &tokens[1..];

    let equals_at = after_let
        .iter()
        .position(|t| t.is_operator(OperatorId::Equals));

    match equals_at {
        None => {
            // Target slot. An ident directly behind the cursor means the
            // user is typing the target; a bare LET means it is empty.
            let t0 = window.meaningful(0)?;
            if t0.is_keyword(KeywordId::Let) || t0.ident().is_some() {
                Some(analyzer.variables_in_scope(index))
            } else {
                None
            }
        }
        Some(eq) => {
            let value_tokens = &after_let[eq + 1..];
            let t0 = window.meaningful(0)?;
            // Fresh slot right after `=`, a comma, or an operator run.
            if t0.is_operator(OperatorId::Equals)
                || t0.is_punctuation(PunctuationId::Comma)
                || t0.is_punctuation(PunctuationId::LeftParen)
                || t0.kind.operator_id().is_some()
            {
                return Some(analyzer.expression_members(index));
            }
            match super::expressions::replay_expression(value_tokens) {
                // Fully consumed and complete: the cursor sits after the
                // statement; scanning continues elsewhere.
                Outcome::Matched(_) => None,
                // Partially consumed: the cursor is inside the value list.
                Outcome::NotThis { .. } => Some(analyzer.expression_members(index)),
            }
        }
    }
}

/// Priority 9: inside a `CALL f(args) [RETURNING vars]` statement.
pub(crate) fn try_call_statement(
    analyzer: &CompletionAnalyzer<'_>,
    index: usize,
    window: &ScanWindow,
) -> Option<Vec<MemberResult>> {
    let tokens = window.statement_window(KeywordId::Call)?;
    let after_call = &tokens[1..];

    // After RETURNING: target variables.
    if after_call.iter().any(|t| t.is_keyword(KeywordId::Returning)) {
        return Some(analyzer.variables_in_scope(index));
    }

    // Function-name slot: nothing or a partial name after CALL.
    let meaningful: Vec<&Token> = after_call
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
        .collect();
    if meaningful.is_empty() || (meaningful.len() == 1 && meaningful[0].ident().is_some()) {
        return Some(analyzer.functions_in_scope());
    }

    // Inside the argument parens: expression members.
    let mut depth = 0isize;
    for t in &meaningful {
        if t.is_punctuation(PunctuationId::LeftParen) {
            depth += 1;
        } else if t.is_punctuation(PunctuationId::RightParen) {
            depth -= 1;
        }
    }
    if depth > 0 {
        return Some(analyzer.expression_members(index));
    }

    // A closed call with no RETURNING yet: the one legal continuation.
    Some(vec![MemberResult::keyword("returning")])
}

/// Priority 10: access-modifier position, then the generic statement
/// keyword list. This is the designed "no specific context" outcome, never
/// an error.
pub(crate) fn fallback_keywords(
    analyzer: &CompletionAnalyzer<'_>,
    window: &ScanWindow,
) -> Vec<MemberResult> {
    if let Some(t0) = window.meaningful(0) {
        if t0.is_keyword(KeywordId::Public) || t0.is_keyword(KeywordId::Private) {
            return ["define", "constant", "type", "function"]
                .iter()
                .map(|k| MemberResult::keyword(k))
                .collect();
        }
    }
    let mut out: Vec<MemberResult> = analyzer.catalog.statement_keywords().collect();
    for extra in ["end", "function", "main", "report", "globals", "type", "constant"] {
        out.push(MemberResult::keyword(extra));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompletionCatalog;
    use crate::resolver::{CompletionAnalyzer, Providers};
    use crate::reverse::SliceReverseTokenizer;
    use genero_syntax::{lexer, parser::parse_module};

    fn members_for(source: &str, cursor: usize) -> Vec<MemberResult> {
        let tokens = lexer::lex(source).expect("lexing succeeds");
        let module = parse_module(&tokens);
        let catalog = CompletionCatalog::new();
        let analyzer = CompletionAnalyzer::new(&catalog, &module, Providers::default());
        let reverse = SliceReverseTokenizer::new(&tokens);
        analyzer.members_at(cursor, &reverse)
    }

    #[test]
    fn let_target_slot_offers_variables() {
        let source = "MAIN\nDEFINE total INTEGER\nLET ";
        let members = members_for(source, source.len());
        assert!(members.iter().any(|m| m.name == "total"), "members: {:?}", members);
        assert!(members.iter().any(|m| m.name == "status"), "system variables included");
    }

    #[test]
    fn let_value_slot_offers_expression_members() {
        let source = "MAIN\nDEFINE total INTEGER\nLET total = ";
        let members = members_for(source, source.len());
        assert!(members.iter().any(|m| m.name == "total"));
        assert!(members.iter().any(|m| m.name == "NOTFOUND"), "constants included");
    }

    #[test]
    fn call_name_slot_offers_functions() {
        let source = "FUNCTION work()\nEND FUNCTION\nMAIN\nCALL ";
        let members = members_for(source, source.len());
        assert!(members.iter().any(|m| m.name == "work"), "members: {:?}", members);
    }

    #[test]
    fn closed_call_offers_returning() {
        let source = "FUNCTION work()\nEND FUNCTION\nMAIN\nCALL work() ";
        let members = members_for(source, source.len());
        assert!(members.iter().any(|m| m.name == "returning"), "members: {:?}", members);
    }

    #[test]
    fn preprocessor_line_offers_directives() {
        let source = "&";
        let members = members_for(source, 1);
        assert!(members.iter().any(|m| m.name == "include"));
    }

    #[test]
    fn function_name_slot_is_silent() {
        let source = "FUNCTION ";
        let members = members_for(source, source.len());
        assert!(members.is_empty(), "members: {:?}", members);
    }

    #[test]
    fn fallback_is_the_generic_keyword_list() {
        let source = "MAIN\n";
        let members = members_for(source, source.len());
        assert!(members.iter().any(|m| m.name == "let"));
        assert!(members.iter().any(|m| m.name == "display"));
        assert!(members.iter().any(|m| m.name == "end"));
    }
}
