//! Reversed views over a token stream.
//!
//! The resolver never walks the forward token slice directly; it consumes an
//! [`ReverseTokenizer`] so hosts can plug in their own lazily-reversed
//! streams. Consumers always filter by `span.start < cursor` before use.

use genero_syntax::lexer::Token;

/// A restartable source of tokens in reverse source order.
pub trait ReverseTokenizer {
    /// Tokens in reverse source order. Each call restarts from the end.
    fn reversed_tokens(&self) -> Box<dyn Iterator<Item = &Token> + '_>;
}

/// The standard implementation over an in-memory token slice.
pub struct SliceReverseTokenizer<'a> {
    tokens: &'a [Token],
}

impl<'a> SliceReverseTokenizer<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }
}

impl ReverseTokenizer for SliceReverseTokenizer<'_> {
    fn reversed_tokens(&self) -> Box<dyn Iterator<Item = &Token> + '_> {
        Box::new(self.tokens.iter().rev())
    }
}

/// Collect the tokens strictly before `cursor`, nearest-first.
pub(crate) fn tokens_before(
    reverse: &dyn ReverseTokenizer,
    cursor: usize,
) -> Vec<Token> {
    reverse
        .reversed_tokens()
        .filter(|t| t.span.start < cursor)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use genero_syntax::lexer;

    #[test]
    fn reversed_tokens_filter_by_cursor() {
        let tokens = lexer::lex("LET a = 1").unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        let before = tokens_before(&reverse, 5);
        // `a` first (nearest the cursor), then `LET`.
        assert_eq!(before.len(), 2);
        assert!(before[0].ident().is_some());
        assert!(before[1].keyword_id().is_some());
    }

    #[test]
    fn the_view_is_restartable() {
        let tokens = lexer::lex("LET a = 1").unwrap();
        let reverse = SliceReverseTokenizer::new(&tokens);
        assert_eq!(reverse.reversed_tokens().count(), reverse.reversed_tokens().count());
    }
}
