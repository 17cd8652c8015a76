//! Lexer for Genero 4GL source text.
//!
//! Handles tokenization including:
//! - Case-insensitive keywords (`DEFINE`, `define`, `Define` are identical)
//! - Identifiers and literals (numeric, `"..."` strings, `'...'` literals)
//! - Symbolic operators longest-match first (`**`, `<=`, `<>`, `||`, ...)
//! - Comments: `#` and `--` to end of line, `{ ... }` block comments
//! - Newline tokens (the parser skips them; the completion engine does not)
//!
//! ## Notes
//! - A string literal still open at end of input becomes an
//!   [`TokenKind::IncompleteString`] token rather than an error, so the
//!   completion engine can still classify the surrounding context while the
//!   user is mid-string.
//! - The final token is always [`TokenKind::Eof`].

pub mod tokens;

pub use tokens::{Span, Token, TokenCategory, TokenKind, keyword_id};

use crate::diagnostics::Diagnostic;
use genero_core::lang::operators;
use genero_core::lang::punctuation;

/// Lexer state over one source buffer.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    tokens: Vec<Token>,
    errors: Vec<Diagnostic>,
}

/// Tokenize an entire source buffer.
///
/// ## Errors
/// Returns the collected lexical diagnostics if any character could not be
/// tokenized. Incomplete strings are *not* errors (see module notes).
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<Diagnostic>> {
    Lexer::new(source).run()
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, Vec<Diagnostic>> {
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.chars.next();
                }
                '\n' => {
                    self.chars.next();
                    self.push(TokenKind::Newline, pos, pos + 1);
                }
                '#' => self.skip_line_comment(),
                '-' => {
                    // Either a `--` comment or the minus operator.
                    self.chars.next();
                    if matches!(self.chars.peek(), Some(&(_, '-'))) {
                        self.skip_line_comment();
                    } else {
                        self.push(TokenKind::Operator(operators::OperatorId::Minus), pos, pos + 1);
                    }
                }
                '{' => self.skip_block_comment(pos),
                '"' => self.scan_string(pos, '"'),
                '\'' => self.scan_string(pos, '\''),
                _ if c.is_ascii_digit() => self.scan_number(pos),
                _ if c.is_alphabetic() || c == '_' => self.scan_word(pos),
                _ => self.scan_symbol(pos, c),
            }
        }
        let end = self.source.len();
        self.push(TokenKind::Eof, end, end);

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, end)));
    }

    fn skip_line_comment(&mut self) {
        // Leave the newline for the main loop so a Newline token is emitted.
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        self.chars.next(); // {
        let mut closed = false;
        while let Some((_, c)) = self.chars.next() {
            if c == '}' {
                closed = true;
                break;
            }
        }
        if !closed {
            self.errors.push(Diagnostic::error(
                "unterminated block comment",
                Span::new(start, self.source.len()),
            ));
        }
    }

    fn scan_string(&mut self, start: usize, quote: char) {
        self.chars.next(); // opening quote
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((pos, c)) if c == quote => {
                    let kind = if quote == '"' {
                        TokenKind::StringLit(value)
                    } else {
                        TokenKind::CharLit(value)
                    };
                    self.push(kind, start, pos + 1);
                    return;
                }
                Some((_, '\\')) => {
                    // Escape: keep the next character verbatim.
                    match self.chars.next() {
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, 't')) => value.push('\t'),
                        Some((_, other)) => value.push(other),
                        None => break,
                    }
                }
                Some((_, c)) => value.push(c),
                None => break,
            }
        }
        // End of input before the closing quote.
        self.push(TokenKind::IncompleteString(value), start, self.source.len());
    }

    fn scan_number(&mut self, start: usize) {
        let mut end = start;
        // Hex prefix
        let mut saw_hex = false;
        while let Some(&(pos, c)) = self.chars.peek() {
            let keep = if saw_hex {
                c.is_ascii_hexdigit()
            } else if (c == 'x' || c == 'X') && pos == start + 1 && self.source.as_bytes()[start] == b'0' {
                saw_hex = true;
                true
            } else {
                c.is_ascii_digit()
            };
            if !keep {
                break;
            }
            end = pos + c.len_utf8();
            self.chars.next();
        }
        // Fractional part: only when the dot is followed by a digit, so that
        // `rec.field` and `arr[1].x` never swallow the dot.
        if !saw_hex {
            if let Some(&(dot_pos, '.')) = self.chars.peek() {
                let next_is_digit = self.source[dot_pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit());
                if next_is_digit {
                    self.chars.next();
                    end = dot_pos + 1;
                    while let Some(&(pos, c)) = self.chars.peek() {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        end = pos + 1;
                        self.chars.next();
                    }
                }
            }
        }
        let text = self.source[start..end].to_string();
        self.push(TokenKind::Number(text), start, end);
    }

    fn scan_word(&mut self, start: usize) {
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            end = pos + c.len_utf8();
            self.chars.next();
        }
        let text = &self.source[start..end];

        // Word operators win over plain keywords so the expression engine
        // sees `AND`/`MOD`/`CLIPPED` as operator tokens.
        let kind = if let Some(op) = operators::from_word(text) {
            TokenKind::Operator(op)
        } else if let Some(kw) = keyword_id(text) {
            TokenKind::Keyword(kw)
        } else {
            TokenKind::Ident(text.to_string())
        };
        self.push(kind, start, end);
    }

    fn scan_symbol(&mut self, start: usize, first: char) {
        self.chars.next();
        // Two-character operators, longest match first.
        let two: Option<&str> = {
            let rest = &self.source[start..];
            if rest.len() >= 2 { rest.get(0..2) } else { None }
        };
        if let Some(two) = two {
            if let Some(op) = operators::from_symbol(two) {
                self.chars.next();
                self.push(TokenKind::Operator(op), start, start + 2);
                return;
            }
        }
        let one = &self.source[start..start + first.len_utf8()];
        if let Some(op) = operators::from_symbol(one) {
            self.push(TokenKind::Operator(op), start, start + one.len());
            return;
        }
        if let Some(p) = punctuation::from_str(one) {
            self.push(TokenKind::Punctuation(p), start, start + one.len());
            return;
        }
        self.errors.push(Diagnostic::error(
            format!("unexpected character '{}'", first),
            Span::new(start, start + first.len_utf8()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genero_core::lang::keywords::KeywordId;
    use genero_core::lang::operators::OperatorId;
    use genero_core::lang::punctuation::PunctuationId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("define DEFINE Define"),
            vec![
                TokenKind::Keyword(KeywordId::Define),
                TokenKind::Keyword(KeywordId::Define),
                TokenKind::Keyword(KeywordId::Define),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn word_operators_are_operator_tokens() {
        assert_eq!(
            kinds("a AND b"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Operator(OperatorId::And),
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn longest_symbol_match_wins() {
        assert_eq!(
            kinds("a <= b <> c || d"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Operator(OperatorId::LessEquals),
                TokenKind::Ident("b".into()),
                TokenKind::Operator(OperatorId::NotEquals),
                TokenKind::Ident("c".into()),
                TokenKind::Operator(OperatorId::Concat),
                TokenKind::Ident("d".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn number_does_not_swallow_member_access_dot() {
        assert_eq!(
            kinds("rec1.field"),
            vec![
                TokenKind::Ident("rec1".into()),
                TokenKind::Punctuation(PunctuationId::Dot),
                TokenKind::Ident("field".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("1.5"),
            vec![TokenKind::Number("1.5".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn dashdash_comment_is_skipped_but_minus_is_not() {
        assert_eq!(
            kinds("a - b -- trailing comment"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Operator(OperatorId::Minus),
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_becomes_incomplete_token() {
        let tokens = lex("LET s = \"abc\ndef").unwrap();
        assert!(
            tokens
                .iter()
                .any(|t| matches!(&t.kind, TokenKind::IncompleteString(s) if s.contains("abc"))),
            "expected an incomplete string token: {:?}",
            tokens
        );
    }

    #[test]
    fn spans_cover_the_source() {
        let source = "LET x = 12";
        let tokens = lex(source).unwrap();
        for t in &tokens {
            assert!(t.span.end >= t.span.start);
            assert!(t.span.end <= source.len());
        }
    }
}
