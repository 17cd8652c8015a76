//! Structural punctuation vocabulary.
//!
//! Punctuation tokens delimit constructs rather than join operands. The
//! `&` sigil is listed here because preprocessor directives (`&include`,
//! `&define`) are recognized token-by-token, not by a separate lexer mode.

/// Stable identifier for every punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Ampersand,
}

/// Metadata for one punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub spelling: &'static str,
}

use PunctuationId as P;

/// The punctuation registry.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    PunctuationInfo { id: P::LeftParen, spelling: "(" },
    PunctuationInfo { id: P::RightParen, spelling: ")" },
    PunctuationInfo { id: P::LeftBracket, spelling: "[" },
    PunctuationInfo { id: P::RightBracket, spelling: "]" },
    PunctuationInfo { id: P::Comma, spelling: "," },
    PunctuationInfo { id: P::Dot, spelling: "." },
    PunctuationInfo { id: P::Semicolon, spelling: ";" },
    PunctuationInfo { id: P::Colon, spelling: ":" },
    PunctuationInfo { id: P::Ampersand, spelling: "&" },
];

/// Resolve a spelling to a punctuation id.
pub fn from_str(spelling: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|info| info.spelling == spelling).map(|info| info.id)
}

/// Spelling for a punctuation id.
pub fn as_str(id: PunctuationId) -> &'static str {
    PUNCTUATION
        .iter()
        .find(|info| info.id == id)
        .map(|info| info.spelling)
        .unwrap_or_else(|| unreachable!("punctuation id missing from registry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        for info in PUNCTUATION {
            assert_eq!(from_str(info.spelling), Some(info.id));
            assert_eq!(as_str(info.id), info.spelling);
        }
    }
}
