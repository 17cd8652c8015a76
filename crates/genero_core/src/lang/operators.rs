//! Operator vocabulary.
//!
//! Defines the canonical operator set: symbolic operators (`+`, `||`, `<>`)
//! and word operators (`AND`, `MOD`, `CLIPPED`). The parser is a *structural*
//! parser: it records operator runs without computing precedence: so the
//! metadata here is about fixity, not binding power.
//!
//! ## Notes
//! - Lookup of symbolic spellings via [`from_symbol`] is exact; word
//!   operators are recognized case-insensitively via [`from_word`].
//! - `<>` and `!=` are the same operator ([`OperatorId::NotEquals`]).
//! - Word-operator spellings also exist in the keyword registry; use this
//!   module when you need to know whether a token can splice two operands.

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    StarStar,

    // Comparison
    Equals,
    DoubleEquals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    // String
    Concat,

    // Word operators
    And,
    Or,
    Not,
    Mod,
    Like,
    Matches,
    Using,
    Clipped,
}

/// Whether an operator joins two operands, prefixes one, or trails one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// Trails its operand with no right-hand side (`CLIPPED`).
    Postfix,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    /// Accepted spellings. Symbolic spellings are matched exactly; word
    /// spellings case-insensitively.
    pub spellings: &'static [&'static str],
    pub fixity: Fixity,
    /// `true` when the spelling is a reserved word rather than symbols.
    pub is_word: bool,
}

use Fixity as F;
use OperatorId as O;

/// The operator registry.
pub const OPERATORS: &[OperatorInfo] = &[
    OperatorInfo { id: O::Plus, spellings: &["+"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Minus, spellings: &["-"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Star, spellings: &["*"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Slash, spellings: &["/"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::StarStar, spellings: &["**"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Equals, spellings: &["="], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::DoubleEquals, spellings: &["=="], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::NotEquals, spellings: &["<>", "!="], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Less, spellings: &["<"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::LessEquals, spellings: &["<="], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Greater, spellings: &[">"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::GreaterEquals, spellings: &[">="], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::Concat, spellings: &["||"], fixity: F::Infix, is_word: false },
    OperatorInfo { id: O::And, spellings: &["and"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Or, spellings: &["or"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Not, spellings: &["not"], fixity: F::Prefix, is_word: true },
    OperatorInfo { id: O::Mod, spellings: &["mod"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Like, spellings: &["like"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Matches, spellings: &["matches"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Using, spellings: &["using"], fixity: F::Infix, is_word: true },
    OperatorInfo { id: O::Clipped, spellings: &["clipped"], fixity: F::Postfix, is_word: true },
];

/// Resolve a symbolic spelling (`"<>"`) to an operator id. Exact match.
pub fn from_symbol(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .filter(|info| !info.is_word)
        .find(|info| info.spellings.contains(&spelling))
        .map(|info| info.id)
}

/// Resolve a word spelling (`"AND"`) to an operator id. Case-insensitive.
pub fn from_word(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .filter(|info| info.is_word)
        .find(|info| info.spellings.iter().any(|s| s.eq_ignore_ascii_case(spelling)))
        .map(|info| info.id)
}

/// Registry metadata for an operator id.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|info| info.id == id)
        .unwrap_or_else(|| unreachable!("operator id missing from registry"))
}

/// Primary (first-listed) spelling for an operator id.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// `true` if the operator can splice two operands (the expression engine's
/// "keep accumulating" check).
pub fn is_binary(id: OperatorId) -> bool {
    matches!(info_for(id).fixity, F::Infix)
}

/// `true` if the operator may prefix an operand.
pub fn is_unary(id: OperatorId) -> bool {
    matches!(id, O::Plus | O::Minus | O::Not)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_is_exact() {
        assert_eq!(from_symbol("<>"), Some(O::NotEquals));
        assert_eq!(from_symbol("!="), Some(O::NotEquals));
        assert_eq!(from_symbol("||"), Some(O::Concat));
        assert_eq!(from_symbol("and"), None);
    }

    #[test]
    fn word_lookup_is_case_insensitive() {
        assert_eq!(from_word("AND"), Some(O::And));
        assert_eq!(from_word("Clipped"), Some(O::Clipped));
        assert_eq!(from_word("+"), None);
    }

    #[test]
    fn unary_minus_is_also_binary() {
        assert!(is_binary(O::Minus));
        assert!(is_unary(O::Minus));
        assert!(!is_unary(O::Star));
    }
}
