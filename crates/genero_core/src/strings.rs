//! Case-insensitive name handling.
//!
//! 4GL identifiers, keywords, and symbol names compare case-insensitively.
//! Every map keyed by a user-visible name in this workspace goes through
//! [`fold`] so the folding rule lives in exactly one place.

/// Fold a name to its canonical (lowercase) lookup key.
///
/// ## Examples
/// ```rust
/// assert_eq!(genero_core::strings::fold("SqlCa"), "sqlca");
/// ```
pub fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Compare two names under 4GL case-insensitivity.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_is_ascii_lowercase() {
        assert_eq!(fold("END"), "end");
        assert_eq!(fold("MiXeD_123"), "mixed_123");
    }

    #[test]
    fn names_equal_ignores_case() {
        assert!(names_equal("NOTFOUND", "NotFound"));
        assert!(!names_equal("status", "state"));
    }
}
