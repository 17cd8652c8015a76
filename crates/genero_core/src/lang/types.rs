//! Builtin scalar type registry.
//!
//! Describes every builtin 4GL scalar type: canonical spelling, alias
//! spellings, and which constraint grammar the type accepts after its name
//! (`CHAR(n)`, `DECIMAL(p,s)`, `DATETIME YEAR TO SECOND`, ...). The parser's
//! constraint checker is driven entirely by this table, so adding a type is
//! a registry edit, not a parser edit.
//!
//! ## Examples
//! ```rust
//! use genero_core::lang::types::{self, BuiltinTypeId, ConstraintKind};
//!
//! let info = types::from_str("dec").unwrap();
//! assert_eq!(info.id, BuiltinTypeId::Decimal);
//! assert_eq!(info.constraint, ConstraintKind::Arguments { min: 1, max: 2 });
//! ```

/// Stable identifier for every builtin scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Char,
    Varchar,
    String,
    Text,
    Byte,
    Integer,
    Smallint,
    Bigint,
    Tinyint,
    Decimal,
    Money,
    Float,
    Smallfloat,
    Date,
    Datetime,
    Interval,
    Boolean,
}

/// Constraint grammar accepted after a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// No constraint suffix is legal.
    None,
    /// `( n )` up to `( n, m )`: length or precision/scale arguments.
    Arguments { min: u8, max: u8 },
    /// `q1 TO q2[(scale)]`: datetime qualifier range.
    DatetimeRange,
    /// `q1[(n)] TO q2[(scale)]`: interval qualifier range.
    IntervalRange,
}

/// Metadata for one builtin scalar type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub id: BuiltinTypeId,
    /// Canonical (lowercase) spelling.
    pub canonical: &'static str,
    /// Accepted alias spellings (lowercase).
    pub aliases: &'static [&'static str],
    pub constraint: ConstraintKind,
}

use BuiltinTypeId as T;
use ConstraintKind as CK;

/// The builtin type registry.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    BuiltinTypeInfo { id: T::Char, canonical: "char", aliases: &["character"], constraint: CK::Arguments { min: 1, max: 1 } },
    BuiltinTypeInfo { id: T::Varchar, canonical: "varchar", aliases: &[], constraint: CK::Arguments { min: 1, max: 2 } },
    BuiltinTypeInfo { id: T::String, canonical: "string", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Text, canonical: "text", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Byte, canonical: "byte", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Integer, canonical: "integer", aliases: &["int"], constraint: CK::None },
    BuiltinTypeInfo { id: T::Smallint, canonical: "smallint", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Bigint, canonical: "bigint", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Tinyint, canonical: "tinyint", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Decimal, canonical: "decimal", aliases: &["dec", "numeric"], constraint: CK::Arguments { min: 1, max: 2 } },
    BuiltinTypeInfo { id: T::Money, canonical: "money", aliases: &[], constraint: CK::Arguments { min: 1, max: 2 } },
    BuiltinTypeInfo { id: T::Float, canonical: "float", aliases: &[], constraint: CK::Arguments { min: 0, max: 1 } },
    BuiltinTypeInfo { id: T::Smallfloat, canonical: "smallfloat", aliases: &["real"], constraint: CK::None },
    BuiltinTypeInfo { id: T::Date, canonical: "date", aliases: &[], constraint: CK::None },
    BuiltinTypeInfo { id: T::Datetime, canonical: "datetime", aliases: &[], constraint: CK::DatetimeRange },
    BuiltinTypeInfo { id: T::Interval, canonical: "interval", aliases: &[], constraint: CK::IntervalRange },
    BuiltinTypeInfo { id: T::Boolean, canonical: "boolean", aliases: &[], constraint: CK::None },
];

/// Resolve a spelling to its builtin type, if any. Case-insensitive.
pub fn from_str(spelling: &str) -> Option<&'static BuiltinTypeInfo> {
    BUILTIN_TYPES.iter().find(|info| {
        info.canonical.eq_ignore_ascii_case(spelling)
            || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(spelling))
    })
}

/// Registry metadata for a builtin type id.
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|info| info.id == id)
        .unwrap_or_else(|| unreachable!("builtin type id missing from registry"))
}

// ============================================================================
// Datetime / interval qualifiers
// ============================================================================

/// Time-unit qualifier used by `DATETIME` and `INTERVAL` constraints.
///
/// Qualifiers are ordered coarse-to-fine: a range `q1 TO q2` is only legal
/// when `q1` is at least as coarse as `q2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeQualifier {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
}

impl TimeQualifier {
    /// Coarseness rank: lower is coarser (`Year` = 0, `Fraction` = 6).
    pub fn rank(self) -> u8 {
        match self {
            TimeQualifier::Year => 0,
            TimeQualifier::Month => 1,
            TimeQualifier::Day => 2,
            TimeQualifier::Hour => 3,
            TimeQualifier::Minute => 4,
            TimeQualifier::Second => 5,
            TimeQualifier::Fraction => 6,
        }
    }

    /// Canonical (lowercase) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeQualifier::Year => "year",
            TimeQualifier::Month => "month",
            TimeQualifier::Day => "day",
            TimeQualifier::Hour => "hour",
            TimeQualifier::Minute => "minute",
            TimeQualifier::Second => "second",
            TimeQualifier::Fraction => "fraction",
        }
    }

    /// Resolve a spelling to a qualifier. Case-insensitive.
    pub fn from_str(spelling: &str) -> Option<TimeQualifier> {
        const ALL: &[TimeQualifier] = &[
            TimeQualifier::Year,
            TimeQualifier::Month,
            TimeQualifier::Day,
            TimeQualifier::Hour,
            TimeQualifier::Minute,
            TimeQualifier::Second,
            TimeQualifier::Fraction,
        ];
        ALL.iter().copied().find(|q| q.as_str().eq_ignore_ascii_case(spelling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(from_str("INT").map(|i| i.id), Some(T::Integer));
        assert_eq!(from_str("numeric").map(|i| i.id), Some(T::Decimal));
        assert_eq!(from_str("real").map(|i| i.id), Some(T::Smallfloat));
        assert!(from_str("blob").is_none());
    }

    #[test]
    fn qualifier_ranks_are_ordered() {
        assert!(TimeQualifier::Year.rank() < TimeQualifier::Month.rank());
        assert!(TimeQualifier::Second.rank() < TimeQualifier::Fraction.rank());
        assert_eq!(TimeQualifier::from_str("HOUR"), Some(TimeQualifier::Hour));
    }

    #[test]
    fn char_takes_exactly_one_argument() {
        assert_eq!(info_for(T::Char).constraint, CK::Arguments { min: 1, max: 1 });
        assert_eq!(info_for(T::Float).constraint, CK::Arguments { min: 0, max: 1 });
    }
}
