//! Reserved keyword vocabulary for Genero 4GL.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records the canonical spelling and a coarse category used by the
//! completion engine to build keyword lists.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive** (`End`, `END`, and `end`
//!   are the same keyword).
//! - Type-name keywords (`INTEGER`, `DECIMAL`, ...) are also described in
//!   [`crate::lang::types`]; use that registry when you need constraint
//!   grammar metadata rather than token identity.
//! - A few spellings are aliases of the same id (`INT` ⇒ `INTEGER`,
//!   `DEC`/`NUMERIC` ⇒ `DECIMAL`), mirroring the Informix synonyms.
//!
//! ## Examples
//! ```rust
//! use genero_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("DEFINE"), Some(KeywordId::Define));
//! assert_eq!(keywords::from_str("int"), Some(KeywordId::Integer));
//! assert_eq!(keywords::as_str(KeywordId::EndKw), "end");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Program structure
    MainKw,
    EndKw,
    Function,
    Report,
    Globals,
    Import,
    Fgl,
    Schema,
    Database,
    Options,

    // Declarations
    Define,
    TypeKw,
    Constant,
    Public,
    Private,
    RecordKw,
    Like,
    Dynamic,
    Array,
    With,
    Dimension,
    Of,

    // Control flow
    If,
    Then,
    Else,
    While,
    For,
    Step,
    Foreach,
    Case,
    When,
    Otherwise,
    Try,
    Catch,
    Exit,
    Continue,
    Goto,
    Label,
    Return,
    Call,
    Returning,
    Let,
    Whenever,
    Defer,
    Sleep,
    Interrupt,
    Quit,
    Stop,
    Program,
    Anywhere,

    // UI blocks and clauses
    Display,
    Input,
    Prompt,
    Menu,
    Dialog,
    Construct,
    Message,
    ErrorKw,
    By,
    Name,
    Attribute,
    Attributes,
    Before,
    After,
    On,
    Action,
    Command,
    Key,
    Field,
    Help,
    Next,
    Previous,
    Without,
    Defaults,
    To,
    At,
    Clear,
    Show,
    Hide,

    // Misc statements
    Initialize,
    Locate,
    Validate,
    Load,
    Unload,
    Create,
    Drop,
    Table,
    Temp,
    Delimiter,
    Memory,
    In,
    File,

    // SQL
    Select,
    From,
    Where,
    Group,
    Order,
    Having,
    Union,
    All,
    Distinct,
    As,
    Asc,
    Desc,
    Into,
    Insert,
    Update,
    Delete,
    Values,
    Set,
    Between,
    Is,
    Null,
    Exists,

    // Cursors / dynamic SQL
    Declare,
    Cursor,
    Scroll,
    Hold,
    Prepare,
    Execute,
    Immediate,
    Open,
    Fetch,
    Close,
    Free,
    Current,
    Relative,
    Absolute,
    First,
    Last,
    Prior,

    // Word operators (also described in `operators`)
    And,
    Or,
    Not,
    Mod,
    Matches,
    Using,
    Clipped,
    Spaces,

    // Builtin type names (also described in `types`)
    Char,
    Varchar,
    StringKw,
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

    // Datetime/interval qualifiers
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
}

/// Coarse grouping used by completion keyword lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Structure,
    Declaration,
    ControlFlow,
    Ui,
    Sql,
    Cursor,
    WordOperator,
    TypeName,
    Qualifier,
    Misc,
}

/// Metadata for one reserved keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    /// Canonical (lowercase) spelling.
    pub canonical: &'static str,
    /// Accepted alias spellings (lowercase), e.g. `int` for `integer`.
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
}

use KeywordCategory as C;
use KeywordId as K;

/// The keyword registry. Iterated by completion keyword lists; canonical
/// spellings must stay lowercase and unique.
pub const KEYWORDS: &[KeywordInfo] = &[
    KeywordInfo { id: K::MainKw, canonical: "main", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::EndKw, canonical: "end", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Function, canonical: "function", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Report, canonical: "report", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Globals, canonical: "globals", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Import, canonical: "import", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Fgl, canonical: "fgl", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Schema, canonical: "schema", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Database, canonical: "database", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Options, canonical: "options", aliases: &[], category: C::Structure },
    KeywordInfo { id: K::Define, canonical: "define", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::TypeKw, canonical: "type", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Constant, canonical: "constant", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Public, canonical: "public", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Private, canonical: "private", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::RecordKw, canonical: "record", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Like, canonical: "like", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Dynamic, canonical: "dynamic", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Array, canonical: "array", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::With, canonical: "with", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Dimension, canonical: "dimension", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::Of, canonical: "of", aliases: &[], category: C::Declaration },
    KeywordInfo { id: K::If, canonical: "if", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Then, canonical: "then", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Else, canonical: "else", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::While, canonical: "while", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::For, canonical: "for", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Step, canonical: "step", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Foreach, canonical: "foreach", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Case, canonical: "case", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::When, canonical: "when", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Otherwise, canonical: "otherwise", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Try, canonical: "try", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Catch, canonical: "catch", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Exit, canonical: "exit", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Continue, canonical: "continue", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Goto, canonical: "goto", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Label, canonical: "label", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Return, canonical: "return", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Call, canonical: "call", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Returning, canonical: "returning", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Let, canonical: "let", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Whenever, canonical: "whenever", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Defer, canonical: "defer", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Sleep, canonical: "sleep", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Interrupt, canonical: "interrupt", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Quit, canonical: "quit", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Stop, canonical: "stop", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Program, canonical: "program", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Anywhere, canonical: "anywhere", aliases: &[], category: C::ControlFlow },
    KeywordInfo { id: K::Display, canonical: "display", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Input, canonical: "input", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Prompt, canonical: "prompt", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Menu, canonical: "menu", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Dialog, canonical: "dialog", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Construct, canonical: "construct", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Message, canonical: "message", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::ErrorKw, canonical: "error", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::By, canonical: "by", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Name, canonical: "name", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Attribute, canonical: "attribute", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Attributes, canonical: "attributes", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Before, canonical: "before", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::After, canonical: "after", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::On, canonical: "on", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Action, canonical: "action", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Command, canonical: "command", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Key, canonical: "key", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Field, canonical: "field", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Help, canonical: "help", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Next, canonical: "next", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Previous, canonical: "previous", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Without, canonical: "without", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Defaults, canonical: "defaults", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::To, canonical: "to", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::At, canonical: "at", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Clear, canonical: "clear", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Show, canonical: "show", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Hide, canonical: "hide", aliases: &[], category: C::Ui },
    KeywordInfo { id: K::Initialize, canonical: "initialize", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Locate, canonical: "locate", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Validate, canonical: "validate", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Load, canonical: "load", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Unload, canonical: "unload", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Create, canonical: "create", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Drop, canonical: "drop", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Table, canonical: "table", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Temp, canonical: "temp", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Delimiter, canonical: "delimiter", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Memory, canonical: "memory", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::In, canonical: "in", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::File, canonical: "file", aliases: &[], category: C::Misc },
    KeywordInfo { id: K::Select, canonical: "select", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::From, canonical: "from", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Where, canonical: "where", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Group, canonical: "group", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Order, canonical: "order", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Having, canonical: "having", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Union, canonical: "union", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::All, canonical: "all", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Distinct, canonical: "distinct", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::As, canonical: "as", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Asc, canonical: "asc", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Desc, canonical: "desc", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Into, canonical: "into", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Insert, canonical: "insert", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Update, canonical: "update", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Delete, canonical: "delete", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Values, canonical: "values", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Set, canonical: "set", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Between, canonical: "between", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Is, canonical: "is", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Null, canonical: "null", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Exists, canonical: "exists", aliases: &[], category: C::Sql },
    KeywordInfo { id: K::Declare, canonical: "declare", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Cursor, canonical: "cursor", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Scroll, canonical: "scroll", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Hold, canonical: "hold", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Prepare, canonical: "prepare", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Execute, canonical: "execute", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Immediate, canonical: "immediate", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Open, canonical: "open", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Fetch, canonical: "fetch", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Close, canonical: "close", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Free, canonical: "free", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Current, canonical: "current", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Relative, canonical: "relative", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Absolute, canonical: "absolute", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::First, canonical: "first", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Last, canonical: "last", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::Prior, canonical: "prior", aliases: &[], category: C::Cursor },
    KeywordInfo { id: K::And, canonical: "and", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Or, canonical: "or", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Not, canonical: "not", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Mod, canonical: "mod", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Matches, canonical: "matches", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Using, canonical: "using", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Clipped, canonical: "clipped", aliases: &[], category: C::WordOperator },
    KeywordInfo { id: K::Spaces, canonical: "spaces", aliases: &["space"], category: C::WordOperator },
    KeywordInfo { id: K::Char, canonical: "char", aliases: &["character"], category: C::TypeName },
    KeywordInfo { id: K::Varchar, canonical: "varchar", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::StringKw, canonical: "string", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Text, canonical: "text", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Byte, canonical: "byte", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Integer, canonical: "integer", aliases: &["int"], category: C::TypeName },
    KeywordInfo { id: K::Smallint, canonical: "smallint", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Bigint, canonical: "bigint", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Tinyint, canonical: "tinyint", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Decimal, canonical: "decimal", aliases: &["dec", "numeric"], category: C::TypeName },
    KeywordInfo { id: K::Money, canonical: "money", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Float, canonical: "float", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Smallfloat, canonical: "smallfloat", aliases: &["real"], category: C::TypeName },
    KeywordInfo { id: K::Date, canonical: "date", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Datetime, canonical: "datetime", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Interval, canonical: "interval", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Boolean, canonical: "boolean", aliases: &[], category: C::TypeName },
    KeywordInfo { id: K::Year, canonical: "year", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Month, canonical: "month", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Day, canonical: "day", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Hour, canonical: "hour", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Minute, canonical: "minute", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Second, canonical: "second", aliases: &[], category: C::Qualifier },
    KeywordInfo { id: K::Fraction, canonical: "fraction", aliases: &[], category: C::Qualifier },
];

/// Resolve a spelling to its keyword id, if reserved. Case-insensitive.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|info| {
            info.canonical.eq_ignore_ascii_case(spelling)
                || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(spelling))
        })
        .map(|info| info.id)
}

/// Canonical (lowercase) spelling for a keyword id.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Registry metadata for a keyword id.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|info| info.id == id)
        .unwrap_or_else(|| unreachable!("keyword id missing from registry"))
}

/// Keywords that can begin a statement inside a block. Used by the generic
/// completion fallback when no more specific context is recognized.
pub fn statement_starters() -> impl Iterator<Item = &'static KeywordInfo> {
    const STARTERS: &[KeywordId] = &[
        K::Call,
        K::Case,
        K::Close,
        K::Construct,
        K::Continue,
        K::Declare,
        K::Define,
        K::Defer,
        K::Delete,
        K::Dialog,
        K::Display,
        K::ErrorKw,
        K::Execute,
        K::Exit,
        K::Fetch,
        K::For,
        K::Foreach,
        K::Free,
        K::Goto,
        K::If,
        K::Initialize,
        K::Input,
        K::Insert,
        K::Let,
        K::Load,
        K::Locate,
        K::Menu,
        K::Message,
        K::Open,
        K::Options,
        K::Prepare,
        K::Prompt,
        K::Return,
        K::Select,
        K::Sleep,
        K::Try,
        K::Unload,
        K::Update,
        K::Validate,
        K::Whenever,
        K::While,
    ];
    STARTERS.iter().map(|id| info_for(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(from_str("define"), Some(K::Define));
        assert_eq!(from_str("DEFINE"), Some(K::Define));
        assert_eq!(from_str("Define"), Some(K::Define));
        assert_eq!(from_str("definitely"), None);
    }

    #[test]
    fn aliases_resolve_to_canonical_id() {
        assert_eq!(from_str("int"), Some(K::Integer));
        assert_eq!(from_str("DEC"), Some(K::Decimal));
        assert_eq!(from_str("numeric"), Some(K::Decimal));
        assert_eq!(from_str("character"), Some(K::Char));
        assert_eq!(as_str(K::Integer), "integer");
    }

    #[test]
    fn canonical_spellings_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for info in KEYWORDS {
            assert!(
                info.canonical.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "non-lowercase canonical spelling: {}",
                info.canonical
            );
            assert!(seen.insert(info.canonical), "duplicate spelling: {}", info.canonical);
        }
    }

    #[test]
    fn statement_starters_are_registered() {
        assert!(statement_starters().count() > 30);
    }
}
