#![forbid(unsafe_code)]
//! Cursor-context completion engine for Genero 4GL.
//!
//! This crate is the *backward* half of the analyzer: given a byte offset
//! and a reversed view of the token stream, it classifies which in-progress
//! construct contains the cursor (a define statement, a type constraint, a
//! `LET` target, a call argument list, ...) and produces the matching set of
//! valid completions, drawing names from the forward parse's symbol tables
//! and the static catalogs.
//!
//! ## Notes
//! - Scanning backward from the cursor only has to examine the local
//!   context, which keeps completion robust while the file is mid-edit and
//!   full of syntax errors: the common case while typing.
//! - The resolver is deliberately conservative: ambiguous or malformed
//!   input yields "no specific context" and falls back to the generic
//!   keyword list rather than guessing.
//! - All shared tables live in an explicit [`catalog::CompletionCatalog`]
//!   built once by the caller and passed by reference; there is no global
//!   state.

pub mod catalog;
pub mod context_map;
mod contexts;
pub mod member;
pub mod resolver;
pub mod reverse;

pub use catalog::CompletionCatalog;
pub use member::{MemberKind, MemberResult};
pub use resolver::{CompletionAnalyzer, DatabaseProvider, Providers};
pub use reverse::{ReverseTokenizer, SliceReverseTokenizer};
