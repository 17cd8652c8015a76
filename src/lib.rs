#![forbid(unsafe_code)]
//! Genero 4GL analyzer
//!
//! A hand-written recursive-descent parser and cursor-context completion
//! engine for the Genero/Informix 4GL language. The heavy lifting lives in
//! the workspace crates: `genero_core` (vocabulary registries),
//! `genero_syntax` (lexer, arena AST, forward parser, symbol tables), and
//! `genero_complete` (reverse context resolver): this crate is the thin
//! CLI driver on top.
//!
//! ## Panic Policy
//!
//! - **Production code**: use `Result` or `Option` with `?`; the `cli`
//!   module enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` / `.expect()` are acceptable.

pub mod cli;

pub use genero_complete::{CompletionAnalyzer, CompletionCatalog, Providers};
pub use genero_syntax::{ast, diagnostics, lexer, outline, parser, symbols};
