#![forbid(unsafe_code)]
//! Syntax frontend for the Genero 4GL analyzer: lexer, arena AST,
//! recursive-descent parser, diagnostics, symbol tables.
//!
//! This crate is the *forward* half of the analyzer. It turns source text
//! into a token stream, and a token stream into a whole-module AST annotated
//! with per-scope symbol tables. It performs no semantic checking beyond
//! duplicate-definition detection; the completion engine (the backward half)
//! lives in `genero_complete` and shares this crate's token and AST types.
//!
//! ## Notes
//! - Parsing is single-pass with per-statement error recovery: a fatal error
//!   inside a block marks the enclosing node incomplete but never discards
//!   the module tree.
//! - All names (keywords, identifiers, symbols) compare case-insensitively;
//!   the folding rule lives in `genero_core::strings`.
//!
//! ## Examples
//! ```rust,no_run
//! use genero_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("MAIN\n  DISPLAY \"hi\"\nEND MAIN\n").unwrap();
//! let parse = parser::parse_module(&tokens);
//! assert!(parse.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod outline;
pub mod parser;
pub mod symbols;
pub mod token_helpers;
