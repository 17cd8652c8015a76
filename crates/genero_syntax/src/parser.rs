//! Recursive-descent parser for Genero 4GL.
//!
//! Converts a token stream into an arena AST ([`crate::ast::Ast`]) with
//! per-scope symbol tables, recovering from errors at statement boundaries
//! so a broken file still produces a usable tree.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use genero_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("MAIN\n  DISPLAY \"hi\"\nEND MAIN\n").unwrap();
//! let parse = parser::parse_module(&tokens);
//! assert!(parse.root.is_some());
//! ```

use crate::ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::lexer::{Span, Token, TokenKind};
use crate::symbols::{Scope, Symbol, SymbolKind, SymbolMap};
use genero_core::lang::keywords::KeywordId;
use genero_core::lang::operators::{self, OperatorId};
use genero_core::lang::punctuation::PunctuationId;
use genero_core::lang::types as builtin_types;
use genero_core::lang::types::{ConstraintKind, TimeQualifier};

// NOTE: This module is split across multiple files using `include!` to keep
// all parser methods in the same Rust module (preserving privacy + call
// patterns) while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/expr.rs");
include!("parser/types.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/sql.rs");
include!("parser/module.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
