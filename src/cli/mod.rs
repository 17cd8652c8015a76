//! CLI module for the Genero 4GL analyzer.
//!
//! ## Commands
//!
//! - `check <file>` - Parse a module and print its diagnostics
//! - `outline <file>` - Print the module's AST outline
//! - `complete <file> --offset <n>` - Print completion members at a byte offset
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`; only the top-level `run()` handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Argument parsing
// ============================================================================

#[derive(Parser)]
#[command(name = "genero", version, about = "Genero 4GL parser and completion analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a module and print its diagnostics
    Check {
        /// Source file (.4gl)
        file: String,
    },
    /// Print the module's AST outline
    Outline {
        /// Source file (.4gl)
        file: String,
    },
    /// Print completion members at a byte offset
    Complete {
        /// Source file (.4gl)
        file: String,
        /// Byte offset of the cursor
        #[arg(long)]
        offset: usize,
    },
}

/// Parse arguments, dispatch, handle errors, exit.
pub fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Check { file } => commands::check_file(&file),
        Command::Outline { file } => commands::outline_file(&file),
        Command::Complete { file, offset } => commands::complete_file(&file, offset),
    };
    match result {
        Ok(code) => process::exit(code.0),
        Err(err) => {
            eprintln!("{}", err.message);
            process::exit(err.exit_code.0);
        }
    }
}
