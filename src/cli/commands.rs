//! CLI command implementations.
//!
//! Each command has a pure core (`&str` in, `String`/diagnostics out) used
//! by tests, and a thin file-reading wrapper used by the dispatcher.

use std::fs;

use genero_complete::{CompletionAnalyzer, CompletionCatalog, Providers, SliceReverseTokenizer};
use genero_syntax::diagnostics::{Diagnostic, Severity};
use genero_syntax::{lexer, outline, parser};

use super::{CliError, CliResult, ExitCode};

// ============================================================================
// check
// ============================================================================

/// Parse `source` and return its ordered diagnostics.
pub fn check_source(source: &str) -> Vec<Diagnostic> {
    let tokens = match lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(diagnostics) => return diagnostics,
    };
    parser::parse_module(&tokens).diagnostics
}

pub fn check_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let diagnostics = check_source(&source);
    let mut worst = ExitCode::SUCCESS;
    for diagnostic in &diagnostics {
        if diagnostic.severity == Severity::Error {
            worst = ExitCode::FAILURE;
        }
        eprintln!("{}", render_diagnostic(path, &source, diagnostic));
    }
    if diagnostics.is_empty() {
        println!("{}: ok", path);
    }
    Ok(worst)
}

/// Render one diagnostic with source context via miette.
fn render_diagnostic(path: &str, source: &str, diagnostic: &Diagnostic) -> String {
    let report = miette::Report::new(RenderedDiagnostic {
        message: diagnostic.message.clone(),
        severity: match diagnostic.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        },
        src: miette::NamedSource::new(path, source.to_string()),
        span: miette::SourceSpan::new(
            diagnostic.span.start.into(),
            diagnostic.span.end.saturating_sub(diagnostic.span.start),
        ),
    });
    format!("{:?}", report)
}

/// Adapter from the analyzer's diagnostics to miette's model.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct RenderedDiagnostic {
    message: String,
    severity: miette::Severity,
    src: miette::NamedSource<String>,
    span: miette::SourceSpan,
}

impl miette::Diagnostic for RenderedDiagnostic {
    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(self.message.clone()),
            self.span.clone(),
        ))))
    }
}

// ============================================================================
// outline
// ============================================================================

/// Render the AST outline of `source`.
pub fn outline_source(source: &str) -> Result<String, Vec<Diagnostic>> {
    let tokens = lexer::lex(source)?;
    let parse = parser::parse_module(&tokens);
    Ok(outline::render(&parse.ast))
}

pub fn outline_file(path: &str) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    match outline_source(&source) {
        Ok(rendered) => {
            print!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprintln!("{}", render_diagnostic(path, &source, diagnostic));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// complete
// ============================================================================

/// Completion member names at `offset`, one per line as `name<TAB>detail`.
pub fn complete_source(source: &str, offset: usize) -> Result<String, Vec<Diagnostic>> {
    let tokens = lexer::lex(source)?;
    let module = parser::parse_module(&tokens);
    let catalog = CompletionCatalog::new();
    let analyzer = CompletionAnalyzer::new(&catalog, &module, Providers::default());
    let reverse = SliceReverseTokenizer::new(&tokens);
    let mut out = String::new();
    for member in analyzer.members_at(offset, &reverse) {
        out.push_str(&member.name);
        out.push('\t');
        out.push_str(&member.detail);
        out.push('\n');
    }
    Ok(out)
}

pub fn complete_file(path: &str, offset: usize) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    if offset > source.len() {
        return Err(CliError::failure(format!(
            "offset {} is past the end of {} ({} bytes)",
            offset,
            path,
            source.len()
        )));
    }
    match complete_source(&source, offset) {
        Ok(rendered) => {
            print!("{}", rendered);
            Ok(ExitCode::SUCCESS)
        }
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprintln!("{}", render_diagnostic(path, &source, diagnostic));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

// ============================================================================
// shared
// ============================================================================

fn read_source(path: &str) -> CliResult<String> {
    fs::read_to_string(path).map_err(|err| CliError::failure(format!("cannot read {}: {}", path, err)))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn check_source_reports_parse_errors() {
        let diagnostics = check_source("MAIN\nIF a THEN\n");
        assert!(diagnostics.iter().any(|d| d.message.contains("end if")));
    }

    #[test]
    fn outline_source_renders_the_tree() {
        let rendered = outline_source("MAIN\nEND MAIN\n").expect("outline renders");
        assert!(rendered.contains("module"));
        assert!(rendered.contains("main"));
    }

    #[test]
    fn complete_source_lists_members() {
        let source = "MAIN\nDEFINE total INTEGER\nLET ";
        let rendered = complete_source(source, source.len()).expect("completion renders");
        assert!(rendered.contains("total"));
    }
}
