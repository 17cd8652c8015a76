//! Diagnostics for the 4GL analyzer.
//!
//! The parser never throws for a grammar mismatch: expected-alternative
//! failures are signaled by `Option` returns, and everything the user should
//! see is pushed into a [`DiagnosticSink`] as a [`Diagnostic`]. Severity
//! follows the analyzer's taxonomy: structural problems are errors,
//! duplicate definitions and out-of-scope targets are warnings.

use crate::lexer::Span;
use std::fmt;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A reported syntax or semantic problem with location information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{severity}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}

impl Diagnostic {
    /// Create an error-severity diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Error,
        }
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            severity: Severity::Warning,
        }
    }
}

/// Ordered collection of diagnostics reported during one parse.
///
/// ## Notes
/// - Order is meaningful: determinism tests compare full ordered lists.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            message = %diagnostic.message,
            start = diagnostic.span.start,
            severity = %diagnostic.severity,
            "diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    /// Report an error-severity diagnostic.
    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::error(message, span));
    }

    /// Report a warning-severity diagnostic.
    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::warning(message, span));
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Count of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_preserves_report_order() {
        let mut sink = DiagnosticSink::new();
        sink.error("first", Span::new(0, 1));
        sink.warning("second", Span::new(2, 3));
        let list: Vec<_> = sink.iter().map(|d| d.message.clone()).collect();
        assert_eq!(list, vec!["first", "second"]);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn diagnostic_displays_severity() {
        let d = Diagnostic::warning("name defined more than once", Span::new(0, 4));
        assert_eq!(d.to_string(), "warning: name defined more than once");
    }
}
