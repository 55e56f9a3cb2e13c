//! Diagnostic vocabulary shared by every analysis pass.
//!
//! A [`Diagnostic`] is the single output channel for user-visible failure
//! (see `spec.md` §7): no analysis pass ever panics or returns a Rust
//! `Result::Err` for a semantic problem in the analyzed program — it always
//! records a `Diagnostic` and keeps going. `Result`/`SpannedError` remain
//! for genuine API misuse (e.g. looking up a scope that was never pushed).

use crate::span::{SourceLocation, Span};
use std::fmt;

/// How serious a diagnostic is. Only [`Severity::Error`] affects
/// [`crate::diagnostic::Diagnostic`]-consuming success computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        };
        write!(f, "{s}")
    }
}

/// Typed payload attached to diagnostics whose message alone would lose
/// information a caller might want structurally (a type pair, a recursion
/// cycle, an argument-count mismatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticDetails {
    /// Two type names involved in an assignability/arithmetic failure.
    TypePair { source: String, target: String },
    /// A single type name (e.g. the unknown type annotation text).
    TypeName(String),
    /// The cycle of function or module names participating in a recursion
    /// or circular-import diagnostic.
    Cycle(Vec<String>),
    /// Expected vs. actual argument count.
    ArgCount { expected: usize, found: usize },
}

/// A single diagnostic: severity, stable code, message, and location.
///
/// `code` uses the stable identifiers of `spec.md` §7 (`UNDEFINED_SYMBOL`,
/// `RECURSION_DETECTED`, ...) rather than language-specific names, so
/// downstream tooling can match on `code` without parsing `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    pub location: SourceLocation,
    pub details: Option<DiagnosticDetails>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: &'static str,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self { severity, code, message: message.into(), location, details: None }
    }

    pub fn error(code: &'static str, message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Severity::Error, code, message, location)
    }

    pub fn warning(code: &'static str, message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Severity::Warning, code, message, location)
    }

    pub fn with_details(mut self, details: DiagnosticDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} ({})", self.severity, self.code, self.message, self.location)
    }
}

/// An error annotated with its source [`Span`], for genuine API misuse
/// rather than semantic problems in analyzed programs.
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub message: String,
    pub span: Span,
}

impl SpannedError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    fn loc() -> SourceLocation {
        SourceLocation {
            start: Position { line: 1, column: 1, offset: 0 },
            end: Position { line: 1, column: 5, offset: 4 },
            file: None,
        }
    }

    #[test]
    fn error_constructor_sets_severity() {
        let d = Diagnostic::error("UNDEFINED_SYMBOL", "unknown identifier 'x'", loc());
        assert!(d.is_error());
        assert_eq!(d.severity, Severity::Error);
    }

    #[test]
    fn warning_constructor_is_not_error() {
        let d = Diagnostic::warning("MISSING_RETURN", "not all paths return", loc());
        assert!(!d.is_error());
    }

    #[test]
    fn with_details_attaches_payload() {
        let d = Diagnostic::error("TYPE_MISMATCH", "mismatched types", loc()).with_details(
            DiagnosticDetails::TypePair { source: "word".into(), target: "byte".into() },
        );
        assert_eq!(
            d.details,
            Some(DiagnosticDetails::TypePair { source: "word".into(), target: "byte".into() })
        );
    }

    #[test]
    fn display_includes_code_and_message() {
        let d = Diagnostic::error("UNDEFINED_SYMBOL", "unknown identifier 'x'", loc());
        let s = d.to_string();
        assert!(s.contains("UNDEFINED_SYMBOL"));
        assert!(s.contains("unknown identifier 'x'"));
    }

    #[test]
    fn spanned_error_display() {
        let err = SpannedError::new("test error", Span::new(5, 10));
        let display = err.to_string();
        assert!(display.contains("test error"));
        assert!(display.contains("5..10"));
    }
}
