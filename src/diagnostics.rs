//! Collected parser diagnostics
//!
//! Warnings never stop parsing; an error is recorded and handed back as a
//! [`ParseError`] for the caller to propagate. Each entry is also emitted as
//! a `tracing` event: warnings at `warn`, errors at `debug`.

use crate::parser::ast::SourceLocation;
use crate::parser::parse::ParseError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at (Line {}, Col {}): {}",
            self.severity, self.location.line, self.location.column, self.message
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(&mut self, location: SourceLocation, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(line = location.line, column = location.column, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            location,
            message,
        });
    }

    /// Record an error and return it as a failure to propagate. The caller
    /// reports it, so the log event stays at debug level.
    pub fn error(&mut self, location: SourceLocation, message: impl Into<String>) -> ParseError {
        let message = message.into();
        tracing::debug!(line = location.line, column = location.column, "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            location,
            message: message.clone(),
        });
        ParseError { message, location }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_format() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning(SourceLocation::new(3, 7), "empty statement");

        let entry = &diagnostics.entries()[0];
        assert_eq!(entry.to_string(), "Warning at (Line 3, Col 7): empty statement");
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_error_is_recorded_and_returned() {
        let mut diagnostics = Diagnostics::new();
        let err = diagnostics.error(SourceLocation::new(1, 2), "unterminated block");

        assert_eq!(err.message, "unterminated block");
        assert_eq!(err.location, SourceLocation::new(1, 2));
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.warnings().count(), 0);
    }
}
