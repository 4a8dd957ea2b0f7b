//! The error returned when a token file cannot be read.

use std::fmt;

use crate::error::Diagnostic;

/// One or more fatal diagnostics, plus any warnings gathered with them.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error, in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.diagnostics.iter().filter(|d| d.severity().is_error());
        if let Some(first) = errors.next() {
            write!(f, "{first}")?;
            let more = errors.count();
            if more > 0 {
                write!(f, " (+{more} more)")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_single() {
        let err: ParseError = Diagnostic::error("missing label").into();
        assert_eq!(err.to_string(), "error: missing label");
    }

    #[test]
    fn test_parse_error_display_counts_errors_only() {
        let err: ParseError = vec![
            Diagnostic::warning("odd label"),
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
        ]
        .into();

        assert_eq!(err.diagnostics().len(), 3);
        assert_eq!(err.to_string(), "error: first error (+1 more)");
    }
}
