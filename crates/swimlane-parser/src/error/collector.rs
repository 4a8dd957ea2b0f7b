//! Collector for accumulating diagnostics while reading a file.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so every broken line is reported at once.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic, noting whether it is fatal.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finishes collection.
    ///
    /// Returns the warnings when nothing fatal was emitted, otherwise a
    /// [`ParseError`] holding every diagnostic.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_empty_finish_ok() {
        let warnings = DiagnosticCollector::new().finish().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_collector_warnings_only_finish_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("odd label"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_collector_error_keeps_everything() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::error("error 1"));
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::error("error 2"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }
}
