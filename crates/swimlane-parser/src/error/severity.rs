//! Diagnostic severity.

use std::fmt;

/// How a diagnostic affects reading a token file.
///
/// Any [`Severity::Error`] makes the whole read fail; warnings are handed
/// back alongside the tokens so the caller can log them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The line cannot be turned into a token.
    Error,

    /// The line was read, but part of it will be ignored downstream.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}
