//! Error codes for token-file diagnostics.
//!
//! - `E00x` - Line structure errors
//! - `E01x` - Label warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Line structure (E00x)
    // =========================================================================
    /// Missing label column.
    ///
    /// A token line holds a word but no label after it.
    E001,

    /// Unexpected extra column.
    ///
    /// A token line holds more than a word and a label. Tokens never contain
    /// whitespace, so a third column means the line was split incorrectly.
    E002,

    /// Malformed token line.
    ///
    /// The line contains characters that cannot separate columns.
    E003,

    // =========================================================================
    // Labels (E01x)
    // =========================================================================
    /// Unrecognized label.
    ///
    /// The label is neither `O` nor a `B-`/`I-` tag over a known class. The
    /// token is kept and treated as noise during reduction.
    E010,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E010 => "E010",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "missing label column",
            ErrorCode::E002 => "unexpected extra column",
            ErrorCode::E003 => "malformed token line",
            ErrorCode::E010 => "unrecognized label",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E010.to_string(), "E010");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "missing label column");
        assert_eq!(ErrorCode::E010.description(), "unrecognized label");
    }
}
