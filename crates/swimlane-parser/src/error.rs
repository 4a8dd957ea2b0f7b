//! Error and diagnostic system for the swimlane parser.
//!
//! Token reduction itself never fails: malformed labels are noise, not
//! errors. Diagnostics come from reading token files, where a line can be
//! structurally broken (missing or extra columns) or carry a label that will
//! be ignored during reduction.
//!
//! # Overview
//!
//! A [`Diagnostic`] is a single error or warning with an optional
//! [`ErrorCode`], labeled source spans and help text. Fatal diagnostics are
//! wrapped in [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use swimlane_parser::error::{Diagnostic, ErrorCode};
//! # use swimlane_parser::Span;
//! let diag = Diagnostic::error("token line has no label column")
//!     .with_code(ErrorCode::E001)
//!     .with_label(Span::new(0..8), "expected `<word> <label>`")
//!     .with_help("separate the word and its label with a tab or spaces");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
