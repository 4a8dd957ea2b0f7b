//! Error types for swimlane operations.
//!
//! This module provides the main error type [`SwimlaneError`] which wraps
//! the error conditions of every pipeline stage, together with the
//! stage-specific [`EncodingError`] and [`RenderError`].

use std::io;

use thiserror::Error;

use swimlane_parser::{ParseError, TaggerError};

/// The main error type for swimlane operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the token-file source next to the diagnostics
/// so that their byte spans can be rendered against it.
#[derive(Debug, Error)]
pub enum SwimlaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Tagger error: {0}")]
    Tagger(#[from] TaggerError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Config error: {0}")]
    Config(String),
}

impl SwimlaneError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Failures of the diagram encoder.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("compression failed: {0}")]
    Compress(#[source] io::Error),

    #[error("compressed stream is {0} bytes, shorter than its header and checksum")]
    Truncated(usize),

    #[error("invalid symbol `{symbol}` at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("decompression failed: {0}")]
    Decompress(#[source] io::Error),

    #[error("decoded diagram is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Failures of a heatmap or flow renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid style: {0}")]
    Style(String),

    #[error("renderer failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
