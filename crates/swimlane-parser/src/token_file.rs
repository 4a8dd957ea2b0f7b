//! Reader for pre-tagged token files.
//!
//! A token file holds one token per line: the word, whitespace, then its
//! label. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # Example 1
//! Customer    B-ACTOR
//! submits     O
//! refund      B-TASK
//! request     I-TASK
//! ```
//!
//! All broken lines are reported together. An unrecognized label is only a
//! warning: the token is kept and the reducer treats it as noise.

use log::{debug, warn};
use winnow::{
    ModalResult, Parser as _,
    ascii::{space0, space1},
    combinator::{eof, opt, preceded, repeat},
    stream::Offset,
    token::take_till,
};

use swimlane_core::token::{Label, LabeledToken};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

const COMMENT_PREFIX: char = '#';

/// Tokens read from a token file, with the warnings raised while reading.
#[derive(Debug, Clone, Default)]
pub struct TokenFile {
    tokens: Vec<LabeledToken>,
    warnings: Vec<Diagnostic>,
}

impl TokenFile {
    pub fn tokens(&self) -> &[LabeledToken] {
        &self.tokens
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// The whitespace-separated columns of one line.
#[derive(Debug)]
struct Columns<'s> {
    word: &'s str,
    label: Option<&'s str>,
    extra: Vec<&'s str>,
}

fn column<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(1.., char::is_whitespace).parse_next(input)
}

fn columns<'s>(input: &mut &'s str) -> ModalResult<Columns<'s>> {
    let word = preceded(space0, column).parse_next(input)?;
    let label = opt(preceded(space1, column)).parse_next(input)?;
    let extra: Vec<&str> = repeat(0.., preceded(space1, column)).parse_next(input)?;
    (space0, eof).parse_next(input)?;

    Ok(Columns { word, label, extra })
}

/// Parses a token file.
///
/// # Errors
///
/// Returns a [`ParseError`] listing every line that is missing its label
/// (`E001`), has extra columns (`E002`), or cannot be split into columns
/// (`E003`).
///
/// # Examples
///
/// ```
/// # use swimlane_parser::parse_token_file;
/// let file = parse_token_file("Customer\tB-ACTOR\nsubmits\tO\n").unwrap();
/// assert_eq!(file.tokens().len(), 2);
///
/// assert!(parse_token_file("Customer\n").is_err());
/// ```
pub fn parse_token_file(source: &str) -> Result<TokenFile, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut tokens = Vec::new();
    let mut line_start = 0;

    for raw_line in source.split_inclusive('\n') {
        let offset = line_start;
        line_start += raw_line.len();

        let line = raw_line.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let span_of = |part: &str| {
            let start = offset + part.offset_from(&line);
            Span::new(start..start + part.len())
        };

        let Ok(cols) = columns.parse(line) else {
            collector.emit(
                Diagnostic::error("token line cannot be split into columns")
                    .with_code(ErrorCode::E003)
                    .with_label(span_of(line), "malformed line")
                    .with_help("separate the word and its label with a tab or spaces"),
            );
            continue;
        };

        let Some(label) = cols.label else {
            collector.emit(
                Diagnostic::error("token line has no label column")
                    .with_code(ErrorCode::E001)
                    .with_label(span_of(cols.word), "expected `<word> <label>`")
                    .with_help("use `O` for words outside any entity"),
            );
            continue;
        };

        if let Some(&first_extra) = cols.extra.first() {
            let mut diagnostic = Diagnostic::error("token line has more than two columns")
                .with_code(ErrorCode::E002)
                .with_label(span_of(first_extra), "unexpected column");
            for &extra in &cols.extra[1..] {
                diagnostic = diagnostic.with_secondary_label(span_of(extra), "unexpected column");
            }
            collector.emit(diagnostic.with_help("tokens cannot contain whitespace"));
            continue;
        }

        let label_span = span_of(label);
        let token = LabeledToken::new(cols.word, label);
        if let Label::Unknown(raw) = token.label() {
            warn!(label = raw.as_str(), offset = label_span.start(); "Unrecognized label");
            collector.emit(
                Diagnostic::warning(format!("unrecognized label `{raw}`"))
                    .with_code(ErrorCode::E010)
                    .with_label(label_span, "not `O` or a `B-`/`I-` entity tag")
                    .with_help("known classes are ACTOR, TASK, CONDITION and TASK_DETAIL"),
            );
        }
        tokens.push(token);
    }

    let warnings = collector.finish()?;
    debug!(tokens = tokens.len(), warnings = warnings.len(); "Token file parsed");

    Ok(TokenFile { tokens, warnings })
}
