//! The tagger collaborator.
//!
//! A [`Tagger`] turns raw process text into [`LabeledToken`]s in reading
//! order. Model-backed taggers typically emit sub-word pieces; feed their
//! raw output through [`merge_subwords`] before reduction.

use log::debug;
use thiserror::Error;

use swimlane_core::token::LabeledToken;

/// Marks a sub-word piece that continues the previous word.
const CONTINUATION_PREFIX: &str = "##";

/// Errors raised by a tagger implementation.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("tagger backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("tagger is unavailable: {0}")]
    Unavailable(String),
}

/// Maps raw text to labeled tokens in left-to-right reading order.
///
/// No guarantee of linguistic correctness is expected; the reduction stage
/// tolerates any label sequence.
pub trait Tagger {
    /// Tags `text`.
    ///
    /// # Errors
    ///
    /// Returns [`TaggerError`] when the underlying model or service fails.
    fn tag(&self, text: &str) -> Result<Vec<LabeledToken>, TaggerError>;
}

impl<F> Tagger for F
where
    F: Fn(&str) -> Result<Vec<LabeledToken>, TaggerError>,
{
    fn tag(&self, text: &str) -> Result<Vec<LabeledToken>, TaggerError> {
        self(text)
    }
}

/// Merges word pieces (`refund`, `##able`) into whole words.
///
/// A piece prefixed with `##` is appended to the preceding word and its own
/// label is dropped; the merged word keeps the label of its first piece. A
/// continuation piece with nothing before it starts a word of its own.
///
/// # Examples
///
/// ```
/// # use swimlane_parser::merge_subwords;
/// let merged = merge_subwords([("re", "B-TASK"), ("##fund", "I-TASK"), ("now", "O")]);
///
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].text(), "refund");
/// assert_eq!(merged[0].label().to_string(), "B-TASK");
/// ```
pub fn merge_subwords<I, W, L>(pieces: I) -> Vec<LabeledToken>
where
    I: IntoIterator<Item = (W, L)>,
    W: AsRef<str>,
    L: AsRef<str>,
{
    let mut merged: Vec<(String, String)> = Vec::new();
    let mut piece_count = 0usize;

    for (piece, label) in pieces {
        piece_count += 1;
        let piece = piece.as_ref();

        let word = match piece.strip_prefix(CONTINUATION_PREFIX) {
            Some(rest) => {
                if let Some((word, _)) = merged.last_mut() {
                    word.push_str(rest);
                    continue;
                }
                rest
            }
            None => piece,
        };
        merged.push((word.to_string(), label.as_ref().to_string()));
    }

    debug!(pieces = piece_count, words = merged.len(); "Word pieces merged");

    merged
        .into_iter()
        .map(|(word, label)| LabeledToken::new(word, &label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_passes_whole_words_through() {
        let merged = merge_subwords([("Customer", "B-ACTOR"), ("submits", "O")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].text(), "submits");
    }

    #[test]
    fn test_merge_keeps_first_piece_label() {
        let merged = merge_subwords([
            ("re", "B-TASK"),
            ("##im", "O"),
            ("##burse", "I-ACTOR"),
            ("costs", "I-TASK"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text(), "reimburse");
        assert_eq!(merged[0].label().to_string(), "B-TASK");
        assert_eq!(merged[1].text(), "costs");
    }

    #[test]
    fn test_merge_leading_continuation_starts_word() {
        let merged = merge_subwords([("##ing", "O"), ("agent", "B-ACTOR")]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text(), "ing");
    }

    #[test]
    fn test_closure_is_a_tagger() {
        let tagger = |text: &str| -> Result<Vec<LabeledToken>, TaggerError> {
            Ok(text
                .split_whitespace()
                .map(|word| LabeledToken::new(word, "O"))
                .collect())
        };

        let tokens = tagger.tag("the customer waits").unwrap();
        assert_eq!(tokens.len(), 3);
    }
}
