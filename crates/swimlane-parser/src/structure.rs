//! Reduction of labeled tokens into structural elements.
//!
//! The reduction is a single forward pass driven by a small state machine.
//! The state is the open [`Segment`]: the words collected so far and the
//! entity class they belong to. Every token is classified into one
//! [`Transition`], and each transition has exactly one effect on the state:
//!
//! | Transition | Trigger | Effect |
//! |------------|---------|--------|
//! | `BranchMarker` | word is `else`/`otherwise` | close segment, emit the marker as a condition |
//! | `Begin` | `B-<CLASS>` | close segment, open a new one |
//! | `Extend` | `I-<CLASS>` matching the open segment | append the word |
//! | `Noise` | mismatched `I-`, bare class name | nothing |
//! | `Break` | `O` or unknown class | close segment |
//!
//! Closing a segment emits a [`StructuralElement`] unless its class is
//! [`EntityClass::TaskDetail`]: task details are collected so that
//! `I-TASK_DETAIL` continuations are absorbed, then discarded.

use log::{debug, trace};

use swimlane_core::{
    element::{ElementKind, StructuralElement, is_branch_alternative},
    token::{EntityClass, Label, LabeledToken},
};

/// Reduces a labeled token stream into ordered structural elements.
///
/// Never fails; labels that do not follow the tagging convention are
/// treated as noise.
///
/// # Examples
///
/// ```
/// # use swimlane_core::{element::ElementKind, token::LabeledToken};
/// # use swimlane_parser::reduce;
/// let tokens = [
///     LabeledToken::new("Customer", "B-ACTOR"),
///     LabeledToken::new("submits", "O"),
///     LabeledToken::new("refund", "B-TASK"),
///     LabeledToken::new("request", "I-TASK"),
/// ];
///
/// let elements = reduce(&tokens);
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[0].kind(), ElementKind::Actor);
/// assert_eq!(elements[1].text(), "refund request");
/// ```
pub fn reduce(tokens: &[LabeledToken]) -> Vec<StructuralElement> {
    let mut builder = StructureBuilder::new();
    for token in tokens {
        builder.push(token);
    }

    let elements = builder.finish();
    debug!(tokens = tokens.len(), elements = elements.len(); "Tokens reduced");
    elements
}

/// Words collected for the entity currently being read.
#[derive(Debug)]
struct Segment<'a> {
    class: EntityClass,
    words: Vec<&'a str>,
}

/// The effect a single token has on the builder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    BranchMarker,
    Begin(EntityClass),
    Extend,
    Noise,
    Break,
}

/// Classifies `token` given the class of the open segment, if any.
pub(crate) fn classify(open: Option<EntityClass>, token: &LabeledToken) -> Transition {
    if is_branch_alternative(token.text()) {
        return Transition::BranchMarker;
    }

    match token.label() {
        Label::Begin(class) => Transition::Begin(*class),
        Label::Inside(class) if open == Some(*class) => Transition::Extend,
        Label::Inside(_) => Transition::Noise,
        Label::Outside => Transition::Break,
        Label::Unknown(raw) => {
            // A known class without a usable prefix (`TASK`, `X-TASK`) is
            // ignored; an unknown class ends the segment like `O`.
            let base = raw.rsplit('-').next().unwrap_or(raw);
            if base.parse::<EntityClass>().is_ok() {
                Transition::Noise
            } else {
                Transition::Break
            }
        }
    }
}

/// Joins the trimmed, non-empty words of a segment.
pub(crate) fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Incremental token-to-structure reducer.
///
/// Feed tokens in reading order with [`push`](Self::push) and collect the
/// elements with [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct StructureBuilder<'a> {
    segment: Option<Segment<'a>>,
    elements: Vec<StructuralElement>,
}

impl<'a> StructureBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one token.
    pub fn push(&mut self, token: &'a LabeledToken) {
        let transition = self.classify(token);
        trace!(text = token.text(), label:% = token.label(), transition:?; "Token classified");

        match transition {
            Transition::BranchMarker => {
                self.close_segment();
                self.emit(ElementKind::Condition, token.text());
            }
            Transition::Begin(class) => {
                self.close_segment();
                self.segment = Some(Segment {
                    class,
                    words: vec![token.text()],
                });
            }
            Transition::Extend => {
                if let Some(segment) = self.segment.as_mut() {
                    segment.words.push(token.text());
                }
            }
            Transition::Noise => {}
            Transition::Break => self.close_segment(),
        }
    }

    /// Closes any open segment and returns the elements in reading order.
    pub fn finish(mut self) -> Vec<StructuralElement> {
        self.close_segment();
        self.elements
    }

    fn classify(&self, token: &LabeledToken) -> Transition {
        classify(self.segment.as_ref().map(|segment| segment.class), token)
    }

    fn close_segment(&mut self) {
        let Some(segment) = self.segment.take() else {
            return;
        };

        let text = join_words(&segment.words);

        match ElementKind::from_class(segment.class) {
            Some(kind) => self.emit(kind, &text),
            None => trace!(text; "Task detail discarded"),
        }
    }

    fn emit(&mut self, kind: ElementKind, text: &str) {
        if let Some(element) = StructuralElement::new(kind, text) {
            self.elements.push(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(pairs: &[(&str, &str)]) -> Vec<LabeledToken> {
        pairs
            .iter()
            .map(|(text, label)| LabeledToken::new(*text, label))
            .collect()
    }

    fn summary(elements: &[StructuralElement]) -> Vec<(ElementKind, &str)> {
        elements.iter().map(|e| (e.kind(), e.text())).collect()
    }

    #[test]
    fn test_reduce_refund_request() {
        let input = tokens(&[
            ("Customer", "B-ACTOR"),
            ("submits", "O"),
            ("refund", "B-TASK"),
            ("request", "I-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![
                (ElementKind::Actor, "Customer"),
                (ElementKind::Task, "refund request"),
            ]
        );
    }

    #[test]
    fn test_reduce_empty() {
        assert!(reduce(&[]).is_empty());
    }

    #[test]
    fn test_begin_closes_previous_segment() {
        let input = tokens(&[
            ("support", "B-ACTOR"),
            ("agent", "I-ACTOR"),
            ("reviews", "B-TASK"),
            ("the", "I-TASK"),
            ("request", "I-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![
                (ElementKind::Actor, "support agent"),
                (ElementKind::Task, "reviews the request"),
            ]
        );
    }

    #[test]
    fn test_mismatched_inside_is_dropped() {
        let input = tokens(&[
            ("approve", "B-TASK"),
            ("finance", "I-ACTOR"),
            ("refund", "I-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Task, "approve refund")]
        );
    }

    #[test]
    fn test_inside_without_begin_is_dropped() {
        let input = tokens(&[("request", "I-TASK"), ("valid", "I-CONDITION")]);
        assert!(reduce(&input).is_empty());
    }

    #[test]
    fn test_outside_breaks_segment() {
        let input = tokens(&[("refund", "B-TASK"), ("the", "O"), ("request", "I-TASK")]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Task, "refund")]
        );
    }

    #[test]
    fn test_else_is_hard_boundary() {
        let input = tokens(&[
            ("Agent", "B-ACTOR"),
            ("else", "I-ACTOR"),
            ("informs", "B-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![
                (ElementKind::Actor, "Agent"),
                (ElementKind::Condition, "else"),
                (ElementKind::Task, "informs"),
            ]
        );
    }

    #[test]
    fn test_branch_marker_keeps_casing() {
        let input = tokens(&[("Otherwise", "O")]);
        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Condition, "Otherwise")]
        );
    }

    #[test]
    fn test_consecutive_else_markers() {
        let input = tokens(&[
            ("notify", "B-TASK"),
            ("else", "O"),
            ("else", "B-TASK"),
            ("Finance", "I-ACTOR"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![
                (ElementKind::Task, "notify"),
                (ElementKind::Condition, "else"),
                (ElementKind::Condition, "else"),
            ]
        );
    }

    #[test]
    fn test_task_detail_is_discarded() {
        let input = tokens(&[
            ("sends", "B-TASK"),
            ("email", "I-TASK"),
            ("within", "B-TASK_DETAIL"),
            ("two", "I-TASK_DETAIL"),
            ("days", "I-TASK_DETAIL"),
            ("Finance", "B-ACTOR"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![
                (ElementKind::Task, "sends email"),
                (ElementKind::Actor, "Finance"),
            ]
        );
    }

    #[test]
    fn test_task_detail_without_task_is_discarded() {
        let input = tokens(&[("urgently", "B-TASK_DETAIL")]);
        assert!(reduce(&input).is_empty());
    }

    #[test]
    fn test_unknown_class_breaks_segment() {
        let input = tokens(&[
            ("refund", "B-TASK"),
            ("order", "B-PRODUCT"),
            ("request", "I-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Task, "refund")]
        );
    }

    #[test]
    fn test_bare_class_label_is_ignored() {
        let input = tokens(&[
            ("refund", "B-TASK"),
            ("quickly", "TASK"),
            ("request", "I-TASK"),
        ]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Task, "refund request")]
        );
    }

    #[test]
    fn test_whitespace_only_words_are_skipped() {
        let input = tokens(&[(" ", "B-ACTOR"), ("refund ", "B-TASK"), ("", "I-TASK")]);

        assert_eq!(
            summary(&reduce(&input)),
            vec![(ElementKind::Task, "refund")]
        );
    }
}
