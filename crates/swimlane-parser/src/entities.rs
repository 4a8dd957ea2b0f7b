//! Grouping of labeled tokens into highlighted entity spans.
//!
//! Uses the same token classification as [`reduce`](crate::reduce), so an
//! entity span covers exactly the words a structural element would. Unlike
//! the reduction, nothing outside an entity is lost: every word that breaks
//! a segment (`O`, an unknown class, a branch marker) becomes its own
//! unclassified span, and task details are kept as spans of their own.

use log::debug;

use swimlane_core::token::{EntityClass, EntitySpan, LabeledToken};

use crate::structure::{Transition, classify, join_words};

/// Groups a labeled token stream into entity spans in reading order.
///
/// Tokens the reduction treats as noise (a mismatched `I-` tag, a bare
/// class name) are dropped here too. Blank words never produce a span.
///
/// # Examples
///
/// ```
/// # use swimlane_core::token::{EntityClass, LabeledToken};
/// # use swimlane_parser::group_entities;
/// let tokens = [
///     LabeledToken::new("Customer", "B-ACTOR"),
///     LabeledToken::new("submits", "O"),
///     LabeledToken::new("refund", "B-TASK"),
///     LabeledToken::new("request", "I-TASK"),
/// ];
///
/// let spans = group_entities(&tokens);
/// assert_eq!(spans.len(), 3);
/// assert_eq!(spans[1].class(), None);
/// assert_eq!(spans[2].text(), "refund request");
/// assert_eq!(spans[2].class(), Some(EntityClass::Task));
/// ```
pub fn group_entities(tokens: &[LabeledToken]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut open: Option<(EntityClass, Vec<&str>)> = None;

    for token in tokens {
        match classify(open.as_ref().map(|(class, _)| *class), token) {
            Transition::Begin(class) => {
                close_span(&mut open, &mut spans);
                open = Some((class, vec![token.text()]));
            }
            Transition::Extend => {
                if let Some((_, words)) = open.as_mut() {
                    words.push(token.text());
                }
            }
            Transition::Noise => {}
            Transition::BranchMarker | Transition::Break => {
                close_span(&mut open, &mut spans);
                let word = token.text().trim();
                if !word.is_empty() {
                    spans.push(EntitySpan::new(word, None));
                }
            }
        }
    }
    close_span(&mut open, &mut spans);

    debug!(tokens = tokens.len(), spans = spans.len(); "Entities grouped");
    spans
}

fn close_span(open: &mut Option<(EntityClass, Vec<&str>)>, spans: &mut Vec<EntitySpan>) {
    if let Some((class, words)) = open.take() {
        let text = join_words(&words);
        if !text.is_empty() {
            spans.push(EntitySpan::new(text, Some(class)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce;

    fn tokens(pairs: &[(&str, &str)]) -> Vec<LabeledToken> {
        pairs
            .iter()
            .map(|(text, label)| LabeledToken::new(*text, label))
            .collect()
    }

    fn summary(spans: &[EntitySpan]) -> Vec<(&str, Option<EntityClass>)> {
        spans.iter().map(|s| (s.text(), s.class())).collect()
    }

    #[test]
    fn test_outside_words_are_standalone_spans() {
        let input = tokens(&[
            ("The", "O"),
            ("support", "B-ACTOR"),
            ("agent", "I-ACTOR"),
            ("then", "O"),
            ("checks", "O"),
            ("the", "B-TASK"),
            ("order", "I-TASK"),
        ]);

        assert_eq!(
            summary(&group_entities(&input)),
            vec![
                ("The", None),
                ("support agent", Some(EntityClass::Actor)),
                ("then", None),
                ("checks", None),
                ("the order", Some(EntityClass::Task)),
            ]
        );
    }

    #[test]
    fn test_task_detail_is_kept() {
        let input = tokens(&[
            ("sends", "B-TASK"),
            ("email", "I-TASK"),
            ("within", "B-TASK_DETAIL"),
            ("two", "I-TASK_DETAIL"),
            ("days", "I-TASK_DETAIL"),
        ]);

        assert_eq!(
            summary(&group_entities(&input)),
            vec![
                ("sends email", Some(EntityClass::Task)),
                ("within two days", Some(EntityClass::TaskDetail)),
            ]
        );
    }

    #[test]
    fn test_noise_is_dropped_and_unknown_class_is_plain() {
        let input = tokens(&[
            ("approve", "B-TASK"),
            ("finance", "I-ACTOR"),
            ("quickly", "TASK"),
            ("refund", "I-TASK"),
            ("order", "B-PRODUCT"),
        ]);

        assert_eq!(
            summary(&group_entities(&input)),
            vec![
                ("approve refund", Some(EntityClass::Task)),
                ("order", None),
            ]
        );
    }

    #[test]
    fn test_branch_marker_is_plain_span() {
        let input = tokens(&[("Agent", "B-ACTOR"), ("else", "I-ACTOR"), ("informs", "B-TASK")]);

        assert_eq!(
            summary(&group_entities(&input)),
            vec![
                ("Agent", Some(EntityClass::Actor)),
                ("else", None),
                ("informs", Some(EntityClass::Task)),
            ]
        );
    }

    #[test]
    fn test_blank_words_are_skipped() {
        let input = tokens(&[(" ", "O"), (" ", "B-ACTOR"), ("refund ", "B-TASK")]);
        assert_eq!(
            summary(&group_entities(&input)),
            vec![("refund", Some(EntityClass::Task))]
        );
    }

    #[test]
    fn test_entity_spans_match_reduced_elements() {
        let input = tokens(&[
            ("Customer", "B-ACTOR"),
            ("submits", "O"),
            ("refund", "B-TASK"),
            ("request", "I-TASK"),
            ("if", "B-CONDITION"),
            ("valid", "I-CONDITION"),
        ]);

        let entities: Vec<_> = group_entities(&input)
            .into_iter()
            .filter(|span| span.class().is_some())
            .map(|span| span.text().to_string())
            .collect();
        let elements: Vec<_> = reduce(&input)
            .iter()
            .map(|element| element.text().to_string())
            .collect();

        assert_eq!(entities, elements);
    }
}
