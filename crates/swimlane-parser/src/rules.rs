//! A keyword-driven tagger that needs no trained model.
//!
//! [`RuleTagger`] recognizes actors, tasks and conditions from keyword
//! tables and produces begin/inside/outside labels the same way a model
//! would:
//!
//! - Actor phrases (`support agent`, `finance department`) are labeled as
//!   matched.
//! - Task phrases start at a task verb and extend over the following words
//!   up to the end of the clause, the next keyword, or a conjunction, so
//!   `reviews the request` becomes one task.
//! - Condition phrases start at a condition keyword (`if`, `provided that`)
//!   and cover the rest of the clause; the keyword itself is labeled `O`
//!   when the clause has content, leaving `the request is valid` as the
//!   condition text.
//! - `else` and `otherwise` are single-word conditions.
//!
//! Matching is case-insensitive and tolerant of simple inflections
//! (`submits`, `reviewed`, `customers`).

use log::debug;

use swimlane_core::{
    element::is_branch_alternative,
    token::{EntityClass, Label, LabeledToken},
};

use crate::tagger::{Tagger, TaggerError};

const ACTOR_KEYWORDS: &[&str] = &[
    "customer",
    "client",
    "user",
    "member",
    "support agent",
    "agent",
    "representative",
    "assistant",
    "finance department",
    "finance team",
    "accounting",
    "system",
    "software",
    "application",
    "platform",
    "manager",
    "supervisor",
    "director",
    "employee",
    "staff",
    "worker",
    "team",
    "admin",
    "administrator",
    "department",
    "division",
    "unit",
];

const TASK_KEYWORDS: &[&str] = &[
    "submit", "send", "provide", "give", "review", "check", "examine", "verify", "approve",
    "authorize", "confirm", "validate", "process", "handle", "manage", "execute", "receive",
    "get", "obtain", "collect", "inform", "notify", "tell", "update", "create", "generate",
    "produce", "modify", "change", "edit", "delete", "remove", "cancel", "pay", "charge",
    "invoice", "refund", "return", "reimburse",
];

const CONDITION_KEYWORDS: &[&str] = &[
    "if",
    "when",
    "whenever",
    "in case",
    "else",
    "otherwise",
    "provided that",
    "assuming",
    "given that",
    "unless",
    "except",
];

/// Irregular forms that suffix stripping cannot recover.
const WORD_VARIANTS: &[(&str, &str)] = &[
    ("gave", "give"),
    ("sent", "send"),
    ("got", "get"),
    ("told", "tell"),
    ("paid", "pay"),
    ("notifies", "notify"),
    ("notified", "notify"),
    ("staffs", "staff"),
];

/// Words that end a task phrase without being part of it.
const CONJUNCTIONS: &[&str] = &["and", "or", "then", "but", "while"];

/// Words dropped from the end of an extended phrase.
const DETERMINERS: &[&str] = &["the", "a", "an", "this", "that", "their", "its"];

/// Punctuation stripped from word edges; the trailing set also ends a clause.
const CLAUSE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];
const EDGE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\'', '(', ')'];

/// A keyword phrase, pre-split into normalized words.
#[derive(Debug, Clone)]
struct Rule {
    class: EntityClass,
    words: Vec<String>,
}

/// A whitespace-separated word of the input.
#[derive(Debug)]
struct Word<'a> {
    leading: &'a str,
    core: &'a str,
    trailing: &'a str,
    normalized: String,
}

impl Word<'_> {
    fn ends_clause(&self) -> bool {
        self.trailing.contains(CLAUSE_PUNCTUATION)
    }
}

/// Keyword-based [`Tagger`].
///
/// # Examples
///
/// ```
/// # use swimlane_parser::{RuleTagger, Tagger, reduce};
/// let tagger = RuleTagger::new();
/// let tokens = tagger.tag("The customer submits a refund request.").unwrap();
/// let elements = reduce(&tokens);
///
/// assert_eq!(elements[0].text(), "customer");
/// assert_eq!(elements[1].text(), "submits a refund request");
/// ```
#[derive(Debug, Clone)]
pub struct RuleTagger {
    rules: Vec<Rule>,
}

impl RuleTagger {
    /// Creates a tagger with the built-in keyword tables.
    pub fn new() -> Self {
        let mut tagger = Self { rules: Vec::new() };
        let tables = [
            (EntityClass::Actor, ACTOR_KEYWORDS),
            (EntityClass::Task, TASK_KEYWORDS),
            (EntityClass::Condition, CONDITION_KEYWORDS),
        ];
        for (class, keywords) in tables {
            for keyword in keywords {
                tagger.add_rule(class, keyword);
            }
        }
        tagger
    }

    /// Adds a keyword phrase for `class`.
    ///
    /// Longer phrases take precedence; among equally long phrases the one
    /// added first wins. [`EntityClass::TaskDetail`] phrases are accepted
    /// and labeled like actors, without extension.
    pub fn with_keyword(mut self, class: EntityClass, phrase: &str) -> Self {
        self.add_rule(class, phrase);
        self
    }

    fn add_rule(&mut self, class: EntityClass, phrase: &str) {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return;
        }

        // Stable sort keeps insertion order among equal lengths
        self.rules.push(Rule { class, words });
        self.rules.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
    }

    fn is_keyword_word(&self, word: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.words.iter().any(|w| w == word))
    }

    /// Lowercases a word and maps inflected forms onto keyword base forms.
    fn normalize(&self, core: &str) -> String {
        let lower = core.to_lowercase();
        if self.is_keyword_word(&lower) {
            return lower;
        }
        if let Some((_, base)) = WORD_VARIANTS.iter().find(|(variant, _)| *variant == lower) {
            return (*base).to_string();
        }

        let stems = [
            lower.strip_suffix("ies").map(|stem| format!("{stem}y")),
            lower.strip_suffix("es").map(str::to_string),
            lower.strip_suffix('s').map(str::to_string),
            lower.strip_suffix("ed").map(str::to_string),
            lower.strip_suffix('d').map(str::to_string),
            lower.strip_suffix("ing").map(str::to_string),
            lower.strip_suffix("ing").map(|stem| format!("{stem}e")),
        ];

        stems
            .into_iter()
            .flatten()
            .find(|stem| self.is_keyword_word(stem))
            .unwrap_or(lower)
    }

    fn split<'a>(&self, text: &'a str) -> Vec<Word<'a>> {
        text.split_whitespace()
            .map(|raw| {
                let after_leading = raw.trim_start_matches(EDGE_PUNCTUATION);
                let core = after_leading.trim_end_matches(EDGE_PUNCTUATION);
                let leading = &raw[..raw.len() - after_leading.len()];
                let trailing = &after_leading[core.len()..];
                Word {
                    leading,
                    core,
                    trailing,
                    normalized: self.normalize(core),
                }
            })
            .collect()
    }

    /// Finds the longest keyword phrase starting at `start`.
    fn match_at(&self, words: &[Word<'_>], start: usize) -> Option<(EntityClass, usize)> {
        self.rules.iter().find_map(|rule| {
            let len = rule.words.len();
            let candidate = words.get(start..start + len)?;

            let matches = candidate
                .iter()
                .zip(&rule.words)
                .all(|(word, keyword)| word.normalized == *keyword);
            // A phrase cannot span a clause boundary
            let split_by_clause = candidate[..len - 1].iter().any(Word::ends_clause);

            (matches && !split_by_clause).then_some((rule.class, len))
        })
    }

    /// Returns the end of a `class` phrase extended from `phrase_end` over
    /// the rest of its clause.
    ///
    /// A task stops at a conjunction or at the next keyword, unless that
    /// keyword is a task word following a determiner (`submits a refund`),
    /// where it reads as the object. A condition only stops at the next
    /// condition keyword or `then`.
    fn extend(&self, words: &[Word<'_>], phrase_end: usize, class: EntityClass) -> usize {
        if words[phrase_end - 1].ends_clause() {
            return phrase_end;
        }

        let mut end = phrase_end;
        while end < words.len() {
            let word = &words[end];
            let keyword = self.match_at(words, end).map(|(class, _)| class);
            let stops = match class {
                EntityClass::Condition => {
                    word.normalized == "then" || keyword == Some(EntityClass::Condition)
                }
                _ => {
                    let after_determiner = end > phrase_end
                        && DETERMINERS.contains(&words[end - 1].normalized.as_str());
                    let is_object = keyword == Some(EntityClass::Task) && after_determiner;
                    CONJUNCTIONS.contains(&word.normalized.as_str())
                        || (keyword.is_some() && !is_object)
                }
            };
            if word.core.is_empty() || stops {
                break;
            }
            end += 1;
            if word.ends_clause() {
                break;
            }
        }

        while end > phrase_end && DETERMINERS.contains(&words[end - 1].normalized.as_str()) {
            end -= 1;
        }
        end
    }

    fn label(&self, words: &[Word<'_>]) -> Vec<Label> {
        let mut labels = vec![Label::Outside; words.len()];
        let mark = |labels: &mut [Label], class: EntityClass, range: std::ops::Range<usize>| {
            for (offset, label) in labels[range].iter_mut().enumerate() {
                *label = if offset == 0 {
                    Label::Begin(class)
                } else {
                    Label::Inside(class)
                };
            }
        };

        let mut i = 0;
        while i < words.len() {
            let Some((class, len)) = self.match_at(words, i) else {
                i += 1;
                continue;
            };
            let phrase_end = i + len;

            match class {
                EntityClass::Task => {
                    let end = self.extend(words, phrase_end, class);
                    mark(&mut labels, class, i..end);
                    i = end;
                }
                EntityClass::Condition if !is_branch_alternative(words[i].core) => {
                    let end = self.extend(words, phrase_end, class);
                    if end > phrase_end {
                        mark(&mut labels, class, phrase_end..end);
                    } else {
                        mark(&mut labels, class, i..end);
                    }
                    i = end;
                }
                _ => {
                    mark(&mut labels, class, i..phrase_end);
                    i = phrase_end;
                }
            }
        }

        labels
    }
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Result<Vec<LabeledToken>, TaggerError> {
        let words = self.split(text);
        let labels = self.label(&words);

        let mut tokens = Vec::with_capacity(words.len());
        for (word, label) in words.iter().zip(labels) {
            if !word.leading.is_empty() {
                tokens.push(LabeledToken::with_label(word.leading, Label::Outside));
            }
            if !word.core.is_empty() {
                tokens.push(LabeledToken::with_label(word.core, label));
            }
            if !word.trailing.is_empty() {
                tokens.push(LabeledToken::with_label(word.trailing, Label::Outside));
            }
        }

        debug!(words = words.len(), tokens = tokens.len(); "Text tagged by rules");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use swimlane_core::element::ElementKind;

    use super::*;
    use crate::reduce;

    fn labels_of(text: &str) -> Vec<(String, String)> {
        RuleTagger::new()
            .tag(text)
            .unwrap()
            .into_iter()
            .map(|token| (token.text().to_string(), token.label().to_string()))
            .collect()
    }

    fn elements_of(text: &str) -> Vec<(ElementKind, String)> {
        let tokens = RuleTagger::new().tag(text).unwrap();
        reduce(&tokens)
            .into_iter()
            .map(|element| (element.kind(), element.text().to_string()))
            .collect()
    }

    #[test]
    fn test_multi_word_actor_wins_over_single_word() {
        let labels = labels_of("the support agent");
        assert_eq!(
            labels,
            vec![
                ("the".to_string(), "O".to_string()),
                ("support".to_string(), "B-ACTOR".to_string()),
                ("agent".to_string(), "I-ACTOR".to_string()),
            ]
        );
    }

    #[test]
    fn test_task_extends_to_clause_end() {
        assert_eq!(
            elements_of("The customer submits a refund request, the agent waits"),
            vec![
                (ElementKind::Actor, "customer".to_string()),
                (ElementKind::Task, "submits a refund request".to_string()),
                (ElementKind::Actor, "agent".to_string()),
            ]
        );
    }

    #[test]
    fn test_task_stops_before_actor_and_drops_determiner() {
        assert_eq!(
            elements_of("the support agent informs the customer"),
            vec![
                (ElementKind::Actor, "support agent".to_string()),
                (ElementKind::Task, "informs".to_string()),
                (ElementKind::Actor, "customer".to_string()),
            ]
        );
    }

    #[test]
    fn test_task_stops_at_conjunction() {
        assert_eq!(
            elements_of("reviews the request and approves it"),
            vec![
                (ElementKind::Task, "reviews the request".to_string()),
                (ElementKind::Task, "approves it".to_string()),
            ]
        );
    }

    #[test]
    fn test_condition_keyword_is_excluded_from_text() {
        assert_eq!(
            elements_of("if the request is valid, the manager approves"),
            vec![
                (ElementKind::Condition, "the request is valid".to_string()),
                (ElementKind::Actor, "manager".to_string()),
                (ElementKind::Task, "approves".to_string()),
            ]
        );
    }

    #[test]
    fn test_condition_spans_task_words() {
        assert_eq!(
            elements_of("if the refund is approved and complete, the system pays"),
            vec![
                (
                    ElementKind::Condition,
                    "the refund is approved and complete".to_string()
                ),
                (ElementKind::Actor, "system".to_string()),
                (ElementKind::Task, "pays".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_word_condition_keyword() {
        assert_eq!(
            elements_of("provided that the form is complete"),
            vec![(ElementKind::Condition, "the form is complete".to_string())]
        );
    }

    #[test]
    fn test_bare_condition_keyword_is_kept() {
        assert_eq!(
            elements_of("unless."),
            vec![(ElementKind::Condition, "unless".to_string())]
        );
    }

    #[test]
    fn test_else_is_single_condition() {
        assert_eq!(
            elements_of("else the agent informs the customer"),
            vec![
                (ElementKind::Condition, "else".to_string()),
                (ElementKind::Actor, "agent".to_string()),
                (ElementKind::Task, "informs".to_string()),
                (ElementKind::Actor, "customer".to_string()),
            ]
        );
    }

    #[test]
    fn test_inflections_are_normalized() {
        let tagger = RuleTagger::new();
        assert_eq!(tagger.normalize("Submits"), "submit");
        assert_eq!(tagger.normalize("reviewed"), "review");
        assert_eq!(tagger.normalize("processing"), "process");
        assert_eq!(tagger.normalize("approving"), "approve");
        assert_eq!(tagger.normalize("customers"), "customer");
        assert_eq!(tagger.normalize("notifies"), "notify");
        assert_eq!(tagger.normalize("paid"), "pay");
        assert_eq!(tagger.normalize("request"), "request");
    }

    #[test]
    fn test_punctuation_becomes_outside_tokens() {
        let labels = labels_of("customer.");
        assert_eq!(
            labels,
            vec![
                ("customer".to_string(), "B-ACTOR".to_string()),
                (".".to_string(), "O".to_string()),
            ]
        );
    }

    #[test]
    fn test_phrase_cannot_span_clause() {
        let labels = labels_of("support, agent");
        assert_eq!(labels[0], ("support".to_string(), "O".to_string()));
        assert_eq!(labels[2], ("agent".to_string(), "B-ACTOR".to_string()));
    }

    #[test]
    fn test_custom_keyword() {
        let tagger = RuleTagger::new().with_keyword(EntityClass::Actor, "Warehouse Clerk");
        let tokens = tagger.tag("the warehouse clerk ships").unwrap();

        assert_eq!(tokens[1].label().to_string(), "B-ACTOR");
        assert_eq!(tokens[2].label().to_string(), "I-ACTOR");
    }

    #[test]
    fn test_empty_text() {
        assert!(RuleTagger::new().tag("   ").unwrap().is_empty());
    }
}
