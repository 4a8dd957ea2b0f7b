//! Structural elements of an inferred process.
//!
//! A process is an ordered sequence of [`StructuralElement`]s. The order is
//! the execution order of the process: actors switch the responsible lane,
//! tasks are activities performed in that lane, and conditions open or
//! alternate a conditional branch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::EntityClass;

/// Words that mark the alternative arm of a conditional branch.
///
/// Matched case-insensitively.
pub const BRANCH_ALTERNATIVES: [&str; 2] = ["else", "otherwise"];

/// Returns `true` if `word` is a branch-alternative marker such as `else`.
pub fn is_branch_alternative(word: &str) -> bool {
    let word = word.trim();
    BRANCH_ALTERNATIVES
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(word))
}

/// The kind of a structural element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Actor,
    Task,
    Condition,
}

impl ElementKind {
    /// Maps a tagger entity class to the element kind it produces.
    ///
    /// [`EntityClass::TaskDetail`] has no element kind of its own.
    pub fn from_class(class: EntityClass) -> Option<Self> {
        match class {
            EntityClass::Actor => Some(Self::Actor),
            EntityClass::Task => Some(Self::Task),
            EntityClass::Condition => Some(Self::Condition),
            EntityClass::TaskDetail => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor => f.write_str("ACTOR"),
            Self::Task => f.write_str("TASK"),
            Self::Condition => f.write_str("CONDITION"),
        }
    }
}

/// One element of a process: an actor, a task or a condition.
///
/// The text is trimmed and never empty. Deserialization goes through
/// [`StructuralElement::new`] and rejects blank text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct StructuralElement {
    text: String,
    kind: ElementKind,
}

impl StructuralElement {
    /// Creates an element, trimming `text`.
    ///
    /// Returns `None` when the trimmed text is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane_core::element::{ElementKind, StructuralElement};
    /// let element = StructuralElement::new(ElementKind::Task, " review ").unwrap();
    /// assert_eq!(element.text(), "review");
    ///
    /// assert!(StructuralElement::new(ElementKind::Task, "   ").is_none());
    /// ```
    pub fn new(kind: ElementKind, text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
            kind,
        })
    }

    /// Returns the element text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Returns `true` for a condition element carrying a branch-alternative marker.
    pub fn is_branch_alternative(&self) -> bool {
        self.kind == ElementKind::Condition && is_branch_alternative(&self.text)
    }
}

/// Unchecked serde form of [`StructuralElement`].
#[derive(Deserialize)]
struct RawElement {
    text: String,
    kind: ElementKind,
}

impl TryFrom<RawElement> for StructuralElement {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        Self::new(raw.kind, &raw.text).ok_or_else(|| format!("{} text must not be blank", raw.kind))
    }
}

impl fmt::Display for StructuralElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_alternative_matching() {
        assert!(is_branch_alternative("else"));
        assert!(is_branch_alternative("Otherwise"));
        assert!(is_branch_alternative("ELSE"));
        assert!(!is_branch_alternative("elsewhere"));
        assert!(!is_branch_alternative("if"));
    }

    #[test]
    fn test_element_kind_from_class() {
        assert_eq!(
            ElementKind::from_class(EntityClass::Actor),
            Some(ElementKind::Actor)
        );
        assert_eq!(ElementKind::from_class(EntityClass::TaskDetail), None);
    }

    #[test]
    fn test_element_is_branch_alternative() {
        let marker = StructuralElement::new(ElementKind::Condition, "Else").unwrap();
        assert!(marker.is_branch_alternative());

        let task = StructuralElement::new(ElementKind::Task, "else").unwrap();
        assert!(!task.is_branch_alternative());
    }

    #[test]
    fn test_element_display() {
        let element = StructuralElement::new(ElementKind::Actor, "Finance").unwrap();
        assert_eq!(element.to_string(), r#"ACTOR "Finance""#);
    }

    #[test]
    fn test_deserialize_trims_text() {
        let element: StructuralElement =
            serde_json::from_str(r#"{"text":"  review ","kind":"TASK"}"#).unwrap();
        assert_eq!(element, StructuralElement::new(ElementKind::Task, "review").unwrap());
    }

    #[test]
    fn test_deserialize_rejects_blank_text() {
        let err = serde_json::from_str::<StructuralElement>(r#"{"text":"","kind":"TASK"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("TASK text must not be blank"));

        assert!(serde_json::from_str::<StructuralElement>(r#"{"text":"  ","kind":"ACTOR"}"#).is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn kind_strategy() -> impl Strategy<Value = ElementKind> {
        prop_oneof![
            Just(ElementKind::Actor),
            Just(ElementKind::Task),
            Just(ElementKind::Condition),
        ]
    }

    proptest! {
        #[test]
        fn element_text_is_trimmed_and_non_empty(kind in kind_strategy(), text in "[ a-zA-Z\t]{0,20}") {
            match StructuralElement::new(kind, &text) {
                Some(element) => {
                    prop_assert!(!element.text().is_empty());
                    prop_assert_eq!(element.text(), element.text().trim());
                }
                None => prop_assert!(text.trim().is_empty()),
            }
        }
    }
}
