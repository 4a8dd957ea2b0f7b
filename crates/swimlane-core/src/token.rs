//! Labeled tokens produced by a tagger.
//!
//! A tagger splits process text into words and attaches a label to each one
//! using the begin/inside/outside convention:
//!
//! - `O` marks a word outside any entity
//! - `B-<CLASS>` marks the first word of an entity
//! - `I-<CLASS>` marks a continuation word of the entity started before it
//!
//! # Overview
//!
//! - [`EntityClass`] - The entity classes a tagger can emit
//! - [`Label`] - A parsed tag; parsing is total and never fails
//! - [`LabeledToken`] - A word paired with its [`Label`]
//! - [`EntitySpan`] - A run of words highlighted as one entity, or a plain word
//!
//! # Example
//!
//! ```
//! # use swimlane_core::token::{EntityClass, Label, LabeledToken};
//! let token = LabeledToken::new("refund", "B-TASK");
//! assert_eq!(token.label(), &Label::Begin(EntityClass::Task));
//!
//! // Unrecognized labels are preserved, not rejected
//! let token = LabeledToken::new("refund", "B-PRODUCT");
//! assert!(matches!(token.label(), Label::Unknown(_)));
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Entity classes recognized in tagger output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityClass {
    /// A participant performing or receiving work.
    Actor,
    /// A unit of work.
    Task,
    /// A decision point.
    Condition,
    /// Descriptive text qualifying a task.
    TaskDetail,
}

impl EntityClass {
    /// Returns the class name as it appears inside a label (e.g. `TASK_DETAIL`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "ACTOR",
            Self::Task => "TASK",
            Self::Condition => "CONDITION",
            Self::TaskDetail => "TASK_DETAIL",
        }
    }
}

impl FromStr for EntityClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTOR" => Ok(Self::Actor),
            "TASK" => Ok(Self::Task),
            "CONDITION" => Ok(Self::Condition),
            "TASK_DETAIL" => Ok(Self::TaskDetail),
            _ => Err(format!("unknown entity class `{s}`")),
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A begin/inside/outside tag attached to a single token.
///
/// Parsing a label never fails. Anything that is not `O` or a `B-`/`I-`
/// prefix followed by a known [`EntityClass`] is kept verbatim as
/// [`Label::Unknown`] so downstream stages can treat it as noise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Label {
    /// `O`: the token is outside any entity.
    Outside,
    /// `B-<CLASS>`: the token starts a new entity.
    Begin(EntityClass),
    /// `I-<CLASS>`: the token continues an entity.
    Inside(EntityClass),
    /// Any label that does not follow the convention.
    Unknown(String),
}

impl Label {
    /// Parses a raw label string.
    pub fn parse(raw: &str) -> Self {
        if raw == "O" {
            return Self::Outside;
        }

        let tagged = |prefix: &str| {
            raw.strip_prefix(prefix)
                .and_then(|class| class.parse::<EntityClass>().ok())
        };

        if let Some(class) = tagged("B-") {
            Self::Begin(class)
        } else if let Some(class) = tagged("I-") {
            Self::Inside(class)
        } else {
            Self::Unknown(raw.to_string())
        }
    }

    /// Returns the entity class carried by a begin or inside tag.
    pub fn class(&self) -> Option<EntityClass> {
        match self {
            Self::Begin(class) | Self::Inside(class) => Some(*class),
            Self::Outside | Self::Unknown(_) => None,
        }
    }
}

impl FromStr for Label {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outside => f.write_str("O"),
            Self::Begin(class) => write!(f, "B-{class}"),
            Self::Inside(class) => write!(f, "I-{class}"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for Label {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

/// A word paired with the label a tagger assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledToken {
    text: String,
    label: Label,
}

impl LabeledToken {
    /// Creates a token from its text and raw label string.
    pub fn new(text: impl Into<String>, label: &str) -> Self {
        Self::with_label(text, Label::parse(label))
    }

    /// Creates a token from its text and an already parsed [`Label`].
    pub fn with_label(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Returns the token text with its original casing.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the token label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

/// A highlighted stretch of text: the words of one entity, or a single
/// word outside any entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    text: String,
    class: Option<EntityClass>,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, class: Option<EntityClass>) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the entity class, or `None` for a word outside any entity.
    pub fn class(&self) -> Option<EntityClass> {
        self.class
    }
}
