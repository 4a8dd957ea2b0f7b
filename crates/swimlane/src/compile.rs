//! Compilation of structural elements into a PlantUML activity diagram.
//!
//! Actors become swimlanes, tasks become activities, and conditions open or
//! alternate a single conditional branch:
//!
//! ```text
//! @startuml
//! |Customer|
//! :refund request;
//! if (refund is valid?) then (yes)
//! :approve;
//! else (no)
//! :reject;
//! endif
//! stop
//! @enduml
//! ```
//!
//! Branches are not nested. However many conditions appear, the diagram
//! closes with one `endif`.

use std::fmt;

use log::{debug, trace};

use swimlane_core::element::{ElementKind, StructuralElement};

const HEADER: &str = "@startuml";
const FOOTER: [&str; 2] = ["stop", "@enduml"];

/// One line of the diagram description.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive<'a> {
    Lane(&'a str),
    Activity(&'a str),
    BeginBranch(&'a str),
    AlternativeBranch,
    CloseBranch,
}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lane(actor) => write!(f, "|{actor}|"),
            Self::Activity(task) => write!(f, ":{task};"),
            Self::BeginBranch(condition) => write!(f, "if ({condition}?) then (yes)"),
            Self::AlternativeBranch => f.write_str("else (no)"),
            Self::CloseBranch => f.write_str("endif"),
        }
    }
}

/// Compiles structural elements into a diagram description.
///
/// Holds no state between calls; the lane and branch state lives only for
/// the duration of one [`compile`](Self::compile).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramCompiler;

impl DiagramCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compiles `elements` into a newline-joined PlantUML description.
    ///
    /// The output is deterministic and always starts with `@startuml` and
    /// ends with `stop` and `@enduml`, even for an empty sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane::DiagramCompiler;
    /// # use swimlane::element::{ElementKind, StructuralElement};
    /// let elements = [
    ///     StructuralElement::new(ElementKind::Actor, "Customer").unwrap(),
    ///     StructuralElement::new(ElementKind::Task, "refund request").unwrap(),
    /// ];
    ///
    /// let diagram = DiagramCompiler::new().compile(&elements);
    /// assert_eq!(diagram, "@startuml\n|Customer|\n:refund request;\nstop\n@enduml");
    /// ```
    pub fn compile(&self, elements: &[StructuralElement]) -> String {
        let mut directives = Vec::with_capacity(elements.len() + 1);
        let mut current_lane: Option<&str> = None;
        let mut inside_branch = false;

        for element in elements {
            let directive = match element.kind() {
                ElementKind::Actor => {
                    if current_lane == Some(element.text()) {
                        continue;
                    }
                    current_lane = Some(element.text());
                    Directive::Lane(element.text())
                }
                ElementKind::Condition if element.is_branch_alternative() => {
                    Directive::AlternativeBranch
                }
                ElementKind::Condition => {
                    inside_branch = true;
                    Directive::BeginBranch(element.text())
                }
                ElementKind::Task => Directive::Activity(element.text()),
            };
            trace!(directive:?; "Directive emitted");
            directives.push(directive);
        }

        if inside_branch {
            directives.push(Directive::CloseBranch);
        }

        let lines: Vec<String> = std::iter::once(HEADER.to_string())
            .chain(directives.iter().map(ToString::to_string))
            .chain(FOOTER.iter().map(|line| line.to_string()))
            .collect();

        debug!(elements = elements.len(), lines = lines.len(); "Diagram compiled");
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(kind: ElementKind, text: &str) -> StructuralElement {
        StructuralElement::new(kind, text).unwrap()
    }

    fn count(diagram: &str, line: &str) -> usize {
        diagram.lines().filter(|l| *l == line).count()
    }

    #[test]
    fn test_empty_is_header_and_footer() {
        let diagram = DiagramCompiler::new().compile(&[]);
        assert_eq!(diagram, "@startuml\nstop\n@enduml");
    }

    #[test]
    fn test_redundant_lane_switch_suppressed() {
        let elements = [
            element(ElementKind::Actor, "Agent"),
            element(ElementKind::Task, "review"),
            element(ElementKind::Actor, "Agent"),
            element(ElementKind::Task, "approve"),
            element(ElementKind::Actor, "Finance"),
            element(ElementKind::Actor, "Agent"),
        ];

        let diagram = DiagramCompiler::new().compile(&elements);
        assert_eq!(
            diagram,
            "@startuml\n|Agent|\n:review;\n:approve;\n|Finance|\n|Agent|\nstop\n@enduml"
        );
    }

    #[test]
    fn test_single_branch_closed_once() {
        let elements = [
            element(ElementKind::Condition, "refund is valid"),
            element(ElementKind::Task, "approve"),
            element(ElementKind::Condition, "else"),
            element(ElementKind::Task, "reject"),
        ];

        let diagram = DiagramCompiler::new().compile(&elements);
        assert_eq!(count(&diagram, "if (refund is valid?) then (yes)"), 1);
        assert_eq!(count(&diagram, "else (no)"), 1);
        assert_eq!(count(&diagram, "endif"), 1);
        assert!(diagram.ends_with("endif\nstop\n@enduml"));
    }

    #[test]
    fn test_multiple_conditions_flatten_to_one_close() {
        let elements = [
            element(ElementKind::Condition, "a"),
            element(ElementKind::Condition, "Otherwise"),
            element(ElementKind::Condition, "b"),
            element(ElementKind::Condition, "else"),
        ];

        let diagram = DiagramCompiler::new().compile(&elements);
        assert_eq!(count(&diagram, "else (no)"), 2);
        assert_eq!(count(&diagram, "endif"), 1);
    }

    #[test]
    fn test_alternative_without_branch_has_no_close() {
        let elements = [element(ElementKind::Condition, "else")];

        let diagram = DiagramCompiler::new().compile(&elements);
        assert_eq!(diagram, "@startuml\nelse (no)\nstop\n@enduml");
    }

    #[test]
    fn test_lane_names_are_case_sensitive() {
        let elements = [
            element(ElementKind::Actor, "agent"),
            element(ElementKind::Actor, "Agent"),
        ];

        let diagram = DiagramCompiler::new().compile(&elements);
        assert_eq!(count(&diagram, "|agent|") + count(&diagram, "|Agent|"), 2);
    }
}
