//! # Swimlane Parser
//!
//! Front-end of the swimlane pipeline: everything between raw input and an
//! ordered list of structural elements.
//!
//! - [`parse_token_file`] reads pre-tagged `<word> <label>` files.
//! - [`Tagger`] is the seam for entity taggers; [`RuleTagger`] is a
//!   keyword-based implementation and [`merge_subwords`] adapts the
//!   word-piece output of model-backed taggers.
//! - [`reduce`] turns labeled tokens into [`StructuralElement`]s.
//! - [`group_entities`] groups the same tokens into highlighted spans.
//!
//! ## Usage
//!
//! ```
//! # use swimlane_parser::{parse_token_file, reduce, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "
//!         Customer  B-ACTOR
//!         submits   O
//!         refund    B-TASK
//!         request   I-TASK
//!     ";
//!
//!     let file = parse_token_file(source)?;
//!     let elements = reduce(file.tokens());
//!     assert_eq!(elements.len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! [`StructuralElement`]: swimlane_core::element::StructuralElement

mod entities;
pub mod error;
mod rules;
mod span;
mod structure;
mod tagger;
mod token_file;

pub use entities::group_entities;
pub use error::{Diagnostic, ErrorCode, ParseError, Severity};
pub use rules::RuleTagger;
pub use span::Span;
pub use structure::{StructureBuilder, reduce};
pub use tagger::{Tagger, TaggerError, merge_subwords};
pub use token_file::{TokenFile, parse_token_file};
