//! Swimlane Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! swimlane process pipeline. It includes:
//!
//! - **Tokens**: Tagger output in begin/inside/outside form ([`token`] module)
//! - **Elements**: Ordered structural elements of a process ([`element`] module)
//! - **Colors**: CSS color handling and color ramps ([`color::Color`])
//! - **Draw**: Layered SVG primitives for the built-in renderers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod element;
pub mod token;
