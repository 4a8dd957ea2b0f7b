//! Layered SVG primitives for the built-in renderers.
//!
//! Everything drawn by the heatmap and flow renderers goes through the
//! [`Drawable`] trait: a drawable is positioned by a [`Point`] and renders its
//! SVG nodes into a [`LayeredOutput`], which keeps z-order independent of the
//! order in which drawables are visited.
//!
//! # Overview
//!
//! - [`Block`] - A filled rectangle (heatmap cells, flow nodes)
//! - [`Band`] - A curved link of fixed thickness between two vertical spans
//! - [`Text`] / [`TextDefinition`] - Labels with estimated metrics
//! - [`RenderLayer`] / [`LayeredOutput`] - Z-ordered SVG node collection

mod band;
mod block;
mod layer;
mod text;

pub use band::Band;
pub use block::Block;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use text::{Text, TextAnchor, TextDefinition};

/// A point in SVG user space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a point shifted by `dx`, `dy`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A width and height in SVG user space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An element that can render itself into layered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element with its reference point at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
