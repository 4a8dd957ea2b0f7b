//! Curved bands linking two vertical spans.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Point, RenderLayer},
};

/// A band of constant thickness from a source span to a target span.
///
/// The band is positioned by the top of its source span and ends at the top
/// of its target span. Both edges are cubic curves with horizontal tangents,
/// the usual shape of a flow-diagram link.
#[derive(Debug, Clone)]
pub struct Band {
    target: Point,
    thickness: f32,
    color: Color,
    opacity: f32,
}

impl Band {
    pub fn new(target: Point, thickness: f32, color: Color) -> Self {
        Self {
            target,
            thickness,
            color,
            opacity: 0.5,
        }
    }

    /// Returns the SVG path data for a band starting at `source`.
    fn path_data(&self, source: Point) -> String {
        let (x0, y0) = (source.x(), source.y());
        let (x1, y1) = (self.target.x(), self.target.y());
        let mid = (x0 + x1) / 2.0;
        let t = self.thickness;

        format!(
            "M {x0} {y0} C {mid} {y0}, {mid} {y1}, {x1} {y1} \
             L {x1} {} C {mid} {}, {mid} {}, {x0} {} Z",
            y1 + t,
            y1 + t,
            y0 + t,
            y0 + t,
        )
    }
}

impl Drawable for Band {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let path = svg_element::Path::new()
            .set("d", self.path_data(position))
            .set("fill", &self.color)
            .set("fill-opacity", self.opacity);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Link, Box::new(path));
        output
    }
}
