//! Filled rectangles.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Point, RenderLayer, Size},
};

/// A filled rectangle positioned by its top-left corner.
///
/// The layer it renders to is chosen by the caller.
#[derive(Debug, Clone)]
pub struct Block {
    size: Size,
    fill: Color,
    stroke: Option<Color>,
    layer: RenderLayer,
}

impl Block {
    pub fn new(size: Size, fill: Color, layer: RenderLayer) -> Self {
        Self {
            size,
            fill,
            stroke: None,
            layer,
        }
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

}

impl Drawable for Block {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", &self.fill);

        if let Some(stroke) = &self.stroke {
            rect = rect.set("stroke", stroke).set("stroke-width", 1);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(self.layer, Box::new(rect));
        output
    }
}
