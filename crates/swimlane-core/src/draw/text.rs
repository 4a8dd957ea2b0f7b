//! Text labels for rendered artifacts.
//!
//! Renderers need label sizes before laying out axes and columns. Rather
//! than shaping glyphs, [`Text::estimated_size`] uses a fixed average glyph
//! width, which is accurate enough for sans-serif labels in a margin.

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, Point, RenderLayer, Size},
};

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Line height as a fraction of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Horizontal anchoring of a text label relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Reusable text style.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Color | `None` (SVG default, black) |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the fill color; `None` uses the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns a copy of this definition with a different color.
    pub fn with_color(&self, color: Option<Color>) -> Self {
        let mut definition = self.clone();
        definition.set_color(color);
        definition
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            color: None,
        }
    }
}

/// A single-line text label.
///
/// The label is vertically centered on its position; the [`TextAnchor`]
/// decides whether the position is its start, middle or end.
///
/// # Examples
///
/// ```
/// # use swimlane_core::draw::{Text, TextAnchor, TextDefinition};
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "Finance").with_anchor(TextAnchor::End);
/// assert!(text.estimated_size().width() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    anchor: TextAnchor,
    rotation: Option<f32>,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            anchor: TextAnchor::default(),
            rotation: None,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Rotates the label by `degrees` around its position.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Estimates the unrotated size of the label.
    pub fn estimated_size(&self) -> Size {
        let font_size = f32::from(self.definition.font_size);
        let glyphs = self.content.chars().count() as f32;
        Size::new(
            glyphs * font_size * GLYPH_WIDTH_RATIO,
            font_size * LINE_HEIGHT_RATIO,
        )
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut text = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.anchor.as_str())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family.as_str())
            .set("font-size", self.definition.font_size);

        if let Some(color) = &self.definition.color {
            text = text.set("fill", color);
        }

        if let Some(degrees) = self.rotation {
            text = text.set(
                "transform",
                format!("rotate({degrees} {} {})", position.x(), position.y()),
            );
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(text));
        output
    }
}
