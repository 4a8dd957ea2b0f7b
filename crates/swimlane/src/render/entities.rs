//! SVG view of the tagged text with entities highlighted.

use log::trace;

use swimlane_core::{
    draw::{Block, Drawable, LayeredOutput, Point, RenderLayer, Size, Text, TextDefinition},
    token::EntitySpan,
};

use super::{Artifact, EntityRenderer, document};
use crate::{config::EntityStyle, error::RenderError};

const MARGIN: f32 = 10.0;
const PADDING_X: f32 = 8.0;
const PADDING_Y: f32 = 4.0;
const SPAN_GAP: f32 = 4.0;

/// Draws spans as filled boxes flowing left to right.
///
/// A span wider than a whole row still gets a row of its own.
#[derive(Debug, Clone, Default)]
pub struct SvgEntities {
    style: EntityStyle,
}

impl SvgEntities {
    pub fn new(style: EntityStyle) -> Self {
        Self { style }
    }
}

impl EntityRenderer for SvgEntities {
    fn render_entities(&self, spans: &[EntitySpan]) -> Result<Artifact, RenderError> {
        let mut label_style = TextDefinition::new();
        label_style.set_font_size(self.style.font_size());

        let right = MARGIN + self.style.max_width();
        let mut cursor = Point::new(MARGIN, MARGIN);
        let mut width = 0.0f32;
        let mut row_height = 0.0f32;
        let mut output = LayeredOutput::new();

        for span in spans {
            let fill = self.style.fill(span.class()).map_err(RenderError::Style)?;
            let text = Text::new(&label_style, span.text());
            let text_size = text.estimated_size();
            let size = Size::new(
                text_size.width() + 2.0 * PADDING_X,
                text_size.height() + 2.0 * PADDING_Y,
            );

            if cursor.x() > MARGIN && cursor.x() + size.width() > right {
                cursor = Point::new(MARGIN, cursor.y() + row_height + SPAN_GAP);
                row_height = 0.0;
            }
            trace!(text = span.text(), class:? = span.class(), x = cursor.x(), y = cursor.y(); "Entity span");

            let block = Block::new(size, fill, RenderLayer::Cell);
            output.merge(block.render_to_layers(cursor));
            output.merge(text.render_to_layers(cursor.offset(size.width() / 2.0, size.height() / 2.0)));

            width = width.max(cursor.x() + size.width());
            row_height = row_height.max(size.height());
            cursor = cursor.offset(size.width() + SPAN_GAP, 0.0);
        }

        let doc = document(width + MARGIN, cursor.y() + row_height + MARGIN, output);
        Ok(Artifact::svg(&doc))
    }
}
