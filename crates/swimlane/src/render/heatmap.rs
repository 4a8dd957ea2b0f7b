//! SVG heatmap of the interaction matrix.

use log::trace;

use swimlane_core::{
    color::Color,
    draw::{Block, Drawable, LayeredOutput, Point, RenderLayer, Size, Text, TextAnchor, TextDefinition},
};

use super::{Artifact, HeatmapRenderer, document, max_label_width};
use crate::{analysis::InteractionMatrix, config::HeatmapStyle, error::RenderError};

const MARGIN: f32 = 10.0;
const LABEL_GAP: f32 = 6.0;
const COLUMN_LABEL_ANGLE: f32 = -45.0;

/// Draws the matrix as a grid of shaded cells.
///
/// Rows are the actors handing work off, columns the actors receiving it.
/// Each cell is shaded from the low to the high color by `value / max` and
/// non-zero cells print their value.
#[derive(Debug, Clone, Default)]
pub struct SvgHeatmap {
    style: HeatmapStyle,
}

impl SvgHeatmap {
    pub fn new(style: HeatmapStyle) -> Self {
        Self { style }
    }

    fn cell_color(low: Color, high: Color, value: u32, max: u32) -> Color {
        if max == 0 {
            return low;
        }
        low.lerp(high, value as f32 / max as f32)
    }
}

impl HeatmapRenderer for SvgHeatmap {
    fn render_heatmap(&self, matrix: &InteractionMatrix) -> Result<Artifact, RenderError> {
        let low = self.style.low_color().map_err(RenderError::Style)?;
        let high = self.style.high_color().map_err(RenderError::Style)?;
        let cell = self.style.cell_size();

        let mut label_style = TextDefinition::new();
        label_style.set_font_size(self.style.font_size());
        let light_value_style = label_style.with_color(Color::new("white").ok());

        // Rotated column labels need roughly their width times sin(45°) above the grid
        let label_width = max_label_width(&label_style, matrix.actors());
        let left = MARGIN + label_width + LABEL_GAP;
        let top = MARGIN + label_width * std::f32::consts::FRAC_1_SQRT_2 + LABEL_GAP;
        let grid = cell * matrix.len() as f32;

        let max = matrix.max();
        let mut output = LayeredOutput::new();

        for (i, actor) in matrix.actors().iter().enumerate() {
            let offset = i as f32 * cell + cell / 2.0;

            let row_label = Text::new(&label_style, actor).with_anchor(TextAnchor::End);
            output.merge(row_label.render_to_layers(Point::new(left - LABEL_GAP, top + offset)));

            let column_label = Text::new(&label_style, actor)
                .with_anchor(TextAnchor::Start)
                .with_rotation(COLUMN_LABEL_ANGLE);
            output.merge(column_label.render_to_layers(Point::new(left + offset, top - LABEL_GAP)));
        }

        for (i, row) in matrix.rows().iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let fill = Self::cell_color(low, high, value, max);
                let origin = Point::new(left + j as f32 * cell, top + i as f32 * cell);
                trace!(row = i, column = j, value, fill:% = fill; "Heatmap cell");

                let block = Block::new(Size::new(cell, cell), fill, RenderLayer::Cell)
                    .with_stroke(Color::new("white").unwrap_or_default());
                output.merge(block.render_to_layers(origin));

                if value > 0 {
                    let value_style = if fill.is_dark() {
                        &light_value_style
                    } else {
                        &label_style
                    };
                    let content = value.to_string();
                    let text = Text::new(value_style, &content);
                    output.merge(text.render_to_layers(origin.offset(cell / 2.0, cell / 2.0)));
                }
            }
        }

        let doc = document(left + grid + MARGIN, top + grid + MARGIN, output);
        Ok(Artifact::svg(&doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TransitionGraph;
    use swimlane_core::element::{ElementKind, StructuralElement};

    fn matrix(actors: &[&str]) -> InteractionMatrix {
        let elements: Vec<_> = actors
            .iter()
            .filter_map(|name| StructuralElement::new(ElementKind::Actor, name))
            .collect();
        InteractionMatrix::from_graph(&TransitionGraph::from_elements(&elements))
    }

    fn render(matrix: &InteractionMatrix) -> String {
        let artifact = SvgHeatmap::default().render_heatmap(matrix).unwrap();
        String::from_utf8(artifact.content().to_vec()).unwrap()
    }

    #[test]
    fn test_one_cell_per_entry() {
        let svg = render(&matrix(&["Agent", "Finance", "Agent", "Customer"]));
        assert_eq!(svg.matches("<rect").count(), 9);
    }

    #[test]
    fn test_labels_and_values_present() {
        let svg = render(&matrix(&["Agent", "Finance", "Agent", "Finance", "Agent"]));

        assert_eq!(svg.matches("Agent").count(), 2);
        assert_eq!(svg.matches("Finance").count(), 2);
        // Four axis labels and two non-zero values
        assert_eq!(svg.matches("<text").count(), 6);
    }

    #[test]
    fn test_cell_color_ramp() {
        let low = Color::new("#ffffcc").unwrap();
        let high = Color::new("#bd0026").unwrap();

        assert_eq!(SvgHeatmap::cell_color(low, high, 0, 4).to_hex(), "#ffffcc");
        assert_eq!(SvgHeatmap::cell_color(low, high, 4, 4).to_hex(), "#bd0026");
        assert_eq!(SvgHeatmap::cell_color(low, high, 0, 0).to_hex(), "#ffffcc");
    }

    #[test]
    fn test_invalid_style_is_render_error() {
        let style: HeatmapStyle =
            serde_json::from_str(r#"{ "low_color": "definitely-not-a-color" }"#).unwrap();
        let err = SvgHeatmap::new(style)
            .render_heatmap(&matrix(&["Agent", "Finance"]))
            .unwrap_err();

        assert!(matches!(err, RenderError::Style(_)));
    }
}
