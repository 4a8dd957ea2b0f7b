//! SVG two-column flow diagram.

use log::trace;

use swimlane_core::draw::{
    Band, Block, Drawable, LayeredOutput, Point, RenderLayer, Size, Text, TextAnchor,
    TextDefinition,
};

use super::{Artifact, FlowRenderer, document, max_label_width};
use crate::{analysis::FlowLink, config::FlowStyle, error::RenderError};

const MARGIN: f32 = 10.0;
const LABEL_GAP: f32 = 6.0;
const NODE_GAP: f32 = 16.0;
const UNIT_HEIGHT: f32 = 24.0;
const MIN_NODE_HEIGHT: f32 = 2.0;

/// Vertical extent of a node.
#[derive(Debug, Clone, Copy)]
struct NodeSpan {
    top: f32,
    height: f32,
}

/// Stacks nodes of the given weights top to bottom.
fn stack(weights: &[u32], top: f32) -> Vec<NodeSpan> {
    let mut y = top;
    weights
        .iter()
        .map(|&weight| {
            let height = (weight as f32 * UNIT_HEIGHT).max(MIN_NODE_HEIGHT);
            let span = NodeSpan { top: y, height };
            y += height + NODE_GAP;
            span
        })
        .collect()
}

/// Draws links as bands from a source column to a target column.
///
/// Every actor appears in both columns in the shared sorted order. A node is
/// as tall as the total weight leaving it (left) or arriving at it (right),
/// and each band is as thick as its link's weight.
#[derive(Debug, Clone, Default)]
pub struct SvgFlow {
    style: FlowStyle,
}

impl SvgFlow {
    pub fn new(style: FlowStyle) -> Self {
        Self { style }
    }
}

impl FlowRenderer for SvgFlow {
    fn render_flow(&self, actors: &[String], links: &[FlowLink]) -> Result<Artifact, RenderError> {
        let node_color = self.style.node_color().map_err(RenderError::Style)?;
        let link_color = self.style.link_color().map_err(RenderError::Style)?;
        let node_width = self.style.node_width();

        let mut outgoing = vec![0u32; actors.len()];
        let mut incoming = vec![0u32; actors.len()];
        for link in links {
            let (Some(out), Some(inc)) = (outgoing.get_mut(link.source), incoming.get_mut(link.target))
            else {
                return Err(RenderError::Backend(
                    format!(
                        "link {} -> {} is outside {} actors",
                        link.source,
                        link.target,
                        actors.len()
                    )
                    .into(),
                ));
            };
            *out += link.value;
            *inc += link.value;
        }

        let mut label_style = TextDefinition::new();
        label_style.set_font_size(self.style.font_size());
        let label_width = max_label_width(&label_style, actors);

        let left_x = MARGIN + label_width + LABEL_GAP;
        let right_x = left_x + node_width + self.style.column_gap();
        let sources = stack(&outgoing, MARGIN);
        let targets = stack(&incoming, MARGIN);

        let mut output = LayeredOutput::new();
        for (i, actor) in actors.iter().enumerate() {
            for (x, span, anchor, label_x) in [
                (left_x, sources[i], TextAnchor::End, left_x - LABEL_GAP),
                (
                    right_x,
                    targets[i],
                    TextAnchor::Start,
                    right_x + node_width + LABEL_GAP,
                ),
            ] {
                let block = Block::new(Size::new(node_width, span.height), node_color, RenderLayer::Node);
                output.merge(block.render_to_layers(Point::new(x, span.top)));

                let label = Text::new(&label_style, actor).with_anchor(anchor);
                output.merge(label.render_to_layers(Point::new(label_x, span.top + span.height / 2.0)));
            }
        }

        // Bands stack inside each node in link order
        let mut source_offsets = vec![0.0f32; actors.len()];
        let mut target_offsets = vec![0.0f32; actors.len()];
        for link in links {
            let thickness = link.value as f32 * UNIT_HEIGHT;
            let from = Point::new(
                left_x + node_width,
                sources[link.source].top + source_offsets[link.source],
            );
            let to = Point::new(right_x, targets[link.target].top + target_offsets[link.target]);
            source_offsets[link.source] += thickness;
            target_offsets[link.target] += thickness;

            trace!(source = link.source, target = link.target, value = link.value; "Flow band");
            output.merge(Band::new(to, thickness, link_color).render_to_layers(from));
        }

        let bottom = |spans: &[NodeSpan]| {
            spans
                .last()
                .map_or(MARGIN, |span| span.top + span.height)
        };
        let width = right_x + node_width + LABEL_GAP + label_width + MARGIN;
        let height = bottom(&sources).max(bottom(&targets)) + MARGIN;

        Ok(Artifact::svg(&document(width, height, output)))
    }
}
