//! Layer-based rendering for SVG output.
//!
//! Drawables tag every SVG node with a [`RenderLayer`]. [`LayeredOutput`]
//! collects the tagged nodes and emits one `<g data-layer="...">` group per
//! layer, bottom to top, so a link drawn after a node still renders beneath
//! it.
//!
//! # Example
//!
//! ```
//! # use swimlane_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(svg::node::element::Text::new("Agent")));
//! output.add_to_layer(RenderLayer::Cell, Box::new(Rectangle::new()));
//!
//! // Cells render before text
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Heatmap cells and entity highlights
    Cell,
    /// Flow links between nodes
    Link,
    /// Flow nodes
    Node,
    /// Labels and values
    Text,
}

impl RenderLayer {
    /// Returns the name written to the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Cell => "cell",
            Self::Link => "link",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to `layer`. Nodes within a layer keep insertion order.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if no node has been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the collected nodes into one SVG group per non-empty layer.
    ///
    /// Groups are returned bottom to top. Sorting is stable, so nodes keep
    /// their insertion order inside a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new()
                        .set("data-layer", layer.name())
                        .add(node);
                    Some((layer, group))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}
