//! Rendering collaborators for the hand-off analysis and the entity view.
//!
//! The pipeline never inspects what a renderer produces. A renderer receives
//! the actors in matrix order together with the matrix or its flow links (or
//! the grouped entity spans), and returns an opaque [`Artifact`] that is
//! handed on unchanged.
//!
//! # Available Backends
//!
//! - [`SvgHeatmap`] - the interaction matrix as a shaded grid
//! - [`SvgFlow`] - the flow links as a two-column band diagram
//! - [`SvgEntities`] - the tagged text with entity spans highlighted

mod entities;
mod flow;
mod heatmap;

pub use entities::SvgEntities;
pub use flow::SvgFlow;
pub use heatmap::SvgHeatmap;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Serialize, ser::SerializeStruct as _};
use swimlane_core::token::EntitySpan;

use crate::{
    analysis::{FlowLink, InteractionMatrix},
    error::RenderError,
};

/// Media type of the built-in renderers' output.
pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Renders an interaction matrix.
pub trait HeatmapRenderer {
    /// Renders `matrix`, labeling both axes with `matrix.actors()`.
    ///
    /// Never called with an empty matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the style is invalid or the backend fails.
    fn render_heatmap(&self, matrix: &InteractionMatrix) -> Result<Artifact, RenderError>;
}

/// Renders weighted links between actors.
pub trait FlowRenderer {
    /// Renders `links`, whose indices point into `actors`.
    ///
    /// Never called without links.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the style is invalid or the backend fails.
    fn render_flow(&self, actors: &[String], links: &[FlowLink]) -> Result<Artifact, RenderError>;
}

/// Renders grouped entity spans.
pub trait EntityRenderer {
    /// Renders `spans` in reading order.
    ///
    /// Never called without spans.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the style is invalid or the backend fails.
    fn render_entities(&self, spans: &[EntitySpan]) -> Result<Artifact, RenderError>;
}

/// Renderer output: bytes tagged with their media type.
///
/// Serializes as `{ "media_type": ..., "data_uri": ... }` so it can be
/// embedded directly in HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    media_type: String,
    content: Vec<u8>,
}

impl Artifact {
    pub fn new(media_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    /// Creates an SVG artifact from a rendered document.
    pub fn svg(document: &svg::Document) -> Self {
        Self::new(SVG_MEDIA_TYPE, document.to_string())
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the content as a base64 `data:` URI.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane::render::Artifact;
    /// let artifact = Artifact::new("text/plain", "hi");
    /// assert_eq!(artifact.to_data_uri(), "data:text/plain;base64,aGk=");
    /// ```
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            BASE64.encode(&self.content)
        )
    }
}

impl Serialize for Artifact {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Artifact", 2)?;
        state.serialize_field("media_type", &self.media_type)?;
        state.serialize_field("data_uri", &self.to_data_uri())?;
        state.end()
    }
}

/// Returns the width of the widest label when rendered with `definition`.
fn max_label_width(definition: &swimlane_core::draw::TextDefinition, labels: &[String]) -> f32 {
    labels
        .iter()
        .map(|label| {
            swimlane_core::draw::Text::new(definition, label)
                .estimated_size()
                .width()
        })
        .fold(0.0, f32::max)
}

/// Wraps layered nodes into an SVG document of the given size.
fn document(
    width: f32,
    height: f32,
    layers: swimlane_core::draw::LayeredOutput,
) -> svg::Document {
    let mut doc = svg::Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height);

    for group in layers.render() {
        doc = doc.add(group);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_serializes_as_data_uri() {
        let artifact = Artifact::new("text/plain", "hi");
        let json = serde_json::to_value(&artifact).unwrap();

        assert_eq!(json["media_type"], "text/plain");
        assert_eq!(json["data_uri"], "data:text/plain;base64,aGk=");
    }

    #[test]
    fn test_svg_artifact_media_type() {
        let artifact = Artifact::svg(&svg::Document::new());

        assert_eq!(artifact.media_type(), SVG_MEDIA_TYPE);
        assert!(String::from_utf8_lossy(artifact.content()).starts_with("<svg"));
    }
}
