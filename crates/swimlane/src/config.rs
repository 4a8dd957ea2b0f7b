//! Configuration types for swimlane rendering.
//!
//! This module provides configuration structures that control where
//! diagrams are rendered and how the built-in heatmap and flow renderers
//! style their output. All types implement [`serde::Deserialize`] and every
//! field has a default, so a partial TOML file is always valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Rendering-service base URL and output [`RenderFormat`].
//! - [`StyleConfig`] - Styling for [`HeatmapStyle`], [`FlowStyle`] and [`EntityStyle`].
//!
//! # Example
//!
//! ```
//! # use swimlane::config::{AppConfig, RenderFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.render().format(), RenderFormat::Svg);
//! assert!(config.style().heatmap().high_color().is_ok());
//! ```

use std::fmt;

use serde::Deserialize;

use swimlane_core::{color::Color, token::EntityClass};

const DEFAULT_SERVICE_URL: &str = "https://www.plantuml.com/plantuml";

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render-service section.
    #[serde(default)]
    render: RenderConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Output format requested from the rendering service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Svg,
    Png,
    Txt,
}

impl RenderFormat {
    /// Returns the URL path segment for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how the compiled diagram is rendered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    service_url: String,
    format: RenderFormat,
}

impl RenderConfig {
    pub fn new(service_url: impl Into<String>, format: RenderFormat) -> Self {
        Self {
            service_url: service_url.into(),
            format,
        }
    }

    /// Returns the service base URL without a trailing slash.
    pub fn service_url(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }

    pub fn format(&self) -> RenderFormat {
        self.format
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL, RenderFormat::default())
    }
}

/// Visual styling for the built-in renderers.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    heatmap: HeatmapStyle,

    #[serde(default)]
    flow: FlowStyle,

    #[serde(default)]
    entities: EntityStyle,
}

impl StyleConfig {
    pub fn heatmap(&self) -> &HeatmapStyle {
        &self.heatmap
    }

    pub fn flow(&self) -> &FlowStyle {
        &self.flow
    }

    pub fn entities(&self) -> &EntityStyle {
        &self.entities
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

/// Styling of the interaction-matrix heatmap.
///
/// Cell fills are interpolated from `low_color` (zero) to `high_color`
/// (the largest weight).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeatmapStyle {
    cell_size: f32,
    low_color: String,
    high_color: String,
    font_size: u16,
}

impl HeatmapStyle {
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the parsed color for empty cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn low_color(&self) -> Result<Color, String> {
        parse_color("heatmap low_color", &self.low_color)
    }

    /// Returns the parsed color for the heaviest cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn high_color(&self) -> Result<Color, String> {
        parse_color("heatmap high_color", &self.high_color)
    }
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        // Endpoints of the yellow-orange-red ramp
        Self {
            cell_size: 60.0,
            low_color: "#ffffcc".to_string(),
            high_color: "#bd0026".to_string(),
            font_size: 12,
        }
    }
}

/// Styling of the two-column flow diagram.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlowStyle {
    node_width: f32,
    column_gap: f32,
    node_color: String,
    link_color: String,
    font_size: u16,
}

impl FlowStyle {
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn column_gap(&self) -> f32 {
        self.column_gap
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the parsed node color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn node_color(&self) -> Result<Color, String> {
        parse_color("flow node_color", &self.node_color)
    }

    /// Returns the parsed link color.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn link_color(&self) -> Result<Color, String> {
        parse_color("flow link_color", &self.link_color)
    }
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            node_width: 20.0,
            column_gap: 300.0,
            node_color: "steelblue".to_string(),
            link_color: "#9ecae1".to_string(),
            font_size: 12,
        }
    }
}

/// Styling of the highlighted entity view.
///
/// Spans are laid out left to right and wrap at `max_width`; each is filled
/// with the color of its entity class, or `outside_color` for plain words.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EntityStyle {
    max_width: f32,
    font_size: u16,
    actor_color: String,
    task_color: String,
    condition_color: String,
    task_detail_color: String,
    outside_color: String,
}

impl EntityStyle {
    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the parsed fill for spans of `class`, `None` meaning plain words.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a CSS color.
    pub fn fill(&self, class: Option<EntityClass>) -> Result<Color, String> {
        match class {
            Some(EntityClass::Actor) => parse_color("entities actor_color", &self.actor_color),
            Some(EntityClass::Task) => parse_color("entities task_color", &self.task_color),
            Some(EntityClass::Condition) => {
                parse_color("entities condition_color", &self.condition_color)
            }
            Some(EntityClass::TaskDetail) => {
                parse_color("entities task_detail_color", &self.task_detail_color)
            }
            None => parse_color("entities outside_color", &self.outside_color),
        }
    }
}

impl Default for EntityStyle {
    fn default() -> Self {
        Self {
            max_width: 640.0,
            font_size: 14,
            actor_color: "#7fdbff".to_string(),
            task_color: "#ffdc00".to_string(),
            condition_color: "#ff851b".to_string(),
            task_detail_color: "#2ecc40".to_string(),
            outside_color: "#dddddd".to_string(),
        }
    }
}
