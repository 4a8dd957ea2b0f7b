//! Swimlane - business-process text to swimlane diagrams.
//!
//! Turns a tagged process description into an ordered process structure, a
//! PlantUML activity diagram with its rendering URL, and an analysis of how
//! work is handed off between actors.
//!
//! ```text
//! text ─▶ Tagger ─▶ labeled tokens ─▶ reduce ─▶ structural elements
//!                                                 ├─▶ DiagramCompiler ─▶ DiagramEncoder ─▶ render URL
//!                                                 └─▶ TransitionAnalyzer ─▶ matrix, heatmap, flow
//! labeled tokens ─▶ group_entities ─▶ entity spans ─▶ entity view
//! ```

pub mod analysis;
pub mod config;
pub mod encode;
pub mod render;

mod compile;
mod error;

pub use swimlane_core::{color, draw, element, token};
pub use swimlane_parser::{RuleTagger, Tagger, TaggerError, TokenFile, group_entities};

pub use compile::DiagramCompiler;
pub use error::{EncodingError, RenderError, SwimlaneError};

use log::{debug, info, trace, warn};
use serde::Serialize;

use swimlane_core::{
    element::StructuralElement,
    token::{EntitySpan, LabeledToken},
};

use analysis::{Transition, TransitionAnalyzer};
use config::AppConfig;
use encode::DiagramEncoder;
use render::{
    Artifact, EntityRenderer, FlowRenderer, HeatmapRenderer, SvgEntities, SvgFlow, SvgHeatmap,
};

/// Everything the pipeline derives from one process description.
///
/// The analysis views (`actors`/`matrix`, `transitions`, and the hand-off
/// artifacts) always share the same sorted actor order. `tokens`, `entities`
/// and `entity_view` are empty when the run started from elements.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessModel {
    tokens: Vec<LabeledToken>,
    entities: Vec<EntitySpan>,
    entity_view: Option<Artifact>,
    elements: Vec<StructuralElement>,
    diagram: String,
    render_url: String,
    actors: Vec<String>,
    matrix: Vec<Vec<u32>>,
    transitions: Vec<Transition>,
    heatmap: Option<Artifact>,
    flow: Option<Artifact>,
}

impl ProcessModel {
    /// Returns the labeled tokens the run started from.
    pub fn tokens(&self) -> &[LabeledToken] {
        &self.tokens
    }

    /// Returns the tokens grouped into entity spans.
    pub fn entities(&self) -> &[EntitySpan] {
        &self.entities
    }

    /// Returns the rendered entity view, `None` when there are no spans.
    pub fn entity_view(&self) -> Option<&Artifact> {
        self.entity_view.as_ref()
    }

    /// Returns the structural elements in execution order.
    pub fn elements(&self) -> &[StructuralElement] {
        &self.elements
    }

    /// Returns the PlantUML diagram description.
    pub fn diagram(&self) -> &str {
        &self.diagram
    }

    pub fn render_url(&self) -> &str {
        &self.render_url
    }

    /// Returns the actors in matrix order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn matrix(&self) -> &[Vec<u32>] {
        &self.matrix
    }

    /// Returns the weighted transitions in `(from, to)` order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn heatmap(&self) -> Option<&Artifact> {
        self.heatmap.as_ref()
    }

    pub fn flow(&self) -> Option<&Artifact> {
        self.flow.as_ref()
    }
}

/// Builder for running the swimlane pipeline.
///
/// The builder holds configuration and collaborators only. It can be reused
/// for any number of runs, and runs do not affect each other.
///
/// # Examples
///
/// ```
/// use swimlane::{ProcessBuilder, config::AppConfig, token::LabeledToken};
///
/// let tokens = [
///     LabeledToken::new("Customer", "B-ACTOR"),
///     LabeledToken::new("submits", "O"),
///     LabeledToken::new("refund", "B-TASK"),
///     LabeledToken::new("request", "I-TASK"),
/// ];
///
/// let builder = ProcessBuilder::new(AppConfig::default());
/// let model = builder.analyze_tokens(&tokens).unwrap();
///
/// assert_eq!(model.diagram(), "@startuml\n|Customer|\n:refund request;\nstop\n@enduml");
/// assert!(model.heatmap().is_none());
/// ```
pub struct ProcessBuilder {
    compiler: DiagramCompiler,
    encoder: DiagramEncoder,
    analyzer: TransitionAnalyzer,
    entity_renderer: Box<dyn EntityRenderer>,
}

impl std::fmt::Debug for ProcessBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessBuilder")
            .field("compiler", &self.compiler)
            .field("encoder", &self.encoder)
            .field("analyzer", &self.analyzer)
            .finish_non_exhaustive()
    }
}

impl ProcessBuilder {
    /// Create a new process builder with the given configuration.
    ///
    /// The built-in SVG renderers take their style from `config`; colors are
    /// validated when first used.
    pub fn new(config: AppConfig) -> Self {
        let analyzer = TransitionAnalyzer::new(
            Box::new(SvgHeatmap::new(config.style().heatmap().clone())),
            Box::new(SvgFlow::new(config.style().flow().clone())),
        );

        Self {
            compiler: DiagramCompiler::new(),
            encoder: DiagramEncoder::new(config.render()),
            analyzer,
            entity_renderer: Box::new(SvgEntities::new(config.style().entities().clone())),
        }
    }

    /// Replaces the heatmap renderer.
    pub fn with_heatmap_renderer(mut self, renderer: impl HeatmapRenderer + 'static) -> Self {
        self.analyzer.set_heatmap_renderer(Box::new(renderer));
        self
    }

    /// Replaces the flow renderer.
    pub fn with_flow_renderer(mut self, renderer: impl FlowRenderer + 'static) -> Self {
        self.analyzer.set_flow_renderer(Box::new(renderer));
        self
    }

    /// Replaces the entity view renderer.
    pub fn with_entity_renderer(mut self, renderer: impl EntityRenderer + 'static) -> Self {
        self.entity_renderer = Box::new(renderer);
        self
    }

    /// Parse a token file.
    ///
    /// Warnings are logged and also returned with the tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SwimlaneError::Parse`] with the source attached when any
    /// line is malformed.
    pub fn parse_token_file(&self, source: &str) -> Result<TokenFile, SwimlaneError> {
        info!("Parsing token file");

        let file = swimlane_parser::parse_token_file(source)
            .map_err(|err| SwimlaneError::new_parse_error(err, source))?;

        for warning in file.warnings() {
            warn!(warning:% = warning; "Token file warning");
        }
        debug!(tokens = file.tokens().len(); "Token file parsed successfully");

        Ok(file)
    }

    /// Tag `text` with `tagger` and run the pipeline on the result.
    ///
    /// # Errors
    ///
    /// Returns [`SwimlaneError::Tagger`] if the tagger fails, otherwise as
    /// [`analyze_tokens`](Self::analyze_tokens).
    ///
    /// # Examples
    ///
    /// ```
    /// use swimlane::{ProcessBuilder, RuleTagger};
    ///
    /// let text = "The support agent reviews the request, \
    ///             the finance department approves the refund.";
    /// let model = ProcessBuilder::default()
    ///     .analyze_text(text, &RuleTagger::new())
    ///     .unwrap();
    ///
    /// assert_eq!(model.actors(), ["finance department", "support agent"]);
    /// ```
    pub fn analyze_text(&self, text: &str, tagger: &dyn Tagger) -> Result<ProcessModel, SwimlaneError> {
        info!(chars = text.chars().count(); "Tagging text");
        let tokens = tagger.tag(text)?;
        debug!(tokens = tokens.len(); "Text tagged");

        self.analyze_tokens(&tokens)
    }

    /// Run the pipeline on a labeled token stream.
    ///
    /// Malformed labels never fail; they are reduced as noise. An empty
    /// stream produces an empty but complete model.
    ///
    /// # Errors
    ///
    /// Returns [`SwimlaneError::Encoding`] if the diagram cannot be encoded
    /// and [`SwimlaneError::Render`] if a renderer fails.
    pub fn analyze_tokens(&self, tokens: &[LabeledToken]) -> Result<ProcessModel, SwimlaneError> {
        info!(tokens = tokens.len(); "Reducing tokens");
        let elements = swimlane_parser::reduce(tokens);
        trace!(elements:?; "Structural elements");

        let entities = group_entities(tokens);
        let entity_view = if entities.is_empty() {
            None
        } else {
            let artifact = self.entity_renderer.render_entities(&entities)?;
            debug!(spans = entities.len(), bytes = artifact.content().len(); "Entity view rendered");
            Some(artifact)
        };

        let mut model = self.analyze_elements(elements)?;
        model.tokens = tokens.to_vec();
        model.entities = entities;
        model.entity_view = entity_view;
        Ok(model)
    }

    /// Run the compile, encode and analysis stages on structural elements.
    ///
    /// # Errors
    ///
    /// See [`analyze_tokens`](Self::analyze_tokens).
    pub fn analyze_elements(
        &self,
        elements: Vec<StructuralElement>,
    ) -> Result<ProcessModel, SwimlaneError> {
        info!(elements = elements.len(); "Compiling diagram");
        let diagram = self.compiler.compile(&elements);
        let render_url = self.encoder.render_url(&diagram)?;
        debug!(render_url = render_url.as_str(); "Render URL built");

        let analysis = self.analyzer.analyze(&elements)?;

        info!(
            actors = analysis.matrix.len(),
            transitions = analysis.graph.len();
            "Process analyzed"
        );

        Ok(ProcessModel {
            tokens: Vec::new(),
            entities: Vec::new(),
            entity_view: None,
            elements,
            diagram,
            render_url,
            actors: analysis.matrix.actors().to_vec(),
            matrix: analysis.matrix.rows().to_vec(),
            transitions: analysis.graph.transitions(),
            heatmap: analysis.heatmap,
            flow: analysis.flow,
        })
    }
}

impl Default for ProcessBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
