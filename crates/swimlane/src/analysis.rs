//! Actor hand-off analysis.
//!
//! The actors of a process, read in execution order, describe who hands work
//! to whom. Each change from one actor to a different one is a transition;
//! repeated transitions between the same ordered pair accumulate into one
//! weighted edge. Three views are derived from the same edges and always
//! agree with each other:
//!
//! - [`TransitionGraph`] - the weighted edges keyed by `(from, to)`.
//! - [`InteractionMatrix`] - the dense square matrix over the sorted actors.
//! - [`FlowLink`]s - the edges as indices into the sorted actor list, used by
//!   flow renderers.

use std::collections::BTreeMap;

use indexmap::IndexSet;
use log::{debug, info};
use serde::Serialize;

use swimlane_core::element::{ElementKind, StructuralElement};

use crate::{
    error::RenderError,
    render::{Artifact, FlowRenderer, HeatmapRenderer, SvgFlow, SvgHeatmap},
};

/// One weighted hand-off between two different actors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

/// Weighted actor-to-actor edges, ordered by `(from, to)`.
///
/// Self-transitions are never recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionGraph {
    edges: BTreeMap<(String, String), u32>,
}

impl TransitionGraph {
    /// Counts the transitions between adjacent distinct actors.
    ///
    /// Only actor elements are considered; tasks and conditions between two
    /// actors do not separate them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane::analysis::TransitionGraph;
    /// # use swimlane::element::{ElementKind, StructuralElement};
    /// let elements: Vec<_> = ["Agent", "Agent", "Finance", "Agent"]
    ///     .into_iter()
    ///     .filter_map(|name| StructuralElement::new(ElementKind::Actor, name))
    ///     .collect();
    ///
    /// let graph = TransitionGraph::from_elements(&elements);
    /// assert_eq!(graph.weight("Agent", "Finance"), 1);
    /// assert_eq!(graph.weight("Finance", "Agent"), 1);
    /// assert_eq!(graph.weight("Agent", "Agent"), 0);
    /// ```
    pub fn from_elements(elements: &[StructuralElement]) -> Self {
        let actors: Vec<&str> = elements
            .iter()
            .filter(|element| element.kind() == ElementKind::Actor)
            .map(StructuralElement::text)
            .collect();

        let mut edges = BTreeMap::new();
        for pair in actors.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from != to {
                *edges.entry((from.to_string(), to.to_string())).or_insert(0) += 1;
            }
        }

        Self { edges }
    }

    /// Returns the weight of the edge `from -> to`, `0` if absent.
    pub fn weight(&self, from: &str, to: &str) -> u32 {
        self.edges
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the sum of all edge weights.
    pub fn total_weight(&self) -> u32 {
        self.edges.values().sum()
    }

    /// Iterates the edges as `(from, to, weight)` in `(from, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.edges
            .iter()
            .map(|((from, to), weight)| (from.as_str(), to.as_str(), *weight))
    }

    /// Returns the edges as owned [`Transition`]s in `(from, to)` order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.iter()
            .map(|(from, to, weight)| Transition {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            })
            .collect()
    }

    /// Returns the sorted, distinct actors appearing as any edge endpoint.
    ///
    /// The position of an actor in this set is its matrix index.
    fn actor_index(&self) -> IndexSet<&str> {
        let mut actors: Vec<&str> = self
            .edges
            .keys()
            .flat_map(|(from, to)| [from.as_str(), to.as_str()])
            .collect();
        actors.sort_unstable();
        actors.into_iter().collect()
    }
}

/// Square matrix of transition weights over the sorted actors.
///
/// `rows[i][j]` is the weight of the edge `actors[i] -> actors[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionMatrix {
    actors: Vec<String>,
    rows: Vec<Vec<u32>>,
}

impl InteractionMatrix {
    /// Materializes the matrix of `graph`.
    ///
    /// An empty graph gives no actors and a 0x0 matrix.
    pub fn from_graph(graph: &TransitionGraph) -> Self {
        let index = graph.actor_index();
        let mut rows = vec![vec![0; index.len()]; index.len()];

        for (from, to, weight) in graph.iter() {
            if let (Some(i), Some(j)) = (index.get_index_of(from), index.get_index_of(to)) {
                rows[i][j] = weight;
            }
        }

        Self {
            actors: index.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    /// Returns the actors in matrix order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Returns the weight at row `from`, column `to`.
    pub fn get(&self, from: usize, to: usize) -> Option<u32> {
        self.rows.get(from)?.get(to).copied()
    }

    /// Returns the number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Returns the largest weight, `0` for an empty matrix.
    pub fn max(&self) -> u32 {
        self.rows.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Returns the sum of all weights.
    pub fn total(&self) -> u32 {
        self.rows.iter().flatten().sum()
    }
}

/// An edge of the flow diagram, as indices into the sorted actor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: u32,
}

/// Returns the non-zero entries of `matrix` as flow links, row by row.
pub fn flow_links(matrix: &InteractionMatrix) -> Vec<FlowLink> {
    matrix
        .rows()
        .iter()
        .enumerate()
        .flat_map(|(source, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value > 0)
                .map(move |(target, value)| FlowLink {
                    source,
                    target,
                    value: *value,
                })
        })
        .collect()
}

/// All views of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: TransitionGraph,
    pub matrix: InteractionMatrix,
    pub heatmap: Option<Artifact>,
    pub flow: Option<Artifact>,
}

/// Derives the hand-off graph of a process and hands it to renderers.
///
/// Both renderers receive the actor order of the [`InteractionMatrix`], so
/// the artifacts always agree with [`transitions`](Self::transitions).
pub struct TransitionAnalyzer {
    heatmap_renderer: Box<dyn HeatmapRenderer>,
    flow_renderer: Box<dyn FlowRenderer>,
}

impl std::fmt::Debug for TransitionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionAnalyzer").finish_non_exhaustive()
    }
}

impl TransitionAnalyzer {
    pub fn new(
        heatmap_renderer: Box<dyn HeatmapRenderer>,
        flow_renderer: Box<dyn FlowRenderer>,
    ) -> Self {
        Self {
            heatmap_renderer,
            flow_renderer,
        }
    }

    pub fn set_heatmap_renderer(&mut self, renderer: Box<dyn HeatmapRenderer>) {
        self.heatmap_renderer = renderer;
    }

    pub fn set_flow_renderer(&mut self, renderer: Box<dyn FlowRenderer>) {
        self.flow_renderer = renderer;
    }

    /// Returns the weighted transitions of `elements`.
    pub fn transitions(&self, elements: &[StructuralElement]) -> TransitionGraph {
        TransitionGraph::from_elements(elements)
    }

    /// Returns the interaction matrix of `elements`.
    pub fn interaction_matrix(&self, elements: &[StructuralElement]) -> InteractionMatrix {
        InteractionMatrix::from_graph(&self.transitions(elements))
    }

    /// Renders the heatmap of `elements`, or `None` when there are no actors.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's [`RenderError`].
    pub fn heatmap_artifact(
        &self,
        elements: &[StructuralElement],
    ) -> Result<Option<Artifact>, RenderError> {
        self.render_heatmap(&self.interaction_matrix(elements))
    }

    /// Renders the flow diagram of `elements`, or `None` when there are no
    /// transitions.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's [`RenderError`].
    pub fn flow_artifact(
        &self,
        elements: &[StructuralElement],
    ) -> Result<Option<Artifact>, RenderError> {
        self.render_flow(&self.interaction_matrix(elements))
    }

    /// Computes every view in one pass.
    ///
    /// # Errors
    ///
    /// Propagates the first [`RenderError`] of either renderer.
    pub fn analyze(&self, elements: &[StructuralElement]) -> Result<Analysis, RenderError> {
        let graph = self.transitions(elements);
        let matrix = InteractionMatrix::from_graph(&graph);
        info!(actors = matrix.len(), edges = graph.len(); "Transitions analyzed");

        let heatmap = self.render_heatmap(&matrix)?;
        let flow = self.render_flow(&matrix)?;

        Ok(Analysis {
            graph,
            matrix,
            heatmap,
            flow,
        })
    }

    fn render_heatmap(&self, matrix: &InteractionMatrix) -> Result<Option<Artifact>, RenderError> {
        if matrix.is_empty() {
            return Ok(None);
        }
        let artifact = self.heatmap_renderer.render_heatmap(matrix)?;
        debug!(media_type = artifact.media_type(), bytes = artifact.content().len(); "Heatmap rendered");
        Ok(Some(artifact))
    }

    fn render_flow(&self, matrix: &InteractionMatrix) -> Result<Option<Artifact>, RenderError> {
        let links = flow_links(matrix);
        if links.is_empty() {
            return Ok(None);
        }
        let artifact = self.flow_renderer.render_flow(matrix.actors(), &links)?;
        debug!(media_type = artifact.media_type(), links = links.len(); "Flow rendered");
        Ok(Some(artifact))
    }
}

impl Default for TransitionAnalyzer {
    fn default() -> Self {
        Self::new(
            Box::new(SvgHeatmap::default()),
            Box::new(SvgFlow::default()),
        )
    }
}
