//! Renderer contracts and the two graph layouts.
//!
//! Renderers receive plain values (a center label and ranked neighbor
//! pairs) and return an opaque [`Artifact`]. They never see or retain the
//! graph itself.

pub mod cloud;
pub mod dot;
pub mod interactive;

use serde::{Deserialize, Serialize};

use crate::assets::FontResolution;
use crate::relations::RelationshipGraph;
use crate::types::analysis::ArtifactSummary;
use crate::types::identifiers::sha256_tagged;

pub use cloud::SvgWordCloud;
pub use dot::StaticRenderer;
pub use interactive::InteractiveRenderer;

/// Rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl Artifact {
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            media_type: self.media_type.clone(),
            bytes: self.data.len(),
            digest: sha256_tagged(&self.data),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render failed: {0}")]
    Failed(String),
}

pub trait Renderer {
    fn render(&self, center: &str, neighbors: &[(&str, u32)]) -> Result<Artifact, RenderError>;
}

/// Word-cloud rasterization collaborator. `font` is whatever the resolver
/// produced, possibly the built-in fallback.
pub trait WordCloudRenderer {
    fn render(&self, terms: &[(String, u32)], font: &FontResolution)
        -> Result<Artifact, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Interactive,
    Static,
}

/// Render a graph with the built-in layout for `mode`.
pub fn render_graph(graph: &RelationshipGraph, mode: RenderMode) -> Result<Artifact, RenderError> {
    match mode {
        RenderMode::Static => render_with(graph, &StaticRenderer),
        RenderMode::Interactive => render_with(graph, &InteractiveRenderer),
    }
}

pub fn render_with(
    graph: &RelationshipGraph,
    renderer: &dyn Renderer,
) -> Result<Artifact, RenderError> {
    let neighbors = graph.weighted_neighbors();
    renderer.render(&graph.center().label, &neighbors)
}

/// Edge thickness scaled into [1.0, 5.0] against the heaviest edge.
pub(crate) fn edge_width(weight: u32, max_weight: u32) -> f64 {
    if max_weight == 0 {
        return 1.0;
    }
    1.0 + 4.0 * f64::from(weight) / f64::from(max_weight)
}
