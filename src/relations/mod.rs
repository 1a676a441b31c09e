pub mod extractor;
pub mod graph;

pub use extractor::{RelationshipExtractor, DEFAULT_NEIGHBOR_LIMIT, DEFAULT_WINDOW};
pub use graph::{GraphEdge, GraphNode, NodeRole, RelationshipGraph, RelationshipGraphBuilder};
