use serde::{Deserialize, Serialize};

use crate::types::analysis::RelationshipMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Center,
    Neighbor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    pub label: String,
    pub role: NodeRole,
}

/// Undirected edge; `source` is always the center node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
    pub weight: u32,
}

/// Star graph around a focal entity.
///
/// Node 0 is the center and is always present; neighbor nodes follow in
/// ranked order, each joined to the center by exactly one edge. There are no
/// neighbor-to-neighbor edges. Carries data only, never drawing instructions.
///
/// Only [`RelationshipGraphBuilder`] constructs graphs, so it is serialize-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

pub const CENTER_NODE: usize = 0;

impl RelationshipGraph {
    pub fn center(&self) -> &GraphNode {
        &self.nodes[CENTER_NODE]
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn neighbors(&self) -> &[GraphNode] {
        &self.nodes[CENTER_NODE + 1..]
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn label(&self, id: usize) -> Option<&str> {
        self.nodes.get(id).map(|n| n.label.as_str())
    }

    /// The renderer contract input: ordered (neighbor label, weight) pairs.
    pub fn weighted_neighbors(&self) -> Vec<(&str, u32)> {
        self.edges
            .iter()
            .filter_map(|e| self.label(e.target).map(|label| (label, e.weight)))
            .collect()
    }
}

/// Turns a ranked relationship map into a [`RelationshipGraph`].
#[derive(Debug, Clone, Copy)]
pub struct RelationshipGraphBuilder {
    neighbor_limit: usize,
}

impl RelationshipGraphBuilder {
    pub fn new(neighbor_limit: usize) -> Self {
        Self { neighbor_limit }
    }

    /// The map is expected to be ranked already. Truncation here only ever
    /// drops neighbors; the center node is added unconditionally.
    pub fn build(&self, center: &str, map: &RelationshipMap) -> RelationshipGraph {
        let kept = map.len().min(self.neighbor_limit);
        let mut nodes = Vec::with_capacity(kept + 1);
        let mut edges = Vec::with_capacity(kept);

        nodes.push(GraphNode {
            id: CENTER_NODE,
            label: center.to_string(),
            role: NodeRole::Center,
        });

        for entry in map.iter().take(kept) {
            let id = nodes.len();
            nodes.push(GraphNode {
                id,
                label: entry.neighbor.clone(),
                role: NodeRole::Neighbor,
            });
            edges.push(GraphEdge {
                source: CENTER_NODE,
                target: id,
                weight: entry.weight,
            });
        }

        RelationshipGraph { nodes, edges }
    }
}

impl Default for RelationshipGraphBuilder {
    fn default() -> Self {
        Self::new(super::extractor::DEFAULT_NEIGHBOR_LIMIT)
    }
}
