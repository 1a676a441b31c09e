use serde_json::json;

use super::{edge_width, Artifact, RenderError, Renderer};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Interactive layout: a nodes/links document consumable by browser
/// force-graph widgets. Node `value` drives node size; the center takes the
/// heaviest weight so it is never drawn smaller than a neighbor.
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractiveRenderer;

impl Renderer for InteractiveRenderer {
    fn render(&self, center: &str, neighbors: &[(&str, u32)]) -> Result<Artifact, RenderError> {
        let max_weight = neighbors.iter().map(|(_, w)| *w).max().unwrap_or(0);

        let mut nodes = Vec::with_capacity(neighbors.len() + 1);
        nodes.push(json!({
            "id": 0,
            "label": center,
            "group": "center",
            "value": max_weight.max(1),
        }));

        let mut links = Vec::with_capacity(neighbors.len());
        for (i, (label, weight)) in neighbors.iter().enumerate() {
            nodes.push(json!({
                "id": i + 1,
                "label": label,
                "group": "neighbor",
                "value": weight,
            }));
            links.push(json!({
                "source": 0,
                "target": i + 1,
                "weight": weight,
                "width": edge_width(*weight, max_weight),
                "title": format!("co-occurrence: {weight}"),
            }));
        }

        let doc = json!({
            "center": center,
            "nodes": nodes,
            "links": links,
        });

        Ok(Artifact::new(JSON_MEDIA_TYPE, serde_json::to_vec_pretty(&doc)?))
    }
}
