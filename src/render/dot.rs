use std::fmt::Write;

use super::{edge_width, Artifact, RenderError, Renderer};

pub const DOT_MEDIA_TYPE: &str = "text/vnd.graphviz";

/// Static layout: a Graphviz document with the center drawn as a double
/// circle and edges labelled and thickened by weight.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRenderer;

impl Renderer for StaticRenderer {
    fn render(&self, center: &str, neighbors: &[(&str, u32)]) -> Result<Artifact, RenderError> {
        let max_weight = neighbors.iter().map(|(_, w)| *w).max().unwrap_or(0);
        let mut out = String::new();

        write_dot(&mut out, center, neighbors, max_weight)
            .map_err(|e| RenderError::Failed(e.to_string()))?;

        Ok(Artifact::new(DOT_MEDIA_TYPE, out.into_bytes()))
    }
}

fn write_dot(
    out: &mut String,
    center: &str,
    neighbors: &[(&str, u32)],
    max_weight: u32,
) -> std::fmt::Result {
    writeln!(out, "graph relationships {{")?;
    writeln!(out, "  layout=circo;")?;
    writeln!(out, "  node [fontname=\"sans-serif\"];")?;
    writeln!(out, "  n0 [label=\"{}\", shape=doublecircle];", escape(center))?;

    for (i, (label, _)) in neighbors.iter().enumerate() {
        writeln!(out, "  n{} [label=\"{}\", shape=ellipse];", i + 1, escape(label))?;
    }
    for (i, (_, weight)) in neighbors.iter().enumerate() {
        writeln!(
            out,
            "  n0 -- n{} [label=\"{}\", penwidth={:.2}];",
            i + 1,
            weight,
            edge_width(*weight, max_weight)
        )?;
    }

    writeln!(out, "}}")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
