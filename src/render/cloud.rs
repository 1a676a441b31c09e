use std::fmt::Write as _;
use std::path::Path;

use super::{Artifact, RenderError, WordCloudRenderer};
use crate::assets::{FontResolution, FontSource};
use crate::tokenize::is_cjk;

pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

const MIN_FONT_PX: f64 = 12.0;
const MAX_FONT_PX: f64 = 64.0;
const MARGIN: f64 = 10.0;
const LINE_HEIGHT: f64 = 1.2;
const PALETTE: &[&str] = &["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b"];

/// Flow-layout word cloud as a standalone SVG document.
///
/// Terms are placed heaviest first, left to right, wrapping at `width`.
/// Font size scales linearly with count. Layout uses estimated glyph
/// widths (full width for CJK, 0.6 em otherwise), so output depends only
/// on the terms and the resolved font source.
#[derive(Debug, Clone, Copy)]
pub struct SvgWordCloud {
    width: u32,
    max_terms: usize,
}

impl Default for SvgWordCloud {
    fn default() -> Self {
        Self {
            width: 800,
            max_terms: 200,
        }
    }
}

impl SvgWordCloud {
    pub fn new(width: u32, max_terms: usize) -> Self {
        Self { width, max_terms }
    }
}

struct Placed<'a> {
    term: &'a str,
    x: f64,
    y: f64,
    size: f64,
}

impl WordCloudRenderer for SvgWordCloud {
    fn render(
        &self,
        terms: &[(String, u32)],
        font: &FontResolution,
    ) -> Result<Artifact, RenderError> {
        let terms = &terms[..terms.len().min(self.max_terms)];
        let Some(max_count) = terms.iter().map(|(_, c)| *c).max() else {
            return Err(RenderError::Failed("no terms to draw".into()));
        };

        let width = f64::from(self.width);
        let mut placed = Vec::with_capacity(terms.len());
        let mut x = MARGIN;
        let mut line_top = MARGIN;
        let mut line_px = 0.0_f64;

        for (term, count) in terms {
            let size = font_px(*count, max_count);
            let advance = text_em(term) * size;

            if x > MARGIN && x + advance > width - MARGIN {
                line_top += line_px * LINE_HEIGHT;
                x = MARGIN;
                line_px = 0.0;
            }
            line_px = line_px.max(size);

            placed.push(Placed {
                term: term.as_str(),
                x,
                y: line_top + size,
                size,
            });
            x += advance + size * 0.5;
        }
        let height = (line_top + line_px * LINE_HEIGHT + MARGIN).ceil();

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = height
        )
        .map_err(fmt_failed)?;
        writeln!(svg, "<style>{}</style>", font_css(&font.source)).map_err(fmt_failed)?;
        writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#).map_err(fmt_failed)?;

        for (i, p) in placed.iter().enumerate() {
            writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="{}">{}</text>"#,
                p.x,
                p.y,
                p.size,
                PALETTE[i % PALETTE.len()],
                escape_xml(p.term)
            )
            .map_err(fmt_failed)?;
        }
        svg.push_str("</svg>\n");

        Ok(Artifact::new(SVG_MEDIA_TYPE, svg.into_bytes()))
    }
}

fn font_px(count: u32, max_count: u32) -> f64 {
    MIN_FONT_PX + (MAX_FONT_PX - MIN_FONT_PX) * f64::from(count) / f64::from(max_count)
}

fn text_em(term: &str) -> f64 {
    term.chars().map(|c| if is_cjk(c) { 1.0 } else { 0.6 }).sum()
}

fn font_css(source: &FontSource) -> String {
    let url = match source {
        FontSource::LocalFile(path) | FontSource::SystemPath(path) => file_url(path),
        FontSource::Network(url) => url.clone(),
        FontSource::Builtin => return "text { font-family: sans-serif; }".to_string(),
    };
    format!(
        "@font-face {{ font-family: \"cloud\"; src: url(\"{}\"); }} text {{ font-family: \"cloud\", sans-serif; }}",
        escape_xml(&url)
    )
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_failed(err: std::fmt::Error) -> RenderError {
    RenderError::Failed(err.to_string())
}
