use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use lexigraph_core::assets::FontResolver;
use lexigraph_core::document::Document;
use lexigraph_core::pipeline::{AnalysisConfig, Analyzer, RelationshipQuery};
use lexigraph_core::relations::{RelationshipGraph, DEFAULT_NEIGHBOR_LIMIT, DEFAULT_WINDOW};
use lexigraph_core::render::{
    render_with, InteractiveRenderer, RenderMode, Renderer, StaticRenderer, SvgWordCloud,
};
use lexigraph_core::tokenize::JiebaTokenizer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Interactive,
    Static,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Interactive => RenderMode::Interactive,
            Mode::Static => RenderMode::Static,
        }
    }
}

/// Frequency ranking and co-occurrence relationships for one text file.
#[derive(Parser, Debug)]
#[command(name = "lexigraph", version)]
struct Args {
    /// Text file to analyze.
    file: PathBuf,

    /// Focal entity for the relationship graph.
    #[arg(long, short)]
    entity: Option<String>,

    /// Neighbors kept in the graph (5-50).
    #[arg(long, default_value_t = DEFAULT_NEIGHBOR_LIMIT)]
    neighbors: usize,

    /// Co-occurrence window radius in tokens.
    #[arg(long, default_value_t = DEFAULT_WINDOW, env = "LEXIGRAPH_WINDOW")]
    window: usize,

    #[arg(long, value_enum, default_value = "interactive")]
    mode: Mode,

    /// Font file for the word cloud (default: ./SimHei.ttf, then system fonts).
    #[arg(long, env = "LEXIGRAPH_FONT")]
    font: Option<PathBuf>,

    /// Write the word-cloud SVG here.
    #[arg(long)]
    cloud: Option<PathBuf>,

    /// Extra dictionary word kept whole by the segmenter (repeatable).
    #[arg(long = "word", short = 'w')]
    words: Vec<String>,

    /// Write the rendered graph here instead of stdout.
    #[arg(long, short)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = AnalysisConfig::v1()
        .with_window(args.window)
        .with_neighbor_limit(args.neighbors);
    let tokenizer = if args.words.is_empty() {
        JiebaTokenizer::default()
    } else {
        JiebaTokenizer::with_words(&args.words)
    };
    let analyzer = Analyzer::new(config)
        .context("invalid analysis settings")?
        .with_tokenizer(tokenizer)
        .with_word_cloud(SvgWordCloud::default())
        .with_fonts(FontResolver::with_defaults(args.font.clone()));

    let raw = fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let document = Document::from_bytes_detected(args.file.display().to_string(), &raw);

    let analysis = analyzer.analyze(document);
    let report = analyzer.report(&analysis)?;

    if let (Some(path), Some(cloud)) = (&args.cloud, analysis.word_cloud.ready()) {
        fs::write(path, &cloud.data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "word cloud written");
    }

    let mut stdout = std::io::stdout().lock();

    let Some(entity) = args.entity else {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
        return Ok(());
    };

    let outcome = analyzer.relationships(&analysis, &RelationshipQuery::new(entity))?;
    serde_json::to_writer_pretty(
        &mut stdout,
        &json!({ "report": report, "relationships": outcome }),
    )?;
    writeln!(stdout)?;

    if let Some(graph) = outcome.graph() {
        write_graph(graph, renderer_for(args.mode.into()), args.out.as_deref(), &mut stdout)?;
    }

    Ok(())
}

fn renderer_for(mode: RenderMode) -> &'static dyn Renderer {
    match mode {
        RenderMode::Static => &StaticRenderer,
        RenderMode::Interactive => &InteractiveRenderer,
    }
}

/// Render and emit the graph. A renderer failure is logged and skipped:
/// the report is already on stdout by then.
fn write_graph(
    graph: &RelationshipGraph,
    renderer: &dyn Renderer,
    out: Option<&Path>,
    stdout: &mut dyn Write,
) -> Result<bool> {
    let artifact = match render_with(graph, renderer) {
        Ok(artifact) => artifact,
        Err(err) => {
            tracing::warn!(%err, "graph rendering failed");
            return Ok(false);
        }
    };

    match out {
        Some(path) => {
            fs::write(path, &artifact.data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), media_type = %artifact.media_type, "graph written");
        }
        None => {
            stdout.write_all(&artifact.data)?;
            writeln!(stdout)?;
        }
    }
    Ok(true)
}
