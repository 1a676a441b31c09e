use std::sync::Arc;

use lexigraph_core::assets::{
    AssetError, FontCache, FontFetcher, FontResolution, FontResolver, FontStrategy,
};
use lexigraph_core::document::Document;
use lexigraph_core::pipeline::{AnalysisConfig, Analyzer, ConfigError, RelationshipQuery};
use lexigraph_core::render::{Artifact, RenderError, SvgWordCloud, WordCloudRenderer};
use lexigraph_core::tokenize::JiebaTokenizer;
use lexigraph_core::topics::{Topic, TopicError, TopicModel};
use lexigraph_core::types::{RelationshipError, RelationshipOutcome, Section, SectionError};

const STORY: &str = "Kevin met Alice yesterday. Kevin called Alice again, and Alice laughed.";

struct FixedTopics;

impl TopicModel for FixedTopics {
    fn topics(&self, tokens: &[String], topic_count: usize) -> Result<Vec<Topic>, TopicError> {
        Ok((0..topic_count)
            .map(|id| Topic {
                id,
                description: format!("{}*\"{}\"", 0.1, tokens[id]),
            })
            .collect())
    }
}

struct BrokenTopics;

impl TopicModel for BrokenTopics {
    fn topics(&self, _: &[String], _: usize) -> Result<Vec<Topic>, TopicError> {
        Err(TopicError("model did not converge".into()))
    }
}

struct TermList;

impl WordCloudRenderer for TermList {
    fn render(&self, terms: &[(String, u32)], font: &FontResolution) -> Result<Artifact, RenderError> {
        assert!(font.is_fallback());
        let body: Vec<String> = terms.iter().map(|(t, c)| format!("{t}={c}")).collect();
        Ok(Artifact::new("text/plain", body.join(" ").into_bytes()))
    }
}

struct BrokenCloud;

impl WordCloudRenderer for BrokenCloud {
    fn render(&self, _: &[(String, u32)], _: &FontResolution) -> Result<Artifact, RenderError> {
        Err(RenderError::Failed("rasterizer crashed".into()))
    }
}

fn builtin_fonts() -> FontResolver {
    FontResolver::new(vec![FontStrategy::Builtin]).with_cache(Arc::new(FontCache::new()))
}

#[test]
fn all_sections_ready_with_collaborators() {
    let analyzer = Analyzer::default()
        .with_topic_model(FixedTopics)
        .with_word_cloud(TermList)
        .with_fonts(builtin_fonts());

    let analysis = analyzer.analyze(Document::from_text("story.txt", STORY));

    let frequency = analysis.frequency.ready().unwrap();
    assert_eq!(frequency.entries()[0].token, "Alice");
    assert_eq!(frequency.count("Alice"), Some(3));

    let topics = analysis.topics.ready().unwrap();
    assert_eq!(topics.len(), 3);
    assert_eq!(topics[2].id, 2);

    let cloud = analysis.word_cloud.ready().unwrap();
    let text = String::from_utf8(cloud.data.clone()).unwrap();
    assert!(text.starts_with("Alice=3 Kevin=2"));
    assert!(!text.contains(','));
}

#[test]
fn collaborator_failures_are_isolated_per_section() {
    let analyzer = Analyzer::default()
        .with_topic_model(BrokenTopics)
        .with_word_cloud(BrokenCloud)
        .with_fonts(builtin_fonts());

    let analysis = analyzer.analyze(Document::from_text("story.txt", STORY));

    assert!(analysis.frequency.is_ready());
    assert_eq!(
        analysis.topics.error(),
        Some(&SectionError::Collaborator {
            section: "topics".into(),
            message: "Topic model failed: model did not converge".into(),
        })
    );
    assert!(matches!(
        analysis.word_cloud,
        Section::Failed(SectionError::Collaborator { ref section, .. }) if section == "word_cloud"
    ));

    // Relationship queries still work after degraded sections.
    let outcome = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Kevin"))
        .unwrap();
    assert!(outcome.graph().is_some());
}

struct UnreachableFontHost;

impl FontFetcher for UnreachableFontHost {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::Fetch(format!("connection refused: {url}")))
    }
}

struct FontReport;

impl WordCloudRenderer for FontReport {
    fn render(&self, terms: &[(String, u32)], font: &FontResolution) -> Result<Artifact, RenderError> {
        let failed: Vec<&str> = font.failures.iter().map(|f| f.strategy.as_str()).collect();
        let body = format!(
            "{} terms, fallback={}, failed=[{}]",
            terms.len(),
            font.is_fallback(),
            failed.join(";")
        );
        Ok(Artifact::new("text/plain", body.into_bytes()))
    }
}

#[test]
fn failed_font_fetch_does_not_abort_analysis() {
    let fonts = FontResolver::new(vec![FontStrategy::Builtin])
        .with_fetcher("https://fonts.invalid/SimHei.ttf", Arc::new(UnreachableFontHost))
        .with_cache(Arc::new(FontCache::new()));
    let analyzer = Analyzer::default()
        .with_topic_model(FixedTopics)
        .with_word_cloud(FontReport)
        .with_fonts(fonts);

    let analysis = analyzer.analyze(Document::from_text("story.txt", STORY));

    assert!(analysis.frequency.is_ready());
    assert!(analysis.topics.is_ready());
    let cloud = analysis.word_cloud.ready().unwrap();
    assert_eq!(
        String::from_utf8(cloud.data.clone()).unwrap(),
        "8 terms, fallback=true, failed=[network https://fonts.invalid/SimHei.ttf]"
    );

    let outcome = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Alice"))
        .unwrap();
    assert!(outcome.graph().is_some());
}

#[test]
fn chinese_novel_sections_are_populated() {
    let analyzer = Analyzer::default()
        .with_tokenizer(JiebaTokenizer::with_words(["宝玉", "黛玉"]))
        .with_word_cloud(SvgWordCloud::default())
        .with_fonts(builtin_fonts());
    let analysis = analyzer.analyze(Document::from_text(
        "hongloumeng.txt",
        "宝玉笑道：黛玉妹妹来了。黛玉看见宝玉，宝玉又笑。",
    ));

    let frequency = analysis.frequency.ready().unwrap();
    assert_eq!(frequency.entries()[0].token, "宝玉");
    assert_eq!(frequency.entries()[0].count, 3);

    let cloud = analysis.word_cloud.ready().unwrap();
    assert_eq!(cloud.media_type, "image/svg+xml");
    assert!(String::from_utf8(cloud.data.clone()).unwrap().contains(">宝玉</text>"));

    let outcome = analyzer
        .relationships(&analysis, &RelationshipQuery::new("宝玉"))
        .unwrap();
    let table = outcome.table().unwrap();
    assert_eq!(table.rows()[0].neighbor, "黛玉");
    assert!(table.rows()[0].weight >= 2);
    assert!(table.rows().iter().all(|r| r.neighbor != "宝玉"));
}

#[test]
fn missing_collaborators_are_skipped() {
    let analysis = Analyzer::default().analyze(Document::from_text("story.txt", STORY));
    assert_eq!(analysis.topics, Section::Skipped);
    assert!(matches!(analysis.word_cloud, Section::Skipped));
}

#[test]
fn empty_document_reports_no_analyzable_content() {
    let analyzer = Analyzer::default().with_topic_model(FixedTopics);
    let analysis = analyzer.analyze(Document::from_text("blank.txt", "  \n\t "));

    assert!(analysis.tokens.is_empty());
    assert_eq!(
        analysis.frequency.error(),
        Some(&SectionError::NoAnalyzableContent)
    );
    assert_eq!(analysis.topics.error(), Some(&SectionError::NoAnalyzableContent));
}

#[test]
fn not_found_is_distinct_from_no_relationships() {
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(Document::from_text("t.txt", "Zed 。 1 , ! Alice met Bob"));

    let missing = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Kevin"))
        .unwrap();
    assert_eq!(
        missing,
        RelationshipOutcome::NotFound {
            entity: "Kevin".into()
        }
    );

    // With a radius of 4, "Zed" only sees marks and digits.
    let narrow = Analyzer::new(AnalysisConfig::v1().with_window(4)).unwrap();
    let analysis = narrow.analyze(Document::from_text("t.txt", "Zed 。 1 , ! Alice met Bob"));
    let lonely = narrow
        .relationships(&analysis, &RelationshipQuery::new("Zed"))
        .unwrap();
    assert_eq!(
        lonely,
        RelationshipOutcome::NoRelationships {
            entity: "Zed".into()
        }
    );
}

#[test]
fn substring_only_match_is_no_relationships() {
    // Present in the raw text but never as a standalone token.
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(Document::from_text("t.txt", "Kevinson met Alice"));

    let outcome = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Kevin"))
        .unwrap();
    assert!(matches!(outcome, RelationshipOutcome::NoRelationships { .. }));
}

#[test]
fn entity_is_trimmed_and_must_not_be_blank() {
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(Document::from_text("story.txt", STORY));

    let outcome = analyzer
        .relationships(&analysis, &RelationshipQuery::new("  Kevin \n"))
        .unwrap();
    assert_eq!(outcome.graph().unwrap().center().label, "Kevin");

    let err = analyzer
        .relationships(&analysis, &RelationshipQuery::new("   "))
        .unwrap_err();
    assert!(matches!(err, RelationshipError::EmptyEntity));
}

#[test]
fn neighbor_limit_bounds_are_enforced() {
    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(Document::from_text("story.txt", STORY));

    for bad in [0, 4, 51] {
        let err = analyzer
            .relationships(&analysis, &RelationshipQuery::new("Kevin").with_neighbor_limit(bad))
            .unwrap_err();
        assert!(matches!(
            err,
            RelationshipError::Config(ConfigError::InvalidNeighborLimit(n)) if n == bad
        ));
    }

    for good in [5, 50] {
        assert!(analyzer
            .relationships(&analysis, &RelationshipQuery::new("Kevin").with_neighbor_limit(good))
            .is_ok());
    }

    assert!(matches!(
        Analyzer::new(AnalysisConfig::v1().with_neighbor_limit(60)),
        Err(ConfigError::InvalidNeighborLimit(60))
    ));
    assert!(matches!(
        Analyzer::new(AnalysisConfig::v1().with_window(0)),
        Err(ConfigError::InvalidWindow(0))
    ));
}

#[test]
fn slider_change_reuses_tokens() {
    let analyzer = Analyzer::default();
    let text: String = (0..40).map(|i| format!("Kevin n{i:02} ")).collect();
    let analysis = analyzer.analyze(Document::from_text("many.txt", &text));

    let five = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Kevin").with_neighbor_limit(5))
        .unwrap();
    let fifteen = analyzer
        .relationships(&analysis, &RelationshipQuery::new("Kevin"))
        .unwrap();

    assert_eq!(five.graph().unwrap().neighbors().len(), 5);
    assert_eq!(fifteen.graph().unwrap().neighbors().len(), 15);
    assert_eq!(five.table().unwrap().rows(), &fifteen.table().unwrap().rows()[..5]);
}

#[test]
fn undecodable_bytes_degrade_instead_of_failing() {
    let mut raw = b"Kevin met ".to_vec();
    raw.extend_from_slice(&[0xFF, 0xFE, 0xFD]);
    raw.extend_from_slice(b" Alice");

    let analyzer = Analyzer::default();
    let analysis = analyzer.analyze(Document::from_bytes("bad.txt", &raw));

    assert!(analysis.document.lossy);
    assert!(analysis.document.text.contains('\u{FFFD}'));
    assert!(analysis.frequency.is_ready());

    let report = analyzer.report(&analysis).unwrap();
    assert!(report.lossy_decode);
}
