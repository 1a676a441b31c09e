pub mod config;

use chrono::Utc;

use crate::assets::FontResolver;
use crate::document::Document;
use crate::frequency::FrequencyAggregator;
use crate::ranking::OrderedTally;
use crate::relations::{RelationshipExtractor, RelationshipGraphBuilder};
use crate::render::{Artifact, WordCloudRenderer};
use crate::tokenize::{JiebaTokenizer, Tokenizer};
use crate::topics::{Topic, TopicModel};
use crate::types::analysis::{
    AnalysisReport, FrequencyTable, RelationshipError, RelationshipOutcome, RelationshipTable,
    Section, SectionError,
};

pub use config::{
    validate_neighbor_limit, AnalysisConfig, ConfigError, MAX_NEIGHBOR_LIMIT, MIN_NEIGHBOR_LIMIT,
};

/// Everything computed for one uploaded document. The token sequence is
/// kept so relationship queries reuse it instead of re-tokenizing.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub document: Document,
    pub tokens: Vec<String>,

    pub frequency: Section<FrequencyTable>,
    pub topics: Section<Vec<Topic>>,
    pub word_cloud: Section<Artifact>,
}

/// One focal-entity request. `neighbor_limit` overrides the configured
/// default and must lie in [5, 50].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipQuery {
    pub entity: String,
    pub neighbor_limit: Option<usize>,
}

impl RelationshipQuery {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            neighbor_limit: None,
        }
    }

    pub fn with_neighbor_limit(mut self, neighbor_limit: usize) -> Self {
        self.neighbor_limit = Some(neighbor_limit);
        self
    }
}

type SharedTopicModel = Box<dyn TopicModel + Send + Sync>;
type SharedWordCloud = Box<dyn WordCloudRenderer + Send + Sync>;

/// Runs one synchronous compute cycle per input event.
///
/// Sections are computed independently: a failing collaborator marks its own
/// section as failed and the remaining sections are still produced.
pub struct Analyzer<T = JiebaTokenizer> {
    config: AnalysisConfig,
    tokenizer: T,
    topic_model: Option<SharedTopicModel>,
    word_cloud: Option<SharedWordCloud>,
    fonts: FontResolver,
}

impl Default for Analyzer<JiebaTokenizer> {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::v1(),
            tokenizer: JiebaTokenizer::default(),
            topic_model: None,
            word_cloud: None,
            fonts: FontResolver::default(),
        }
    }
}

impl Analyzer<JiebaTokenizer> {
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }
}

impl<T> Analyzer<T>
where
    T: Tokenizer,
{
    pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> Analyzer<U> {
        Analyzer {
            config: self.config,
            tokenizer,
            topic_model: self.topic_model,
            word_cloud: self.word_cloud,
            fonts: self.fonts,
        }
    }

    pub fn with_topic_model(mut self, model: impl TopicModel + Send + Sync + 'static) -> Self {
        self.topic_model = Some(Box::new(model));
        self
    }

    pub fn with_word_cloud(
        mut self,
        renderer: impl WordCloudRenderer + Send + Sync + 'static,
    ) -> Self {
        self.word_cloud = Some(Box::new(renderer));
        self
    }

    pub fn with_fonts(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Tokenize once and compute every document-level section.
    pub fn analyze(&self, document: Document) -> DocumentAnalysis {
        let _span = tracing::info_span!("analyze", source = %document.source).entered();

        let tokens = self.tokenizer.tokenize(&document.text);

        if tokens.is_empty() {
            tracing::warn!("document has no analyzable content");
            return DocumentAnalysis {
                document,
                tokens,
                frequency: Section::Failed(SectionError::NoAnalyzableContent),
                topics: Section::Failed(SectionError::NoAnalyzableContent),
                word_cloud: Section::Failed(SectionError::NoAnalyzableContent),
            };
        }

        let frequency =
            Section::Ready(FrequencyAggregator::new(self.config.frequency_limit).aggregate(&tokens));
        let topics = self.topics_section(&tokens);
        let word_cloud = self.word_cloud_section(&tokens);

        tracing::info!(
            tokens = tokens.len(),
            topics = topics.is_ready(),
            word_cloud = word_cloud.is_ready(),
            "document analyzed"
        );

        DocumentAnalysis {
            document,
            tokens,
            frequency,
            topics,
            word_cloud,
        }
    }

    /// Co-occurrence graph for one focal entity.
    ///
    /// The entity is trimmed first. An entity absent from the raw text yields
    /// `NotFound` without running extraction.
    pub fn relationships(
        &self,
        analysis: &DocumentAnalysis,
        query: &RelationshipQuery,
    ) -> Result<RelationshipOutcome, RelationshipError> {
        let entity = query.entity.trim();
        if entity.is_empty() {
            return Err(RelationshipError::EmptyEntity);
        }

        let limit = query.neighbor_limit.unwrap_or(self.config.neighbor_limit);
        validate_neighbor_limit(limit)?;

        if !analysis.document.mentions(entity) {
            tracing::info!(entity, "focal entity not found in document");
            return Ok(RelationshipOutcome::NotFound {
                entity: entity.to_string(),
            });
        }

        let extractor =
            RelationshipExtractor::new(self.config.window, limit, self.config.filter.clone());
        let map = extractor.extract(&analysis.tokens, entity);

        if map.is_empty() {
            tracing::info!(entity, "no relationships found");
            return Ok(RelationshipOutcome::NoRelationships {
                entity: entity.to_string(),
            });
        }

        let graph = RelationshipGraphBuilder::new(limit).build(entity, &map);
        Ok(RelationshipOutcome::Found {
            graph,
            table: RelationshipTable::from_map(&map),
        })
    }

    pub fn report(&self, analysis: &DocumentAnalysis) -> Result<AnalysisReport, serde_json::Error> {
        Ok(AnalysisReport {
            source: analysis.document.source.clone(),
            version: analysis.document.version.as_str().to_string(),
            config_digest: self.config.digest()?,
            lossy_decode: analysis.document.lossy,
            token_count: analysis.tokens.len(),
            frequency: analysis.frequency.clone(),
            topics: analysis.topics.clone(),
            word_cloud: analysis.word_cloud.map(Artifact::summary),
            generated_at: Utc::now(),
        })
    }

    fn topics_section(&self, tokens: &[String]) -> Section<Vec<Topic>> {
        let Some(model) = &self.topic_model else {
            return Section::Skipped;
        };

        let result = model
            .topics(tokens, self.config.topic_count)
            .map_err(|e| SectionError::collaborator("topics", e));
        if let Err(err) = &result {
            tracing::warn!(%err, "topic section degraded");
        }
        Section::from_result(result)
    }

    fn word_cloud_section(&self, tokens: &[String]) -> Section<Artifact> {
        let Some(renderer) = &self.word_cloud else {
            return Section::Skipped;
        };

        let terms = cloud_terms(tokens, &self.config);
        if terms.is_empty() {
            return Section::Failed(SectionError::NoAnalyzableContent);
        }

        let font = self.fonts.resolve();
        if font.is_fallback() {
            tracing::warn!(
                failures = font.failures.len(),
                "word cloud using builtin font"
            );
        }

        let result = renderer
            .render(&terms, &font)
            .map_err(|e| SectionError::collaborator("word_cloud", e));
        if let Err(err) = &result {
            tracing::warn!(%err, "word cloud section degraded");
        }
        Section::from_result(result)
    }
}

/// Every distinct admitted term with its count, heaviest first.
fn cloud_terms(tokens: &[String], config: &AnalysisConfig) -> Vec<(String, u32)> {
    let mut tally = OrderedTally::new();
    for token in tokens.iter().filter(|t| config.filter.admits_term(t)) {
        tally.increment(token);
    }

    tally
        .into_ranked(usize::MAX)
        .into_iter()
        .map(|(term, count)| (term.to_string(), count))
        .collect()
}
