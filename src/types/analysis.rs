use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relations::graph::RelationshipGraph;
use crate::topics::Topic;

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: u32,
}

/// Ranked token counts, descending by count, ties in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub(crate) fn new(entries: Vec<FrequencyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, token: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyEntry> {
        self.entries.iter()
    }
}

/// Accumulated co-occurrence weight of one neighbor token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    pub neighbor: String,
    pub weight: u32,
}

/// Neighbor weights for a single focal entity and a single extraction call.
///
/// Entries are ordered by weight descending; equal weights keep the order in
/// which the neighbor first accumulated weight during the scan. Every weight
/// is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMap {
    focal: String,
    entries: Vec<RelationshipEntry>,
}

impl RelationshipMap {
    pub(crate) fn new(focal: impl Into<String>, entries: Vec<RelationshipEntry>) -> Self {
        debug_assert!(entries.iter().all(|e| e.weight >= 1));
        Self {
            focal: focal.into(),
            entries,
        }
    }

    pub fn focal(&self) -> &str {
        &self.focal
    }

    pub fn entries(&self) -> &[RelationshipEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, neighbor: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.neighbor == neighbor)
            .map(|e| e.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationshipEntry> {
        self.entries.iter()
    }
}

/// Column ordering for [`RelationshipTable::sorted_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOrder {
    WeightDesc,
    WeightAsc,
    NeighborAsc,
    NeighborDesc,
}

/// The (neighbor, weight) table shown next to a relationship graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    rows: Vec<RelationshipEntry>,
}

impl RelationshipTable {
    pub fn from_map(map: &RelationshipMap) -> Self {
        Self {
            rows: map.entries().to_vec(),
        }
    }

    pub fn rows(&self) -> &[RelationshipEntry] {
        &self.rows
    }

    /// Rows re-sorted by one column. Sorting is stable, so rows that compare
    /// equal keep their ranked order.
    pub fn sorted_by(&self, order: TableOrder) -> Vec<RelationshipEntry> {
        let mut rows = self.rows.clone();
        match order {
            TableOrder::WeightDesc => rows.sort_by(|a, b| b.weight.cmp(&a.weight)),
            TableOrder::WeightAsc => rows.sort_by(|a, b| a.weight.cmp(&b.weight)),
            TableOrder::NeighborAsc => rows.sort_by(|a, b| a.neighbor.cmp(&b.neighbor)),
            TableOrder::NeighborDesc => rows.sort_by(|a, b| b.neighbor.cmp(&a.neighbor)),
        }
        rows
    }
}

/// Result of one relationship query.
///
/// `NotFound` and `NoRelationships` are separate outcomes: the first means
/// the entity never appears in the raw text, the second that it appears but
/// no neighbor passed the admission filter in any window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelationshipOutcome {
    NotFound {
        entity: String,
    },
    NoRelationships {
        entity: String,
    },
    Found {
        graph: RelationshipGraph,
        table: RelationshipTable,
    },
}

impl RelationshipOutcome {
    pub fn graph(&self) -> Option<&RelationshipGraph> {
        match self {
            RelationshipOutcome::Found { graph, .. } => Some(graph),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&RelationshipTable> {
        match self {
            RelationshipOutcome::Found { table, .. } => Some(table),
            _ => None,
        }
    }
}

/// Outcome of one independently computed pipeline section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    /// No collaborator was configured for this section.
    Skipped,
    Failed(SectionError),
}

impl<T> Section<T> {
    pub fn from_result(result: Result<T, SectionError>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(err) => Section::Failed(err),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    pub fn error(&self) -> Option<&SectionError> {
        match self {
            Section::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Section<U> {
        match self {
            Section::Ready(value) => Section::Ready(f(value)),
            Section::Skipped => Section::Skipped,
            Section::Failed(err) => Section::Failed(err.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionError {
    #[error("No analyzable content")]
    NoAnalyzableContent,

    #[error("{section} failed: {message}")]
    Collaborator { section: String, message: String },
}

impl SectionError {
    pub fn collaborator(section: &str, err: impl std::fmt::Display) -> Self {
        SectionError::Collaborator {
            section: section.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelationshipError {
    #[error("Focal entity is empty")]
    EmptyEntity,

    #[error(transparent)]
    Config(#[from] crate::pipeline::ConfigError),
}

/// Summary of a rendered artifact, small enough to embed in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub media_type: String,
    pub bytes: usize,
    pub digest: String,
}

/// Serializable summary of one analysis cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    pub version: String,
    pub config_digest: String,
    pub lossy_decode: bool,
    pub token_count: usize,

    pub frequency: Section<FrequencyTable>,
    pub topics: Section<Vec<Topic>>,
    pub word_cloud: Section<ArtifactSummary>,

    pub generated_at: DateTime<Utc>, // informational only
}
