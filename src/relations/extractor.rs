use crate::ranking::{NeighborFilter, OrderedTally};
use crate::types::analysis::{RelationshipEntry, RelationshipMap};

pub const DEFAULT_WINDOW: usize = 8;
pub const DEFAULT_NEIGHBOR_LIMIT: usize = 15;

/// Windowed co-occurrence counter around one focal entity.
///
/// For each position holding the focal entity, every admitted token within
/// `window` positions on either side gains weight 1. Overlapping windows are
/// not deduplicated: a neighbor near two focal occurrences counts twice.
///
/// Extraction only reads the token slice, so one extractor can serve
/// concurrent queries for different entities against the same sequence.
#[derive(Debug, Clone)]
pub struct RelationshipExtractor {
    window: usize,
    neighbor_limit: usize,
    filter: NeighborFilter,
}

impl Default for RelationshipExtractor {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            neighbor_limit: DEFAULT_NEIGHBOR_LIMIT,
            filter: NeighborFilter::default(),
        }
    }
}

impl RelationshipExtractor {
    pub fn new(window: usize, neighbor_limit: usize, filter: NeighborFilter) -> Self {
        Self {
            window,
            neighbor_limit,
            filter,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn neighbor_limit(&self) -> usize {
        self.neighbor_limit
    }

    pub fn filter(&self) -> &NeighborFilter {
        &self.filter
    }

    /// Ranked neighbor weights, at most `neighbor_limit` entries.
    ///
    /// Returns an empty map both when the focal entity never occurs and when
    /// it occurs with no admitted neighbor; callers that need to tell these
    /// apart check the raw text first.
    pub fn extract(&self, tokens: &[String], focal: &str) -> RelationshipMap {
        let mut tally = OrderedTally::new();
        let mut occurrences = 0usize;
        let last = tokens.len().saturating_sub(1);

        for (i, token) in tokens.iter().enumerate() {
            if token != focal {
                continue;
            }
            occurrences += 1;

            let start = i.saturating_sub(self.window);
            let end = i.saturating_add(self.window).min(last);

            for (j, candidate) in tokens[start..=end].iter().enumerate() {
                if start + j == i {
                    continue;
                }
                if self.filter.admits(candidate, focal) {
                    tally.increment(candidate);
                }
            }
        }

        let distinct = tally.len();
        let entries: Vec<RelationshipEntry> = tally
            .into_ranked(self.neighbor_limit)
            .into_iter()
            .map(|(neighbor, weight)| RelationshipEntry {
                neighbor: neighbor.to_string(),
                weight,
            })
            .collect();

        tracing::debug!(
            focal,
            occurrences,
            distinct,
            kept = entries.len(),
            window = self.window,
            "relationships extracted"
        );

        RelationshipMap::new(focal, entries)
    }
}
