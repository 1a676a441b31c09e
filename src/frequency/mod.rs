use crate::ranking::OrderedTally;
use crate::types::analysis::{FrequencyEntry, FrequencyTable};

pub const FREQUENCY_TABLE_SIZE: usize = 20;

/// Counts token occurrences and keeps the top entries.
///
/// Pure: only reads the token slice, so one aggregator may be shared across
/// threads and called repeatedly.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyAggregator {
    limit: usize,
}

impl Default for FrequencyAggregator {
    fn default() -> Self {
        Self {
            limit: FREQUENCY_TABLE_SIZE,
        }
    }
}

impl FrequencyAggregator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// An empty slice yields an empty table.
    pub fn aggregate(&self, tokens: &[String]) -> FrequencyTable {
        let mut tally = OrderedTally::new();
        for token in tokens {
            tally.increment(token);
        }

        let distinct = tally.len();
        let entries: Vec<FrequencyEntry> = tally
            .into_ranked(self.limit)
            .into_iter()
            .map(|(token, count)| FrequencyEntry {
                token: token.to_string(),
                count,
            })
            .collect();

        tracing::debug!(
            tokens = tokens.len(),
            distinct,
            kept = entries.len(),
            "frequency table computed"
        );

        FrequencyTable::new(entries)
    }
}

/// Top-20 frequency table.
pub fn frequency_table(tokens: &[String]) -> FrequencyTable {
    FrequencyAggregator::default().aggregate(tokens)
}
