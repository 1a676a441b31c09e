use std::collections::HashMap;

/// Counts keys while remembering the order each key was first seen.
///
/// Ranking relies on this order for tie-breaks, so it must not be replaced
/// with a plain hash map iteration.
#[derive(Debug, Default)]
pub struct OrderedTally<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, u32)>,
}

impl<'a> OrderedTally<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order, unranked.
    pub fn into_entries(self) -> Vec<(&'a str, u32)> {
        self.entries
    }

    /// Descending by count, ties by first-seen order, truncated to `limit`.
    pub fn into_ranked(self, limit: usize) -> Vec<(&'a str, u32)> {
        let mut entries = self.entries;
        rank_descending(&mut entries, limit);
        entries
    }
}

/// Sort by count descending and truncate.
///
/// `sort_by` is stable, so entries with equal counts keep their incoming
/// order. Callers pass entries in first-seen order.
pub fn rank_descending<K>(entries: &mut Vec<(K, u32)>, limit: usize) {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(limit);

    debug_assert!(entries.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_seen_order() {
        let mut tally = OrderedTally::new();
        for key in ["b", "a", "c", "a", "c"] {
            tally.increment(key);
        }

        assert_eq!(tally.get("c"), Some(2));
        assert_eq!(tally.into_ranked(10), vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let mut tally = OrderedTally::new();
        tally.increment("x");
        assert!(tally.into_ranked(0).is_empty());
    }
}
