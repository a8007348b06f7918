//! Raw token-frequency tables.

use ahash::AHashMap;

/// Occurrence counts for tokens, built per corpus batch from unprocessed
/// text. Read-only while a batch is being corrected.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FrequencyTable {
            counts: AHashMap::new(),
        }
    }

    /// Build a table from (token, count) pairs. Used by tests.
    pub fn from_counts<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut table = FrequencyTable::new();
        for (token, count) in pairs {
            table.add_count(token.into(), count);
        }
        table
    }

    /// Count one occurrence of a token.
    pub fn add(&mut self, token: &str) {
        self.add_count(token.to_string(), 1);
    }

    /// Count `count` occurrences of a token.
    pub fn add_count(&mut self, token: String, count: u64) {
        *self.counts.entry(token).or_insert(0) += count;
    }

    /// The observed count for a token; zero when never seen.
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// True when the token has been seen at all.
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Sum the counts of another table into this one. Associative and
    /// commutative, so partial tables can be merged in any order.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (token, count) in &other.counts {
            self.add_count(token.clone(), *count);
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no tokens have been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
