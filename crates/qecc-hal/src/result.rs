//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement outcome counts keyed by outcome string.
///
/// Keys follow the circuit's outcome-key layout: registers in reverse
/// declaration order separated by a space, each written highest bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `outcome`, accumulating with any
    /// existing entry.
    pub fn insert(&mut self, outcome: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(outcome.into()).or_insert(0) += count;
    }

    /// Observations of `outcome` (zero if never seen).
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Total observations across all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Fraction of shots that produced `outcome`.
    #[allow(clippy::cast_precision_loss)]
    pub fn probability(&self, outcome: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(outcome) as f64 / total as f64
    }

    /// The most frequent outcome; ties go to the lexicographically smallest key.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Outcomes sorted by descending count, then by key.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Observed outcome keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Merge another set of counts into this one.
    pub fn merge(&mut self, other: &Counts) {
        for (outcome, &count) in &other.counts {
            self.insert(outcome.clone(), count);
        }
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (outcome, count) in iter {
            counts.insert(outcome, count);
        }
        counts
    }
}

/// Result of running a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Simulator-specific metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ExecutionResult {
    /// Create a new result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Set the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("11", 0);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.total_shots(), 5);
    }

    #[test]
    fn test_most_frequent_and_sorted() {
        let counts: Counts = [
            ("00".to_string(), 10),
            ("11".to_string(), 30),
            ("10".to_string(), 30),
        ]
        .into_iter()
        .collect();
        let (key, count) = counts.most_frequent().unwrap();
        assert_eq!(key, "10");
        assert_eq!(*count, 30);
        let order: Vec<&str> = counts.sorted().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["10", "11", "00"]);
        assert_eq!(counts.keys(), vec!["00", "10", "11"]);
        assert!((counts.probability("00") - 10.0 / 70.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_counts() {
        let counts = Counts::new();
        assert!(counts.most_frequent().is_none());
        assert_eq!(counts.probability("0"), 0.0);
    }

    #[test]
    fn test_result_metadata() {
        let result = ExecutionResult::new(Counts::new(), 100)
            .with_execution_time(4)
            .with_metadata("branches", serde_json::json!(3));
        assert_eq!(result.execution_time_ms, Some(4));
        assert_eq!(result.metadata["branches"], 3);
    }
}
