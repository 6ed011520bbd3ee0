//! Execution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Measurement outcome histogram keyed by classical bitstring.
///
/// Bitstrings are written most-significant classical bit first: the last
/// character is clbit 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(bitstring, count)` pairs. Repeated keys accumulate.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, u64)>,
    ) -> HalResult<Self> {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.add(bitstring, count)?;
        }
        Ok(counts)
    }

    /// Set the count for a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        self.counts.insert(bitstring.into(), count);
    }

    /// Add to the count for a bitstring.
    ///
    /// Fails without modifying the histogram if the per-bitstring count or
    /// the histogram total would overflow.
    pub fn add(&mut self, bitstring: impl Into<String>, count: u64) -> HalResult<()> {
        let bitstring = bitstring.into();
        let overflow = || HalError::CountOverflow(format!("adding {count} shots of '{bitstring}'"));
        self.checked_total()
            .and_then(|total| total.checked_add(count))
            .ok_or_else(overflow)?;
        let updated = self.get(&bitstring).checked_add(count).ok_or_else(overflow)?;
        self.counts.insert(bitstring, updated);
        Ok(())
    }

    /// Count for a bitstring, zero if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total_shots(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// Sum of all counts, `None` on overflow.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts
            .values()
            .try_fold(0u64, |acc, &n| acc.checked_add(n))
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate in lexicographic bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Most frequent outcome. Ties resolve to the lexicographically smallest.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Outcomes sorted by descending count.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl IntoIterator for Counts {
    type Item = (String, u64);
    type IntoIter = std::collections::btree_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Result of one executor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome histogram.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time, if measured.
    pub execution_time_ms: Option<u64>,
    /// RNG seed used, if the executor is stochastic and seeded.
    pub seed: Option<u64>,
    /// Executor-specific metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ExecutionResult {
    /// Result with no timing, seed or metadata.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            seed: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Attach the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Attach executor metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
