//! Post-selection analysis of repeated syndrome measurements.
//!
//! Each outcome is a 4-bit string written most-significant classical bit
//! first, so it reads `c2[1] c2[0] c1[1] c1[0]`: the leading pair is round 2,
//! the trailing pair is round 1. A shot is kept only when both rounds agree;
//! the agreed pair is the syndrome label.

use std::collections::BTreeMap;
use std::fmt;

use radqec_hal::Counts;
use serde::{Deserialize, Serialize};

use crate::error::{QecError, QecResult};
use crate::topology::ROUND_WIDTH;

/// Width of one outcome bitstring.
pub const OUTCOME_WIDTH: usize = 2 * ROUND_WIDTH;

/// Agreed syndrome of a post-selected shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyndromeLabel {
    /// `00`: no check fired.
    #[serde(rename = "00")]
    NoError,
    /// `10`: X-type syndrome.
    #[serde(rename = "10")]
    XType,
    /// `01`: Z-type syndrome.
    #[serde(rename = "01")]
    ZType,
    /// `11`: both checks fired.
    #[serde(rename = "11")]
    YType,
}

impl SyndromeLabel {
    /// Labels in reporting order.
    pub const ALL: [SyndromeLabel; 4] = [
        SyndromeLabel::NoError,
        SyndromeLabel::XType,
        SyndromeLabel::ZType,
        SyndromeLabel::YType,
    ];

    /// Two-character bit pattern.
    pub fn bits(self) -> &'static str {
        match self {
            SyndromeLabel::NoError => "00",
            SyndromeLabel::XType => "10",
            SyndromeLabel::ZType => "01",
            SyndromeLabel::YType => "11",
        }
    }

    /// Parse a two-character bit pattern.
    pub fn from_bits(bits: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.bits() == bits)
    }

    /// Human-readable name.
    pub fn description(self) -> &'static str {
        match self {
            SyndromeLabel::NoError => "None",
            SyndromeLabel::XType => "X",
            SyndromeLabel::ZType => "Z",
            SyndromeLabel::YType => "Y",
        }
    }

    /// Whether the label indicates a detected error.
    pub fn is_error(self) -> bool {
        self != SyndromeLabel::NoError
    }

    fn slot(self) -> usize {
        match self {
            SyndromeLabel::NoError => 0,
            SyndromeLabel::XType => 1,
            SyndromeLabel::ZType => 2,
            SyndromeLabel::YType => 3,
        }
    }
}

impl fmt::Display for SyndromeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bits())
    }
}

/// Validated outcome histogram.
///
/// Every key is exactly [`OUTCOME_WIDTH`] characters of `0`/`1`. Whitespace
/// inside keys (register separators such as `"01 01"`) is removed first and
/// keys that collapse together are summed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct OutcomeDistribution {
    counts: BTreeMap<String, u64>,
}

impl OutcomeDistribution {
    /// Validate `(bitstring, count)` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: impl IntoIterator<Item = (S, u64)>) -> QecResult<Self> {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (raw, count) in pairs {
            let raw = raw.as_ref();
            let bitstring: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            if bitstring.chars().count() != OUTCOME_WIDTH {
                return Err(QecError::MalformedOutcome(format!(
                    "outcome '{raw}' has {} bits, expected {OUTCOME_WIDTH}",
                    bitstring.chars().count()
                )));
            }
            if let Some(bad) = bitstring.chars().find(|c| !matches!(c, '0' | '1')) {
                return Err(QecError::MalformedOutcome(format!(
                    "outcome '{raw}' contains non-binary character '{bad}'"
                )));
            }
            // Every per-key count is bounded by the total.
            total = total.checked_add(count).ok_or_else(|| {
                QecError::MalformedOutcome("count total exceeds u64".into())
            })?;
            *counts.entry(bitstring).or_insert(0) += count;
        }
        Ok(Self { counts })
    }

    /// Validate an executor histogram.
    pub fn from_counts(counts: &Counts) -> QecResult<Self> {
        Self::from_pairs(counts.iter().map(|(k, &v)| (k.as_str(), v)))
    }

    /// Count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Outcomes by descending count.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl TryFrom<BTreeMap<String, u64>> for OutcomeDistribution {
    type Error = QecError;

    fn try_from(map: BTreeMap<String, u64>) -> QecResult<Self> {
        Self::from_pairs(map)
    }
}

impl From<OutcomeDistribution> for BTreeMap<String, u64> {
    fn from(dist: OutcomeDistribution) -> Self {
        dist.counts
    }
}

/// Split an outcome into `(round 1, round 2)` syndrome pairs.
pub fn round_syndromes(bitstring: &str) -> (&str, &str) {
    let (round2, round1) = bitstring.split_at(ROUND_WIDTH);
    (round1, round2)
}

/// Per-label shot counts, serialized under their bit patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndromeCounts {
    /// `00`
    #[serde(rename = "00")]
    pub no_error: u64,
    /// `10`
    #[serde(rename = "10")]
    pub x_type: u64,
    /// `01`
    #[serde(rename = "01")]
    pub z_type: u64,
    /// `11`
    #[serde(rename = "11")]
    pub y_type: u64,
}

impl SyndromeCounts {
    /// Count for one label.
    pub fn get(&self, label: SyndromeLabel) -> u64 {
        self.as_array()[label.slot()]
    }

    fn add(&mut self, label: SyndromeLabel, count: u64) {
        let slot = match label {
            SyndromeLabel::NoError => &mut self.no_error,
            SyndromeLabel::XType => &mut self.x_type,
            SyndromeLabel::ZType => &mut self.z_type,
            SyndromeLabel::YType => &mut self.y_type,
        };
        *slot += count;
    }

    fn as_array(&self) -> [u64; 4] {
        [self.no_error, self.x_type, self.z_type, self.y_type]
    }

    /// Sum over labels.
    pub fn total(&self) -> u64 {
        self.as_array().iter().sum()
    }
}

/// Summary of a post-selected run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyndromeClassification {
    /// Shots per agreed syndrome.
    pub error_types: SyndromeCounts,
    /// All shots.
    pub total_shots: u64,
    /// Shots whose two rounds agreed.
    pub valid_shots: u64,
    /// `valid_shots / total_shots`, or 0 when there were no shots.
    pub post_selection_ratio: f64,
    /// Share of valid shots per label as `"90.00%"`, keyed by bit pattern.
    pub error_percentages: BTreeMap<SyndromeLabel, String>,
}

impl SyndromeClassification {
    /// Shots with label `label`.
    pub fn count(&self, label: SyndromeLabel) -> u64 {
        self.error_types.get(label)
    }

    /// Share of valid shots with `label`, in percent. 0 when nothing survived.
    pub fn percentage(&self, label: SyndromeLabel) -> f64 {
        if self.valid_shots == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.valid_shots as f64 * 100.0
    }

    /// [`percentage`](Self::percentage) rendered as `"90.00%"`.
    pub fn formatted_percentage(&self, label: SyndromeLabel) -> String {
        format!("{:.2}%", self.percentage(label))
    }

    /// `(label, count)` in reporting order: 00, 10, 01, 11.
    pub fn syndrome_distribution(&self) -> impl Iterator<Item = (SyndromeLabel, u64)> + '_ {
        SyndromeLabel::ALL.into_iter().map(|l| (l, self.count(l)))
    }

    /// Shots discarded because the rounds disagreed.
    pub fn rejected_shots(&self) -> u64 {
        self.total_shots - self.valid_shots
    }

    /// Valid shots with a non-trivial syndrome.
    pub fn error_shots(&self) -> u64 {
        self.syndrome_distribution()
            .filter(|(l, _)| l.is_error())
            .map(|(_, n)| n)
            .sum()
    }

    /// `error_shots / valid_shots`, or 0 when nothing survived.
    pub fn detected_error_rate(&self) -> f64 {
        if self.valid_shots == 0 {
            0.0
        } else {
            self.error_shots() as f64 / self.valid_shots as f64
        }
    }
}

/// Classify outcomes by post-selecting on round agreement.
pub fn analyze(outcomes: &OutcomeDistribution) -> SyndromeClassification {
    let mut error_types = SyndromeCounts::default();
    let mut total_shots = 0u64;

    // Cannot overflow: an `OutcomeDistribution` total always fits in `u64`.
    for (bitstring, count) in outcomes.iter() {
        total_shots += count;
        let (round1, round2) = round_syndromes(bitstring);
        if round1 == round2 {
            if let Some(label) = SyndromeLabel::from_bits(round1) {
                error_types.add(label, count);
            }
        }
    }

    let valid_shots = error_types.total();
    let post_selection_ratio = if total_shots > 0 {
        valid_shots as f64 / total_shots as f64
    } else {
        0.0
    };

    let mut summary = SyndromeClassification {
        error_types,
        total_shots,
        valid_shots,
        post_selection_ratio,
        error_percentages: BTreeMap::new(),
    };
    summary.error_percentages = SyndromeLabel::ALL
        .into_iter()
        .map(|label| (label, summary.formatted_percentage(label)))
        .collect();
    summary
}
