//! Stochastic noise channels attached to circuit operations.
//!
//! A [`NoiseChannelSet`] is a pure description: a list of rules saying "after
//! operation `op` acts on exactly these qubits, apply this channel". Executors
//! decide how to realise it; the trajectory simulator samples one Pauli fault
//! per matching operation per shot.
//!
//! Channel parameters follow the usual simulator conventions:
//!
//! - [`PauliChannel`]: explicit probabilities for X, Y and Z, identity takes
//!   the remainder.
//! - [`QuantumError::Depolarizing`]: with probability `p` the operands are
//!   replaced by the maximally mixed state, i.e. each of the `4^n` Pauli
//!   strings (identity included) is applied with probability `p / 4^n`.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// Tolerance used when checking that probabilities sum to one.
const PROBABILITY_EPSILON: f64 = 1e-12;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Bit flip.
    X,
    /// Bit and phase flip.
    Y,
    /// Phase flip.
    Z,
}

impl Pauli {
    /// The four Paulis in `I, X, Y, Z` order.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// Gate that applies this Pauli.
    pub fn as_gate(self) -> StandardGate {
        match self {
            Pauli::I => StandardGate::I,
            Pauli::X => StandardGate::X,
            Pauli::Y => StandardGate::Y,
            Pauli::Z => StandardGate::Z,
        }
    }

    /// Whether this is the identity.
    pub fn is_identity(self) -> bool {
        self == Pauli::I
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(s)
    }
}

fn check_probability(name: &str, p: f64) -> IrResult<()> {
    if !p.is_finite() || p < 0.0 || p > 1.0 {
        return Err(IrError::InvalidChannel(format!(
            "{name} probability {p} is outside [0, 1]"
        )));
    }
    Ok(())
}

/// Single-qubit Pauli channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PauliChannel {
    p_x: f64,
    p_y: f64,
    p_z: f64,
}

impl PauliChannel {
    /// Channel applying X, Y, Z with the given probabilities.
    ///
    /// Fails if any probability is negative or non-finite, or if they sum to
    /// more than one (the identity weight would be negative).
    pub fn new(p_x: f64, p_y: f64, p_z: f64) -> IrResult<Self> {
        check_probability("X", p_x)?;
        check_probability("Y", p_y)?;
        check_probability("Z", p_z)?;
        let total = p_x + p_y + p_z;
        if total > 1.0 + PROBABILITY_EPSILON {
            return Err(IrError::InvalidChannel(format!(
                "Pauli error probabilities sum to {total}, leaving a negative identity weight"
            )));
        }
        Ok(Self { p_x, p_y, p_z })
    }

    /// Symmetric channel: each of X, Y, Z with probability `error_probability / 3`.
    ///
    /// Valid for `error_probability` in `[0, 1]`.
    pub fn symmetric(error_probability: f64) -> IrResult<Self> {
        check_probability("error", error_probability)?;
        let p = error_probability / 3.0;
        Self::new(p, p, p)
    }

    /// Probabilities in `I, X, Y, Z` order.
    pub fn probabilities(&self) -> [f64; 4] {
        [
            (1.0 - self.error_weight()).max(0.0),
            self.p_x,
            self.p_y,
            self.p_z,
        ]
    }

    /// Total probability of a non-identity Pauli.
    pub fn error_weight(&self) -> f64 {
        self.p_x + self.p_y + self.p_z
    }

    /// Map a uniform sample `u ∈ [0, 1)` to a Pauli.
    pub fn sample(&self, u: f64) -> Pauli {
        let mut cumulative = 0.0;
        for (pauli, p) in [
            (Pauli::X, self.p_x),
            (Pauli::Y, self.p_y),
            (Pauli::Z, self.p_z),
        ] {
            cumulative += p;
            if u < cumulative {
                return pauli;
            }
        }
        Pauli::I
    }
}

/// A stochastic error process on one or more qubits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum QuantumError {
    /// Single-qubit Pauli channel.
    Pauli(PauliChannel),
    /// `n`-qubit depolarizing channel (n = 1 or 2).
    Depolarizing {
        /// Depolarizing probability.
        p: f64,
        /// Number of qubits the channel acts on.
        num_qubits: u32,
    },
}

impl QuantumError {
    /// Depolarizing channel on `num_qubits` qubits.
    pub fn depolarizing(p: f64, num_qubits: u32) -> IrResult<Self> {
        check_probability("depolarizing", p)?;
        if !(1..=2).contains(&num_qubits) {
            return Err(IrError::InvalidChannel(format!(
                "depolarizing channels on {num_qubits} qubits are not supported"
            )));
        }
        Ok(QuantumError::Depolarizing { p, num_qubits })
    }

    /// Rebuild through the validating constructors.
    fn revalidated(self) -> IrResult<Self> {
        match self {
            QuantumError::Pauli(channel) => {
                PauliChannel::new(channel.p_x, channel.p_y, channel.p_z).map(QuantumError::Pauli)
            }
            QuantumError::Depolarizing { p, num_qubits } => {
                QuantumError::depolarizing(p, num_qubits)
            }
        }
    }

    /// Number of qubits the channel acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            QuantumError::Pauli(_) => 1,
            QuantumError::Depolarizing { num_qubits, .. } => *num_qubits,
        }
    }

    /// Short channel name.
    pub fn name(&self) -> &'static str {
        match self {
            QuantumError::Pauli(_) => "pauli",
            QuantumError::Depolarizing { .. } => "depolarizing",
        }
    }

    /// Probability that the channel applies a non-identity Pauli string.
    pub fn error_weight(&self) -> f64 {
        match self {
            QuantumError::Pauli(channel) => channel.error_weight(),
            QuantumError::Depolarizing { p, num_qubits } => {
                let strings = 4_f64.powi(*num_qubits as i32);
                p * (strings - 1.0) / strings
            }
        }
    }

    /// Map a uniform sample `u ∈ [0, 1)` to a Pauli string.
    ///
    /// Slot `k` holds the Pauli for the rule's `k`-th qubit; slots beyond the
    /// channel's arity are always `I`.
    pub fn sample(&self, u: f64) -> [Pauli; 2] {
        match self {
            QuantumError::Pauli(channel) => [channel.sample(u), Pauli::I],
            QuantumError::Depolarizing { p, num_qubits } => {
                if u >= *p {
                    return [Pauli::I, Pauli::I];
                }
                let strings = 1usize << (2 * num_qubits);
                let index = ((u / p) * strings as f64) as usize;
                let index = index.min(strings - 1);
                [Pauli::ALL[index & 3], Pauli::ALL[(index >> 2) & 3]]
            }
        }
    }
}

impl fmt::Display for QuantumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantumError::Pauli(c) => {
                let [p_i, p_x, p_y, p_z] = c.probabilities();
                write!(
                    f,
                    "pauli(I={p_i:.4}, X={p_x:.4}, Y={p_y:.4}, Z={p_z:.4})"
                )
            }
            QuantumError::Depolarizing { p, num_qubits } => {
                write!(f, "depolarizing{num_qubits}q(p={p:.4})")
            }
        }
    }
}

/// "After `op` on `qubits`, apply `error`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseRule {
    /// Operation name (`"h"`, `"cx"`, `"reset"`, ...).
    pub op: String,
    /// Exact ordered operand list the rule matches.
    pub qubits: Vec<QubitId>,
    /// Channel applied after the operation.
    pub error: QuantumError,
}

/// Immutable set of noise rules keyed by operation and ordered operands.
///
/// Adding a rule for a key that already exists replaces the earlier rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NoiseRule>", into = "Vec<NoiseRule>")]
pub struct NoiseChannelSet {
    rules: Vec<NoiseRule>,
    #[serde(skip)]
    index: FxHashMap<String, FxHashMap<Vec<QubitId>, usize>>,
}

impl NoiseChannelSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The set with no rules: every operation is ideal.
    pub fn noiseless() -> Self {
        Self::default()
    }

    /// Attach `error` to `op` acting on `qubits`.
    pub fn add_rule(
        &mut self,
        op: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
        error: QuantumError,
    ) -> IrResult<()> {
        let op = op.into();
        let qubits: Vec<QubitId> = qubits.into_iter().collect();
        if qubits.len() != error.num_qubits() as usize {
            return Err(IrError::QubitCountMismatch {
                op,
                expected: error.num_qubits() as usize,
                got: qubits.len(),
            });
        }
        self.insert(NoiseRule { op, qubits, error });
        Ok(())
    }

    fn insert(&mut self, rule: NoiseRule) {
        let slot = self
            .index
            .entry(rule.op.clone())
            .or_default()
            .get(&rule.qubits)
            .copied();
        match slot {
            Some(i) => self.rules[i] = rule,
            None => {
                let i = self.rules.len();
                self.index
                    .entry(rule.op.clone())
                    .or_default()
                    .insert(rule.qubits.clone(), i);
                self.rules.push(rule);
            }
        }
    }

    /// Channel attached to `op` on exactly `qubits`, if any.
    #[inline]
    pub fn lookup(&self, op: &str, qubits: &[QubitId]) -> Option<&QuantumError> {
        self.index
            .get(op)
            .and_then(|by_qubits| by_qubits.get(qubits))
            .map(|&i| &self.rules[i].error)
    }

    /// Rules in insertion order.
    pub fn rules(&self) -> &[NoiseRule] {
        &self.rules
    }

    /// Rules attached to one operation name.
    pub fn rules_for<'a>(&'a self, op: &'a str) -> impl Iterator<Item = &'a NoiseRule> + 'a {
        self.rules.iter().filter(move |r| r.op == op)
    }

    /// Distinct operation names carrying noise.
    pub fn noisy_ops(&self) -> BTreeSet<&str> {
        self.rules.iter().map(|r| r.op.as_str()).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Deserialized rules go through the same checks as [`NoiseChannelSet::add_rule`].
impl TryFrom<Vec<NoiseRule>> for NoiseChannelSet {
    type Error = IrError;

    fn try_from(rules: Vec<NoiseRule>) -> IrResult<Self> {
        let mut set = Self::default();
        for rule in rules {
            let error = rule.error.revalidated()?;
            set.add_rule(rule.op, rule.qubits, error)?;
        }
        Ok(set)
    }
}

impl From<NoiseChannelSet> for Vec<NoiseRule> {
    fn from(set: NoiseChannelSet) -> Self {
        set.rules
    }
}
