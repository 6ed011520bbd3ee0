//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit in a statevector index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Position of this bit in the classical outcome word.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Where a bit lives: the register name and its offset inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterSlot {
    /// Register name, e.g. `"q"` or `"c1"`.
    pub register: String,
    /// Offset inside the register.
    pub offset: u32,
}

/// A qubit together with its optional register slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// Circuit-wide identifier.
    pub id: QubitId,
    /// Register membership.
    pub slot: Option<RegisterSlot>,
}

impl Qubit {
    /// A free-standing qubit.
    pub fn new(id: QubitId) -> Self {
        Self { id, slot: None }
    }

    /// A qubit that belongs to `register` at `offset`.
    pub fn in_register(id: QubitId, register: impl Into<String>, offset: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                register: register.into(),
                offset,
            }),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{}[{}]", slot.register, slot.offset),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A classical bit together with its optional register slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// Circuit-wide identifier.
    pub id: ClbitId,
    /// Register membership.
    pub slot: Option<RegisterSlot>,
}

impl Clbit {
    /// A free-standing classical bit.
    pub fn new(id: ClbitId) -> Self {
        Self { id, slot: None }
    }

    /// A classical bit that belongs to `register` at `offset`.
    pub fn in_register(id: ClbitId, register: impl Into<String>, offset: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                register: register.into(),
                offset,
            }),
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(slot) => write!(f, "{}[{}]", slot.register, slot.offset),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A named, contiguous group of classical bits.
///
/// Registers are laid out in creation order, so the first register owns the
/// least-significant bits of the rendered outcome string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Member bits, lowest offset first.
    pub bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    /// Number of bits in the register.
    pub fn width(&self) -> usize {
        self.bits.len()
    }
}
