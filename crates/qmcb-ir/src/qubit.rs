//! Qubit identifiers and the qubit register.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position of this qubit on the line.
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

/// An ordered, fixed-length sequence of qubits on a one-dimensional line.
///
/// The register is created once per run and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitRegister {
    qubits: Vec<QubitId>,
}

impl QubitRegister {
    /// Create the line `q0, q1, …, q(n-1)`.
    pub fn line(num_qubits: u32) -> Self {
        Self {
            qubits: (0..num_qubits).map(QubitId).collect(),
        }
    }

    /// Number of qubits in the register.
    #[inline]
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the register is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Qubit at a register position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<QubitId> {
        self.qubits.get(index).copied()
    }

    /// Qubits in register order.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }

    /// Qubits as a slice.
    pub fn as_slice(&self) -> &[QubitId] {
        &self.qubits
    }
}

impl FromIterator<QubitId> for QubitRegister {
    fn from_iter<I: IntoIterator<Item = QubitId>>(iter: I) -> Self {
        Self {
            qubits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for QubitRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, "]")
    }
}
