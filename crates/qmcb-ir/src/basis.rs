//! Computational basis states and their enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Largest register a basis enumeration will accept.
///
/// 2^30 rows is already far beyond anything a truth table is useful for.
pub const MAX_ENUMERABLE_QUBITS: usize = 30;

/// A computational basis state: one bit per qubit, qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasisState {
    bits: Vec<u8>,
}

impl BasisState {
    /// Create a basis state from explicit bits.
    ///
    /// Any non-zero value is treated as `1`.
    pub fn new(bits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| u8::from(b != 0)).collect(),
        }
    }

    /// The `index`-th state of the `num_qubits` enumeration.
    ///
    /// Qubit 0 is the most significant digit, so index 1 of a 2-qubit
    /// enumeration is `01`.
    pub fn from_index(index: usize, num_qubits: usize) -> Self {
        let bits = (0..num_qubits)
            .map(|k| ((index >> (num_qubits - 1 - k)) & 1) as u8)
            .collect();
        Self { bits }
    }

    /// All basis states for `num_qubits` in binary counting order.
    pub fn enumerate(num_qubits: usize) -> IrResult<impl ExactSizeIterator<Item = BasisState>> {
        if num_qubits == 0 {
            return Err(IrError::InvalidQubitCount(
                "at least one qubit is required to enumerate basis states".into(),
            ));
        }
        if num_qubits > MAX_ENUMERABLE_QUBITS {
            return Err(IrError::InvalidQubitCount(format!(
                "{num_qubits} qubits exceeds the enumerable maximum of {MAX_ENUMERABLE_QUBITS}"
            )));
        }
        Ok((0..1usize << num_qubits).map(move |i| BasisState::from_index(i, num_qubits)))
    }

    /// Number of qubits this state covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the state covers no qubits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in qubit order.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Position of this state in the enumeration.
    pub fn index(&self) -> usize {
        self.bits
            .iter()
            .fold(0usize, |acc, &b| (acc << 1) | usize::from(b))
    }

    /// Render as concatenated digits, e.g. `01`.
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|b| char::from(b'0' + b)).collect()
    }

    /// Render as a ket, e.g. `|01>`.
    pub fn to_ket(&self) -> String {
        format!("|{}>", self.to_bit_string())
    }
}

impl fmt::Display for BasisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}
