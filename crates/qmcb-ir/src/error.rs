//! Error types for the IR crate.

use crate::gate::GateSymbol;
use thiserror::Error;

/// Errors that can occur while building gate programs and circuits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate symbol is not part of the vocabulary.
    #[error("Unsupported gate: '{0}'")]
    UnsupportedGate(String),

    /// Qubit index outside the register.
    #[error("Qubit index {index} out of range for {num_qubits}-qubit register{}", format_gate_context(.gate))]
    QubitOutOfRange {
        /// The offending index.
        index: i64,
        /// Size of the register.
        num_qubits: usize,
        /// Gate being applied, if any.
        gate: Option<GateSymbol>,
    },

    /// Qubit order length does not match the gate's arity.
    #[error("Gate '{gate}' requires {expected} qubits, got order of length {got}")]
    OrderArityMismatch {
        /// The gate.
        gate: GateSymbol,
        /// Arity of the gate.
        expected: usize,
        /// Length of the supplied order.
        got: usize,
    },

    /// Same qubit used twice by one gate.
    #[error("Duplicate qubit index {index} in order{}", format_gate_context(.gate))]
    DuplicateQubit {
        /// The repeated index.
        index: usize,
        /// Gate being applied, if any.
        gate: Option<GateSymbol>,
    },

    /// Number of gates and number of qubit orders differ.
    #[error("Program has {gates} gates but {orders} qubit orders")]
    OrderCountMismatch {
        /// Number of gate symbols.
        gates: usize,
        /// Number of qubit orders.
        orders: usize,
    },

    /// Qubit count is zero, negative, or does not fit the data it is paired with.
    #[error("Invalid qubit count: {0}")]
    InvalidQubitCount(String),

    /// Measurement keys only cover the alphabet.
    #[error("Cannot derive a measurement key for qubit index {index} (at most {max} qubits)")]
    IndexLabelOverflow {
        /// The index that has no label.
        index: usize,
        /// Number of available labels.
        max: usize,
    },
}

impl IrError {
    /// Whether this error is a malformed or out-of-range qubit ordering.
    pub fn is_qubit_index(&self) -> bool {
        matches!(
            self,
            IrError::QubitOutOfRange { .. }
                | IrError::OrderArityMismatch { .. }
                | IrError::DuplicateQubit { .. }
                | IrError::OrderCountMismatch { .. }
        )
    }
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<GateSymbol>) -> String {
    match gate {
        Some(g) => format!(" (gate: {g})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
