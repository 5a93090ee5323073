//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::GateSymbol;
use crate::qubit::QubitId;

/// A gate bound to concrete qubits.
///
/// Produced by [`apply`](crate::apply::apply); immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate.
    pub gate: GateSymbol,
    /// Operand qubits, in role order.
    pub qubits: Vec<QubitId>,
}

impl Operation {
    /// Name of the gate.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{q}")?;
        }
        write!(f, ")")
    }
}

/// One element of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// A unitary gate.
    Gate(Operation),
    /// Projective measurement of one qubit in the computational basis.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Key under which the outcome is reported.
        key: String,
    },
}

impl Instruction {
    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, key: impl Into<String>) -> Self {
        Instruction::Measure {
            qubit,
            key: key.into(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self, Instruction::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Instruction::Measure { .. })
    }

    /// Get the operation if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Operation> {
        match self {
            Instruction::Gate(op) => Some(op),
            Instruction::Measure { .. } => None,
        }
    }

    /// Qubits this instruction touches.
    pub fn qubits(&self) -> &[QubitId] {
        match self {
            Instruction::Gate(op) => &op.qubits,
            Instruction::Measure { qubit, .. } => std::slice::from_ref(qubit),
        }
    }

    /// Name of the instruction.
    pub fn name(&self) -> &str {
        match self {
            Instruction::Gate(op) => op.name(),
            Instruction::Measure { .. } => "measure",
        }
    }
}

impl From<Operation> for Instruction {
    fn from(op: Operation) -> Self {
        Instruction::Gate(op)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Gate(op) => write!(f, "{op}"),
            Instruction::Measure { qubit, key } => write!(f, "measure({qubit}) -> '{key}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::from(Operation {
            gate: GateSymbol::Cnot,
            qubits: vec![QubitId(1), QubitId(0)],
        });
        assert!(inst.is_gate());
        assert_eq!(inst.qubits().len(), 2);
        assert_eq!(inst.name(), "CNOT");
        assert_eq!(format!("{inst}"), "CNOT(q1, q0)");
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(0), "a");
        assert!(inst.is_measure());
        assert!(inst.as_gate().is_none());
        assert_eq!(inst.qubits(), &[QubitId(0)]);
        assert_eq!(format!("{inst}"), "measure(q0) -> 'a'");
    }
}
