//! Flat circuit representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::apply::apply;
use crate::error::{IrError, IrResult};
use crate::gate::GateSymbol;
use crate::instruction::{Instruction, Operation};
use crate::qubit::{QubitId, QubitRegister};

/// Number of distinct measurement keys (`a` through `z`).
pub const MAX_MEASUREMENT_KEYS: usize = 26;

/// Deterministic measurement key for a register position: 0 → `a`, 1 → `b`, ….
pub fn measurement_key(index: usize) -> IrResult<String> {
    if index < MAX_MEASUREMENT_KEYS {
        // index < 26 so the cast and the addition cannot overflow
        Ok(char::from(b'a' + index as u8).to_string())
    } else {
        Err(IrError::IndexLabelOverflow {
            index,
            max: MAX_MEASUREMENT_KEYS,
        })
    }
}

/// A quantum circuit: an ordered list of instructions over a fixed number of qubits.
///
/// Instructions are kept exactly in insertion order; nothing is reordered,
/// merged or cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            instructions: vec![],
        }
    }

    /// Create an empty circuit wide enough for every qubit of a register.
    ///
    /// For a line register this is its length.
    pub fn for_register(qubits: &QubitRegister) -> Self {
        Self::new(qubits.iter().map(|q| q.index() + 1).max().unwrap_or(0))
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate (non-measurement) instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Measurement keys in instruction order.
    pub fn measurement_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Measure { key, .. } => Some(key.as_str()),
            Instruction::Gate(_) => None,
        })
    }

    /// Append an instruction, checking its qubits are in range.
    ///
    /// A gate must have exactly as many operands as its arity, all distinct.
    pub fn push(&mut self, instruction: impl Into<Instruction>) -> IrResult<&mut Self> {
        let instruction = instruction.into();
        if let Instruction::Gate(op) = &instruction {
            check_operands(op)?;
        }
        for q in instruction.qubits() {
            self.check_qubit(*q)?;
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append every instruction of `other`, preserving order.
    pub fn append(&mut self, other: Circuit) -> IrResult<&mut Self> {
        if other.num_qubits > self.num_qubits {
            return Err(IrError::InvalidQubitCount(format!(
                "cannot append a {}-qubit circuit to a {}-qubit circuit",
                other.num_qubits, self.num_qubits
            )));
        }
        self.instructions.extend(other.instructions);
        Ok(self)
    }

    /// Apply `gate` to explicit qubits.
    pub fn gate(&mut self, gate: GateSymbol, qubits: &[QubitId]) -> IrResult<&mut Self> {
        self.push(Operation {
            gate,
            qubits: qubits.to_vec(),
        })
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(GateSymbol::X, &[qubit])
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(GateSymbol::H, &[qubit])
    }

    /// Apply CNOT gate.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(GateSymbol::Cnot, &[control, target])
    }

    /// Measure one qubit under `key`.
    pub fn measure(&mut self, qubit: QubitId, key: impl Into<String>) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, key))
    }

    /// Measure every qubit of `register`, keyed by [`measurement_key`].
    pub fn measure_all(&mut self, register: &QubitRegister) -> IrResult<&mut Self> {
        for (i, q) in register.iter().enumerate() {
            let key = measurement_key(i)?;
            self.measure(q, key)?;
        }
        Ok(self)
    }

    /// Resolve `gate` against `register` with the gate applicator and append it.
    pub fn apply(
        &mut self,
        gate: GateSymbol,
        order: Option<&[usize]>,
        register: &QubitRegister,
    ) -> IrResult<&mut Self> {
        let op = apply(gate, order, register)?;
        self.push(op)
    }

    fn check_qubit(&self, qubit: QubitId) -> IrResult<()> {
        if qubit.index() < self.num_qubits {
            Ok(())
        } else {
            Err(IrError::QubitOutOfRange {
                index: i64::from(qubit.0),
                num_qubits: self.num_qubits,
                gate: None,
            })
        }
    }
}

fn check_operands(op: &Operation) -> IrResult<()> {
    if op.qubits.len() != op.gate.arity() {
        return Err(IrError::OrderArityMismatch {
            gate: op.gate,
            expected: op.gate.arity(),
            got: op.qubits.len(),
        });
    }
    for (i, q) in op.qubits.iter().enumerate() {
        if op.qubits[..i].contains(q) {
            return Err(IrError::DuplicateQubit {
                index: q.index(),
                gate: Some(op.gate),
            });
        }
    }
    Ok(())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit({} qubits)", self.num_qubits)?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
