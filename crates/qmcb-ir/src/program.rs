//! Gate steps and gate programs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::GateSymbol;

/// One gate applied to an ordered selection of qubits.
///
/// `order` picks register positions by role; for `CNOT` it is
/// `[control, target]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStep {
    /// The gate.
    pub gate: GateSymbol,
    /// Register positions, one per operand.
    pub order: Vec<usize>,
}

impl GateStep {
    /// Create a step.
    pub fn new(gate: GateSymbol, order: impl Into<Vec<usize>>) -> Self {
        Self {
            gate,
            order: order.into(),
        }
    }

    /// Single-qubit step on `qubit`.
    pub fn single(gate: GateSymbol, qubit: usize) -> Self {
        Self::new(gate, vec![qubit])
    }

    /// Two-qubit step on `(first, second)`.
    pub fn pair(gate: GateSymbol, first: usize, second: usize) -> Self {
        Self::new(gate, vec![first, second])
    }

    /// Check arity, range and distinctness of the order against a register size.
    pub fn validate(&self, num_qubits: usize) -> IrResult<()> {
        validate_order(self.gate, &self.order, num_qubits)
    }
}

impl fmt::Display for GateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.gate, self.order)
    }
}

/// `[w, w, ..]` on a single-qubit gate means wire `w`.
fn collapse_repeated_wire(gate: GateSymbol, order: Vec<usize>) -> Vec<usize> {
    match order.split_first() {
        Some((&wire, rest))
            if gate.arity() == 1 && !rest.is_empty() && rest.iter().all(|&q| q == wire) =>
        {
            vec![wire]
        }
        _ => order,
    }
}

/// Validate a qubit order for `gate` on a register of `num_qubits`.
pub(crate) fn validate_order(gate: GateSymbol, order: &[usize], num_qubits: usize) -> IrResult<()> {
    if order.len() != gate.arity() {
        return Err(IrError::OrderArityMismatch {
            gate,
            expected: gate.arity(),
            got: order.len(),
        });
    }
    for (i, &index) in order.iter().enumerate() {
        if index >= num_qubits {
            return Err(IrError::QubitOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                num_qubits,
                gate: Some(gate),
            });
        }
        if order[..i].contains(&index) {
            return Err(IrError::DuplicateQubit {
                index,
                gate: Some(gate),
            });
        }
    }
    Ok(())
}

/// An ordered sequence of gate steps. Order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateProgram {
    steps: Vec<GateStep>,
}

impl GateProgram {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a program from steps.
    pub fn from_steps(steps: impl IntoIterator<Item = GateStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Parse caller input: parallel lists of gate names and qubit orders.
    ///
    /// Gate names go through [`GateSymbol::from_str`](std::str::FromStr), so
    /// anything outside the vocabulary is [`IrError::UnsupportedGate`].
    /// Negative indices are rejected here; range checks against a register
    /// happen in [`GateProgram::validate`].
    ///
    /// A single-qubit gate may name its wire repeatedly, as `[1, 1]`; the
    /// order is reduced to `[1]`. Any other length mismatch is left for
    /// validation to reject.
    pub fn parse<S: AsRef<str>>(gates: &[S], orders: &[Vec<i64>]) -> IrResult<Self> {
        if gates.len() != orders.len() {
            return Err(IrError::OrderCountMismatch {
                gates: gates.len(),
                orders: orders.len(),
            });
        }

        let mut steps = Vec::with_capacity(gates.len());
        for (name, raw_order) in gates.iter().zip(orders) {
            let gate: GateSymbol = name.as_ref().parse()?;
            let order = raw_order
                .iter()
                .map(|&i| {
                    usize::try_from(i).map_err(|_| IrError::QubitOutOfRange {
                        index: i,
                        num_qubits: 0,
                        gate: Some(gate),
                    })
                })
                .collect::<IrResult<Vec<_>>>()?;
            steps.push(GateStep::new(gate, collapse_repeated_wire(gate, order)));
        }
        Ok(Self { steps })
    }

    /// Append a step.
    pub fn push(&mut self, step: GateStep) {
        self.steps.push(step);
    }

    /// Builder-style append.
    #[must_use]
    pub fn then(mut self, step: GateStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in program order.
    pub fn steps(&self) -> &[GateStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the program has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validate every step against a register size.
    pub fn validate(&self, num_qubits: usize) -> IrResult<()> {
        self.steps.iter().try_for_each(|s| s.validate(num_qubits))
    }

    /// Gate symbols in program order.
    pub fn gates(&self) -> impl Iterator<Item = GateSymbol> + '_ {
        self.steps.iter().map(|s| s.gate)
    }
}

impl FromIterator<GateStep> for GateProgram {
    fn from_iter<I: IntoIterator<Item = GateStep>>(iter: I) -> Self {
        Self::from_steps(iter)
    }
}

impl fmt::Display for GateProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
