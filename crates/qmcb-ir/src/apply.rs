//! The gate applicator: binds a gate symbol to qubits of a register.

use crate::error::{IrError, IrResult};
use crate::gate::GateSymbol;
use crate::instruction::Operation;
use crate::program::validate_order;
use crate::qubit::QubitRegister;

/// Resolve `gate` against `qubits` into an [`Operation`].
///
/// With `order = None` the first `arity` qubits of the register are used in
/// register order; this is how state preparation addresses a single qubit.
/// Otherwise `order` must name exactly `arity` distinct, in-range register
/// positions, and the operands are taken in that order, so `[1, 0]` on a
/// `CNOT` makes qubit 1 the control.
///
/// The register is never modified.
pub fn apply(gate: GateSymbol, order: Option<&[usize]>, qubits: &QubitRegister) -> IrResult<Operation> {
    let operands = match order {
        None => {
            if qubits.len() < gate.arity() {
                // first position the register cannot supply
                return Err(IrError::QubitOutOfRange {
                    index: i64::try_from(qubits.len()).unwrap_or(i64::MAX),
                    num_qubits: qubits.len(),
                    gate: Some(gate),
                });
            }
            qubits.iter().take(gate.arity()).collect()
        }
        Some(order) => {
            validate_order(gate, order, qubits.len())?;
            order
                .iter()
                .map(|&i| {
                    qubits.get(i).ok_or(IrError::QubitOutOfRange {
                        index: i64::try_from(i).unwrap_or(i64::MAX),
                        num_qubits: qubits.len(),
                        gate: Some(gate),
                    })
                })
                .collect::<IrResult<Vec<_>>>()?
        }
    };

    Ok(Operation {
        gate,
        qubits: operands,
    })
}
