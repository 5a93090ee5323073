//! Circuit construction for one basis-state trial.
//!
//! A trial circuit is the concatenation of three stages, in this order and
//! never rearranged:
//!
//! 1. state preparation: `X` on every qubit whose input bit is 1
//! 2. the gate program, step by step through the gate applicator
//! 3. optionally, one measurement per qubit keyed `a`, `b`, …

use qmcb_ir::{
    BasisState, Circuit, GateProgram, GateSymbol, IrError, IrResult, QubitRegister, apply,
};

/// Circuit that prepares `basis` from |0…0⟩.
pub fn prepare_basis_state(basis: &BasisState, qubits: &QubitRegister) -> IrResult<Circuit> {
    if basis.len() != qubits.len() {
        return Err(IrError::InvalidQubitCount(format!(
            "basis state {basis} has {} bits but the register has {} qubits",
            basis.len(),
            qubits.len()
        )));
    }

    let mut circuit = Circuit::for_register(qubits);
    for (&bit, qubit) in basis.bits().iter().zip(qubits.iter()) {
        if bit == 1 {
            let single: QubitRegister = std::iter::once(qubit).collect();
            circuit.push(apply(GateSymbol::BIT_FLIP, None, &single)?)?;
        }
    }
    Ok(circuit)
}

/// Append every step of `program` to `circuit`, in program order.
pub fn apply_program(
    circuit: &mut Circuit,
    program: &GateProgram,
    qubits: &QubitRegister,
) -> IrResult<()> {
    for step in program.steps() {
        circuit.apply(step.gate, Some(step.order.as_slice()), qubits)?;
    }
    Ok(())
}

/// Append one measurement per qubit, in register order.
pub fn measure_qubits(circuit: &mut Circuit, qubits: &QubitRegister) -> IrResult<()> {
    circuit.measure_all(qubits)?;
    Ok(())
}

/// Build the full circuit for one basis state.
pub fn build(
    basis: &BasisState,
    program: &GateProgram,
    qubits: &QubitRegister,
    measure: bool,
) -> IrResult<Circuit> {
    let mut circuit = prepare_basis_state(basis, qubits)?;
    apply_program(&mut circuit, program, qubits)?;
    if measure {
        measure_qubits(&mut circuit, qubits)?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmcb_ir::{GateStep, Instruction, QubitId};

    fn gate_names(circuit: &Circuit) -> Vec<String> {
        circuit.instructions().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_prepare_flips_set_bits() {
        let qubits = QubitRegister::line(3);
        let basis = BasisState::new([1, 0, 1]);
        let circuit = prepare_basis_state(&basis, &qubits).unwrap();

        assert_eq!(gate_names(&circuit), vec!["X(q0)", "X(q2)"]);
    }

    #[test]
    fn test_prepare_all_zero_is_empty() {
        let qubits = QubitRegister::line(2);
        let circuit = prepare_basis_state(&BasisState::from_index(0, 2), &qubits).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_prepare_length_mismatch() {
        let qubits = QubitRegister::line(2);
        let err = prepare_basis_state(&BasisState::new([1]), &qubits).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitCount(_)));
    }

    #[test]
    fn test_build_stage_order() {
        let qubits = QubitRegister::line(2);
        let program = GateProgram::from_steps([GateStep::pair(GateSymbol::Cnot, 1, 0)]);
        let circuit = build(&BasisState::new([0, 1]), &program, &qubits, true).unwrap();

        assert_eq!(
            gate_names(&circuit),
            vec!["X(q1)", "CNOT(q1, q0)", "measure(q0) -> 'a'", "measure(q1) -> 'b'"]
        );
    }

    #[test]
    fn test_build_without_measurement() {
        let qubits = QubitRegister::line(1);
        let program = GateProgram::from_steps([GateStep::single(GateSymbol::H, 0)]);
        let circuit = build(&BasisState::new([1]), &program, &qubits, false).unwrap();

        assert!(!circuit.has_measurements());
        assert_eq!(circuit.num_gates(), 2);
    }

    #[test]
    fn test_build_rejects_duplicate_order() {
        let qubits = QubitRegister::line(2);
        let program = GateProgram::from_steps([GateStep::pair(GateSymbol::Cnot, 0, 0)]);
        let err = build(&BasisState::new([0, 0]), &program, &qubits, true).unwrap_err();
        assert!(err.is_qubit_index());
    }

    #[test]
    fn test_measure_overflow() {
        let qubits = QubitRegister::line(27);
        let mut circuit = Circuit::for_register(&qubits);
        let err = measure_qubits(&mut circuit, &qubits).unwrap_err();
        assert!(matches!(err, IrError::IndexLabelOverflow { index: 26, .. }));
    }

    #[test]
    fn test_measure_keys_follow_register() {
        let qubits = QubitRegister::line(2);
        let mut circuit = Circuit::for_register(&qubits);
        measure_qubits(&mut circuit, &qubits).unwrap();
        assert_eq!(
            circuit.instructions()[1],
            Instruction::measure(QubitId(1), "b")
        );
    }
}
