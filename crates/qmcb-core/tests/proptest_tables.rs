//! Property-based checks on truth-table shape and mode agreement.

use proptest::prelude::*;

use qmcb_adapter_sim::SimulatorBackend;
use qmcb_core::{EngineConfig, SimulationMode, TruthTableEngine, TruthTableRequest};
use qmcb_ir::{GateProgram, GateStep, GateSymbol};

/// Programs of permutation gates only, so every output is a single basis ket.
fn arb_classical_program(num_qubits: usize) -> impl Strategy<Value = GateProgram> {
    let gates = if num_qubits > 1 {
        vec![GateSymbol::X, GateSymbol::Cnot, GateSymbol::Swap]
    } else {
        vec![GateSymbol::X]
    };
    let step = (
        prop::sample::select(gates),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
    )
        .prop_map(|(gate, order)| GateStep::new(gate, order[..gate.arity()].to_vec()));
    prop::collection::vec(step, 0..8).prop_map(GateProgram::from_steps)
}

fn arb_case() -> impl Strategy<Value = (usize, GateProgram)> {
    (1usize..=4).prop_flat_map(|n| (Just(n), arb_classical_program(n)))
}

fn engine(mode: SimulationMode) -> TruthTableEngine<SimulatorBackend> {
    let config = EngineConfig {
        mode,
        input_as_ket: false,
        ..EngineConfig::default()
    };
    TruthTableEngine::new(SimulatorBackend::with_seed(3)).with_config(config)
}

proptest! {
    #[test]
    fn rows_follow_binary_counting((n, program) in arb_case()) {
        let (trial, target) = engine(SimulationMode::Measurement)
            .run(&TruthTableRequest::new(n, program))
            .unwrap();

        prop_assert_eq!(trial.len(), 1 << n);
        prop_assert!(target.is_empty());
        for (i, input) in trial.inputs().iter().enumerate() {
            prop_assert_eq!(input, &format!("{i:0n$b}"));
        }
    }

    #[test]
    fn measurement_and_statevector_agree_on_classical_programs((n, program) in arb_case()) {
        let request = TruthTableRequest::new(n, program);
        let (measured, _) = engine(SimulationMode::Measurement).run(&request).unwrap();
        let (evolved, _) = engine(SimulationMode::Statevector).run(&request).unwrap();

        prop_assert_eq!(measured.inputs(), evolved.inputs());
        for (bits, ket) in measured.outputs().iter().zip(evolved.outputs()) {
            prop_assert_eq!(&format!("|{bits}⟩"), ket);
        }
    }
}
