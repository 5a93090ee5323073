//! Property-based checks for the statevector simulator.

use proptest::prelude::*;

use qmcb_adapter_sim::SimulatorBackend;
use qmcb_hal::SimulationBackend;
use qmcb_ir::{Circuit, GateSymbol, QubitRegister};

fn arb_step(num_qubits: usize) -> impl Strategy<Value = (GateSymbol, Vec<usize>)> {
    (
        prop::sample::select(GateSymbol::ALL.to_vec()),
        Just((0..num_qubits).collect::<Vec<_>>()).prop_shuffle(),
    )
        .prop_map(|(gate, order)| {
            let arity = gate.arity();
            (gate, order[..arity].to_vec())
        })
}

proptest! {
    #[test]
    fn evolution_preserves_norm(steps in prop::collection::vec(arb_step(3), 0..20)) {
        let backend = SimulatorBackend::new();
        let qubits = QubitRegister::line(3);
        let mut circuit = Circuit::for_register(&qubits);
        for (gate, order) in &steps {
            circuit.apply(*gate, Some(order.as_slice()), &qubits).unwrap();
        }

        let sv = backend.evolve(&circuit, &qubits).unwrap();
        prop_assert!(sv.is_normalized(1e-9));
    }

    #[test]
    fn basis_preparation_samples_exactly(index in 0usize..8) {
        let backend = SimulatorBackend::with_seed(1);
        let qubits = QubitRegister::line(3);
        let mut circuit = Circuit::for_register(&qubits);
        for (pos, q) in qubits.iter().enumerate() {
            if (index >> (2 - pos)) & 1 == 1 {
                circuit.x(q).unwrap();
            }
        }
        circuit.measure_all(&qubits).unwrap();

        let outcome = backend.sample(&circuit, 3).unwrap();
        let expected = format!("{index:03b}");
        for shot in 0..3 {
            prop_assert_eq!(outcome.bitstring(&["a", "b", "c"], shot).unwrap(), expected.clone());
        }
    }
}
