//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, instrument};

use qmcb_hal::{
    Capabilities, HalError, HalResult, MeasurementOutcome, SimulationBackend, StateVector,
};
use qmcb_ir::{Circuit, Instruction, Operation, QubitId, QubitRegister};

use crate::statevector::Statevector;

/// Default width limit of the local simulator.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Local simulator backend.
///
/// This backend simulates quantum circuits using a statevector simulation.
/// It supports circuits up to ~20 qubits (limited by memory).
pub struct SimulatorBackend {
    name: String,
    /// Maximum number of qubits supported.
    max_qubits: usize,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::from_entropy())
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self::build(max_qubits, StdRng::from_entropy())
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_MAX_QUBITS, StdRng::seed_from_u64(seed))
    }

    fn build(max_qubits: usize, rng: StdRng) -> Self {
        Self {
            name: "simulator".into(),
            max_qubits,
            rng: Mutex::new(rng),
        }
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        Ok(())
    }

    /// Apply every gate and collect the terminal measurements.
    #[instrument(skip(self, circuit))]
    fn run_gates(&self, circuit: &Circuit) -> HalResult<(Statevector, Vec<(QubitId, String)>)> {
        self.check_size(circuit)?;

        let start = Instant::now();
        let mut sv = Statevector::new(circuit.num_qubits());
        let mut measurements: Vec<(QubitId, String)> = Vec::new();

        for inst in circuit.instructions() {
            match inst {
                Instruction::Gate(op) => {
                    if !measurements.is_empty() {
                        return Err(HalError::Unsupported(format!(
                            "gate {op} after a measurement"
                        )));
                    }
                    check_operands(op, circuit.num_qubits())?;
                    sv.apply(op);
                }
                Instruction::Measure { qubit, key } => {
                    if qubit.index() >= circuit.num_qubits() {
                        return Err(HalError::InvalidCircuit(format!(
                            "measured qubit {qubit} is outside the circuit"
                        )));
                    }
                    if measurements.iter().any(|(_, k)| k == key) {
                        return Err(HalError::InvalidCircuit(format!(
                            "measurement key '{key}' used twice"
                        )));
                    }
                    measurements.push((*qubit, key.clone()));
                }
            }
        }

        debug!(
            "Applied {} gates on {} qubits in {:?}",
            circuit.num_gates(),
            circuit.num_qubits(),
            start.elapsed()
        );
        Ok((sv, measurements))
    }
}

/// Arity, range and distinctness of a gate's operands.
fn check_operands(op: &Operation, num_qubits: usize) -> HalResult<()> {
    if op.qubits.len() != op.gate.arity() {
        return Err(HalError::InvalidCircuit(format!(
            "gate {op} needs {} operands",
            op.gate.arity()
        )));
    }
    for (i, q) in op.qubits.iter().enumerate() {
        if q.index() >= num_qubits || op.qubits[..i].contains(q) {
            return Err(HalError::InvalidCircuit(format!(
                "gate {op} has invalid operand {q} for {num_qubits} qubits"
            )));
        }
    }
    Ok(())
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBackend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::simulator(self.name.clone(), self.max_qubits)
    }

    #[instrument(skip(self, circuit, qubit_order))]
    fn evolve(&self, circuit: &Circuit, qubit_order: &QubitRegister) -> HalResult<StateVector> {
        if circuit.has_measurements() {
            return Err(HalError::Unsupported(
                "evolve does not accept measurements".into(),
            ));
        }

        let order: Vec<usize> = qubit_order.iter().map(QubitId::index).collect();
        let mut seen = vec![false; circuit.num_qubits()];
        for &q in &order {
            match seen.get_mut(q) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(HalError::InvalidCircuit(format!(
                        "qubit order {qubit_order} is not a permutation of the circuit's {} qubits",
                        circuit.num_qubits()
                    )));
                }
            }
        }
        if order.len() != circuit.num_qubits() {
            return Err(HalError::InvalidCircuit(format!(
                "qubit order {qubit_order} does not cover the circuit's {} qubits",
                circuit.num_qubits()
            )));
        }

        let (sv, _) = self.run_gates(circuit)?;
        StateVector::new(sv.reordered(&order))
    }

    #[instrument(skip(self, circuit))]
    fn sample(&self, circuit: &Circuit, shots: u32) -> HalResult<MeasurementOutcome> {
        let caps = self.capabilities();
        if shots == 0 || shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (allowed 1..={})",
                caps.max_shots
            )));
        }

        let (sv, measurements) = self.run_gates(circuit)?;
        let mut records: Vec<Vec<u8>> = vec![Vec::with_capacity(shots as usize); measurements.len()];

        {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            for shot in 0..shots {
                let outcome = sv.sample(&mut *rng);
                for ((qubit, _), bits) in measurements.iter().zip(records.iter_mut()) {
                    bits.push(((outcome >> qubit.index()) & 1) as u8);
                }
                if shot > 0 && shot % 1000 == 0 {
                    debug!("Completed {} shots", shot);
                }
            }
        }

        let mut result = MeasurementOutcome::new(shots);
        for ((_, key), bits) in measurements.into_iter().zip(records) {
            result.insert(key, bits);
        }
        Ok(result)
    }
}
