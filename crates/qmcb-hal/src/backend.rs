//! The simulation backend trait.
//!
//! A backend turns a finished [`Circuit`] into either a deterministic final
//! state or a sampled measurement record:
//!
//! ```text
//!   capabilities() ──→ evolve(circuit, qubit_order) ──→ StateVector
//!      (sync)      └─→ sample(circuit, shots)       ──→ MeasurementOutcome
//! ```
//!
//! Both calls block until the result is available. There is no job
//! lifecycle, no partial result and no cancellation.

use serde::{Deserialize, Serialize};

use qmcb_ir::{Circuit, QubitRegister};

use crate::error::HalResult;
use crate::result::{MeasurementOutcome, StateVector};

/// What a backend can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name.
    pub name: String,
    /// Largest circuit width accepted.
    pub max_qubits: usize,
    /// Largest shot count per `sample` call.
    pub max_shots: u32,
    /// Whether results are produced by local simulation.
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities of a local simulator.
    pub fn simulator(name: impl Into<String>, max_qubits: usize) -> Self {
        Self {
            name: name.into(),
            max_qubits,
            max_shots: 100_000,
            is_simulator: true,
        }
    }
}

/// A quantum simulation backend.
///
/// Implementations must be deterministic for [`evolve`](Self::evolve).
/// [`sample`](Self::sample) may draw randomness but must report exactly one
/// bit per shot for every measurement key in the circuit.
pub trait SimulationBackend: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Static description of the backend.
    fn capabilities(&self) -> Capabilities;

    /// Evolve the circuit from |0…0⟩ and return the final state, with
    /// amplitudes ordered by `qubit_order` (first qubit most significant).
    fn evolve(&self, circuit: &Circuit, qubit_order: &QubitRegister) -> HalResult<StateVector>;

    /// Run the circuit `shots` times and return the measurement record.
    fn sample(&self, circuit: &Circuit, shots: u32) -> HalResult<MeasurementOutcome>;
}

impl<B: SimulationBackend + ?Sized> SimulationBackend for &B {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn evolve(&self, circuit: &Circuit, qubit_order: &QubitRegister) -> HalResult<StateVector> {
        (**self).evolve(circuit, qubit_order)
    }

    fn sample(&self, circuit: &Circuit, shots: u32) -> HalResult<MeasurementOutcome> {
        (**self).sample(circuit, shots)
    }
}

impl<B: SimulationBackend + ?Sized> SimulationBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn evolve(&self, circuit: &Circuit, qubit_order: &QubitRegister) -> HalResult<StateVector> {
        (**self).evolve(circuit, qubit_order)
    }

    fn sample(&self, circuit: &Circuit, shots: u32) -> HalResult<MeasurementOutcome> {
        (**self).sample(circuit, shots)
    }
}
