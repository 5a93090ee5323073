//! qmcb Local Statevector Simulator
//!
//! The default [`SimulationBackend`](qmcb_hal::SimulationBackend) for truth
//! table construction. Exact statevector simulation, limited by memory to
//! roughly 20 qubits; the truth-table workloads it serves are one or two.
//!
//! # Features
//!
//! - **Exact evolution**: `evolve` returns the final state ordered by the
//!   caller's qubit order, first qubit most significant
//! - **Measurement sampling**: `sample` draws one basis state per shot and
//!   reports every terminal measurement under its key
//! - **Reproducible**: [`SimulatorBackend::with_seed`] fixes the sampler
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qmcb_adapter_sim::SimulatorBackend;
//! use qmcb_hal::SimulationBackend;
//! use qmcb_ir::{Circuit, QubitId, QubitRegister};
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let qubits = QubitRegister::line(2);
//!
//! let mut circuit = Circuit::for_register(&qubits);
//! circuit.x(QubitId(0)).unwrap();
//! circuit.cnot(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all(&qubits).unwrap();
//!
//! let outcome = backend.sample(&circuit, 1).unwrap();
//! assert_eq!(outcome.bitstring(&["a", "b"], 0).unwrap(), "11");
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
