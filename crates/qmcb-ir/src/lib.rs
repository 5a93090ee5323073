//! qmcb Circuit Intermediate Representation
//!
//! This crate holds the vocabulary every other qmcb crate speaks: the closed
//! set of gates, the qubit line, basis states, gate programs and the flat
//! circuits they are turned into.
//!
//! # Core Components
//!
//! - **Gates**: [`GateSymbol`], the fixed vocabulary with its arity
//! - **Qubits**: [`QubitId`] and [`QubitRegister`], a one-dimensional line
//! - **Basis states**: [`BasisState`] and its binary-counting enumeration
//! - **Programs**: [`GateStep`] and [`GateProgram`], gates plus qubit orders
//! - **Circuits**: [`Operation`], [`Instruction`] and [`Circuit`]
//! - **Applicator**: [`apply`], which binds a gate and an order to a register
//!
//! # Example: SWAP from three CNOTs
//!
//! ```rust
//! use qmcb_ir::{Circuit, GateProgram, GateStep, GateSymbol, QubitRegister};
//!
//! let qubits = QubitRegister::line(2);
//! let program = GateProgram::from_steps([
//!     GateStep::pair(GateSymbol::Cnot, 0, 1),
//!     GateStep::pair(GateSymbol::Cnot, 1, 0),
//!     GateStep::pair(GateSymbol::Cnot, 0, 1),
//! ]);
//! program.validate(qubits.len()).unwrap();
//!
//! let mut circuit = Circuit::for_register(&qubits);
//! for step in program.steps() {
//!     circuit.apply(step.gate, Some(step.order.as_slice()), &qubits).unwrap();
//! }
//! circuit.measure_all(&qubits).unwrap();
//!
//! assert_eq!(circuit.num_gates(), 3);
//! assert_eq!(circuit.len(), 5);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X (bit flip) |
//! | `H` | 1 | Hadamard |
//! | `S`, `T` | 1 | Phase gates |
//! | `RX`, `RY` | 1 | Rotations by π/2 |
//! | `U` | 1 | U(π/2, 0, π) |
//! | `CNOT` | 2 | Controlled-NOT, `[control, target]` |
//! | `CZ` | 2 | Controlled-Z |
//! | `SWAP` | 2 | SWAP |

pub mod apply;
pub mod basis;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod program;
pub mod qubit;

pub use apply::apply;
pub use basis::{BasisState, MAX_ENUMERABLE_QUBITS};
pub use circuit::{Circuit, MAX_MEASUREMENT_KEYS, measurement_key};
pub use error::{IrError, IrResult};
pub use gate::GateSymbol;
pub use instruction::{Instruction, Operation};
pub use program::{GateProgram, GateStep};
pub use qubit::{QubitId, QubitRegister};
