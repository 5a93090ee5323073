//! qmcb Truth-Table Engine
//!
//! Checks a small quantum circuit against a canonical one, basis state by
//! basis state. For every n-qubit basis input (in binary counting order,
//! qubit 0 most significant) the engine builds the caller's circuit, runs it
//! on a [`SimulationBackend`](qmcb_hal::SimulationBackend), and records the
//! output; optionally it does the same for a named target from the
//! [`TargetLibrary`], or reads that target's stored outputs.
//!
//! # Modules
//!
//! - [`builder`]: state preparation, program application, measurement
//! - [`library`] and [`resolver`]: canonical targets and how they are used
//! - [`format`]: bit-string, ket and Dirac labels
//! - [`table`]: append-only truth tables
//! - [`engine`]: the orchestrator
//! - [`request`]: wire-level request and response shapes
//! - [`config`]: settings from YAML and the environment
//!
//! # Example
//!
//! ```rust
//! use qmcb_adapter_sim::SimulatorBackend;
//! use qmcb_core::{SimulateRequest, TruthTableEngine};
//!
//! let request = SimulateRequest::from_json(
//!     r#"{"number_of_qubits": 2,
//!         "gates": ["CNOT", "CNOT", "CNOT"],
//!         "qubit_order": [[0, 1], [1, 0], [0, 1]],
//!         "target_unitary": "SWAP"}"#,
//! )
//! .unwrap()
//! .into_request()
//! .unwrap();
//!
//! let engine = TruthTableEngine::new(SimulatorBackend::with_seed(0));
//! let response = engine.simulate(&request).unwrap();
//!
//! assert_eq!(response.trial_truth_table.outputs(), ["00", "10", "01", "11"]);
//! assert!(response.is_match());
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod library;
pub mod request;
pub mod resolver;
pub mod table;

pub use builder::{apply_program, build, measure_qubits, prepare_basis_state};
pub use config::{ConfigError, EngineConfig, SimulationMode};
pub use engine::TruthTableEngine;
pub use error::{CircuitRole, ErrorKind, Stage, TruthTableError, TruthTableResult};
pub use format::{dirac_notation, input_label};
pub use library::{LibraryError, LibraryResult, TargetLibrary, TargetLibraryEntry};
pub use request::{SUCCESS_MESSAGE, SimulateRequest, SimulationResponse, TruthTableRequest};
pub use resolver::{ResolutionMode, ResolvedTarget, TargetResolver};
pub use table::{TruthTable, TruthTableRow};
