//! qmcb Hardware Abstraction Layer
//!
//! The seam between circuit construction and the numerics that actually run
//! a circuit. The truth-table engine only ever talks to a
//! [`SimulationBackend`]; the local statevector simulator lives in
//! `qmcb-adapter-sim`, and tests substitute deterministic fakes.

pub mod backend;
pub mod error;
pub mod result;

pub use backend::{Capabilities, SimulationBackend};
pub use error::{HalError, HalResult};
pub use result::{MeasurementOutcome, StateVector};
