//! Error types for truth-table construction.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use qmcb_hal::HalError;
use qmcb_ir::IrError;

/// Which of the two circuits of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitRole {
    /// The caller's circuit.
    Trial,
    /// The canonical circuit from the target library.
    Target,
}

impl fmt::Display for CircuitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitRole::Trial => write!(f, "trial"),
            CircuitRole::Target => write!(f, "target"),
        }
    }
}

/// Phase of a basis-state iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Circuit construction.
    Build,
    /// Backend call.
    Simulate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Build => write!(f, "build"),
            Stage::Simulate => write!(f, "simulate"),
        }
    }
}

/// Coarse classification a caller can map to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Gate symbol outside the vocabulary.
    UnsupportedGate,
    /// Malformed or out-of-range qubit ordering.
    QubitIndex,
    /// Target name absent from the library.
    UnknownTarget,
    /// Non-positive or mismatched qubit count.
    InvalidQubitCount,
    /// More qubits than measurement keys.
    IndexLabelOverflow,
    /// The backend failed or returned something unusable.
    SimulationBackend,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnsupportedGate => "UnsupportedGateError",
            ErrorKind::QubitIndex => "QubitIndexError",
            ErrorKind::UnknownTarget => "UnknownTargetError",
            ErrorKind::InvalidQubitCount => "InvalidQubitCountError",
            ErrorKind::IndexLabelOverflow => "IndexLabelOverflowError",
            ErrorKind::SimulationBackend => "SimulationBackendError",
        };
        f.write_str(name)
    }
}

impl From<&IrError> for ErrorKind {
    fn from(err: &IrError) -> Self {
        match err {
            IrError::UnsupportedGate(_) => ErrorKind::UnsupportedGate,
            IrError::IndexLabelOverflow { .. } => ErrorKind::IndexLabelOverflow,
            IrError::InvalidQubitCount(_) => ErrorKind::InvalidQubitCount,
            _ => ErrorKind::QubitIndex,
        }
    }
}

/// Errors that abort a truth-table run.
///
/// Every variant is fatal for the run: no partial tables are returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TruthTableError {
    /// Target name absent from the library.
    #[error("Unknown target unitary: '{0}'")]
    UnknownTarget(String),

    /// Qubit count is non-positive or disagrees with the target entry.
    #[error("Invalid qubit count: {0}")]
    InvalidQubitCount(String),

    /// A circuit could not be constructed for one basis state.
    #[error("Failed to build {circuit} circuit for input {basis}: {source}")]
    Build {
        /// Input basis state, as a bit string.
        basis: String,
        /// Which circuit failed.
        circuit: CircuitRole,
        /// Underlying construction error.
        #[source]
        source: IrError,
    },

    /// The backend failed for one basis state.
    #[error("Failed to simulate {circuit} circuit for input {basis}: {source}")]
    Simulate {
        /// Input basis state, as a bit string.
        basis: String,
        /// Which circuit failed.
        circuit: CircuitRole,
        /// Underlying backend error.
        #[source]
        source: HalError,
    },

    /// The request could not be turned into a gate program.
    #[error("Invalid request: {0}")]
    Request(#[from] IrError),
}

impl TruthTableError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TruthTableError::UnknownTarget(_) => ErrorKind::UnknownTarget,
            TruthTableError::InvalidQubitCount(_) => ErrorKind::InvalidQubitCount,
            TruthTableError::Build { source, .. } | TruthTableError::Request(source) => {
                ErrorKind::from(source)
            }
            TruthTableError::Simulate { .. } => ErrorKind::SimulationBackend,
        }
    }

    /// Stage that failed, when the error belongs to one basis state.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TruthTableError::Build { .. } => Some(Stage::Build),
            TruthTableError::Simulate { .. } => Some(Stage::Simulate),
            _ => None,
        }
    }

    /// Basis state being processed when the error occurred.
    pub fn basis(&self) -> Option<&str> {
        match self {
            TruthTableError::Build { basis, .. } | TruthTableError::Simulate { basis, .. } => {
                Some(basis.as_str())
            }
            _ => None,
        }
    }

    /// Circuit being processed when the error occurred.
    pub fn circuit(&self) -> Option<CircuitRole> {
        match self {
            TruthTableError::Build { circuit, .. } | TruthTableError::Simulate { circuit, .. } => {
                Some(*circuit)
            }
            _ => None,
        }
    }
}

/// Result type for truth-table operations.
pub type TruthTableResult<T> = Result<T, TruthTableError>;

#[cfg(test)]
mod tests {
    use super::*;
    use qmcb_ir::GateSymbol;

    #[test]
    fn test_kind_from_ir_error() {
        let err = TruthTableError::Request(IrError::UnsupportedGate("FOO".into()));
        assert_eq!(err.kind(), ErrorKind::UnsupportedGate);

        let err = TruthTableError::Build {
            basis: "01".into(),
            circuit: CircuitRole::Trial,
            source: IrError::DuplicateQubit {
                index: 0,
                gate: Some(GateSymbol::Cnot),
            },
        };
        assert_eq!(err.kind(), ErrorKind::QubitIndex);
        assert_eq!(err.stage(), Some(Stage::Build));
        assert_eq!(err.basis(), Some("01"));
    }

    #[test]
    fn test_simulate_message_names_context() {
        let err = TruthTableError::Simulate {
            basis: "10".into(),
            circuit: CircuitRole::Target,
            source: HalError::Backend("boom".into()),
        };
        assert_eq!(err.kind(), ErrorKind::SimulationBackend);
        let msg = err.to_string();
        assert!(msg.contains("target"));
        assert!(msg.contains("10"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::QubitIndex.to_string(), "QubitIndexError");
        assert_eq!(CircuitRole::Trial.to_string(), "trial");
        assert_eq!(Stage::Simulate.to_string(), "simulate");
    }
}
