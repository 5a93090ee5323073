//! Caller-facing request and response shapes.

use serde::{Deserialize, Serialize};

use qmcb_ir::GateProgram;

use crate::error::{TruthTableError, TruthTableResult};
use crate::table::TruthTable;

/// Message of a successful [`SimulationResponse`].
pub const SUCCESS_MESSAGE: &str = "Successfully simulated trial and target unitaries.";

/// Wire form of a simulation request.
///
/// ```json
/// {
///   "number_of_qubits": 2,
///   "gates": ["CNOT", "CNOT", "CNOT"],
///   "qubit_order": [[0, 1], [1, 0], [0, 1]],
///   "target_unitary": "SWAP"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Number of qubits on the line.
    pub number_of_qubits: i64,
    /// Gate names, one per step.
    #[serde(default)]
    pub gates: Vec<String>,
    /// Qubit order, one per step.
    #[serde(default)]
    pub qubit_order: Vec<Vec<i64>>,
    /// Target to compare against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_unitary: Option<String>,
    /// Per-request override of the configured target mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_target: Option<bool>,
}

impl SimulateRequest {
    /// Parse the JSON wire form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check and convert into an engine request.
    ///
    /// Gate names and index signs are checked here; index ranges and
    /// duplicates are checked per basis state when circuits are built.
    pub fn into_request(self) -> TruthTableResult<TruthTableRequest> {
        let num_qubits = usize::try_from(self.number_of_qubits)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                TruthTableError::InvalidQubitCount(format!(
                    "number_of_qubits must be positive, got {}",
                    self.number_of_qubits
                ))
            })?;

        let program = GateProgram::parse(&self.gates, &self.qubit_order)?;

        Ok(TruthTableRequest {
            num_qubits,
            program,
            target: self.target_unitary.filter(|t| !t.is_empty()),
            validate_target: self.validate_target,
        })
    }
}

/// A checked request, ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRequest {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Trial program.
    pub program: GateProgram,
    /// Target name, if any.
    pub target: Option<String>,
    /// Overrides the engine's configured target mode.
    pub validate_target: Option<bool>,
}

impl TruthTableRequest {
    /// Request without a target.
    pub fn new(num_qubits: usize, program: GateProgram) -> Self {
        Self {
            num_qubits,
            program,
            target: None,
            validate_target: None,
        }
    }

    /// Compare against `target`.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Simulate the target (`true`) or read its stored outputs (`false`).
    #[must_use]
    pub fn with_validate_target(mut self, validate: bool) -> Self {
        self.validate_target = Some(validate);
        self
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Status message.
    pub message: String,
    /// Table of the caller's circuit.
    pub trial_truth_table: TruthTable,
    /// Table of the target; empty when no target was requested.
    pub target_truth_table: TruthTable,
}

impl SimulationResponse {
    /// Successful response wrapping both tables.
    pub fn success(trial: TruthTable, target: TruthTable) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            trial_truth_table: trial,
            target_truth_table: target,
        }
    }

    /// Per-row comparison of trial and target outputs.
    ///
    /// Empty when there is no target table.
    pub fn row_matches(&self) -> Vec<bool> {
        self.trial_truth_table
            .outputs()
            .iter()
            .zip(self.target_truth_table.outputs())
            .map(|(trial, target)| trial == target)
            .collect()
    }

    /// Whether the trial circuit reproduces the target on every row.
    pub fn is_match(&self) -> bool {
        !self.target_truth_table.is_empty()
            && self.trial_truth_table.len() == self.target_truth_table.len()
            && self.row_matches().into_iter().all(|ok| ok)
    }
}
