//! Target resolution: from a target name to something that fills a table.

use tracing::warn;

use qmcb_ir::{GateProgram, QubitRegister};

use crate::config::SimulationMode;
use crate::error::{TruthTableError, TruthTableResult};
use crate::library::TargetLibrary;

/// How the target side of a run is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// Simulate the canonical program like a trial circuit.
    Validated,
    /// Read the stored outputs, skipping simulation.
    Stored,
}

impl ResolutionMode {
    /// Mode for a run in `mode`.
    ///
    /// Stored outputs are measurement results and carry no phase, so
    /// statevector runs always simulate the target.
    pub fn for_run(validate_target: bool, mode: SimulationMode) -> Self {
        match (validate_target, mode) {
            (true, _) => ResolutionMode::Validated,
            (false, SimulationMode::Measurement) => ResolutionMode::Stored,
            (false, SimulationMode::Statevector) => {
                warn!("Stored target outputs are measurement results, simulating the target instead");
                ResolutionMode::Validated
            }
        }
    }
}

/// Result of resolving a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTarget<'a> {
    /// Program to build and simulate per basis state.
    Program(&'a GateProgram),
    /// Expected measurement outputs, row `i` for basis state `i`.
    Stored(&'a [String]),
}

/// Looks up targets in a [`TargetLibrary`].
#[derive(Debug, Clone, Copy)]
pub struct TargetResolver<'a> {
    library: &'a TargetLibrary,
}

impl<'a> TargetResolver<'a> {
    /// Resolver over `library`.
    pub fn new(library: &'a TargetLibrary) -> Self {
        Self { library }
    }

    /// Resolve `name` for a run over `qubits`.
    ///
    /// Stored mode on an entry without stored outputs falls back to the
    /// program.
    pub fn resolve(
        &self,
        name: &str,
        qubits: &QubitRegister,
        mode: ResolutionMode,
    ) -> TruthTableResult<ResolvedTarget<'a>> {
        let entry = self
            .library
            .get(name)
            .ok_or_else(|| TruthTableError::UnknownTarget(name.to_string()))?;

        if entry.num_qubits != qubits.len() {
            return Err(TruthTableError::InvalidQubitCount(format!(
                "target '{name}' acts on {} qubits but the circuit has {}",
                entry.num_qubits,
                qubits.len()
            )));
        }

        match (mode, entry.expected_outputs.as_deref()) {
            (ResolutionMode::Stored, Some(outputs)) => Ok(ResolvedTarget::Stored(outputs)),
            (ResolutionMode::Stored, None) => {
                warn!(
                    "Target '{}' has no stored outputs, simulating its program instead",
                    name
                );
                Ok(ResolvedTarget::Program(&entry.steps))
            }
            (ResolutionMode::Validated, _) => Ok(ResolvedTarget::Program(&entry.steps)),
        }
    }
}
