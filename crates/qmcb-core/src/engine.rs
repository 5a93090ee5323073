//! The truth-table engine.
//!
//! One run is one sequential pass over every basis state:
//!
//! ```text
//!   resolve target ──→ for each basis state (binary counting order):
//!                         build trial  ──→ simulate ──→ append trial row
//!                         build target ──→ simulate ──→ append target row
//! ```
//!
//! With stored target outputs the target table is filled before the loop
//! and the target side is never simulated. The first failure aborts the run.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use qmcb_hal::{HalResult, SimulationBackend};
use qmcb_ir::{BasisState, Circuit, GateProgram, QubitRegister};

use crate::builder::build;
use crate::config::{EngineConfig, SimulationMode};
use crate::error::{CircuitRole, TruthTableError, TruthTableResult};
use crate::format::{dirac_notation, input_label};
use crate::library::TargetLibrary;
use crate::request::{SimulationResponse, TruthTableRequest};
use crate::resolver::{ResolutionMode, ResolvedTarget, TargetResolver};
use crate::table::TruthTable;

/// Builds trial and target truth tables against a [`SimulationBackend`].
pub struct TruthTableEngine<B> {
    backend: B,
    library: Arc<TargetLibrary>,
    config: EngineConfig,
}

impl<B: SimulationBackend> TruthTableEngine<B> {
    /// Engine over the built-in target library with default settings.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            library: TargetLibrary::builtin(),
            config: EngineConfig::default(),
        }
    }

    /// Use a different target library.
    #[must_use]
    pub fn with_library(mut self, library: Arc<TargetLibrary>) -> Self {
        self.library = library;
        self
    }

    /// Use different settings.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The target library.
    pub fn library(&self) -> &TargetLibrary {
        &self.library
    }

    /// The settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a request and wrap the tables in a response.
    pub fn simulate(&self, request: &TruthTableRequest) -> TruthTableResult<SimulationResponse> {
        let (trial, target) = self.run(request)?;
        Ok(SimulationResponse::success(trial, target))
    }

    /// Build the trial table and, if a target is named, the target table.
    ///
    /// Rows of both tables follow basis-state enumeration order. Without a
    /// target the target table is empty.
    #[instrument(skip(self, request), fields(num_qubits = request.num_qubits, target_unitary = ?request.target))]
    pub fn run(&self, request: &TruthTableRequest) -> TruthTableResult<(TruthTable, TruthTable)> {
        let n = request.num_qubits;
        if n == 0 {
            return Err(TruthTableError::InvalidQubitCount(
                "a circuit needs at least one qubit".into(),
            ));
        }
        let width = u32::try_from(n).map_err(|_| {
            TruthTableError::InvalidQubitCount(format!("{n} qubits do not fit a register"))
        })?;
        let qubits = QubitRegister::line(width);

        let bases = || {
            BasisState::enumerate(n).map_err(|e| TruthTableError::InvalidQubitCount(e.to_string()))
        };
        let num_rows = bases()?.len();

        let mode = self.config.mode;
        let validate = request.validate_target.unwrap_or(self.config.validate_target);
        let resolution = ResolutionMode::for_run(validate, mode);

        let target = request
            .target
            .as_deref()
            .map(|name| TargetResolver::new(&self.library).resolve(name, &qubits, resolution))
            .transpose()?;

        info!(
            "Building truth tables: {} basis states, mode {}, target {}",
            num_rows,
            mode,
            match target {
                None => "none",
                Some(ResolvedTarget::Program(_)) => "simulated",
                Some(ResolvedTarget::Stored(_)) => "stored",
            }
        );

        let mut trial_table = TruthTable::new();
        let mut target_table = TruthTable::new();

        if let Some(ResolvedTarget::Stored(outputs)) = target {
            for (basis, output) in bases()?.zip(outputs) {
                target_table.push(self.input_label(&basis), output.as_str());
            }
        }

        for basis in bases()? {
            let input = self.input_label(&basis);

            let output = self.evaluate(&basis, &request.program, &qubits, CircuitRole::Trial)?;
            debug!("trial {} -> {}", input, output);
            trial_table.push(input.clone(), output);

            if let Some(ResolvedTarget::Program(program)) = target {
                let output = self.evaluate(&basis, program, &qubits, CircuitRole::Target)?;
                debug!("target {} -> {}", input, output);
                target_table.push(input, output);
            }
        }

        info!(
            "Built {} trial rows and {} target rows",
            trial_table.len(),
            target_table.len()
        );
        Ok((trial_table, target_table))
    }

    fn input_label(&self, basis: &BasisState) -> String {
        input_label(basis, self.config.mode, self.config.input_as_ket)
    }

    /// Build and simulate one circuit, returning its output label.
    fn evaluate(
        &self,
        basis: &BasisState,
        program: &GateProgram,
        qubits: &QubitRegister,
        role: CircuitRole,
    ) -> TruthTableResult<String> {
        let measure = self.config.mode.measures();
        let circuit =
            build(basis, program, qubits, measure).map_err(|source| TruthTableError::Build {
                basis: basis.to_bit_string(),
                circuit: role,
                source,
            })?;

        self.simulate_circuit(&circuit, qubits)
            .map_err(|source| TruthTableError::Simulate {
                basis: basis.to_bit_string(),
                circuit: role,
                source,
            })
    }

    fn simulate_circuit(&self, circuit: &Circuit, qubits: &QubitRegister) -> HalResult<String> {
        match self.config.mode {
            SimulationMode::Measurement => {
                let outcome = self.backend.sample(circuit, 1)?;
                let keys: Vec<&str> = circuit.measurement_keys().collect();
                outcome.bitstring(&keys, 0)
            }
            SimulationMode::Statevector => {
                let state = self.backend.evolve(circuit, qubits)?;
                Ok(dirac_notation(&state, self.config.decimals))
            }
        }
    }
}
