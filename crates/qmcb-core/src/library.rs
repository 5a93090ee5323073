//! Catalog of canonical target circuits.
//!
//! Every entry is a gate program over a declared number of qubits, with an
//! optional table of expected measurement outputs (one per basis state, in
//! enumeration order). An entry without outputs can only be resolved by
//! simulating its program.
//!
//! The built-in catalog is compiled in and shared read-only for the life of
//! the process. Additional entries can be loaded from YAML:
//!
//! ```yaml
//! SWAP:
//!   num_qubits: 2
//!   steps:
//!     - { gate: CNOT, order: [0, 1] }
//!     - { gate: CNOT, order: [1, 0] }
//!     - { gate: CNOT, order: [0, 1] }
//!   expected_outputs: ["00", "10", "01", "11"]
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

use qmcb_ir::{GateProgram, GateStep, GateSymbol, IrError, MAX_MEASUREMENT_KEYS};

/// Errors raised while loading or extending a target library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibraryError {
    /// Library file could not be read.
    #[error("Failed to read target library {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Library document is not valid YAML for the entry schema.
    #[error("Failed to parse target library: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// An entry's program does not fit its declared qubit count.
    #[error("Target '{name}' has an invalid program: {source}")]
    InvalidProgram {
        /// Entry name.
        name: String,
        /// Underlying validation error.
        #[source]
        source: IrError,
    },

    /// An entry is otherwise inconsistent.
    #[error("Target '{name}' is invalid: {reason}")]
    InvalidEntry {
        /// Entry name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// One canonical target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLibraryEntry {
    /// Number of qubits the program acts on.
    pub num_qubits: usize,
    /// Canonical program.
    pub steps: GateProgram,
    /// Expected measurement outputs, one per basis state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_outputs: Option<Vec<String>>,
}

impl TargetLibraryEntry {
    /// Entry with a program and no stored outputs.
    pub fn new(num_qubits: usize, steps: GateProgram) -> Self {
        Self {
            num_qubits,
            steps,
            expected_outputs: None,
        }
    }

    /// Attach stored outputs.
    #[must_use]
    pub fn with_expected_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the entry carries stored outputs.
    pub fn has_stored_outputs(&self) -> bool {
        self.expected_outputs.is_some()
    }

    /// Check the entry is internally consistent.
    pub fn validate(&self, name: &str) -> LibraryResult<()> {
        let invalid = |reason: String| LibraryError::InvalidEntry {
            name: name.to_string(),
            reason,
        };

        if self.num_qubits == 0 || self.num_qubits > MAX_MEASUREMENT_KEYS {
            return Err(invalid(format!(
                "num_qubits must be between 1 and {MAX_MEASUREMENT_KEYS}, got {}",
                self.num_qubits
            )));
        }

        self.steps
            .validate(self.num_qubits)
            .map_err(|source| LibraryError::InvalidProgram {
                name: name.to_string(),
                source,
            })?;

        if let Some(outputs) = &self.expected_outputs {
            let expected = 1usize << self.num_qubits;
            if outputs.len() != expected {
                return Err(invalid(format!(
                    "expected {expected} stored outputs, got {}",
                    outputs.len()
                )));
            }
            for label in outputs {
                let well_formed = label.len() == self.num_qubits
                    && label.bytes().all(|b| b == b'0' || b == b'1');
                if !well_formed {
                    return Err(invalid(format!(
                        "stored output '{label}' is not a {}-bit string",
                        self.num_qubits
                    )));
                }
            }
        }
        Ok(())
    }
}

static BUILTIN: LazyLock<Arc<TargetLibrary>> = LazyLock::new(|| Arc::new(builtin_library()));

/// Named collection of [`TargetLibraryEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetLibrary {
    entries: FxHashMap<String, TargetLibraryEntry>,
}

impl TargetLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared built-in catalog.
    pub fn builtin() -> Arc<TargetLibrary> {
        Arc::clone(&BUILTIN)
    }

    /// Parse a YAML mapping of name to entry.
    pub fn from_yaml_str(yaml: &str) -> LibraryResult<Self> {
        let raw: BTreeMap<String, TargetLibraryEntry> = serde_yaml_ng::from_str(yaml)?;
        let mut library = Self::new();
        for (name, entry) in raw {
            library.insert(name, entry)?;
        }
        Ok(library)
    }

    /// Load a YAML library file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> LibraryResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Add or replace an entry after validating it.
    pub fn insert(&mut self, name: impl Into<String>, entry: TargetLibraryEntry) -> LibraryResult<()> {
        let name = name.into();
        entry.validate(&name)?;
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Add every entry of `other`, replacing entries with the same name.
    pub fn extend(&mut self, other: TargetLibrary) {
        self.entries.extend(other.entries);
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&TargetLibraryEntry> {
        self.entries.get(name)
    }

    /// Entry names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn builtin_library() -> TargetLibrary {
    use GateSymbol::{Cnot, H};

    let entries = [
        (
            "CNOT",
            TargetLibraryEntry::new(2, GateProgram::from_steps([GateStep::pair(Cnot, 0, 1)]))
                .with_expected_outputs(["00", "01", "11", "10"]),
        ),
        (
            "CNOT_FLIPPED",
            TargetLibraryEntry::new(
                2,
                GateProgram::from_steps([
                    GateStep::single(H, 0),
                    GateStep::single(H, 1),
                    GateStep::pair(Cnot, 0, 1),
                    GateStep::single(H, 0),
                    GateStep::single(H, 1),
                ]),
            )
            .with_expected_outputs(["00", "11", "10", "01"]),
        ),
        (
            "CONTROLLED_Z",
            TargetLibraryEntry::new(
                2,
                GateProgram::from_steps([
                    GateStep::single(H, 1),
                    GateStep::pair(Cnot, 0, 1),
                    GateStep::single(H, 1),
                ]),
            )
            .with_expected_outputs(["00", "01", "10", "11"]),
        ),
        (
            "SWAP",
            TargetLibraryEntry::new(
                2,
                GateProgram::from_steps([
                    GateStep::pair(Cnot, 0, 1),
                    GateStep::pair(Cnot, 1, 0),
                    GateStep::pair(Cnot, 0, 1),
                ]),
            )
            .with_expected_outputs(["00", "10", "01", "11"]),
        ),
    ];

    TargetLibrary {
        entries: entries
            .into_iter()
            .map(|(name, entry)| (name.to_string(), entry))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries_are_valid() {
        let library = TargetLibrary::builtin();
        assert_eq!(
            library.names(),
            vec!["CNOT", "CNOT_FLIPPED", "CONTROLLED_Z", "SWAP"]
        );
        for name in library.names() {
            library.get(name).unwrap().validate(name).unwrap();
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(Arc::ptr_eq(&TargetLibrary::builtin(), &TargetLibrary::builtin()));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
IDENTITY:
  num_qubits: 1
  steps: []
  expected_outputs: ["0", "1"]
FLIP:
  num_qubits: 1
  steps:
    - { gate: X, order: [0] }
"#;
        let library = TargetLibrary::from_yaml_str(yaml).unwrap();
        assert_eq!(library.names(), vec!["FLIP", "IDENTITY"]);
        assert!(library.get("IDENTITY").unwrap().has_stored_outputs());
        assert!(!library.get("FLIP").unwrap().has_stored_outputs());
        assert_eq!(library.get("FLIP").unwrap().steps.len(), 1);
    }

    #[test]
    fn test_yaml_alias_gate_names() {
        let yaml = r#"
CZ_ALIAS:
  num_qubits: 2
  steps:
    - { gate: CONTROLLED_Z, order: [0, 1] }
"#;
        let library = TargetLibrary::from_yaml_str(yaml).unwrap();
        let entry = library.get("CZ_ALIAS").unwrap();
        assert_eq!(entry.steps.steps()[0].gate, GateSymbol::Cz);
    }

    #[test]
    fn test_insert_rejects_wrong_output_count() {
        let mut library = TargetLibrary::new();
        let entry = TargetLibraryEntry::new(2, GateProgram::new()).with_expected_outputs(["00"]);
        assert!(matches!(
            library.insert("BAD", entry),
            Err(LibraryError::InvalidEntry { .. })
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn test_insert_rejects_wrong_label_width() {
        let mut library = TargetLibrary::new();
        let entry = TargetLibraryEntry::new(1, GateProgram::new()).with_expected_outputs(["0", "10"]);
        assert!(library.insert("BAD", entry).is_err());
    }

    #[test]
    fn test_insert_rejects_out_of_range_program() {
        let mut library = TargetLibrary::new();
        let entry = TargetLibraryEntry::new(
            1,
            GateProgram::from_steps([GateStep::pair(GateSymbol::Cnot, 0, 1)]),
        );
        assert!(matches!(
            library.insert("BAD", entry),
            Err(LibraryError::InvalidProgram { .. })
        ));
    }

    #[test]
    fn test_unknown_gate_in_yaml() {
        let yaml = "BAD:\n  num_qubits: 1\n  steps:\n    - { gate: FOO, order: [0] }\n";
        assert!(matches!(
            TargetLibrary::from_yaml_str(yaml),
            Err(LibraryError::Parse(_))
        ));
    }

    #[test]
    fn test_extend_overrides() {
        let mut library = (*TargetLibrary::builtin()).clone();
        let mut custom = TargetLibrary::new();
        custom
            .insert("CNOT", TargetLibraryEntry::new(2, GateProgram::new()))
            .unwrap();
        library.extend(custom);

        assert_eq!(library.len(), 4);
        assert!(!library.get("CNOT").unwrap().has_stored_outputs());
    }
}
