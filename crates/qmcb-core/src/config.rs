//! Engine configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QMCB_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Largest supported rounding precision for Dirac labels.
pub const MAX_DECIMALS: usize = 12;

/// Environment variable names.
pub mod env {
    /// Simulate the target program instead of reading stored outputs.
    pub const VALIDATE_TARGET: &str = "QMCB_VALIDATE_TARGET_CIRCUITS";
    /// `measurement` or `statevector`.
    pub const SIMULATION_MODE: &str = "QMCB_SIMULATION_MODE";
    /// Dirac rounding precision.
    pub const DECIMALS: &str = "QMCB_DECIMALS";
    /// Render statevector-mode inputs as kets.
    pub const INPUT_AS_KET: &str = "QMCB_INPUT_AS_KET";
    /// Extra target library file.
    pub const TARGET_LIBRARY: &str = "QMCB_TARGET_LIBRARY";
}

/// How outputs are obtained from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// Measure every qubit, one shot; outputs are bit strings.
    #[default]
    Measurement,
    /// Evolve without measuring; outputs are Dirac notation.
    Statevector,
}

impl SimulationMode {
    /// Whether circuits get a measurement stage.
    pub fn measures(self) -> bool {
        matches!(self, SimulationMode::Measurement)
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::Measurement => write!(f, "measurement"),
            SimulationMode::Statevector => write!(f, "statevector"),
        }
    }
}

impl FromStr for SimulationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "measurement" | "measure" => Ok(SimulationMode::Measurement),
            "statevector" | "state_vector" => Ok(SimulationMode::Statevector),
            other => Err(ConfigError::Validation(format!(
                "unknown simulation mode '{other}' (expected measurement or statevector)"
            ))),
        }
    }
}

/// Truth-table engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output mode.
    pub mode: SimulationMode,
    /// Simulate target programs rather than reading stored outputs.
    pub validate_target: bool,
    /// Rounding precision for Dirac labels.
    pub decimals: usize,
    /// Render statevector-mode inputs as `|01>` rather than `01`.
    pub input_as_ket: bool,
    /// Extra target library merged over the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_library: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: SimulationMode::Measurement,
            validate_target: true,
            decimals: 3,
            input_as_ket: true,
            target_library: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EngineConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::default().merge_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_lookup(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with the variables `lookup` knows about.
    ///
    /// Absent variables leave fields unchanged; present but unparseable
    /// ones are an error.
    pub fn merge_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(env::VALIDATE_TARGET) {
            self.validate_target = parse_bool(env::VALIDATE_TARGET, &v)?;
        }
        if let Some(v) = lookup(env::SIMULATION_MODE) {
            self.mode = v.parse().map_err(|_| invalid_value(env::SIMULATION_MODE, &v))?;
        }
        if let Some(v) = lookup(env::DECIMALS) {
            self.decimals = v.trim().parse().map_err(|_| invalid_value(env::DECIMALS, &v))?;
        }
        if let Some(v) = lookup(env::INPUT_AS_KET) {
            self.input_as_ket = parse_bool(env::INPUT_AS_KET, &v)?;
        }
        if let Some(v) = lookup(env::TARGET_LIBRARY) {
            self.target_library = if v.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            };
        }
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::Validation(format!(
                "decimals must be at most {MAX_DECIMALS}, got {}",
                self.decimals
            )));
        }
        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_value(var, value)),
    }
}

fn invalid_value(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// Environment variable has an unusable value.
    #[error("Invalid value '{value}' for {var}")]
    InvalidValue {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },

    /// Values parse but are out of range.
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.mode, SimulationMode::Measurement);
        assert!(config.validate_target);
        assert_eq!(config.decimals, 3);
        assert!(config.input_as_ket);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (env::VALIDATE_TARGET, "False"),
            (env::SIMULATION_MODE, "statevector"),
            (env::DECIMALS, "5"),
            (env::TARGET_LIBRARY, "targets.yaml"),
        ]))
        .unwrap();

        assert!(!config.validate_target);
        assert_eq!(config.mode, SimulationMode::Statevector);
        assert_eq!(config.decimals, 5);
        assert_eq!(config.target_library, Some(PathBuf::from("targets.yaml")));
    }

    #[test]
    fn test_unparseable_env_value() {
        let err = EngineConfig::from_lookup(lookup_from(&[(env::DECIMALS, "three")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == env::DECIMALS));

        let err =
            EngineConfig::from_lookup(lookup_from(&[(env::VALIDATE_TARGET, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_decimals() {
        let config = EngineConfig {
            decimals: 13,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config: EngineConfig = serde_yaml_ng::from_str("mode: statevector\n").unwrap();
        assert_eq!(config.mode, SimulationMode::Statevector);
        assert!(config.validate_target);
        assert_eq!(config.decimals, 3);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let from_file: EngineConfig =
            serde_yaml_ng::from_str("validate_target: false\ndecimals: 4\n").unwrap();
        let merged = from_file
            .merge_lookup(lookup_from(&[(env::DECIMALS, "2")]))
            .unwrap();
        assert!(!merged.validate_target);
        assert_eq!(merged.decimals, 2);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Measurement".parse::<SimulationMode>().unwrap(), SimulationMode::Measurement);
        assert!("density".parse::<SimulationMode>().is_err());
        assert!(SimulationMode::Measurement.measures());
        assert!(!SimulationMode::Statevector.measures());
    }
}
