//! CLI workflow tests.
//!
//! Request files, custom target libraries and config files, loaded through
//! the same functions the commands use.

use std::io::Write;
use std::path::Path;

use qmcb_adapter_sim::SimulatorBackend;
use qmcb_cli::{load_library, load_request};
use qmcb_core::{EngineConfig, SimulateRequest, SimulationMode, TruthTableEngine};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_request_file_round_trip() {
    let file = write_temp(
        ".json",
        r#"{"number_of_qubits": 2,
            "gates": ["CNOT", "CNOT", "CNOT"],
            "qubit_order": [[0, 1], [1, 0], [0, 1]],
            "target_unitary": "SWAP"}"#,
    );
    let request = load_request(file.path().to_str().unwrap()).unwrap();

    let engine = TruthTableEngine::new(SimulatorBackend::with_seed(1));
    let response = engine.simulate(&request).unwrap();
    assert!(response.is_match());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json["trial_truth_table"]["output"],
        serde_json::json!(["00", "10", "01", "11"])
    );
    assert_eq!(
        json["message"],
        "Successfully simulated trial and target unitaries."
    );
}

#[test]
fn test_malformed_request_file() {
    let file = write_temp(".json", r#"{"gates": ["H"]}"#);
    let err = load_request(file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid request"));
}

#[test]
fn test_missing_request_file() {
    let err = load_request("/nonexistent/request.json").unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_builtin_library_without_extra_file() {
    let library = load_library(None).unwrap();
    assert_eq!(
        library.names(),
        vec!["CNOT", "CNOT_FLIPPED", "CONTROLLED_Z", "SWAP"]
    );
}

#[test]
fn test_custom_library_extends_builtin() {
    let file = write_temp(
        ".yaml",
        r#"
NOT:
  num_qubits: 1
  steps:
    - { gate: X, order: [0] }
  expected_outputs: ["1", "0"]
"#,
    );
    let library = load_library(Some(file.path())).unwrap();
    assert_eq!(
        library.names(),
        vec!["CNOT", "CNOT_FLIPPED", "CONTROLLED_Z", "NOT", "SWAP"]
    );

    let request = SimulateRequest::from_json(
        r#"{"number_of_qubits": 1, "gates": ["H", "H", "X"],
            "qubit_order": [[0], [0], [0]], "target_unitary": "NOT"}"#,
    )
    .unwrap()
    .into_request()
    .unwrap();
    let engine = TruthTableEngine::new(SimulatorBackend::with_seed(1)).with_library(library);
    assert!(engine.simulate(&request).unwrap().is_match());
}

#[test]
fn test_missing_library_file() {
    assert!(load_library(Some(Path::new("/nonexistent/targets.yaml"))).is_err());
}

#[test]
fn test_config_file() {
    let file = write_temp(
        ".yaml",
        "mode: statevector\nvalidate_target: false\ndecimals: 2\n",
    );
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.mode, SimulationMode::Statevector);
    assert!(!config.validate_target);
    assert_eq!(config.decimals, 2);
    assert!(config.input_as_ket);
}

#[test]
fn test_config_file_rejects_excess_precision() {
    let file = write_temp(".yaml", "decimals: 40\n");
    assert!(EngineConfig::from_file(file.path()).is_err());
}

#[test]
fn test_statevector_json_output() {
    let request = SimulateRequest::from_json(
        r#"{"number_of_qubits": 1, "gates": ["H"], "qubit_order": [[0]]}"#,
    )
    .unwrap()
    .into_request()
    .unwrap();
    let config = EngineConfig {
        mode: SimulationMode::Statevector,
        ..EngineConfig::default()
    };
    let engine = TruthTableEngine::new(SimulatorBackend::with_seed(1)).with_config(config);
    let response = engine.simulate(&request).unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["trial_truth_table"]["input"], serde_json::json!(["|0>", "|1>"]));
    assert_eq!(
        json["trial_truth_table"]["output"],
        serde_json::json!(["0.707|0⟩ + 0.707|1⟩", "0.707|0⟩ - 0.707|1⟩"])
    );
    assert_eq!(json["target_truth_table"]["input"], serde_json::json!([]));
}
