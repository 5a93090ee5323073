//! Shared helpers for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use qmcb_core::{SimulateRequest, TargetLibrary, TruthTableRequest};

/// Read a JSON request from a file, or from stdin when `input` is `-`.
pub fn load_request(input: &str) -> Result<TruthTableRequest> {
    let source = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        let path = Path::new(input);
        if !path.exists() {
            anyhow::bail!("File not found: {input}");
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))?
    };

    let wire = SimulateRequest::from_json(&source)
        .with_context(|| format!("Invalid request in {}", display_input(input)))?;
    Ok(wire.into_request()?)
}

/// The built-in target library, with `extra` merged over it when given.
pub fn load_library(extra: Option<&Path>) -> Result<Arc<TargetLibrary>> {
    let builtin = TargetLibrary::builtin();
    let Some(path) = extra else {
        return Ok(builtin);
    };

    let custom = TargetLibrary::from_file(path)
        .with_context(|| format!("Failed to load target library: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        targets = custom.len(),
        "Loaded custom target library"
    );

    let mut library = (*builtin).clone();
    library.extend(custom);
    Ok(Arc::new(library))
}

fn display_input(input: &str) -> &str {
    if input == "-" { "stdin" } else { input }
}
