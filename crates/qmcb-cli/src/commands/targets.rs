//! Targets command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmcb_core::EngineConfig;

use super::common::load_library;

/// Execute the targets command.
pub fn execute(library: Option<&Path>, show_steps: bool) -> Result<()> {
    let configured = EngineConfig::from_env()
        .context("Failed to load configuration")?
        .target_library;
    let library = load_library(library.or(configured.as_deref()))?;

    println!("{} Target circuits:\n", style("qmcb").cyan().bold());

    for name in library.names() {
        let Some(entry) = library.get(name) else {
            continue;
        };
        let source = if entry.has_stored_outputs() {
            style("stored outputs").green()
        } else {
            style("simulated only").yellow()
        };
        println!(
            "  {} {} qubits, {} steps, {}",
            style(format!("{name:<14}")).bold(),
            entry.num_qubits,
            entry.steps.len(),
            source
        );
        if show_steps {
            println!("    {}", style(&entry.steps).dim());
        }
    }

    Ok(())
}
