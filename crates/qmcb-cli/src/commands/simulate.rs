//! Simulate command implementation.
//!
//! Build the trial and target truth tables for a request file and print them
//! side by side, or as the JSON response.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qmcb_adapter_sim::SimulatorBackend;
use qmcb_core::{EngineConfig, SimulationMode, SimulationResponse, TruthTableEngine};

use super::common::{load_library, load_request};

/// Command-line options for `qmcb simulate`.
pub struct SimulateOptions<'a> {
    pub input: &'a str,
    pub mode: Option<SimulationMode>,
    pub stored: bool,
    pub decimals: Option<usize>,
    pub seed: Option<u64>,
    pub format: &'a str,
    pub config: Option<&'a Path>,
    pub library: Option<&'a Path>,
}

/// Execute the simulate command.
pub fn execute(opts: &SimulateOptions<'_>) -> Result<()> {
    let config = resolve_config(opts)?;
    let library = load_library(config.target_library.as_deref())?;
    let request = load_request(opts.input)?;

    let backend = match opts.seed {
        Some(seed) => SimulatorBackend::with_seed(seed),
        None => SimulatorBackend::new(),
    };
    let mode = config.mode;
    let engine = TruthTableEngine::new(backend)
        .with_library(library)
        .with_config(config);

    let response = engine
        .simulate(&request)
        .context("Simulation failed")?;

    match opts.format {
        "json" => {
            let json = serde_json::to_string_pretty(&response)
                .context("JSON serialization failed")?;
            println!("{json}");
        }
        _ => {
            println!(
                "{} {}-qubit circuit, {} mode, {}",
                style("→").cyan().bold(),
                request.num_qubits,
                mode,
                match &request.target {
                    Some(target) => format!("target {}", style(target).bold()),
                    None => "no target".to_string(),
                }
            );
            println!();
            print_tables(&response);
            print_verdict(&response, request.target.as_deref());
        }
    }

    Ok(())
}

/// Configuration file and environment, then command-line overrides.
fn resolve_config(opts: &SimulateOptions<'_>) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(opts.config).context("Failed to load configuration")?;

    if let Some(mode) = opts.mode {
        config.mode = mode;
    }
    if opts.stored {
        config.validate_target = false;
    }
    if let Some(decimals) = opts.decimals {
        config.decimals = decimals;
    }
    if let Some(library) = opts.library {
        config.target_library = Some(library.to_path_buf());
    }

    config.validate()?;
    Ok(config)
}

fn print_tables(response: &SimulationResponse) {
    let trial = &response.trial_truth_table;
    let target = &response.target_truth_table;
    let matches = response.row_matches();

    let width = |header: &str, labels: &[String]| {
        labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
    };
    let w_in = width("input", trial.inputs());
    let w_trial = width("trial", trial.outputs());
    let w_target = width("target", target.outputs());

    if target.is_empty() {
        println!("  {}", style(format!("{:<w_in$}  trial", "input")).dim());
    } else {
        println!(
            "  {}",
            style(format!("{:<w_in$}  {:<w_trial$}  target", "input", "trial")).dim()
        );
    }

    for (i, row) in trial.rows().enumerate() {
        let input = format!("{:<w_in$}", row.input);
        let output = format!("{:<w_trial$}", row.output);
        match (target.row(i), matches.get(i)) {
            (Some(expected), Some(&ok)) => {
                let expected = format!("{:<w_target$}", expected.output);
                let mark = if ok {
                    style("✓").green()
                } else {
                    style("✗").red()
                };
                println!("  {}  {}  {}  {}", style(input).cyan(), output, expected, mark);
            }
            _ => println!("  {}  {}", style(input).cyan(), output),
        }
    }
    println!();
}

fn print_verdict(response: &SimulationResponse, target: Option<&str>) {
    let Some(target) = target else {
        println!("{}", style(&response.message).dim());
        return;
    };

    if response.is_match() {
        println!(
            "{} Trial circuit matches {}",
            style("✓").green().bold(),
            style(target).bold()
        );
    } else {
        let differing = response.row_matches().iter().filter(|ok| !**ok).count();
        println!(
            "{} Trial circuit differs from {} on {} of {} rows",
            style("✗").red().bold(),
            style(target).bold(),
            differing,
            response.trial_truth_table.len()
        );
    }
}
