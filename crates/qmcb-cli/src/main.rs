//! qmcb Command-Line Interface
//!
//! Builds truth tables for small quantum circuits and compares them with
//! canonical target circuits.
//!
//! ```text
//! $ qmcb simulate -i swap.json
//! → 2-qubit circuit, measurement mode, target SWAP
//!
//!   input  trial  target
//!   00     00     00      ✓
//!   01     10     10      ✓
//!   10     01     01      ✓
//!   11     11     11      ✓
//!
//! ✓ Trial circuit matches SWAP
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qmcb_core::SimulationMode;

use qmcb_cli::commands::simulate::SimulateOptions;
use qmcb_cli::commands::{gates, simulate, targets, version};

/// qmcb - quantum circuit truth tables
#[derive(Parser)]
#[command(name = "qmcb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build trial and target truth tables for a circuit
    Simulate {
        /// Request file (JSON), or - for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output mode (measurement, statevector)
        #[arg(short, long)]
        mode: Option<SimulationMode>,

        /// Read stored target outputs instead of simulating the target
        #[arg(long)]
        stored: bool,

        /// Rounding precision for Dirac labels
        #[arg(long)]
        decimals: Option<usize>,

        /// Seed for measurement sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        format: String,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra target library (YAML), merged over the built-in one
        #[arg(short, long)]
        library: Option<PathBuf>,
    },

    /// List available target circuits
    Targets {
        /// Extra target library (YAML), merged over the built-in one
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Also print each target's gate program
        #[arg(long)]
        steps: bool,
    },

    /// List supported gates
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    // Execute command
    let result = match cli.command {
        Commands::Simulate {
            input,
            mode,
            stored,
            decimals,
            seed,
            format,
            config,
            library,
        } => simulate::execute(&SimulateOptions {
            input: &input,
            mode,
            stored,
            decimals,
            seed,
            format: &format,
            config: config.as_deref(),
            library: library.as_deref(),
        }),

        Commands::Targets { library, steps } => targets::execute(library.as_deref(), steps),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["qmcb", "simulate"]).unwrap();
        match cli.command {
            Commands::Simulate {
                input,
                mode,
                stored,
                format,
                seed,
                ..
            } => {
                assert_eq!(input, "-");
                assert_eq!(mode, None);
                assert!(!stored);
                assert_eq!(format, "table");
                assert_eq!(seed, None);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_simulate_all_options() {
        let cli = Cli::try_parse_from([
            "qmcb",
            "-vv",
            "simulate",
            "-i",
            "bell.json",
            "--mode",
            "statevector",
            "--stored",
            "--decimals",
            "4",
            "--seed",
            "7",
            "--format",
            "json",
            "--library",
            "targets.yaml",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate {
                input,
                mode,
                stored,
                decimals,
                seed,
                format,
                config,
                library,
            } => {
                assert_eq!(input, "bell.json");
                assert_eq!(mode, Some(SimulationMode::Statevector));
                assert!(stored);
                assert_eq!(decimals, Some(4));
                assert_eq!(seed, Some(7));
                assert_eq!(format, "json");
                assert_eq!(config, None);
                assert_eq!(library, Some(PathBuf::from("targets.yaml")));
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["qmcb", "simulate", "--mode", "density"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["qmcb", "simulate", "--format", "csv"]).is_err());
    }

    #[test]
    fn test_parse_targets() {
        let cli = Cli::try_parse_from(["qmcb", "targets", "--steps"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Targets {
                library: None,
                steps: true
            }
        ));
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["qmcb"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
