//! Version command implementation.

use console::style;

use qmcb_adapter_sim::SimulatorBackend;
use qmcb_hal::SimulationBackend;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");
    let caps = SimulatorBackend::new().capabilities();

    println!(
        "{} {} - quantum circuit truth tables",
        style("qmcb").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qmcb-ir           Gates, qubits, programs and circuits");
    println!("  qmcb-hal          Simulation backend abstraction");
    println!("  qmcb-core         Truth-table engine and target library");
    println!("  qmcb-adapter-sim  Local statevector simulator");
    println!("  qmcb-cli          Command-line interface");
    println!();
    println!(
        "Backend:    {} (up to {} qubits)",
        style(&caps.name).bold(),
        caps.max_qubits
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
