//! Gates command implementation.

use console::style;

use qmcb_ir::GateSymbol;

/// Execute the gates command.
pub fn execute() {
    println!("{} Supported gates:\n", style("qmcb").cyan().bold());

    for gate in GateSymbol::ALL {
        let operands = match gate {
            GateSymbol::Cnot => "[control, target]",
            _ if gate.arity() == 1 => "[q]",
            _ => "[q0, q1]",
        };
        println!(
            "  {} {:<18} {}",
            style(format!("{:<6}", gate.name())).bold(),
            operands,
            style(description(gate)).dim()
        );
    }
}

fn description(gate: GateSymbol) -> &'static str {
    match gate {
        GateSymbol::X => "Pauli-X (bit flip)",
        GateSymbol::H => "Hadamard",
        GateSymbol::S => "Phase (sqrt Z)",
        GateSymbol::T => "T (fourth root of Z)",
        GateSymbol::Rx => "X rotation by pi/2",
        GateSymbol::Ry => "Y rotation by pi/2",
        GateSymbol::U => "U(pi/2, 0, pi)",
        GateSymbol::Cnot => "Controlled-NOT (alias CX)",
        GateSymbol::Cz => "Controlled-Z (alias CONTROLLED_Z)",
        GateSymbol::Swap => "Swap two qubits",
    }
}
