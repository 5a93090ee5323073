//! The gate vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// Every gate a circuit may contain.
///
/// The set is closed: there are no parameterised or user-defined gates.
/// `RX` and `RY` rotate by a fixed π/2, and `U` is the fixed `U(π/2, 0, π)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateSymbol {
    // Single-qubit gates
    /// Pauli-X (bit flip).
    X,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around X by π/2.
    Rx,
    /// Rotation around Y by π/2.
    Ry,
    /// Universal single-qubit gate fixed at U(π/2, 0, π).
    U,

    // Two-qubit gates
    /// Controlled-NOT, order is `[control, target]`.
    #[serde(alias = "CX")]
    Cnot,
    /// Controlled-Z.
    #[serde(alias = "CONTROLLED_Z")]
    Cz,
    /// SWAP gate.
    Swap,
}

impl GateSymbol {
    /// The whole vocabulary, single-qubit gates first.
    pub const ALL: [GateSymbol; 10] = [
        GateSymbol::X,
        GateSymbol::H,
        GateSymbol::S,
        GateSymbol::T,
        GateSymbol::Rx,
        GateSymbol::Ry,
        GateSymbol::U,
        GateSymbol::Cnot,
        GateSymbol::Cz,
        GateSymbol::Swap,
    ];

    /// The gate used to prepare a `1` bit during state preparation.
    pub const BIT_FLIP: GateSymbol = GateSymbol::X;

    /// Canonical name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateSymbol::X => "X",
            GateSymbol::H => "H",
            GateSymbol::S => "S",
            GateSymbol::T => "T",
            GateSymbol::Rx => "RX",
            GateSymbol::Ry => "RY",
            GateSymbol::U => "U",
            GateSymbol::Cnot => "CNOT",
            GateSymbol::Cz => "CZ",
            GateSymbol::Swap => "SWAP",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            GateSymbol::X
            | GateSymbol::H
            | GateSymbol::S
            | GateSymbol::T
            | GateSymbol::Rx
            | GateSymbol::Ry
            | GateSymbol::U => 1,

            GateSymbol::Cnot | GateSymbol::Cz | GateSymbol::Swap => 2,
        }
    }

    /// Whether swapping the two operands leaves the gate unchanged.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, GateSymbol::Cz | GateSymbol::Swap)
    }
}

impl fmt::Display for GateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateSymbol {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = match s.trim().to_ascii_uppercase().as_str() {
            "X" => GateSymbol::X,
            "H" => GateSymbol::H,
            "S" => GateSymbol::S,
            "T" => GateSymbol::T,
            "RX" => GateSymbol::Rx,
            "RY" => GateSymbol::Ry,
            "U" => GateSymbol::U,
            "CNOT" | "CX" => GateSymbol::Cnot,
            "CZ" | "CONTROLLED_Z" => GateSymbol::Cz,
            "SWAP" => GateSymbol::Swap,
            _ => return Err(IrError::UnsupportedGate(s.to_string())),
        };
        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(GateSymbol::H.arity(), 1);
        assert_eq!(GateSymbol::U.arity(), 1);
        assert_eq!(GateSymbol::Cnot.arity(), 2);
        assert_eq!(GateSymbol::Swap.arity(), 2);
    }

    #[test]
    fn test_parse_names_and_aliases() {
        for gate in GateSymbol::ALL {
            assert_eq!(gate.name().parse::<GateSymbol>().unwrap(), gate);
        }
        assert_eq!("cnot".parse::<GateSymbol>().unwrap(), GateSymbol::Cnot);
        assert_eq!("CX".parse::<GateSymbol>().unwrap(), GateSymbol::Cnot);
        assert_eq!(
            "CONTROLLED_Z".parse::<GateSymbol>().unwrap(),
            GateSymbol::Cz
        );
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "CNOT_FLIPPED".parse::<GateSymbol>().unwrap_err();
        assert_eq!(err, IrError::UnsupportedGate("CNOT_FLIPPED".into()));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&GateSymbol::Rx).unwrap();
        assert_eq!(json, "\"RX\"");
        let cz: GateSymbol = serde_json::from_str("\"CONTROLLED_Z\"").unwrap();
        assert_eq!(cz, GateSymbol::Cz);
    }
}
