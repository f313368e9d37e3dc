//! Elementary gate set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gates every code in this workspace is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X (CNOT) gate, operands `[control, target]`.
    CX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X | StandardGate::Z => 1,
            StandardGate::CX => 2,
        }
    }

    /// The inverse gate.
    ///
    /// - H† = H
    /// - X† = X, Z† = Z
    /// - CX† = CX
    #[inline]
    pub fn inverse(&self) -> StandardGate {
        *self
    }

    /// Parse a gate from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "h" => Some(StandardGate::H),
            "x" => Some(StandardGate::X),
            "z" => Some(StandardGate::Z),
            "cx" | "cnot" => Some(StandardGate::CX),
            _ => None,
        }
    }

    /// All supported gates.
    pub fn all() -> [StandardGate; 4] {
        [
            StandardGate::H,
            StandardGate::X,
            StandardGate::Z,
            StandardGate::CX,
        ]
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
