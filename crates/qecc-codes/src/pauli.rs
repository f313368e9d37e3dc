//! Pauli errors and corrective actions.

use serde::{Deserialize, Serialize};
use std::fmt;

use qecc_ir::{Instruction, QubitId, StandardGate};

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    /// Bit flip.
    X,
    /// Phase flip.
    Z,
    /// Both, applied as X then Z.
    Y,
}

impl Pauli {
    /// Gates implementing this Pauli, in application order.
    pub fn gates(self) -> &'static [StandardGate] {
        match self {
            Pauli::X => &[StandardGate::X],
            Pauli::Z => &[StandardGate::Z],
            Pauli::Y => &[StandardGate::X, StandardGate::Z],
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Pauli::X => "x",
            Pauli::Z => "z",
            Pauli::Y => "y",
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pauli::X => f.write_str("X"),
            Pauli::Z => f.write_str("Z"),
            Pauli::Y => f.write_str("Y"),
        }
    }
}

/// A Pauli error injected on one data qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliError {
    /// Which Pauli.
    pub pauli: Pauli,
    /// Data qubit it hits.
    pub qubit: QubitId,
}

impl PauliError {
    /// Bit-flip error on `qubit`.
    pub fn x(qubit: u32) -> Self {
        Self {
            pauli: Pauli::X,
            qubit: QubitId(qubit),
        }
    }

    /// Phase-flip error on `qubit`.
    pub fn z(qubit: u32) -> Self {
        Self {
            pauli: Pauli::Z,
            qubit: QubitId(qubit),
        }
    }

    /// Combined error on `qubit`.
    pub fn y(qubit: u32) -> Self {
        Self {
            pauli: Pauli::Y,
            qubit: QubitId(qubit),
        }
    }
}

impl fmt::Display for PauliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pauli, self.qubit.0)
    }
}

/// The action a syndrome table prescribes: one X or Z on one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correction {
    /// Which Pauli to apply.
    pub pauli: Pauli,
    /// Target qubit.
    pub qubit: QubitId,
}

impl Correction {
    /// Bit-flip correction on `qubit`.
    pub fn x(qubit: u32) -> Self {
        Self {
            pauli: Pauli::X,
            qubit: QubitId(qubit),
        }
    }

    /// Phase-flip correction on `qubit`.
    pub fn z(qubit: u32) -> Self {
        Self {
            pauli: Pauli::Z,
            qubit: QubitId(qubit),
        }
    }

    /// The conditional body implementing this correction.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.pauli
            .gates()
            .iter()
            .map(|&g| Instruction::single_qubit_gate(g, self.qubit))
            .collect()
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on q{}", self.pauli, self.qubit.0)
    }
}
