//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};
use crate::state::QubitState;

/// A block of gates applied only when a classical register holds a value.
///
/// The executing simulator evaluates the condition; the program only
/// carries it as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalOp {
    /// The name of the classical register.
    pub register: String,
    /// The value the register must equal.
    pub value: u64,
    /// Instructions applied when the condition holds. Gates only.
    pub body: Vec<Instruction>,
}

impl ConditionalOp {
    /// Create a new conditional block.
    pub fn new(register: impl Into<String>, value: u64, body: Vec<Instruction>) -> Self {
        Self {
            register: register.into(),
            value,
            body,
        }
    }

    /// Qubits touched by the body.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.body.iter().flat_map(|inst| inst.qubits.iter().copied())
    }
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement of `qubits[i]` into `clbits[i]`.
    Measure,
    /// Prepare a fresh qubit in the given state.
    Initialize(QubitState),
    /// Barrier (ordering marker).
    Barrier,
    /// Classically-conditioned gate block.
    Conditional(ConditionalOp),
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        }
    }

    /// Create an initialization instruction.
    pub fn initialize(qubit: QubitId, state: QubitState) -> Self {
        Self {
            kind: InstructionKind::Initialize(state),
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a conditional block. Its qubit list is the union of the body's.
    pub fn conditional(op: ConditionalOp) -> Self {
        let mut qubits: Vec<QubitId> = Vec::new();
        for q in op.qubits() {
            if !qubits.contains(&q) {
                qubits.push(q);
            }
        }
        Self {
            kind: InstructionKind::Conditional(op),
            qubits,
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this is a conditional block.
    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, InstructionKind::Conditional(_))
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(*g),
            _ => None,
        }
    }

    /// Get the conditional block if this is one.
    pub fn as_conditional(&self) -> Option<&ConditionalOp> {
        match &self.kind {
            InstructionKind::Conditional(op) => Some(op),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Initialize(_) => "initialize",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Conditional(_) => "if",
        }
    }

    /// Every qubit the instruction references, including conditional bodies.
    pub fn referenced_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        let nested = self
            .as_conditional()
            .into_iter()
            .flat_map(ConditionalOp::qubits);
        self.qubits.iter().copied().chain(nested)
    }

    /// Rewrite every qubit and classical bit through the given functions.
    pub(crate) fn remapped(
        &self,
        qubit: &impl Fn(QubitId) -> QubitId,
        clbit: &impl Fn(ClbitId) -> ClbitId,
    ) -> Self {
        let kind = match &self.kind {
            InstructionKind::Conditional(op) => InstructionKind::Conditional(ConditionalOp {
                register: op.register.clone(),
                value: op.value,
                body: op.body.iter().map(|i| i.remapped(qubit, clbit)).collect(),
            }),
            other => other.clone(),
        };
        Self {
            kind,
            qubits: self.qubits.iter().map(|&q| qubit(q)).collect(),
            clbits: self.clbits.iter().map(|&c| clbit(c)).collect(),
        }
    }
}
