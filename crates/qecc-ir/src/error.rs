//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building or composing circuit programs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// A qubit map does not cover every qubit referenced by the composed program.
    #[error("Dimension mismatch: qubit map does not cover {missing:?} referenced by '{circuit}'")]
    DimensionMismatch {
        /// Name of the program being composed.
        circuit: String,
        /// Source qubits with no target.
        missing: Vec<QubitId>,
    },

    /// Two source qubits map onto the same target.
    #[error("Qubit map aliases {first:?} and {second:?} onto {target:?}")]
    NonInjectiveMapping {
        /// The shared target qubit.
        target: QubitId,
        /// First source qubit.
        first: QubitId,
        /// Second source qubit.
        second: QubitId,
    },

    /// Classical register not declared in circuit.
    #[error("Classical register '{0}' not found in circuit")]
    RegisterNotFound(String),

    /// Classical register declared twice.
    #[error("Classical register '{0}' already declared")]
    DuplicateRegister(String),

    /// Register width does not match the operation.
    #[error("Classical register '{register}' has {expected} bits, operation needs {got}")]
    RegisterWidthMismatch {
        /// Register name.
        register: String,
        /// Declared width.
        expected: u32,
        /// Width required by the operation.
        got: u32,
    },

    /// Condition value does not fit in its register.
    #[error("Condition value {value} does not fit in {width}-bit register '{register}'")]
    ConditionOutOfRange {
        /// Register name.
        register: String,
        /// Register width.
        width: u32,
        /// Offending value.
        value: u64,
    },

    /// A conditional body contains something other than gates.
    #[error("Conditional body may only contain gates, found '{0}'")]
    InvalidConditionalBody(String),

    /// Instruction has no inverse.
    #[error("Instruction '{0}' is not invertible")]
    NonInvertible(String),

    /// Initial state amplitudes are not unit-normalized.
    #[error("Malformed state vector: squared norm is {norm}, expected 1")]
    MalformedStateVector {
        /// The squared norm that was found.
        norm: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
