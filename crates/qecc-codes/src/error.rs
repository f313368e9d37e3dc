//! Error types for code construction and syndrome decoding.

use qecc_ir::{IrError, QubitId};
use thiserror::Error;

/// Errors that can occur while building codes, experiments or decoding syndromes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A measured syndrome has no entry in the code's table.
    #[error("Syndrome pattern {pattern} on register '{register}' is not in the table")]
    InvalidSyndromePattern {
        /// Register name.
        register: String,
        /// The pattern as written in the outcome key.
        pattern: String,
    },

    /// Two table entries share one syndrome pattern.
    #[error("Syndrome pattern {pattern:#b} appears twice in table '{register}'")]
    DuplicateSyndromePattern {
        /// Register name.
        register: String,
        /// The repeated pattern.
        pattern: u64,
    },

    /// A table pattern is zero or wider than its register.
    #[error("Syndrome pattern {pattern:#b} does not fit {width}-bit register '{register}'")]
    PatternOutOfRange {
        /// Register name.
        register: String,
        /// Register width.
        width: u32,
        /// Offending pattern.
        pattern: u64,
    },

    /// An injected error targets a qubit outside the data block.
    #[error("Qubit {qubit:?} is outside the {data_qubits} data qubits of {code}")]
    QubitOutOfRange {
        /// Code name.
        code: String,
        /// Offending qubit.
        qubit: QubitId,
        /// Number of data qubits.
        data_qubits: u32,
    },

    /// An outcome key does not match the syndrome register layout.
    #[error("Malformed outcome '{outcome}': {reason}")]
    MalformedOutcome {
        /// The outcome key.
        outcome: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type for code operations.
pub type CodeResult<T> = Result<T, CodeError>;
