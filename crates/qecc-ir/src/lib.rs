//! QECC Circuit Intermediate Representation
//!
//! This crate provides the program representation every error-correcting
//! code in the workspace is built from: an ordered list of instructions over
//! a fixed number of qubit lines, plus named classical registers that
//! measurements write and conditional blocks read.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] and
//!   [`ClassicalRegister`]
//! - **Gates**: [`StandardGate`] (H, X, Z, CX)
//! - **Instructions**: [`Instruction`], including classically-conditioned
//!   [`ConditionalOp`] blocks
//! - **Initial states**: [`QubitState`]
//! - **Composition**: [`QubitMap`] for explicit qubit remapping
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: Three-Qubit Repetition Encoder
//!
//! ```rust
//! use qecc_ir::{Circuit, QubitId, QubitMap};
//!
//! let mut encoder = Circuit::with_size("encode", 3);
//! encoder.cx(QubitId(0), QubitId(1)).unwrap();
//! encoder.cx(QubitId(0), QubitId(2)).unwrap();
//!
//! // Place the encoder on qubits 3..6 of a larger program
//! let mut program = Circuit::with_size("program", 6);
//! program.compose(&encoder, &QubitMap::offset(3, 3)).unwrap();
//! program.measure_all().unwrap();
//!
//! assert_eq!(program.instructions()[0].qubits, vec![QubitId(3), QubitId(4)]);
//! assert_eq!(program.depth(), 3);
//! ```
//!
//! # Example: Classically-Conditioned Correction
//!
//! ```rust
//! use qecc_ir::{Circuit, Instruction, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("correct", 5);
//! circuit.add_creg("syndrome", 2).unwrap();
//! circuit.measure([QubitId(3), QubitId(4)], "syndrome").unwrap();
//! circuit
//!     .conditional(
//!         "syndrome",
//!         0b11,
//!         vec![Instruction::single_qubit_gate(StandardGate::X, QubitId(2))],
//!     )
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod mapping;
pub mod qubit;
pub mod state;

pub use circuit::{Circuit, MEASURE_ALL_REGISTER};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{ConditionalOp, Instruction, InstructionKind};
pub use mapping::QubitMap;
pub use qubit::{ClassicalRegister, ClbitId, QubitId};
pub use state::{NORM_TOLERANCE, QubitState};
