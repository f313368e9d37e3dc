//! `OpenQASM` 3 export for qecc circuit programs
//!
//! Every instruction kind has a textual form:
//!
//! | Instruction | Output |
//! |-------------|--------|
//! | Qubits | `qubit[5] q;` |
//! | Classical register | `bit[2] syndrome;` |
//! | Gate | `h q[0];`, `cx q[0], q[3];` |
//! | Measurement | `syndrome[0] = measure q[3];` |
//! | Conditional | `if (syndrome == 1) { x q[0]; }` |
//! | Barrier | `barrier q[0], q[1];` |
//! | Initialize | `// @pragma initialize(...) q[0];` |
//!
//! # Example
//!
//! ```rust
//! use qecc_codes::ThreeQubitBitFlipCode;
//! use qecc_qasm3::emit;
//!
//! let corrector = ThreeQubitBitFlipCode::correction_circuit().unwrap();
//! let qasm = emit(&corrector);
//! assert!(qasm.contains("bit[2] syndrome;"));
//! assert!(qasm.contains("syndrome[0] = measure q[3];"));
//! assert!(qasm.contains("if (syndrome == 2) {"));
//! ```

mod emitter;

pub use emitter::emit;
