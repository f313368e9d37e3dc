//! QECC Simulator Abstraction Layer
//!
//! This crate defines the contract between circuit construction and
//! execution. Code constructions in `qecc-codes` only build programs; any
//! type implementing [`Simulator`] can run them.
//!
//! # Overview
//!
//! - A [`Simulator`] trait with a synchronous, blocking `run`
//! - [`Capabilities`] describing qubit and shot limits and the gate set
//! - Result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Implementing a Simulator
//!
//! ```rust
//! use qecc_hal::{Capabilities, Counts, ExecutionResult, HalResult, Simulator};
//! use qecc_ir::Circuit;
//!
//! struct AlwaysZero {
//!     capabilities: Capabilities,
//! }
//!
//! impl Simulator for AlwaysZero {
//!     fn name(&self) -> &str {
//!         "always_zero"
//!     }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         self.validate(circuit, shots)?;
//!         let key = circuit.outcome_key(&vec![false; circuit.num_clbits() as usize]);
//!         let mut counts = Counts::new();
//!         counts.insert(key, u64::from(shots));
//!         Ok(ExecutionResult::new(counts, shots))
//!     }
//! }
//!
//! let sim = AlwaysZero { capabilities: Capabilities::statevector(8) };
//! let mut circuit = Circuit::with_size("idle", 2);
//! circuit.measure_all().unwrap();
//! let result = sim.run(&circuit, 10).unwrap();
//! assert_eq!(result.counts.get("00"), 10);
//! ```

pub mod capability;
pub mod error;
pub mod result;
pub mod simulator;

pub use capability::{Capabilities, DEFAULT_MAX_QUBITS, DEFAULT_MAX_SHOTS};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
pub use simulator::Simulator;
