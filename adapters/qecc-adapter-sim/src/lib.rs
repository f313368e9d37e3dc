//! QECC Reference Statevector Simulator
//!
//! This crate provides the local simulator every code in the workspace is
//! verified against. It keeps the exact statevector, supports mid-circuit
//! measurement with projective collapse, and evaluates classically
//! conditioned correction blocks against each branch's measured registers.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **Shot Branching**: Shot budgets are split binomially at mid-circuit
//!   measurements, so deterministic syndromes cost one pass
//! - **Feed-forward**: `if (register == value)` blocks per branch
//! - **Reproducible**: optional fixed seed via
//!   [`StatevectorSimulator::with_seed`]
//!
//! # Performance
//!
//! | Qubits | Memory per branch |
//! |--------|-------------------|
//! | 5 | ~512 B |
//! | 13 | ~128 KB |
//! | 17 | ~2 MB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```rust
//! use qecc_adapter_sim::StatevectorSimulator;
//! use qecc_hal::Simulator;
//! use qecc_ir::{Circuit, QubitId};
//!
//! let sim = StatevectorSimulator::new().with_seed(7);
//!
//! let mut circuit = Circuit::with_size("ghz", 3);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(2)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let result = sim.run(&circuit, 1000).unwrap();
//! assert_eq!(result.counts.get("000") + result.counts.get("111"), 1000);
//! ```

mod simulator;
mod statevector;

pub use simulator::StatevectorSimulator;
pub use statevector::{DETERMINISTIC_EPS, Statevector};
