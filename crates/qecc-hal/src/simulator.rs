//! Simulator trait.
//!
//! The [`Simulator`] trait is the single seam between circuit construction
//! and execution:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (sync, &ref)        (sync)       (sync, blocking)
//! ```
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `capabilities()` | yes | `&Capabilities` |
//! | `run()` | yes | `HalResult<ExecutionResult>` |
//! | `validate()` | provided | `HalResult<()>` |

use qecc_ir::{Circuit, InstructionKind};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for circuit simulators.
///
/// Implementations are handed to callers explicitly; nothing in the
/// workspace holds a process-wide default simulator.
///
/// # Contract
///
/// - `capabilities()` MUST be infallible and cached at construction time.
/// - `run()` MUST reject `shots == 0` with [`HalError::InvalidShots`] and
///   circuits wider than `capabilities().max_qubits` with
///   [`HalError::CircuitTooLarge`].
/// - The returned counts MUST sum to `shots`.
pub trait Simulator: Send + Sync {
    /// Get the simulator name.
    fn name(&self) -> &str;

    /// Get the simulator capabilities.
    fn capabilities(&self) -> &Capabilities;

    /// Execute `circuit` for `shots` repetitions and collect outcome counts.
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;

    /// Check a circuit and shot count against this simulator's capabilities.
    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = self.capabilities();
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots exceeds limit of {}",
                caps.max_shots
            )));
        }
        if circuit.num_qubits() > caps.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit '{}' has {} qubits, {} supports at most {}",
                circuit.name(),
                circuit.num_qubits(),
                self.name(),
                caps.max_qubits
            )));
        }
        for inst in circuit.instructions() {
            let gates = match &inst.kind {
                InstructionKind::Gate(g) => vec![*g],
                InstructionKind::Conditional(op) => {
                    op.body.iter().filter_map(|i| i.as_gate()).collect()
                }
                _ => continue,
            };
            for gate in gates {
                if !caps.supports_gate(gate.name()) {
                    return Err(HalError::Unsupported(format!(
                        "gate '{}' on {}",
                        gate.name(),
                        self.name()
                    )));
                }
            }
        }
        Ok(())
    }
}
