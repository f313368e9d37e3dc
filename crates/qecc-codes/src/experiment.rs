//! End-to-end experiment programs: prepare, encode, corrupt, correct, decode, read out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qecc_ir::{Circuit, QubitId, QubitMap, QubitState};

use crate::code::QuantumCode;
use crate::error::{CodeError, CodeResult};
use crate::pauli::PauliError;

/// Register the logical qubit is read into by [`Readout::Logical`].
pub const LOGICAL_REGISTER: &str = "logical";

/// How the finished program is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readout {
    /// Every qubit into the `meas` register.
    All,
    /// Qubit 0 into the one-bit `logical` register.
    #[default]
    Logical,
    /// No final measurement.
    None,
}

/// Builder for a complete program around one code instance.
///
/// Stage order is fixed: initialize qubit 0, encode, inject errors,
/// extract the syndrome, correct, decode, optional Hadamard on qubit 0,
/// measure. Correction implies syndrome extraction.
///
/// ```
/// use qecc_codes::{Experiment, PauliError, Readout, ThreeQubitBitFlipCode};
/// use qecc_ir::QubitState;
///
/// let code = ThreeQubitBitFlipCode::new().unwrap();
/// let circuit = Experiment::new(&code)
///     .with_state(QubitState::ONE)
///     .with_error(PauliError::x(1))
///     .with_readout(Readout::Logical)
///     .build()
///     .unwrap();
///
/// assert_eq!(circuit.num_qubits(), 5);
/// assert_eq!(circuit.cregs().len(), 2);
/// ```
#[derive(Clone)]
pub struct Experiment<'a> {
    code: &'a dyn QuantumCode,
    state: QubitState,
    errors: Vec<PauliError>,
    syndrome: bool,
    correct: bool,
    decode: bool,
    hadamard_readout: bool,
    readout: Readout,
}

impl<'a> Experiment<'a> {
    /// Start from |0⟩ with syndrome extraction, correction, decoding and a
    /// logical readout enabled.
    pub fn new(code: &'a dyn QuantumCode) -> Self {
        Self {
            code,
            state: QubitState::ZERO,
            errors: Vec::new(),
            syndrome: true,
            correct: true,
            decode: true,
            hadamard_readout: false,
            readout: Readout::Logical,
        }
    }

    /// Logical input state prepared on qubit 0.
    pub fn with_state(mut self, state: QubitState) -> Self {
        self.state = state;
        self
    }

    /// Inject one Pauli error after encoding.
    pub fn with_error(mut self, error: PauliError) -> Self {
        self.errors.push(error);
        self
    }

    /// Inject several errors, in order.
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = PauliError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Toggle syndrome extraction.
    pub fn with_syndrome(mut self, enabled: bool) -> Self {
        self.syndrome = enabled;
        self
    }

    /// Toggle the conditional correction stage.
    pub fn with_correction(mut self, enabled: bool) -> Self {
        self.correct = enabled;
        self
    }

    /// Toggle decoding back onto qubit 0.
    pub fn with_decode(mut self, enabled: bool) -> Self {
        self.decode = enabled;
        self
    }

    /// Rotate qubit 0 into the X basis before measuring.
    pub fn with_hadamard_readout(mut self, enabled: bool) -> Self {
        self.hadamard_readout = enabled;
        self
    }

    /// Final measurement mode.
    pub fn with_readout(mut self, readout: Readout) -> Self {
        self.readout = readout;
        self
    }

    /// The injected errors.
    pub fn errors(&self) -> &[PauliError] {
        &self.errors
    }

    /// Build the program on `data + ancilla` qubits.
    pub fn build(&self) -> CodeResult<Circuit> {
        let layout = self.code.layout();
        for error in &self.errors {
            if error.qubit.0 >= layout.data {
                return Err(CodeError::QubitOutOfRange {
                    code: self.code.name().to_string(),
                    qubit: error.qubit,
                    data_qubits: layout.data,
                });
            }
        }

        let data = QubitMap::identity(layout.data);
        let full = QubitMap::identity(layout.total());
        let mut circuit =
            Circuit::with_size(format!("{}_experiment", self.code.name()), layout.total());

        circuit.initialize(QubitId(0), self.state)?;
        circuit.compose(self.code.encoder(), &data)?;
        for error in &self.errors {
            for &gate in error.pauli.gates() {
                circuit.append(gate, &[error.qubit])?;
            }
        }
        if self.syndrome || self.correct {
            circuit.compose(self.code.syndrome_extractor(), &full)?;
        }
        if self.correct {
            circuit.compose(self.code.corrector(), &full)?;
        }
        if self.decode {
            circuit.compose(self.code.decoder(), &data)?;
        }
        if self.hadamard_readout {
            circuit.h(QubitId(0))?;
        }
        match self.readout {
            Readout::All => {
                circuit.measure_all()?;
            }
            Readout::Logical => {
                circuit.add_creg(LOGICAL_REGISTER, 1)?;
                circuit.measure([QubitId(0)], LOGICAL_REGISTER)?;
            }
            Readout::None => {}
        }

        debug!(
            code = self.code.name(),
            errors = self.errors.len(),
            instructions = circuit.len(),
            "built experiment"
        );
        Ok(circuit)
    }
}

impl std::fmt::Debug for Experiment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experiment")
            .field("code", &self.code.name())
            .field("state", &self.state)
            .field("errors", &self.errors)
            .field("syndrome", &self.syndrome)
            .field("correct", &self.correct)
            .field("decode", &self.decode)
            .field("hadamard_readout", &self.hadamard_readout)
            .field("readout", &self.readout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_flip::ThreeQubitBitFlipCode;
    use crate::steane::SevenQubitSteaneCode;
    use qecc_ir::MEASURE_ALL_REGISTER;

    #[test]
    fn test_default_program_layout() {
        let code = ThreeQubitBitFlipCode::new().unwrap();
        let circuit = Experiment::new(&code).build().unwrap();
        // initialize + encode(2) + syndrome(4) + correct(4) + decode(2) + measure
        assert_eq!(circuit.len(), 14);
        let names: Vec<&str> = circuit.cregs().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["syndrome", LOGICAL_REGISTER]);
    }

    #[test]
    fn test_correction_implies_syndrome() {
        let code = ThreeQubitBitFlipCode::new().unwrap();
        let with = Experiment::new(&code).with_syndrome(false).build().unwrap();
        let without = Experiment::new(&code)
            .with_syndrome(false)
            .with_correction(false)
            .build()
            .unwrap();
        assert_eq!(with.len(), 14);
        assert_eq!(without.len(), 6);
        assert!(without.register("syndrome").is_none());
    }

    #[test]
    fn test_errors_follow_encoder() {
        let code = ThreeQubitBitFlipCode::new().unwrap();
        let circuit = Experiment::new(&code)
            .with_error(PauliError::y(2))
            .with_syndrome(false)
            .with_correction(false)
            .with_decode(false)
            .with_readout(Readout::None)
            .build()
            .unwrap();
        let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["initialize", "cx", "cx", "x", "z"]);
        assert!(circuit.cregs().is_empty());
    }

    #[test]
    fn test_error_outside_data_rejected() {
        let code = SevenQubitSteaneCode::new().unwrap();
        let result = Experiment::new(&code).with_error(PauliError::x(7)).build();
        assert!(matches!(
            result,
            Err(CodeError::QubitOutOfRange { data_qubits: 7, .. })
        ));
    }

    #[test]
    fn test_measure_all_declared_last() {
        let code = ThreeQubitBitFlipCode::new().unwrap();
        let circuit = Experiment::new(&code)
            .with_decode(false)
            .with_hadamard_readout(true)
            .with_readout(Readout::All)
            .build()
            .unwrap();
        assert_eq!(circuit.cregs().last().unwrap().name(), MEASURE_ALL_REGISTER);
        assert_eq!(circuit.register(MEASURE_ALL_REGISTER).unwrap().width(), 5);
    }
}
