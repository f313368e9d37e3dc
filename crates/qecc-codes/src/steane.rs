//! Seven-qubit Steane code, the [7,1,3] CSS code built on the Hamming code.
//!
//! Both stabilizer families use the same three qubit sets, so a register
//! value `v` read from either family names data qubit `v - 1`.

use tracing::debug;

use qecc_ir::{Circuit, QubitId};

use crate::code::{CodeLayout, QuantumCode};
use crate::error::CodeResult;
use crate::pauli::{Correction, Pauli};
use crate::syndrome::{BIT_FLIP_REGISTER, PHASE_FLIP_REGISTER, SyndromeTable};

/// Hamming parity-check supports, one per register bit.
pub const STABILIZER_SUPPORTS: [[u32; 4]; 3] = [[0, 2, 4, 6], [1, 2, 5, 6], [3, 4, 5, 6]];

const DATA_QUBITS: u32 = 7;
const BIT_FLIP_ANCILLAS: [u32; 3] = [7, 8, 9];
const PHASE_FLIP_ANCILLAS: [u32; 3] = [10, 11, 12];

/// The seven-qubit Steane code on 7 data qubits and 6 ancillas.
#[derive(Debug, Clone)]
pub struct SevenQubitSteaneCode {
    encoder: Circuit,
    decoder: Circuit,
    syndrome_extractor: Circuit,
    corrector: Circuit,
    tables: Vec<SyndromeTable>,
}

impl SevenQubitSteaneCode {
    /// Qubit layout: data 0..7, X-check ancillas 7..10, Z-check ancillas 10..13.
    pub const LAYOUT: CodeLayout = CodeLayout::new(DATA_QUBITS, 6);

    /// Build the code and all of its sub-programs.
    pub fn new() -> CodeResult<Self> {
        let code = Self {
            encoder: Self::encoding_circuit()?,
            decoder: Self::decoding_circuit()?,
            syndrome_extractor: Self::syndrome_extraction_circuit()?,
            corrector: Self::correction_circuit()?,
            tables: vec![
                Self::syndrome_table(BIT_FLIP_REGISTER, Pauli::X)?,
                Self::syndrome_table(PHASE_FLIP_REGISTER, Pauli::Z)?,
            ],
        };
        debug!(
            encoder = code.encoder.len(),
            syndrome = code.syndrome_extractor.len(),
            "built Steane code"
        );
        Ok(code)
    }

    /// Hadamards on the three check qubits, then the generator-matrix CNOTs.
    pub fn encoding_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("steane_encode", DATA_QUBITS);
        circuit.h(QubitId(4))?.h(QubitId(5))?.h(QubitId(6))?;
        circuit.cx(QubitId(0), QubitId(1))?.cx(QubitId(0), QubitId(2))?;
        for (control, targets) in [(6, [3, 1, 0]), (5, [3, 2, 0]), (4, [3, 2, 1])] {
            for target in targets {
                circuit.cx(QubitId(control), QubitId(target))?;
            }
        }
        Ok(circuit)
    }

    /// The encoder reversed.
    pub fn decoding_circuit() -> CodeResult<Circuit> {
        Ok(Self::encoding_circuit()?
            .inverse()?
            .renamed("steane_decode"))
    }

    /// Z-type checks onto ancillas 7..10, X-type checks onto ancillas 10..13.
    pub fn syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("steane_syndrome", Self::LAYOUT.total());
        for (ancilla, support) in BIT_FLIP_ANCILLAS.into_iter().zip(STABILIZER_SUPPORTS) {
            for q in support {
                circuit.cx(QubitId(q), QubitId(ancilla))?;
            }
        }
        for (ancilla, support) in PHASE_FLIP_ANCILLAS.into_iter().zip(STABILIZER_SUPPORTS) {
            let ancilla = QubitId(ancilla);
            circuit.h(ancilla)?;
            for q in support {
                circuit.cx(ancilla, QubitId(q))?;
            }
            circuit.h(ancilla)?;
        }
        Ok(circuit)
    }

    /// Value `v` in `1..=7` maps to `pauli` on qubit `v - 1`.
    pub fn syndrome_table(register: &str, pauli: Pauli) -> CodeResult<SyndromeTable> {
        SyndromeTable::new(
            register,
            3,
            (1..=u64::from(DATA_QUBITS)).map(|v| {
                (
                    v,
                    Correction {
                        pauli,
                        qubit: QubitId(v as u32 - 1),
                    },
                )
            }),
        )
    }

    /// Measure both ancilla triples and apply X then Z fixes.
    pub fn correction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("steane_correct", Self::LAYOUT.total());
        Self::syndrome_table(BIT_FLIP_REGISTER, Pauli::X)?
            .emit(&mut circuit, &BIT_FLIP_ANCILLAS.map(QubitId))?;
        Self::syndrome_table(PHASE_FLIP_REGISTER, Pauli::Z)?
            .emit(&mut circuit, &PHASE_FLIP_ANCILLAS.map(QubitId))?;
        Ok(circuit)
    }
}

impl QuantumCode for SevenQubitSteaneCode {
    fn name(&self) -> &str {
        "steane"
    }

    fn layout(&self) -> CodeLayout {
        Self::LAYOUT
    }

    fn encoder(&self) -> &Circuit {
        &self.encoder
    }

    fn decoder(&self) -> &Circuit {
        &self.decoder
    }

    fn syndrome_extractor(&self) -> &Circuit {
        &self.syndrome_extractor
    }

    fn corrector(&self) -> &Circuit {
        &self.corrector
    }

    fn syndrome_tables(&self) -> &[SyndromeTable] {
        &self.tables
    }

    fn protects(&self) -> &[Pauli] {
        &[Pauli::X, Pauli::Z]
    }
}
