//! Three-qubit phase-flip code.
//!
//! The bit-flip code conjugated by Hadamards: logical |0⟩ → |+++⟩ and
//! logical |1⟩ → |−−−⟩. The parity checks run in the X basis, so a single Z
//! error on q0, q1 or q2 gives `01`, `10` or `11`.

use tracing::debug;

use qecc_ir::{Circuit, QubitId};

use crate::bit_flip::block_entries;
use crate::code::{CodeLayout, QuantumCode};
use crate::error::CodeResult;
use crate::pauli::Pauli;
use crate::syndrome::SyndromeTable;

/// Register the syndrome is measured into.
pub const SYNDROME_REGISTER: &str = "syndrome";

/// The three-qubit phase-flip code on 3 data qubits and 2 ancillas.
#[derive(Debug, Clone)]
pub struct ThreeQubitPhaseFlipCode {
    encoder: Circuit,
    decoder: Circuit,
    syndrome_extractor: Circuit,
    corrector: Circuit,
    tables: Vec<SyndromeTable>,
}

impl ThreeQubitPhaseFlipCode {
    /// Qubit layout: data 0..3, ancillas 3 and 4.
    pub const LAYOUT: CodeLayout = CodeLayout::new(3, 2);

    /// Build the code and all of its sub-programs.
    pub fn new() -> CodeResult<Self> {
        let table = Self::syndrome_table()?;
        let mut corrector = Circuit::with_size("phase_flip_correct", Self::LAYOUT.total());
        table.emit(&mut corrector, &[QubitId(3), QubitId(4)])?;
        let code = Self {
            encoder: Self::encoding_circuit()?,
            decoder: Self::decoding_circuit()?,
            syndrome_extractor: Self::syndrome_extraction_circuit()?,
            corrector,
            tables: vec![table],
        };
        debug!(
            encoder = code.encoder.len(),
            corrector = code.corrector.len(),
            "built phase-flip code"
        );
        Ok(code)
    }

    /// CNOT(0→1), CNOT(0→2), then H on all three.
    pub fn encoding_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("phase_flip_encode", Self::LAYOUT.data);
        circuit
            .cx(QubitId(0), QubitId(1))?
            .cx(QubitId(0), QubitId(2))?;
        for q in 0..3 {
            circuit.h(QubitId(q))?;
        }
        Ok(circuit)
    }

    /// H on all three, then CNOT(0→1), CNOT(0→2).
    pub fn decoding_circuit() -> CodeResult<Circuit> {
        Ok(Self::encoding_circuit()?
            .inverse()?
            .renamed("phase_flip_decode"))
    }

    /// Hadamard-sandwiched ancillas controlling CNOTs onto the data.
    pub fn syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("phase_flip_syndrome", Self::LAYOUT.total());
        let (a0, a1) = (QubitId(3), QubitId(4));
        circuit.h(a0)?.h(a1)?;
        circuit
            .cx(a0, QubitId(0))?
            .cx(a1, QubitId(1))?
            .cx(a0, QubitId(2))?
            .cx(a1, QubitId(2))?;
        circuit.h(a0)?.h(a1)?;
        Ok(circuit)
    }

    /// `01 → Z q0`, `10 → Z q1`, `11 → Z q2`.
    pub fn syndrome_table() -> CodeResult<SyndromeTable> {
        SyndromeTable::new(SYNDROME_REGISTER, 2, block_entries(Pauli::Z, [0, 1, 2], 0))
    }
}

impl QuantumCode for ThreeQubitPhaseFlipCode {
    fn name(&self) -> &str {
        "phase_flip"
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
        &[Pauli::Z]
    }
}
