//! Three-qubit bit-flip (repetition) code.
//!
//! Logical |0⟩ and |1⟩ are encoded as |000⟩ and |111⟩. Two ancillas read
//! the parities q0⊕q2 and q1⊕q2, so a single X error on q0, q1 or q2 gives
//! the syndrome `01`, `10` or `11` respectively.

use tracing::debug;

use qecc_ir::{Circuit, QubitId};

use crate::code::{CodeLayout, QuantumCode};
use crate::error::CodeResult;
use crate::pauli::{Correction, Pauli};
use crate::syndrome::SyndromeTable;

/// Register the syndrome is measured into.
pub const SYNDROME_REGISTER: &str = "syndrome";

/// Append the two repetition-parity checks for one block.
///
/// `ancillas[0]` collects `data[0] ⊕ data[2]`, `ancillas[1]` collects
/// `data[1] ⊕ data[2]`.
pub(crate) fn append_parity_checks(
    circuit: &mut Circuit,
    data: [QubitId; 3],
    ancillas: [QubitId; 2],
) -> CodeResult<()> {
    circuit
        .cx(data[0], ancillas[0])?
        .cx(data[1], ancillas[1])?
        .cx(data[2], ancillas[0])?
        .cx(data[2], ancillas[1])?;
    Ok(())
}

/// Table entries for one repetition block with register bits at `shift`.
pub(crate) fn block_entries(
    pauli: Pauli,
    data: [u32; 3],
    shift: u32,
) -> impl Iterator<Item = (u64, Correction)> {
    data.into_iter().enumerate().map(move |(i, qubit)| {
        let pattern = (i as u64 + 1) << shift;
        (pattern, Correction { pauli, qubit: QubitId(qubit) })
    })
}

/// The three-qubit bit-flip code on 3 data qubits and 2 ancillas.
#[derive(Debug, Clone)]
pub struct ThreeQubitBitFlipCode {
    encoder: Circuit,
    decoder: Circuit,
    syndrome_extractor: Circuit,
    corrector: Circuit,
    tables: Vec<SyndromeTable>,
}

impl ThreeQubitBitFlipCode {
    /// Qubit layout: data 0..3, ancillas 3 and 4.
    pub const LAYOUT: CodeLayout = CodeLayout::new(3, 2);

    /// Build the code and all of its sub-programs.
    pub fn new() -> CodeResult<Self> {
        let table = Self::syndrome_table()?;
        let code = Self {
            encoder: Self::encoding_circuit()?,
            decoder: Self::decoding_circuit()?,
            syndrome_extractor: Self::syndrome_extraction_circuit()?,
            corrector: Self::correction_circuit_for(&table)?,
            tables: vec![table],
        };
        debug!(
            encoder = code.encoder.len(),
            corrector = code.corrector.len(),
            "built bit-flip code"
        );
        Ok(code)
    }

    /// CNOT(0→1), CNOT(0→2).
    pub fn encoding_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("bit_flip_encode", Self::LAYOUT.data);
        circuit
            .cx(QubitId(0), QubitId(1))?
            .cx(QubitId(0), QubitId(2))?;
        Ok(circuit)
    }

    /// The encoder is its own inverse.
    pub fn decoding_circuit() -> CodeResult<Circuit> {
        Ok(Self::encoding_circuit()?.renamed("bit_flip_decode"))
    }

    /// Parity checks onto ancillas 3 and 4.
    pub fn syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("bit_flip_syndrome", Self::LAYOUT.total());
        append_parity_checks(
            &mut circuit,
            [QubitId(0), QubitId(1), QubitId(2)],
            [QubitId(3), QubitId(4)],
        )?;
        Ok(circuit)
    }

    /// `01 → X q0`, `10 → X q1`, `11 → X q2`.
    pub fn syndrome_table() -> CodeResult<SyndromeTable> {
        SyndromeTable::new(SYNDROME_REGISTER, 2, block_entries(Pauli::X, [0, 1, 2], 0))
    }

    /// Measure ancillas 3 and 4 into `syndrome` and apply the X fix.
    pub fn correction_circuit() -> CodeResult<Circuit> {
        Self::correction_circuit_for(&Self::syndrome_table()?)
    }

    fn correction_circuit_for(table: &SyndromeTable) -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("bit_flip_correct", Self::LAYOUT.total());
        table.emit(&mut circuit, &[QubitId(3), QubitId(4)])?;
        Ok(circuit)
    }
}

impl QuantumCode for ThreeQubitBitFlipCode {
    fn name(&self) -> &str {
        "bit_flip"
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
        &[Pauli::X]
    }
}
