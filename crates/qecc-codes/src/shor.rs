//! Nine-qubit Shor code.
//!
//! Three bit-flip blocks `(0,1,2)`, `(3,4,5)`, `(6,7,8)` nested inside one
//! phase-flip code over the block leaders `(0,3,6)`. Depending on
//! [`ShorProtection`] the code extracts and corrects X errors, Z errors, or
//! one of each.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use qecc_ir::{Circuit, QubitId, QubitMap};

use crate::bit_flip::{ThreeQubitBitFlipCode, block_entries};
use crate::code::{CodeLayout, QuantumCode};
use crate::error::CodeResult;
use crate::pauli::Pauli;
use crate::phase_flip::ThreeQubitPhaseFlipCode;
use crate::syndrome::{BIT_FLIP_REGISTER, PHASE_FLIP_REGISTER, SyndromeTable};

/// Number of data qubits.
pub const DATA_QUBITS: u32 = 9;

const BLOCK_LEADERS: [u32; 3] = [0, 3, 6];
const BIT_FLIP_ANCILLAS: u32 = 6;
const PHASE_FLIP_ANCILLAS: u32 = 2;

/// Which error types a [`NineQubitShorCode`] instance handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShorProtection {
    /// X errors only: 6 ancillas, register `bit_flip_syndrome`.
    BitFlip,
    /// Z errors only: 2 ancillas, register `phase_flip_syndrome`.
    PhaseFlip,
    /// One X and one Z error: 8 ancillas, both registers.
    #[default]
    Complete,
}

impl ShorProtection {
    /// Qubit layout for this mode.
    pub const fn layout(self) -> CodeLayout {
        match self {
            ShorProtection::BitFlip => CodeLayout::new(DATA_QUBITS, BIT_FLIP_ANCILLAS),
            ShorProtection::PhaseFlip => CodeLayout::new(DATA_QUBITS, PHASE_FLIP_ANCILLAS),
            ShorProtection::Complete => {
                CodeLayout::new(DATA_QUBITS, BIT_FLIP_ANCILLAS + PHASE_FLIP_ANCILLAS)
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            ShorProtection::BitFlip => "shor_bit_flip",
            ShorProtection::PhaseFlip => "shor_phase_flip",
            ShorProtection::Complete => "shor",
        }
    }
}

impl fmt::Display for ShorProtection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The nine-qubit Shor code.
#[derive(Debug, Clone)]
pub struct NineQubitShorCode {
    protection: ShorProtection,
    encoder: Circuit,
    decoder: Circuit,
    syndrome_extractor: Circuit,
    corrector: Circuit,
    tables: Vec<SyndromeTable>,
}

impl NineQubitShorCode {
    /// Build the code in the given protection mode.
    pub fn new(protection: ShorProtection) -> CodeResult<Self> {
        let (syndrome_extractor, corrector, tables) = match protection {
            ShorProtection::BitFlip => (
                Self::bit_flip_syndrome_extraction_circuit()?,
                Self::bit_flip_correction_circuit()?,
                vec![Self::bit_flip_syndrome_table()?],
            ),
            ShorProtection::PhaseFlip => (
                Self::phase_flip_syndrome_extraction_circuit()?,
                Self::phase_flip_correction_circuit()?,
                vec![Self::phase_flip_syndrome_table()?],
            ),
            ShorProtection::Complete => (
                Self::complete_syndrome_extraction_circuit()?,
                Self::complete_correction_circuit()?,
                vec![
                    Self::bit_flip_syndrome_table()?,
                    Self::phase_flip_syndrome_table()?,
                ],
            ),
        };
        let code = Self {
            protection,
            encoder: Self::encoding_circuit()?,
            decoder: Self::decoding_circuit()?,
            syndrome_extractor,
            corrector,
            tables,
        };
        debug!(
            %protection,
            layout = %protection.layout(),
            corrector = code.corrector.len(),
            "built Shor code"
        );
        Ok(code)
    }

    /// The protection mode this instance was built with.
    pub fn protection(&self) -> ShorProtection {
        self.protection
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Phase-flip encode on the leaders, then bit-flip encode each block.
    ///
    /// |0⟩ → (|000⟩ + |111⟩)⊗3 and |1⟩ → (|000⟩ − |111⟩)⊗3, unnormalized.
    pub fn encoding_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("shor_encode", DATA_QUBITS);
        circuit.compose(
            &ThreeQubitPhaseFlipCode::encoding_circuit()?,
            &leader_map()?,
        )?;
        let block = ThreeQubitBitFlipCode::encoding_circuit()?;
        for leader in BLOCK_LEADERS {
            circuit.compose(&block, &QubitMap::offset(3, leader))?;
        }
        Ok(circuit)
    }

    /// Bit-flip decode each block, then phase-flip decode the leaders.
    pub fn decoding_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size("shor_decode", DATA_QUBITS);
        let block = ThreeQubitBitFlipCode::decoding_circuit()?;
        for leader in BLOCK_LEADERS {
            circuit.compose(&block, &QubitMap::offset(3, leader))?;
        }
        circuit.compose(
            &ThreeQubitPhaseFlipCode::decoding_circuit()?,
            &leader_map()?,
        )?;
        Ok(circuit)
    }

    // =========================================================================
    // Syndrome extraction
    // =========================================================================

    /// Per-block repetition parity checks onto ancillas 9..15.
    pub fn bit_flip_syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_bit_flip_syndrome",
            ShorProtection::BitFlip.layout().total(),
        );
        append_bit_flip_syndrome(&mut circuit, DATA_QUBITS)?;
        Ok(circuit)
    }

    /// Block-pair X parities onto ancillas 9 and 10.
    pub fn phase_flip_syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_phase_flip_syndrome",
            ShorProtection::PhaseFlip.layout().total(),
        );
        append_phase_flip_syndrome(&mut circuit, DATA_QUBITS)?;
        Ok(circuit)
    }

    /// Both extractions: bit-flip ancillas 9..15, phase-flip ancillas 15, 16.
    pub fn complete_syndrome_extraction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_syndrome",
            ShorProtection::Complete.layout().total(),
        );
        append_bit_flip_syndrome(&mut circuit, DATA_QUBITS)?;
        append_phase_flip_syndrome(&mut circuit, DATA_QUBITS + BIT_FLIP_ANCILLAS)?;
        Ok(circuit)
    }

    // =========================================================================
    // Correction
    // =========================================================================

    /// Six-bit table: block `b` owns bits `2b` and `2b + 1`.
    pub fn bit_flip_syndrome_table() -> CodeResult<SyndromeTable> {
        SyndromeTable::new(
            BIT_FLIP_REGISTER,
            BIT_FLIP_ANCILLAS,
            BLOCK_LEADERS
                .into_iter()
                .enumerate()
                .flat_map(|(b, leader)| {
                    block_entries(Pauli::X, [leader, leader + 1, leader + 2], 2 * b as u32)
                }),
        )
    }

    /// Two-bit table: Z on the leader of the flagged block.
    pub fn phase_flip_syndrome_table() -> CodeResult<SyndromeTable> {
        SyndromeTable::new(
            PHASE_FLIP_REGISTER,
            PHASE_FLIP_ANCILLAS,
            block_entries(Pauli::Z, BLOCK_LEADERS, 0),
        )
    }

    /// Measure ancillas 9..15 and apply the X fix.
    pub fn bit_flip_correction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_bit_flip_correct",
            ShorProtection::BitFlip.layout().total(),
        );
        Self::bit_flip_syndrome_table()?
            .emit(&mut circuit, &ancilla_block(DATA_QUBITS, BIT_FLIP_ANCILLAS))?;
        Ok(circuit)
    }

    /// Measure ancillas 9 and 10 and apply the Z fix.
    pub fn phase_flip_correction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_phase_flip_correct",
            ShorProtection::PhaseFlip.layout().total(),
        );
        Self::phase_flip_syndrome_table()?
            .emit(&mut circuit, &ancilla_block(DATA_QUBITS, PHASE_FLIP_ANCILLAS))?;
        Ok(circuit)
    }

    /// Bit-flip correction from ancillas 9..15, then phase-flip correction
    /// from ancillas 15 and 16.
    pub fn complete_correction_circuit() -> CodeResult<Circuit> {
        let mut circuit = Circuit::with_size(
            "shor_correct",
            ShorProtection::Complete.layout().total(),
        );
        Self::bit_flip_syndrome_table()?
            .emit(&mut circuit, &ancilla_block(DATA_QUBITS, BIT_FLIP_ANCILLAS))?;
        Self::phase_flip_syndrome_table()?.emit(
            &mut circuit,
            &ancilla_block(DATA_QUBITS + BIT_FLIP_ANCILLAS, PHASE_FLIP_ANCILLAS),
        )?;
        Ok(circuit)
    }
}

impl QuantumCode for NineQubitShorCode {
    fn name(&self) -> &str {
        self.protection.name()
    }

    fn layout(&self) -> CodeLayout {
        self.protection.layout()
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
        match self.protection {
            ShorProtection::BitFlip => &[Pauli::X],
            ShorProtection::PhaseFlip => &[Pauli::Z],
            ShorProtection::Complete => &[Pauli::X, Pauli::Z],
        }
    }
}

fn leader_map() -> CodeResult<QubitMap> {
    Ok(QubitMap::from_targets(BLOCK_LEADERS.map(QubitId))?)
}

fn ancilla_block(start: u32, len: u32) -> Vec<QubitId> {
    (start..start + len).map(QubitId).collect()
}

/// Three copies of the repetition syndrome circuit, block `b` onto
/// ancillas `first + 2b` and `first + 2b + 1`.
fn append_bit_flip_syndrome(circuit: &mut Circuit, first_ancilla: u32) -> CodeResult<()> {
    let block = ThreeQubitBitFlipCode::syndrome_extraction_circuit()?;
    for (b, leader) in (0u32..).zip(BLOCK_LEADERS) {
        let map = QubitMap::from_targets([
            QubitId(leader),
            QubitId(leader + 1),
            QubitId(leader + 2),
            QubitId(first_ancilla + 2 * b),
            QubitId(first_ancilla + 2 * b + 1),
        ])?;
        circuit.compose(&block, &map)?;
    }
    Ok(())
}

/// The first ancilla compares blocks 0 and 2, the second blocks 1 and 2.
fn append_phase_flip_syndrome(circuit: &mut Circuit, first_ancilla: u32) -> CodeResult<()> {
    let a0 = QubitId(first_ancilla);
    let a1 = QubitId(first_ancilla + 1);
    circuit.h(a0)?.h(a1)?;
    for q in [0, 1, 2, 6, 7, 8] {
        circuit.cx(a0, QubitId(q))?;
    }
    for q in 3..9 {
        circuit.cx(a1, QubitId(q))?;
    }
    circuit.h(a0)?.h(a1)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::Correction;

    #[test]
    fn test_layouts() {
        assert_eq!(ShorProtection::BitFlip.layout().total(), 15);
        assert_eq!(ShorProtection::PhaseFlip.layout().total(), 11);
        assert_eq!(ShorProtection::Complete.layout().total(), 17);
        assert_eq!(ShorProtection::default(), ShorProtection::Complete);
    }

    #[test]
    fn test_encoder_composes_sub_codes() {
        let encoder = NineQubitShorCode::encoding_circuit().unwrap();
        // phase-flip encoder (5) + three bit-flip encoders (2 each)
        assert_eq!(encoder.len(), 11);
        assert_eq!(encoder.instructions()[0].qubits, vec![QubitId(0), QubitId(3)]);
        assert_eq!(encoder.instructions()[9].qubits, vec![QubitId(6), QubitId(7)]);

        let decoder = NineQubitShorCode::decoding_circuit().unwrap();
        assert_eq!(decoder.len(), 11);
        assert_eq!(decoder.instructions()[0].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(decoder.instructions()[10].qubits, vec![QubitId(0), QubitId(3)]);
    }

    #[test]
    fn test_bit_flip_syndrome_wiring() {
        let circuit = NineQubitShorCode::bit_flip_syndrome_extraction_circuit().unwrap();
        assert_eq!(circuit.len(), 12);
        // block 1, first check: q3 onto ancilla 11
        assert_eq!(circuit.instructions()[4].qubits, vec![QubitId(3), QubitId(11)]);
        assert_eq!(circuit.instructions()[11].qubits, vec![QubitId(8), QubitId(14)]);
    }

    #[test]
    fn test_complete_syndrome_wiring() {
        let circuit = NineQubitShorCode::complete_syndrome_extraction_circuit().unwrap();
        assert_eq!(circuit.num_qubits(), 17);
        assert_eq!(circuit.len(), 12 + 16);
        assert_eq!(circuit.instructions()[12].qubits, vec![QubitId(15)]);
    }

    #[test]
    fn test_bit_flip_table() {
        let table = NineQubitShorCode::bit_flip_syndrome_table().unwrap();
        let expected = [
            (0b000001, 0),
            (0b000010, 1),
            (0b000011, 2),
            (0b000100, 3),
            (0b001000, 4),
            (0b001100, 5),
            (0b010000, 6),
            (0b100000, 7),
            (0b110000, 8),
        ];
        assert_eq!(table.len(), 9);
        for (pattern, qubit) in expected {
            assert_eq!(table.lookup(pattern), Some(Correction::x(qubit)));
        }
    }

    #[test]
    fn test_phase_flip_table() {
        let table = NineQubitShorCode::phase_flip_syndrome_table().unwrap();
        assert_eq!(table.lookup(1), Some(Correction::z(0)));
        assert_eq!(table.lookup(2), Some(Correction::z(3)));
        assert_eq!(table.lookup(3), Some(Correction::z(6)));
    }

    #[test]
    fn test_complete_register_order() {
        let code = NineQubitShorCode::new(ShorProtection::Complete).unwrap();
        let names: Vec<&str> = code.corrector().cregs().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec![BIT_FLIP_REGISTER, PHASE_FLIP_REGISTER]);
        assert_eq!(code.corrector().len(), 1 + 9 + 1 + 3);
        assert_eq!(
            code.decode_syndrome("10 001000").unwrap(),
            vec![Correction::x(4), Correction::z(3)]
        );
        assert_eq!(code.correctable_errors().len(), 18);
    }

    #[test]
    fn test_unknown_pattern_rejected() {
        let code = NineQubitShorCode::new(ShorProtection::BitFlip).unwrap();
        assert!(code.decode_syndrome("000101").is_err());
        assert_eq!(code.name(), "shor_bit_flip");
    }
}
