//! The common surface every code construction exposes.

use serde::{Deserialize, Serialize};
use std::fmt;

use qecc_ir::{Circuit, QubitId};

use crate::error::{CodeError, CodeResult};
use crate::pauli::{Correction, Pauli, PauliError};
use crate::syndrome::SyndromeTable;

/// Qubit counts of a code instance.
///
/// Data qubits occupy indices `0..data`, ancillas `data..data + ancilla`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLayout {
    /// Number of data qubits.
    pub data: u32,
    /// Number of syndrome ancillas.
    pub ancilla: u32,
}

impl CodeLayout {
    /// Create a layout.
    pub const fn new(data: u32, ancilla: u32) -> Self {
        Self { data, ancilla }
    }

    /// Total qubit count.
    pub const fn total(&self) -> u32 {
        self.data + self.ancilla
    }

    /// Data qubit indices.
    pub fn data_qubits(self) -> impl Iterator<Item = QubitId> {
        (0..self.data).map(QubitId)
    }
}

impl fmt::Display for CodeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.data, self.ancilla)
    }
}

/// A quantum error-correcting code built from four sub-programs.
///
/// - `encoder` and `decoder` act on the data qubits only.
/// - `syndrome_extractor` and `corrector` act on data plus ancillas. The
///   corrector measures the ancillas into the syndrome registers and applies
///   one conditional block per table entry.
///
/// All four programs are built once at construction and borrowed here.
pub trait QuantumCode {
    /// Short identifier, e.g. `"bit_flip"`.
    fn name(&self) -> &str;

    /// Data and ancilla counts.
    fn layout(&self) -> CodeLayout;

    /// Logical state on qubit 0 → codeword on the data qubits.
    fn encoder(&self) -> &Circuit;

    /// Codeword → logical state on qubit 0.
    fn decoder(&self) -> &Circuit;

    /// Writes the syndrome onto the ancillas.
    fn syndrome_extractor(&self) -> &Circuit;

    /// Measures the ancillas and applies the classically-conditioned fix.
    fn corrector(&self) -> &Circuit;

    /// Syndrome tables in register declaration order.
    fn syndrome_tables(&self) -> &[SyndromeTable];

    /// Error types the code corrects, one per data qubit.
    fn protects(&self) -> &[Pauli];

    /// Every single-qubit error this code is built to correct.
    fn correctable_errors(&self) -> Vec<PauliError> {
        self.protects()
            .iter()
            .flat_map(|&pauli| {
                self.layout()
                    .data_qubits()
                    .map(move |qubit| PauliError { pauli, qubit })
            })
            .collect()
    }

    /// Map a measured outcome key back to the corrections it implies.
    ///
    /// The syndrome registers must be the trailing fields of the key, which
    /// holds for the corrector alone and for any program that composes the
    /// corrector before declaring further registers. An all-zero field
    /// contributes nothing.
    fn decode_syndrome(&self, key: &str) -> CodeResult<Vec<Correction>> {
        let tables = self.syndrome_tables();
        let fields: Vec<&str> = key.split(' ').collect();
        if fields.len() < tables.len() {
            return Err(CodeError::MalformedOutcome {
                outcome: key.to_string(),
                reason: format!(
                    "expected at least {} register fields, found {}",
                    tables.len(),
                    fields.len()
                ),
            });
        }
        let mut corrections = Vec::new();
        for (table, field) in tables.iter().zip(fields.iter().rev()) {
            if let Some(correction) = table.correction_for(field)? {
                corrections.push(correction);
            }
        }
        Ok(corrections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        NineQubitShorCode, SevenQubitSteaneCode, ShorProtection, ThreeQubitBitFlipCode,
        ThreeQubitPhaseFlipCode,
    };

    #[test]
    fn test_layout_qubits() {
        let layout = CodeLayout::new(3, 2);
        assert_eq!(layout.total(), 5);
        assert_eq!(layout.to_string(), "3+2");
        let data: Vec<QubitId> = CodeLayout::new(3, 2).data_qubits().collect();
        assert_eq!(data, vec![QubitId(0), QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_correctable_errors_per_code() {
        let codes: Vec<(Box<dyn QuantumCode>, usize)> = vec![
            (Box::new(ThreeQubitBitFlipCode::new().unwrap()), 3),
            (Box::new(ThreeQubitPhaseFlipCode::new().unwrap()), 3),
            (Box::new(NineQubitShorCode::new(ShorProtection::BitFlip).unwrap()), 9),
            (Box::new(NineQubitShorCode::new(ShorProtection::PhaseFlip).unwrap()), 9),
            (Box::new(NineQubitShorCode::new(ShorProtection::Complete).unwrap()), 18),
            (Box::new(SevenQubitSteaneCode::new().unwrap()), 14),
        ];
        for (code, expected) in codes {
            let errors = code.correctable_errors();
            assert_eq!(errors.len(), expected, "{}", code.name());
            assert!(errors.iter().all(|e| e.qubit.0 < code.layout().data));
            assert!(errors.iter().all(|e| code.protects().contains(&e.pauli)));
        }

        let steane = SevenQubitSteaneCode::new().unwrap();
        let errors = steane.correctable_errors();
        assert_eq!(errors[0], PauliError::x(0));
        assert_eq!(errors[7], PauliError::z(0));
    }
}
