//! Syndrome tables: measured ancilla patterns to corrective actions.

use serde::Serialize;

use qecc_ir::{Circuit, QubitId};

use crate::error::{CodeError, CodeResult};
use crate::pauli::Correction;

/// Register holding X-error syndromes in codes that also correct Z.
pub const BIT_FLIP_REGISTER: &str = "bit_flip_syndrome";

/// Register holding Z-error syndromes in codes that also correct X.
pub const PHASE_FLIP_REGISTER: &str = "phase_flip_syndrome";

/// A fixed map from a syndrome register value to the correction it implies.
///
/// The all-zero pattern is the implicit no-op and never appears as an entry.
/// Entries are kept sorted by pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyndromeTable {
    register: String,
    width: u32,
    entries: Vec<(u64, Correction)>,
}

impl SyndromeTable {
    /// Build a table for a `width`-bit register.
    ///
    /// Fails on a zero or too-wide pattern, and on a repeated pattern.
    pub fn new(
        register: impl Into<String>,
        width: u32,
        entries: impl IntoIterator<Item = (u64, Correction)>,
    ) -> CodeResult<Self> {
        let register = register.into();
        let mut sorted: Vec<(u64, Correction)> = Vec::new();
        for (pattern, correction) in entries {
            if pattern == 0 || (width < 64 && pattern >> width != 0) {
                return Err(CodeError::PatternOutOfRange {
                    register,
                    width,
                    pattern,
                });
            }
            match sorted.binary_search_by_key(&pattern, |&(p, _)| p) {
                Ok(_) => {
                    return Err(CodeError::DuplicateSyndromePattern { register, pattern });
                }
                Err(pos) => sorted.insert(pos, (pattern, correction)),
            }
        }
        Ok(Self {
            register,
            width,
            entries: sorted,
        })
    }

    /// Name of the classical register this table reads.
    pub fn register(&self) -> &str {
        &self.register
    }

    /// Register width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// `(pattern, correction)` entries sorted by pattern.
    pub fn entries(&self) -> &[(u64, Correction)] {
        &self.entries
    }

    /// Number of non-trivial entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The correction for `pattern`, if any.
    pub fn lookup(&self, pattern: u64) -> Option<Correction> {
        self.entries
            .binary_search_by_key(&pattern, |&(p, _)| p)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Write `pattern` the way it appears in an outcome key, highest bit first.
    pub fn format_pattern(&self, pattern: u64) -> String {
        format!("{pattern:0width$b}", width = self.width as usize)
    }

    /// Parse one outcome-key field back into a register value.
    pub fn parse_pattern(&self, field: &str) -> CodeResult<u64> {
        if field.len() != self.width as usize {
            return Err(CodeError::MalformedOutcome {
                outcome: field.to_string(),
                reason: format!(
                    "register '{}' has {} bits, field has {}",
                    self.register,
                    self.width,
                    field.len()
                ),
            });
        }
        field.chars().try_fold(0u64, |acc, c| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            other => Err(CodeError::MalformedOutcome {
                outcome: field.to_string(),
                reason: format!("unexpected character '{other}'"),
            }),
        })
    }

    /// The correction implied by one outcome-key field; `None` for all zeros.
    pub fn correction_for(&self, field: &str) -> CodeResult<Option<Correction>> {
        let pattern = self.parse_pattern(field)?;
        if pattern == 0 {
            return Ok(None);
        }
        self.lookup(pattern)
            .map(Some)
            .ok_or_else(|| CodeError::InvalidSyndromePattern {
                register: self.register.clone(),
                pattern: field.to_string(),
            })
    }

    /// Declare the register, measure `ancillas` into it, and append one
    /// conditional block per entry.
    ///
    /// `ancillas[k]` feeds register bit `k`.
    pub fn emit(&self, circuit: &mut Circuit, ancillas: &[QubitId]) -> CodeResult<()> {
        circuit.add_creg(self.register.as_str(), self.width)?;
        circuit.measure(ancillas.iter().copied(), &self.register)?;
        for (pattern, correction) in &self.entries {
            circuit.conditional(&self.register, *pattern, correction.instructions())?;
        }
        Ok(())
    }
}
