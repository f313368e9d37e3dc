//! Qubit indices, classical bits and classical registers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one line in a circuit's quantum register.
///
/// A qubit carries no state of its own; state only exists inside a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for addressing amplitudes and slices.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Global index of a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// The index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// A named, ordered group of classical bits.
///
/// Bit `k` of the register contributes `2^k` to its integer value, so the
/// register `[c3, c4]` reading `c3 = 1, c4 = 0` holds the value 1 ("01").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    bits: Vec<ClbitId>,
}

impl ClassicalRegister {
    /// Create a register over the given classical bits.
    pub fn new(name: impl Into<String>, bits: Vec<ClbitId>) -> Self {
        Self {
            name: name.into(),
            bits,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The classical bits, least significant first.
    pub fn bits(&self) -> &[ClbitId] {
        &self.bits
    }

    /// Number of bits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u32 {
        self.bits.len() as u32
    }

    /// The register bit at position `index`.
    pub fn bit(&self, index: u32) -> Option<ClbitId> {
        self.bits.get(index as usize).copied()
    }

    /// Position of `clbit` within this register.
    #[allow(clippy::cast_possible_truncation)]
    pub fn position(&self, clbit: ClbitId) -> Option<u32> {
        self.bits.iter().position(|&c| c == clbit).map(|p| p as u32)
    }

    /// Whether `value` is representable in this register.
    pub fn fits(&self, value: u64) -> bool {
        self.width() >= 64 || value < (1u64 << self.width())
    }

    /// Read the register's integer value from a classical bit store.
    ///
    /// `None` when a set bit lies at position 64 or above, which no `u64`
    /// condition can match.
    pub fn value_in(&self, store: &[bool]) -> Option<u64> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, c)| store.get(c.index()).copied().unwrap_or(false))
            .try_fold(0u64, |acc, (k, _)| {
                u32::try_from(k)
                    .ok()
                    .and_then(|k| 1u64.checked_shl(k))
                    .map(|bit| acc | bit)
            })
    }

    /// Render the register's bits from a store, highest bit first.
    pub fn render(&self, store: &[bool]) -> String {
        self.bits
            .iter()
            .rev()
            .map(|c| {
                if store.get(c.index()).copied().unwrap_or(false) {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.bits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", ClbitId(3)), "c3");
    }

    #[test]
    fn test_register_value_is_little_endian() {
        let reg = ClassicalRegister::new("syndrome", vec![ClbitId(0), ClbitId(1)]);
        let store = [true, false];
        assert_eq!(reg.value_in(&store), Some(1));
        assert_eq!(reg.render(&store), "01");

        let store = [false, true];
        assert_eq!(reg.value_in(&store), Some(2));
        assert_eq!(reg.render(&store), "10");
    }

    #[test]
    fn test_wide_register_value() {
        let reg = ClassicalRegister::new("meas", (0..70).map(ClbitId).collect());
        let mut store = vec![false; 70];
        store[63] = true;
        assert_eq!(reg.value_in(&store), Some(1u64 << 63));
        store[64] = true;
        assert_eq!(reg.value_in(&store), None);
        assert_eq!(reg.render(&store).len(), 70);
    }

    #[test]
    fn test_register_fits() {
        let reg = ClassicalRegister::new("s", vec![ClbitId(4), ClbitId(5)]);
        assert!(reg.fits(3));
        assert!(!reg.fits(4));
        assert_eq!(reg.position(ClbitId(5)), Some(1));
        assert_eq!(format!("{reg}"), "s[2]");
    }
}
