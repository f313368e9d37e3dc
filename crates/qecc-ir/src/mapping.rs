//! Explicit qubit remapping for circuit composition.

use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// A map from source qubit indices to target qubit indices.
///
/// Injectivity is checked on insertion, so a `QubitMap` never aliases two
/// source qubits onto one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QubitMap {
    forward: FxHashMap<QubitId, QubitId>,
    reverse: FxHashMap<QubitId, QubitId>,
}

impl QubitMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one `source → target` pair.
    ///
    /// Re-inserting an identical pair is a no-op. Remapping an existing
    /// source, or reusing a target, fails with [`IrError::NonInjectiveMapping`].
    pub fn map(&mut self, source: QubitId, target: QubitId) -> IrResult<&mut Self> {
        if let Some(&existing) = self.forward.get(&source) {
            if existing == target {
                return Ok(self);
            }
            return Err(IrError::NonInjectiveMapping {
                target: existing,
                first: source,
                second: source,
            });
        }
        if let Some(&first) = self.reverse.get(&target) {
            return Err(IrError::NonInjectiveMapping {
                target,
                first,
                second: source,
            });
        }
        self.forward.insert(source, target);
        self.reverse.insert(target, source);
        Ok(self)
    }

    /// Build a map from explicit pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (QubitId, QubitId)>) -> IrResult<Self> {
        let mut map = Self::new();
        for (source, target) in pairs {
            map.map(source, target)?;
        }
        Ok(map)
    }

    /// Build a map sending source `i` to `targets[i]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_targets(targets: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        Self::from_pairs(
            targets
                .into_iter()
                .enumerate()
                .map(|(i, t)| (QubitId(i as u32), t)),
        )
    }

    /// The identity map on `0..n`.
    pub fn identity(n: u32) -> Self {
        Self::offset(n, 0)
    }

    /// Map `0..n` onto the block `start..start + n`.
    pub fn offset(n: u32, start: u32) -> Self {
        let mut forward = FxHashMap::default();
        let mut reverse = FxHashMap::default();
        for i in 0..n {
            forward.insert(QubitId(i), QubitId(start + i));
            reverse.insert(QubitId(start + i), QubitId(i));
        }
        Self { forward, reverse }
    }

    /// Target of `source`, if mapped.
    pub fn get(&self, source: QubitId) -> Option<QubitId> {
        self.forward.get(&source).copied()
    }

    /// Number of mapped sources.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Mapped pairs sorted by source index.
    pub fn pairs(&self) -> Vec<(QubitId, QubitId)> {
        let mut pairs: Vec<_> = self.forward.iter().map(|(&s, &t)| (s, t)).collect();
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_map() {
        let map = QubitMap::offset(3, 6);
        assert_eq!(map.get(QubitId(0)), Some(QubitId(6)));
        assert_eq!(map.get(QubitId(2)), Some(QubitId(8)));
        assert_eq!(map.get(QubitId(3)), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_from_targets() {
        let map = QubitMap::from_targets([QubitId(0), QubitId(3), QubitId(6)]).unwrap();
        assert_eq!(
            map.pairs(),
            vec![
                (QubitId(0), QubitId(0)),
                (QubitId(1), QubitId(3)),
                (QubitId(2), QubitId(6)),
            ]
        );
    }

    #[test]
    fn test_aliasing_rejected() {
        let err = QubitMap::from_targets([QubitId(4), QubitId(4)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::NonInjectiveMapping {
                target: QubitId(4),
                first: QubitId(0),
                second: QubitId(1),
            }
        ));
    }

    #[test]
    fn test_remapping_source_rejected() {
        let mut map = QubitMap::new();
        map.map(QubitId(0), QubitId(1)).unwrap();
        map.map(QubitId(0), QubitId(1)).unwrap();
        assert!(map.map(QubitId(0), QubitId(2)).is_err());
    }
}
