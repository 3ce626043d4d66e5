//! Identity registry for one rendering pass
//!
//! Every reference identity seen while rendering a top-level value gets one
//! [`PointerRecord`]: the text position where it was first expanded (its
//! definition) and every later position where it was printed as a reuse
//! marker (its usages).
//!
//! Records are kept in discovery order and indexed by [`IdentityKey`]. Each
//! record also links to the one discovered before it, so the registry can be
//! walked newest-first as a chain.

use crate::value::IdentityKey;
use rustc_hash::FxHashMap;

/// One first-seen reference identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerRecord {
    pub identity: IdentityKey,
    /// Text offset where the identity was expanded
    pub definition_position: usize,
    /// Text offsets of later reuse markers, in text order
    pub usage_positions: Vec<usize>,
    /// 1-based discovery order
    pub sequence_number: usize,
    /// Sequence number of the record discovered just before this one
    pub previous: Option<usize>,
}

impl PointerRecord {
    pub fn has_usages(&self) -> bool {
        !self.usage_positions.is_empty()
    }

    pub fn last_usage(&self) -> Option<usize> {
        self.usage_positions.last().copied()
    }

    /// Record a reuse of this identity at `position`
    pub fn record_usage(&mut self, position: usize) {
        debug_assert!(
            self.last_usage().map_or(true, |last| last <= position),
            "usage positions must be recorded in text order"
        );
        tracing::trace!(
            sequence = self.sequence_number,
            position,
            "pointer reused"
        );
        self.usage_positions.push(position);
    }
}

/// Registry of pointer records, scoped to one top-level value
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    records: Vec<PointerRecord>,
    index: FxHashMap<IdentityKey, usize>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, identity: &IdentityKey) -> Option<&PointerRecord> {
        self.index.get(identity).map(|&i| &self.records[i])
    }

    pub fn lookup_mut(&mut self, identity: &IdentityKey) -> Option<&mut PointerRecord> {
        self.index.get(identity).map(|&i| &mut self.records[i])
    }

    /// Register the first sighting of `identity` at `position`
    ///
    /// Callers must check [`lookup`](Self::lookup) first. Defining an identity
    /// twice is a traversal bug: it panics in debug builds and returns the
    /// existing record untouched otherwise.
    pub fn define(&mut self, identity: IdentityKey, position: usize) -> &PointerRecord {
        if let Some(&existing) = self.index.get(&identity) {
            debug_assert!(false, "identity {} defined twice", identity);
            return &self.records[existing];
        }

        let sequence_number = self.records.len() + 1;
        let previous = self.head().map(|head| head.sequence_number);
        tracing::trace!(sequence = sequence_number, position, %identity, "pointer defined");

        self.index.insert(identity, self.records.len());
        self.records.push(PointerRecord {
            identity,
            definition_position: position,
            usage_positions: Vec::new(),
            sequence_number,
            previous,
        });
        &self.records[sequence_number - 1]
    }

    /// Most recently discovered record
    pub fn head(&self) -> Option<&PointerRecord> {
        self.records.last()
    }

    /// Record with the given 1-based sequence number
    pub fn by_sequence(&self, sequence_number: usize) -> Option<&PointerRecord> {
        sequence_number
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
    }

    /// Records in discovery order
    pub fn records(&self) -> &[PointerRecord] {
        &self.records
    }

    /// Walk the discovery chain from the newest record back to the first
    pub fn chain(&self) -> impl Iterator<Item = &PointerRecord> + '_ {
        std::iter::successors(self.head(), move |record| {
            record.previous.and_then(|n| self.by_sequence(n))
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any identity was printed more than once
    pub fn has_usages(&self) -> bool {
        self.records.iter().any(PointerRecord::has_usages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_numbers_in_discovery_order() {
        let (a, b) = (1u8, 2u8);
        let mut registry = IdentityRegistry::new();

        assert_eq!(registry.define(IdentityKey::of(&a), 0).sequence_number, 1);
        let second = registry.define(IdentityKey::of(&b), 4);
        assert_eq!(second.sequence_number, 2);
        assert_eq!(second.previous, Some(1));

        let chain: Vec<usize> = registry.chain().map(|r| r.sequence_number).collect();
        assert_eq!(chain, vec![2, 1]);
    }

    #[test]
    fn test_lookup_and_usage() {
        let a = 1u8;
        let key = IdentityKey::of(&a);
        let mut registry = IdentityRegistry::new();

        assert!(registry.lookup(&key).is_none());
        registry.define(key, 3);
        assert!(!registry.has_usages());

        registry.lookup_mut(&key).unwrap().record_usage(9);
        registry.lookup_mut(&key).unwrap().record_usage(12);

        let record = registry.lookup(&key).unwrap();
        assert_eq!(record.definition_position, 3);
        assert_eq!(record.usage_positions, vec![9, 12]);
        assert!(registry.has_usages());
    }

    #[test]
    #[should_panic(expected = "defined twice")]
    #[cfg(debug_assertions)]
    fn test_double_define_asserts() {
        let a = 1u8;
        let mut registry = IdentityRegistry::new();
        registry.define(IdentityKey::of(&a), 0);
        registry.define(IdentityKey::of(&a), 5);
    }
}
