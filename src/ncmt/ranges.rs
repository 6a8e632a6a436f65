//! Namespace → leaf range bookkeeping.
//!
//! Leaves arrive in non-decreasing namespace order, so every namespace owns a
//! single contiguous run `[start, end)` of original (pre-extension) leaf
//! indices. The index is maintained incrementally on every push.

use std::collections::BTreeMap;

use super::types::{LeafRange, NamespaceId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceRangeIndex {
    ranges: BTreeMap<NamespaceId, LeafRange>,
}

impl NamespaceRangeIndex {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that leaf `index` carries namespace `id`.
    ///
    /// Extends the namespace's range when it was seen before (it can only be
    /// the most recent one), otherwise opens `[index, index + 1)`.
    pub fn record(&mut self, id: &NamespaceId, index: usize) {
        match self.ranges.get_mut(id) {
            Some(range) => {
                debug_assert_eq!(range.end, index, "namespace run must be contiguous");
                range.end = index + 1;
            }
            None => {
                self.ranges.insert(id.clone(), LeafRange::singleton(index));
            }
        }
    }

    /// The leaf range holding `id`, if any leaf carries it.
    #[inline]
    pub fn get(&self, id: &NamespaceId) -> Option<LeafRange> {
        self.ranges.get(id).copied()
    }

    /// Number of distinct namespaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All `(namespace, range)` pairs in namespace order.
    pub fn iter(&self) -> impl Iterator<Item = (&NamespaceId, LeafRange)> {
        self.ranges.iter().map(|(id, r)| (id, *r))
    }
}
