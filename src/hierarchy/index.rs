//! Stable node ↔ matrix-index assignment.

use std::collections::BTreeMap;

/// Bijection between node identifiers and `0..N`, in sorted identifier order.
///
/// Every relation matrix of a [`Hierarchy`](super::Hierarchy) is laid out with
/// the same index, so row `i` of one matrix and row `i` of another describe the
/// same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationIndex<N> {
    ids: Vec<N>,
    positions: BTreeMap<N, usize>,
}

impl<N: Ord + Clone> RelationIndex<N> {
    /// Index the given identifiers. Duplicates collapse.
    pub fn new<I: IntoIterator<Item = N>>(ids: I) -> Self {
        let mut ids: Vec<N> = ids.into_iter().collect();
        ids.sort();
        ids.dedup();

        let positions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self { ids, positions }
    }

    /// Matrix index of `id`.
    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Identifier at matrix index `i`.
    pub fn id_at(&self, i: usize) -> Option<&N> {
        self.ids.get(i)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in index order.
    pub fn ids(&self) -> &[N] {
        &self.ids
    }

    /// `(index, id)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.ids.iter().enumerate()
    }
}
