//! Insertion-ordered, duplicate-free identifier sets.

use crate::record::RecordId;

/// Identifiers attached to one tree node.
///
/// Keeps first-insertion order; re-inserting an identifier is a no-op.
/// Membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSet {
    ids: Vec<RecordId>,
}

impl IdSet {
    /// Creates a set holding a single identifier.
    #[must_use]
    pub fn singleton(id: RecordId) -> Self {
        Self { ids: vec![id] }
    }

    /// Appends `id` if absent. Returns `true` if it was added.
    pub fn insert(&mut self, id: RecordId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Checks membership.
    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// First identifier ever inserted, the one written by the level-order codec.
    #[must_use]
    pub fn first(&self) -> Option<RecordId> {
        self.ids.first().copied()
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[RecordId] {
        &self.ids
    }

    /// Iterates identifiers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RecordId> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = &'a RecordId;
    type IntoIter = std::slice::Iter<'a, RecordId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
