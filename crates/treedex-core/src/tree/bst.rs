//! Unbalanced binary search tree.

use std::cmp::Ordering;

use super::codec::{self, ExpandPolicy};
use super::node::{self, Link, Node};
use super::traversal::LevelOrderIds;
use super::{KeyTree, TreeVariant};
use crate::record::RecordId;

/// Binary search tree with no rebalancing.
///
/// Shape follows insertion order, so sorted input degrades into a list and
/// insertion costs O(n). Insertion and teardown are iterative for that reason.
#[derive(Debug, Default)]
pub struct UnbalancedTree {
    root: Link<()>,
}

impl UnbalancedTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Adds `id` under `key`.
    ///
    /// Returns `true` if a new node was created, `false` if the key existed
    /// (the identifier is appended to its set unless already present).
    pub fn insert(&mut self, key: &str, id: RecordId) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match key.cmp(node.key.as_str()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.ids.insert(id);
                    return false;
                }
            }
        }
        *slot = Some(Box::new(Node::new(key, id)));
        true
    }

    /// Lazy level-order walk over every identifier.
    pub fn all_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        LevelOrderIds::new(self.root.as_deref())
    }

    /// Truncated level-order entries; absent slots never expand.
    #[must_use]
    pub fn level_order(&self) -> Vec<String> {
        codec::render(&codec::encode_slots(
            self.root.as_deref(),
            ExpandPolicy::RealOnly,
        ))
    }

    /// Number of levels.
    #[must_use]
    pub fn height(&self) -> usize {
        node::level_count(self.root.as_deref())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        node::node_count(self.root.as_deref())
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Identifiers stored under `key`.
    #[must_use]
    pub fn ids_for(&self, key: &str) -> Option<&[RecordId]> {
        node::find(self.root.as_deref(), key).map(|node| node.ids.as_slice())
    }

    /// Keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        node::in_order_keys(self.root.as_deref())
    }

    /// Key at the root, if any.
    #[must_use]
    pub fn root_key(&self) -> Option<&str> {
        self.root.as_deref().map(|root| root.key.as_str())
    }
}

impl Drop for UnbalancedTree {
    fn drop(&mut self) {
        node::dismantle(self.root.take());
    }
}

impl KeyTree for UnbalancedTree {
    fn variant(&self) -> TreeVariant {
        TreeVariant::Bst
    }

    fn insert(&mut self, key: &str, id: RecordId) {
        UnbalancedTree::insert(self, key, id);
    }

    fn all_ids(&self) -> Box<dyn Iterator<Item = RecordId> + '_> {
        Box::new(UnbalancedTree::all_ids(self))
    }

    fn level_order(&self) -> Vec<String> {
        UnbalancedTree::level_order(self)
    }

    fn height(&self) -> usize {
        UnbalancedTree::height(self)
    }

    fn len(&self) -> usize {
        UnbalancedTree::len(self)
    }

    fn ids_for(&self, key: &str) -> Option<&[RecordId]> {
        UnbalancedTree::ids_for(self, key)
    }

    fn keys(&self) -> Vec<&str> {
        UnbalancedTree::keys(self)
    }
}
