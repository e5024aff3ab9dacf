//! Breadth-first identifier traversal.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::node::Node;
use crate::record::RecordId;

/// Lazily yields every identifier of a tree in level order.
///
/// Nodes are visited root first, left before right within a level, and each
/// node contributes its whole identifier set in insertion order. The iterator
/// borrows the live tree; calling `all_ids` again starts a fresh walk.
pub(crate) struct LevelOrderIds<'a, H> {
    queue: VecDeque<&'a Node<H>>,
    pending: std::slice::Iter<'a, RecordId>,
}

impl<'a, H> LevelOrderIds<'a, H> {
    pub(crate) fn new(root: Option<&'a Node<H>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
            pending: Default::default(),
        }
    }
}

impl<H> Iterator for LevelOrderIds<'_, H> {
    type Item = RecordId;

    fn next(&mut self) -> Option<RecordId> {
        loop {
            if let Some(&id) = self.pending.next() {
                return Some(id);
            }
            let node = self.queue.pop_front()?;
            self.queue.extend(node.left.as_deref());
            self.queue.extend(node.right.as_deref());
            self.pending = node.ids.iter();
        }
    }
}

impl<H> FusedIterator for LevelOrderIds<'_, H> {}
