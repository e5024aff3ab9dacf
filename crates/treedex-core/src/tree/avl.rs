//! Height-balanced (AVL) search tree.
//!
//! After a new node is created every ancestor recomputes its cached height on
//! the way back up and checks its balance factor `height(left) - height(right)`.
//! At most one rotation pattern fires per ancestor:
//!
//! | Factor | Inserted key vs child key | Fix                          |
//! |--------|---------------------------|------------------------------|
//! | > 1    | `key < left.key`          | rotate right                 |
//! | > 1    | `key > left.key`          | rotate left child, then right |
//! | < -1   | `key > right.key`         | rotate left                  |
//! | < -1   | `key < right.key`         | rotate right child, then left |
//!
//! Merging an identifier into an existing key never restructures the tree.

use std::cmp::Ordering;

use super::codec::{self, ExpandPolicy};
use super::node::{self, Height, Link, Node};
use super::traversal::LevelOrderIds;
use super::{KeyTree, TreeVariant};
use crate::record::RecordId;

type AvlNode = Node<Height>;

/// AVL tree keyed by string.
#[derive(Debug, Default)]
pub struct BalancedTree {
    root: Link<Height>,
}

impl BalancedTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Adds `id` under `key`, rebalancing if a node was created.
    ///
    /// Returns `true` if a new node was created.
    pub fn insert(&mut self, key: &str, id: RecordId) -> bool {
        let mut created = false;
        self.root = Some(insert_at(self.root.take(), key, id, &mut created));
        created
    }

    /// Lazy level-order walk over every identifier.
    pub fn all_ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        LevelOrderIds::new(self.root.as_deref())
    }

    /// Truncated level-order entries; absent slots expand to a complete layout.
    #[must_use]
    pub fn level_order(&self) -> Vec<String> {
        codec::render(&codec::encode_slots(
            self.root.as_deref(),
            ExpandPolicy::Complete,
        ))
    }

    /// Number of levels, counted by walking the tree.
    #[must_use]
    pub fn height(&self) -> usize {
        node::level_count(self.root.as_deref())
    }

    /// Cached height of the root (0 when empty).
    #[must_use]
    pub fn root_height(&self) -> u32 {
        height(self.root.as_deref())
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

    /// Checks that every node is within balance and that cached heights match
    /// the real subtree heights.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        fn check(node: Option<&AvlNode>) -> Option<u32> {
            let Some(node) = node else { return Some(0) };
            let left = check(node.left.as_deref())?;
            let right = check(node.right.as_deref())?;
            let actual = 1 + left.max(right);
            (left.abs_diff(right) <= 1 && node.meta.0 == actual).then_some(actual)
        }
        check(self.root.as_deref()).is_some()
    }
}

impl KeyTree for BalancedTree {
    fn variant(&self) -> TreeVariant {
        TreeVariant::Avl
    }

    fn insert(&mut self, key: &str, id: RecordId) {
        BalancedTree::insert(self, key, id);
    }

    fn all_ids(&self) -> Box<dyn Iterator<Item = RecordId> + '_> {
        Box::new(BalancedTree::all_ids(self))
    }

    fn level_order(&self) -> Vec<String> {
        BalancedTree::level_order(self)
    }

    fn height(&self) -> usize {
        BalancedTree::height(self)
    }

    fn len(&self) -> usize {
        BalancedTree::len(self)
    }

    fn ids_for(&self, key: &str) -> Option<&[RecordId]> {
        BalancedTree::ids_for(self, key)
    }

    fn keys(&self) -> Vec<&str> {
        BalancedTree::keys(self)
    }
}

fn height(node: Option<&AvlNode>) -> u32 {
    node.map_or(0, |node| node.meta.0)
}

fn update_height(node: &mut AvlNode) {
    node.meta = Height(1 + height(node.left.as_deref()).max(height(node.right.as_deref())));
}

fn balance_factor(node: &AvlNode) -> i64 {
    i64::from(height(node.left.as_deref())) - i64::from(height(node.right.as_deref()))
}

/// Inserts below `link` and returns the (possibly new) subtree root.
fn insert_at(link: Link<Height>, key: &str, id: RecordId, created: &mut bool) -> Box<AvlNode> {
    let Some(mut node) = link else {
        *created = true;
        return Box::new(Node::new(key, id));
    };

    match key.cmp(node.key.as_str()) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), key, id, created)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), key, id, created)),
        Ordering::Equal => {
            node.ids.insert(id);
            return node;
        }
    }

    if !*created {
        return node;
    }
    update_height(&mut node);
    rebalance(node, key)
}

fn rebalance(mut node: Box<AvlNode>, key: &str) -> Box<AvlNode> {
    let factor = balance_factor(&node);

    if factor > 1 {
        let Some(side) = node.left.as_deref().map(|left| key.cmp(left.key.as_str())) else {
            return node;
        };
        return match side {
            Ordering::Less => rotate_right(node),
            Ordering::Greater => {
                node.left = node.left.take().map(rotate_left);
                rotate_right(node)
            }
            Ordering::Equal => node,
        };
    }

    if factor < -1 {
        let Some(side) = node.right.as_deref().map(|right| key.cmp(right.key.as_str())) else {
            return node;
        };
        return match side {
            Ordering::Greater => rotate_left(node),
            Ordering::Less => {
                node.right = node.right.take().map(rotate_right);
                rotate_left(node)
            }
            Ordering::Equal => node,
        };
    }

    node
}

//         y              x
//        / \            / \
//       x   C   ==>    A   y
//      / \                / \
//     A   B              B   C
fn rotate_right(mut y: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut x) = y.left.take() else { return y };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

//       x                  y
//      / \                / \
//     A   y     ==>      x   C
//        / \            / \
//       B   C          A   B
fn rotate_left(mut x: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut y) = x.right.take() else { return x };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}
