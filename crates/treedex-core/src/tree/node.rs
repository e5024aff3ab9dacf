//! Tree node shared by both tree variants.
//!
//! A node owns its key, its identifier set and both children. Nodes are never
//! removed once created, so there is no parent link and no shared ownership.

use std::collections::VecDeque;

use super::ids::IdSet;
use crate::record::RecordId;

/// Owned child slot.
pub(crate) type Link<H> = Option<Box<Node<H>>>;

/// Per-node bookkeeping that differs between variants.
pub(crate) trait NodeMeta {
    /// Value carried by a freshly created leaf.
    fn leaf() -> Self;
}

/// The unbalanced variant keeps nothing beyond key and ids.
impl NodeMeta for () {
    fn leaf() -> Self {}
}

/// Cached subtree height for the balanced variant. An absent node has height 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Height(pub(crate) u32);

impl NodeMeta for Height {
    fn leaf() -> Self {
        Height(1)
    }
}

#[derive(Debug)]
pub(crate) struct Node<H> {
    pub(crate) key: String,
    pub(crate) ids: IdSet,
    pub(crate) meta: H,
    pub(crate) left: Link<H>,
    pub(crate) right: Link<H>,
}

impl<H: NodeMeta> Node<H> {
    /// Creates a leaf holding `key` with a single identifier.
    pub(crate) fn new(key: &str, id: RecordId) -> Self {
        Self {
            key: key.to_owned(),
            ids: IdSet::singleton(id),
            meta: H::leaf(),
            left: None,
            right: None,
        }
    }
}

impl<H> Node<H> {
    fn children(&self) -> impl Iterator<Item = &Node<H>> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }
}

/// Number of levels below and including `root`, ignoring any cached height.
pub(crate) fn level_count<H>(root: Option<&Node<H>>) -> usize {
    let mut levels = 0;
    let mut frontier: Vec<&Node<H>> = root.into_iter().collect();
    while !frontier.is_empty() {
        levels += 1;
        frontier = frontier.into_iter().flat_map(Node::children).collect();
    }
    levels
}

/// Number of nodes reachable from `root`.
pub(crate) fn node_count<H>(root: Option<&Node<H>>) -> usize {
    let mut count = 0;
    let mut queue: VecDeque<&Node<H>> = root.into_iter().collect();
    while let Some(node) = queue.pop_front() {
        count += 1;
        queue.extend(node.children());
    }
    count
}

/// Walks down from `root` to the node holding `key`.
pub(crate) fn find<'a, H>(root: Option<&'a Node<H>>, key: &str) -> Option<&'a Node<H>> {
    let mut cursor = root;
    while let Some(node) = cursor {
        cursor = match key.cmp(node.key.as_str()) {
            std::cmp::Ordering::Less => node.left.as_deref(),
            std::cmp::Ordering::Greater => node.right.as_deref(),
            std::cmp::Ordering::Equal => return Some(node),
        };
    }
    None
}

/// Keys in ascending (in-order) order.
pub(crate) fn in_order_keys<H>(root: Option<&Node<H>>) -> Vec<&str> {
    let mut keys = Vec::new();
    let mut stack: Vec<&Node<H>> = Vec::new();
    let mut cursor = root;
    loop {
        while let Some(node) = cursor {
            stack.push(node);
            cursor = node.left.as_deref();
        }
        let Some(node) = stack.pop() else { break };
        keys.push(node.key.as_str());
        cursor = node.right.as_deref();
    }
    keys
}

/// Tears a subtree down without recursing, so list-shaped trees of any depth
/// can be dropped.
pub(crate) fn dismantle<H>(root: Link<H>) {
    let mut stack: Vec<Box<Node<H>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
