//! Tests for the level-order flat-file encoding.

use super::codec::{encode_slots, render, ExpandPolicy, NULL_MARKER};
use super::node::Node;
use super::{BalancedTree, KeyTree, TreeVariant, UnbalancedTree};
use crate::error::Error;

/// Same shape in both variants (no rotation fires):
///
/// ```text
///         d
///       /   \
///      b     f
///     /     / \
///    a     e   g
///               \
///                h
/// ```
const SHAPE: [(&str, u64); 7] = [
    ("d", 1),
    ("b", 2),
    ("f", 3),
    ("a", 4),
    ("e", 5),
    ("g", 6),
    ("h", 7),
];

fn build(variant: TreeVariant) -> Box<dyn KeyTree> {
    let mut tree = variant.new_tree();
    for (key, id) in SHAPE {
        tree.insert(key, id);
    }
    tree
}

#[test]
fn test_real_only_skips_children_of_absent_slots() {
    let tree = build(TreeVariant::Bst);
    assert_eq!(tree.height(), 4);
    // Level 4 holds a's two nulls, e's two nulls, g's (null, h).
    assert_eq!(tree.encode(), "1,2,3,4,null,5,6,null,null,null,null,null,7");
}

#[test]
fn test_complete_expands_absent_slots() {
    let tree = build(TreeVariant::Avl);
    assert_eq!(tree.height(), 4);
    // Level 4 is a full row of eight slots.
    assert_eq!(
        tree.encode(),
        "1,2,3,4,null,5,6,null,null,null,null,null,null,null,7"
    );
}

#[test]
fn test_empty_root_encodes_single_marker() {
    for policy in [ExpandPolicy::RealOnly, ExpandPolicy::Complete] {
        let slots = encode_slots::<()>(None, policy);
        assert_eq!(render(&slots), vec![NULL_MARKER]);
    }
}

#[test]
fn test_single_node_has_no_trailing_marker() {
    let root: Node<()> = Node::new("solo", 42);
    let slots = encode_slots(Some(&root), ExpandPolicy::RealOnly);
    assert_eq!(render(&slots), vec!["42"]);
}

#[test]
fn test_variant_policies() {
    assert_eq!(TreeVariant::Bst.expand_policy(), ExpandPolicy::RealOnly);
    assert_eq!(TreeVariant::Avl.expand_policy(), ExpandPolicy::Complete);
}

#[test]
fn test_serialize_writes_and_overwrites() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("alias-bst.txt");
    std::fs::write(&path, "stale content that is longer than the new one").expect("seed");

    let mut tree = UnbalancedTree::new();
    tree.insert("m", 10);
    tree.insert("f", 20);
    KeyTree::serialize(&tree, &path).expect("serialize");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(written, "10,20,null");
}

#[test]
fn test_serialize_empty_tree() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("email-avl.txt");

    BalancedTree::new().serialize(&path).expect("serialize");
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), "null");
}

#[test]
fn test_serialize_failure_is_reported_and_tree_untouched() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("missing").join("phone-avl.txt");

    let mut tree = BalancedTree::new();
    tree.insert("555", 1);
    let err = tree.serialize(&path).expect_err("parent directory does not exist");
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(tree.ids_for("555"), Some(&[1][..]));
    assert_eq!(tree.len(), 1);
}
