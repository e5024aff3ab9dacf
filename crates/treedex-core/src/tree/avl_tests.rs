//! Tests for `BalancedTree` rotations and height bookkeeping.

use super::avl::BalancedTree;
use super::{KeyTree, TreeVariant};

fn tree_from(entries: &[(&str, u64)]) -> BalancedTree {
    let mut tree = BalancedTree::new();
    for &(key, id) in entries {
        tree.insert(key, id);
    }
    tree
}

// =========================================================================
// Rotation cases
// =========================================================================

#[test]
fn test_avl_left_left_single_right_rotation() {
    let tree = tree_from(&[("c", 1), ("b", 2), ("a", 3)]);

    assert_eq!(tree.root_key(), Some("b"));
    assert_eq!(tree.root_height(), 2);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.keys(), vec!["a", "b", "c"]);
    // root b, left a, right c
    assert_eq!(tree.level_order(), vec!["2", "3", "1"]);
    assert!(tree.is_balanced());
}

#[test]
fn test_avl_left_right_double_rotation() {
    let tree = tree_from(&[("c", 1), ("a", 2), ("b", 3)]);

    assert_eq!(tree.root_key(), Some("b"));
    assert_eq!(tree.encode(), "3,2,1");
    assert!(tree.is_balanced());
}

#[test]
fn test_avl_right_right_single_left_rotation() {
    let tree = tree_from(&[("a", 1), ("b", 2), ("c", 3)]);

    assert_eq!(tree.root_key(), Some("b"));
    assert_eq!(tree.encode(), "2,1,3");
    assert!(tree.is_balanced());
}

#[test]
fn test_avl_right_left_double_rotation() {
    let tree = tree_from(&[("a", 1), ("c", 2), ("b", 3)]);

    assert_eq!(tree.root_key(), Some("b"));
    assert_eq!(tree.encode(), "3,1,2");
    assert!(tree.is_balanced());
}

#[test]
fn test_avl_rotation_below_root() {
    // Inserting "0" unbalances b, not the root.
    let tree = tree_from(&[("d", 1), ("b", 2), ("e", 3), ("a", 4), ("0", 5)]);

    assert_eq!(tree.root_key(), Some("d"));
    assert_eq!(tree.keys(), vec!["0", "a", "b", "d", "e"]);
    // d | a e | 0 b null null
    assert_eq!(tree.encode(), "1,4,3,5,2,null");
    assert_eq!(tree.root_height(), 3);
    assert!(tree.is_balanced());
}

// =========================================================================
// Duplicates and bookkeeping
// =========================================================================

#[test]
fn test_avl_duplicate_key_never_rotates() {
    let mut tree = tree_from(&[("c", 1), ("b", 2)]);
    assert!(!tree.insert("b", 9));
    assert!(!tree.insert("b", 2));

    assert_eq!(tree.root_key(), Some("c"));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.root_height(), 2);
    assert_eq!(tree.ids_for("b"), Some(&[2, 9][..]));
}

#[test]
fn test_avl_all_ids_follow_rotated_shape() {
    let tree = tree_from(&[("c", 1), ("b", 2), ("a", 3), ("b", 4)]);
    let ids: Vec<u64> = tree.all_ids().collect();
    assert_eq!(ids, vec![2, 4, 3, 1]);
}

#[test]
fn test_avl_sorted_input_stays_logarithmic() {
    let mut tree = BalancedTree::new();
    for i in 0..1_000u64 {
        assert!(tree.insert(&format!("{i:04}"), i));
    }

    assert_eq!(tree.len(), 1_000);
    assert!(tree.is_balanced());
    // AVL height bound: < 1.45 * log2(n + 2)
    assert!(tree.height() <= 14, "height {}", tree.height());
    assert_eq!(tree.height(), tree.root_height() as usize);

    let keys = tree.keys();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_avl_empty_tree() {
    let tree = BalancedTree::new();
    assert!(tree.is_empty());
    assert!(tree.is_balanced());
    assert_eq!(tree.root_height(), 0);
    assert_eq!(tree.encode(), "null");
}

#[test]
fn test_avl_level_order_keeps_one_trailing_marker() {
    let tree = tree_from(&[("b", 1), ("a", 2), ("c", 3), ("0", 4)]);
    // b | a c | 0 null null null
    assert_eq!(tree.encode(), "1,2,3,4,null");
}

#[test]
fn test_avl_key_tree_variant() {
    let tree = BalancedTree::new();
    assert_eq!(KeyTree::variant(&tree), TreeVariant::Avl);
}
