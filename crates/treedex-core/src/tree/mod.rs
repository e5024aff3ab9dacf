//! String-keyed search trees mapping keys to identifier sets.
//!
//! Two variants share one contract ([`KeyTree`]):
//!
//! - [`UnbalancedTree`]: plain binary search tree, insertion order decides shape.
//! - [`BalancedTree`]: AVL tree, rebalanced by rotations after every new node.
//!
//! Keys compare as plain byte strings. A key is stored once; inserting it again
//! merges the identifier into the existing node. Nodes are never removed.

mod avl;
#[cfg(test)]
mod avl_tests;
mod bst;
pub mod codec;
#[cfg(test)]
mod codec_tests;
mod ids;
mod node;
mod traversal;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::RecordId;

pub use avl::BalancedTree;
pub use bst::UnbalancedTree;
pub use codec::ExpandPolicy;
pub use ids::IdSet;

/// Which tree backs an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeVariant {
    /// Unbalanced binary search tree.
    Bst,
    /// Height-balanced (AVL) tree.
    #[default]
    Avl,
}

impl TreeVariant {
    /// Literal tag used in index file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bst => "bst",
            Self::Avl => "avl",
        }
    }

    /// How absent slots expand when this variant is serialized.
    #[must_use]
    pub fn expand_policy(self) -> ExpandPolicy {
        match self {
            Self::Bst => ExpandPolicy::RealOnly,
            Self::Avl => ExpandPolicy::Complete,
        }
    }

    /// Creates an empty tree of this variant.
    #[must_use]
    pub fn new_tree(self) -> Box<dyn KeyTree> {
        match self {
            Self::Bst => Box::new(UnbalancedTree::new()),
            Self::Avl => Box::new(BalancedTree::new()),
        }
    }
}

impl fmt::Display for TreeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bst" => Ok(Self::Bst),
            "avl" => Ok(Self::Avl),
            _ => Err(Error::InvalidVariant(s.to_string())),
        }
    }
}

/// Contract shared by both tree variants.
pub trait KeyTree: fmt::Debug {
    /// The variant implementing this tree.
    fn variant(&self) -> TreeVariant;

    /// Adds `id` under `key`, creating the node if the key is new.
    fn insert(&mut self, key: &str, id: RecordId);

    /// Every identifier in level order, each node's set in insertion order.
    ///
    /// The iterator is lazy and walks the live tree; call again to restart.
    fn all_ids(&self) -> Box<dyn Iterator<Item = RecordId> + '_>;

    /// Truncated level-order entries, as written to disk.
    fn level_order(&self) -> Vec<String>;

    /// Comma-joined level-order entries.
    fn encode(&self) -> String {
        codec::join(&self.level_order())
    }

    /// Writes the encoded tree to `path`, replacing any existing file.
    ///
    /// A failed write leaves the tree untouched.
    fn serialize(&self, path: &Path) -> Result<()> {
        codec::write_encoded(path, &self.encode())
    }

    /// Number of levels (0 for an empty tree).
    fn height(&self) -> usize;

    /// Number of nodes (distinct keys).
    fn len(&self) -> usize;

    /// Returns true if no key was ever inserted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifier set stored under `key`, including stale identifiers.
    fn ids_for(&self, key: &str) -> Option<&[RecordId]>;

    /// Keys in ascending order.
    fn keys(&self) -> Vec<&str>;
}
