//! # Treedex Core
//!
//! String-keyed field indexes backed by a binary search tree or an AVL tree,
//! with a level-order flat-file format for persisting either tree.
//!
//! ## Features
//!
//! - **Two trees**: unbalanced BST or height-balanced AVL, same contract
//! - **Duplicate keys**: identifiers merge into one insertion-ordered set per key
//! - **Exact-match search**: value → identifiers cache in front of each tree
//! - **Flat files**: one comma-separated level-order line per index
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use treedex_core::{Contact, Field, FieldIndex, TreeVariant};
//!
//! let mut store = HashMap::new();
//! let ada = Contact::new("Ada", "Lovelace", "ada", "55512345", "ada@example.com", "London", "10/12/1815")
//!     .with_id(1);
//! store.insert(ada.id, ada.clone());
//!
//! let mut index = FieldIndex::new(Field::Alias, TreeVariant::Avl, ".");
//! index.insert(&ada);
//!
//! let hits = index.search("ada", &store);
//! assert_eq!(hits.len(), 1);
//!
//! // Writes ./alias-avl.txt
//! index.flush();
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod error;
pub mod field;
pub mod index;
pub mod logging;
pub mod record;
pub mod registry;
#[cfg(test)]
mod registry_tests;
pub mod tree;

pub use config::{IndexConfig, LoggingConfig, TreedexConfig};
pub use error::{Error, Result};
pub use field::Field;
pub use index::{FieldIndex, FlushStatus};
pub use record::{Contact, Record, RecordId, RecordLookup};
pub use registry::IndexRegistry;
pub use tree::{BalancedTree, ExpandPolicy, IdSet, KeyTree, TreeVariant, UnbalancedTree};
