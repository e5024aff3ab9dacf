//! Field index: one tree plus an exact-match cache for one record field.
//!
//! Writes go record → [`FieldIndex::insert`] → tree. Reads go value →
//! [`FieldIndex::search`] → cache → collaborator lookup.
//!
//! The tree only ever grows. When a record's value changes, its identifier
//! moves to the new bucket of the cache but stays in the tree node of the old
//! value. [`FieldIndex::rebuild`] resynchronises the cache from the tree and
//! drops identifiers the collaborator no longer knows, without touching the
//! tree.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::field::Field;
use crate::record::{Record, RecordId, RecordLookup};
use crate::tree::{KeyTree, TreeVariant};

/// Outcome of [`FieldIndex::flush`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushStatus {
    /// Nothing changed since the last flush; no I/O was done.
    Clean,
    /// The index file was written.
    Saved(PathBuf),
    /// Writing failed; the message is suitable for display.
    Failed(String),
}

impl FlushStatus {
    /// Returns true if the file was written.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Index file name for a field and tree variant: `{field}-{variant}.txt`.
#[must_use]
pub fn file_name(field: Field, variant: TreeVariant) -> String {
    format!("{}-{}.txt", field.as_str(), variant.as_str())
}

/// Index over one record field backed by one tree.
#[derive(Debug)]
pub struct FieldIndex {
    field: Field,
    variant: TreeVariant,
    path: PathBuf,
    tree: Box<dyn KeyTree>,
    /// value -> ids, redundant with the tree, used for exact-match search
    buckets: FxHashMap<String, Vec<RecordId>>,
    dirty: bool,
}

impl FieldIndex {
    /// Creates an empty index whose file lives in `dir`.
    ///
    /// Any file left at the index path by an earlier run is deleted so the
    /// next flush starts clean.
    pub fn new(field: Field, variant: TreeVariant, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(file_name(field, variant));
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed previous index file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "Could not remove previous index file"
            ),
        }

        Self {
            field,
            variant,
            path,
            tree: variant.new_tree(),
            buckets: FxHashMap::default(),
            dirty: false,
        }
    }

    /// Creates an index from textual field and variant names.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidField` or `Error::InvalidVariant` for unsupported
    /// names.
    pub fn open(field: &str, variant: &str, dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(field.parse()?, variant.parse()?, dir))
    }

    /// Indexed field.
    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Tree variant backing the index.
    #[must_use]
    pub fn variant(&self) -> TreeVariant {
        self.variant
    }

    /// Path the index is flushed to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if inserts happened since the last flush.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Underlying tree.
    #[must_use]
    pub fn tree(&self) -> &dyn KeyTree {
        self.tree.as_ref()
    }

    /// Cached identifiers for an exact value, in stored order.
    #[must_use]
    pub fn bucket(&self, value: &str) -> &[RecordId] {
        self.buckets.get(value).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct values in the cache.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Indexes `record` under its current field value.
    ///
    /// The record's identifier is first pulled out of every cache bucket
    /// (emptied buckets are dropped), then added to the bucket for the current
    /// value and to the tree.
    pub fn insert<R: Record + ?Sized>(&mut self, record: &R) {
        let id = record.id();
        let value = self.field.project(record);

        self.buckets.retain(|_, ids| {
            ids.retain(|&existing| existing != id);
            !ids.is_empty()
        });
        self.buckets
            .entry(value.clone().into_owned())
            .or_default()
            .push(id);
        self.tree.insert(&value, id);
        self.dirty = true;
    }

    /// Rebuilds the cache from the tree's level-order identifiers.
    ///
    /// Each identifier is resolved through `source` and filed under the
    /// record's current value; unresolvable identifiers are skipped. An
    /// identifier held by several tree nodes is filed once per node. The tree
    /// and the dirty flag are left as they are.
    pub fn rebuild<S: RecordLookup + ?Sized>(&mut self, source: &S) {
        self.buckets.clear();
        let mut dropped = 0usize;
        for id in self.tree.all_ids() {
            let Some(record) = source.lookup(id) else {
                dropped += 1;
                continue;
            };
            self.buckets
                .entry(self.field.project(record).into_owned())
                .or_default()
                .push(id);
        }
        tracing::debug!(
            field = %self.field,
            variant = %self.variant,
            values = self.buckets.len(),
            dropped,
            "Rebuilt index cache"
        );
    }

    /// Records whose field equals `value` (surrounding whitespace ignored).
    ///
    /// Identifiers that no longer resolve are skipped. Unknown values yield an
    /// empty result.
    pub fn search<'s, S: RecordLookup + ?Sized>(
        &self,
        value: &str,
        source: &'s S,
    ) -> Vec<&'s S::Record> {
        self.bucket(value.trim())
            .iter()
            .filter_map(|&id| source.lookup(id))
            .collect()
    }

    /// Writes the tree to [`FieldIndex::path`] if anything changed.
    ///
    /// The dirty flag is cleared whatever the outcome; a failed write is not
    /// retried until the next insert.
    pub fn flush(&mut self) -> FlushStatus {
        if !self.dirty {
            return FlushStatus::Clean;
        }
        self.dirty = false;

        match self.tree.serialize(&self.path) {
            Ok(()) => {
                tracing::info!(
                    field = %self.field,
                    variant = %self.variant,
                    path = %self.path.display(),
                    "Index file created"
                );
                FlushStatus::Saved(self.path.clone())
            }
            Err(err) => {
                tracing::error!(
                    field = %self.field,
                    variant = %self.variant,
                    path = %self.path.display(),
                    error = %err,
                    "Could not create index file"
                );
                FlushStatus::Failed(format!(
                    "could not create index file {}: {err}",
                    self.path.display()
                ))
            }
        }
    }
}
