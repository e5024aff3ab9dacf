//! Set of field indexes kept in step with a record store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::index::{FieldIndex, FlushStatus};
use crate::record::{Record, RecordLookup};
use crate::tree::TreeVariant;

/// At most one [`FieldIndex`] per field, all flushed into the same directory.
#[derive(Debug)]
pub struct IndexRegistry {
    dir: PathBuf,
    default_variant: TreeVariant,
    indexes: BTreeMap<Field, FieldIndex>,
}

impl IndexRegistry {
    /// Creates an empty registry writing index files into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, default_variant: TreeVariant) -> Self {
        Self {
            dir: dir.into(),
            default_variant,
            indexes: BTreeMap::new(),
        }
    }

    /// Creates an empty registry from configuration.
    #[must_use]
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.dir.clone(), config.variant)
    }

    /// Directory index files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Variant used by [`IndexRegistry::create_default_index`].
    #[must_use]
    pub fn default_variant(&self) -> TreeVariant {
        self.default_variant
    }

    /// Builds an index over `records`, flushes it once and registers it,
    /// replacing any previous index on the same field.
    pub fn create_index<'r, R, I>(
        &mut self,
        field: Field,
        variant: TreeVariant,
        records: I,
    ) -> FlushStatus
    where
        R: Record + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let mut index = FieldIndex::new(field, variant, &self.dir);
        let mut count = 0usize;
        for record in records {
            index.insert(record);
            count += 1;
        }
        tracing::info!(field = %field, variant = %variant, records = count, "Index built");

        let status = index.flush();
        if self.indexes.insert(field, index).is_some() {
            tracing::debug!(field = %field, "Replaced existing index");
        }
        status
    }

    /// [`IndexRegistry::create_index`] with the default variant.
    pub fn create_default_index<'r, R, I>(&mut self, field: Field, records: I) -> FlushStatus
    where
        R: Record + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        self.create_index(field, self.default_variant, records)
    }

    /// Removes the index on `field`, returning it if there was one.
    pub fn drop_index(&mut self, field: Field) -> Option<FieldIndex> {
        self.indexes.remove(&field)
    }

    /// Index on `field`, if created.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldIndex> {
        self.indexes.get(&field)
    }

    /// Indexed fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.indexes.keys().copied()
    }

    /// Number of indexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no index exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Feeds a new or edited record to every index.
    pub fn record_upserted<R: Record + ?Sized>(&mut self, record: &R) {
        for index in self.indexes.values_mut() {
            index.insert(record);
        }
    }

    /// Resynchronises every cache after deletions or bulk edits.
    pub fn rebuild_all<S: RecordLookup + ?Sized>(&mut self, source: &S) {
        for index in self.indexes.values_mut() {
            index.rebuild(source);
        }
    }

    /// Flushes every dirty index, returning each outcome by field.
    pub fn flush_all(&mut self) -> Vec<(Field, FlushStatus)> {
        self.indexes
            .iter_mut()
            .map(|(&field, index)| (field, index.flush()))
            .collect()
    }

    /// Exact-match search through the index on `field`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexNotFound` if `field` has no index.
    pub fn search<'s, S: RecordLookup + ?Sized>(
        &self,
        field: Field,
        value: &str,
        source: &'s S,
    ) -> Result<Vec<&'s S::Record>> {
        let index = self
            .indexes
            .get(&field)
            .ok_or_else(|| Error::IndexNotFound(field.to_string()))?;
        Ok(index.search(value, source))
    }
}
