//! Record-side collaborator interfaces.
//!
//! The index never stores records. It reads field values through [`Record`]
//! when indexing and resolves identifiers back to records through
//! [`RecordLookup`] when searching or rebuilding.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

/// Identifier of a record held by the collaborator's store.
pub type RecordId = u64;

/// A record exposing an identifier and the eight indexable string fields.
///
/// Values are trusted verbatim; validation belongs to whoever owns the store.
pub trait Record {
    /// Unique identifier of the record.
    fn id(&self) -> RecordId;
    /// Given (first) name.
    fn given_name(&self) -> &str;
    /// Family name.
    fn family_name(&self) -> &str;
    /// Nickname.
    fn alias(&self) -> &str;
    /// Phone number.
    fn phone(&self) -> &str;
    /// Email address.
    fn email(&self) -> &str;
    /// Postal address.
    fn address(&self) -> &str;
    /// Birth date, formatted by the collaborator.
    fn birth_date(&self) -> &str;
}

/// Resolves an identifier to the record it currently names.
///
/// `None` means the record is gone; callers drop such identifiers silently.
pub trait RecordLookup {
    /// Record type handed back by the lookup.
    type Record: Record;

    /// Returns the record with the given identifier, if still present.
    fn lookup(&self, id: RecordId) -> Option<&Self::Record>;
}

impl<R: Record, S: BuildHasher> RecordLookup for HashMap<RecordId, R, S> {
    type Record = R;

    fn lookup(&self, id: RecordId) -> Option<&R> {
        self.get(&id)
    }
}

impl<R: Record> RecordLookup for BTreeMap<RecordId, R> {
    type Record = R;

    fn lookup(&self, id: RecordId) -> Option<&R> {
        self.get(&id)
    }
}

/// Linear scan, first match wins.
impl<R: Record> RecordLookup for [R] {
    type Record = R;

    fn lookup(&self, id: RecordId) -> Option<&R> {
        self.iter().find(|record| record.id() == id)
    }
}

impl<R: Record> RecordLookup for Vec<R> {
    type Record = R;

    fn lookup(&self, id: RecordId) -> Option<&R> {
        self.as_slice().lookup(id)
    }
}

/// Address-book contact, the record type the index was built around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier assigned by the store.
    #[serde(default)]
    pub id: RecordId,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// Nickname.
    pub alias: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Birth date, usually `DD/MM/YYYY`.
    pub birth_date: String,
}

impl Contact {
    /// Creates a contact with identifier 0; the store assigns the real one.
    #[must_use]
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        alias: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            given_name: given_name.into(),
            family_name: family_name.into(),
            alias: alias.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }
}

impl Record for Contact {
    fn id(&self) -> RecordId {
        self.id
    }

    fn given_name(&self) -> &str {
        &self.given_name
    }

    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn alias(&self) -> &str {
        &self.alias
    }

    fn phone(&self) -> &str {
        &self.phone
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn birth_date(&self) -> &str {
        &self.birth_date
    }
}
