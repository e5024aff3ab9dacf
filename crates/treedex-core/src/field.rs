//! Indexable record fields and their projections.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Record;

/// A record field an index can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Record identifier, rendered in decimal.
    Id,
    /// Given name.
    GivenName,
    /// Family name.
    FamilyName,
    /// Nickname.
    Alias,
    /// Phone number.
    Phone,
    /// Email address.
    Email,
    /// Postal address.
    Address,
    /// Birth date.
    BirthDate,
}

impl Field {
    /// Every supported field, in declaration order.
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::GivenName,
        Field::FamilyName,
        Field::Alias,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::BirthDate,
    ];

    /// Canonical name, used in index file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::GivenName => "given_name",
            Self::FamilyName => "family_name",
            Self::Alias => "alias",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
            Self::BirthDate => "birth_date",
        }
    }

    /// Extracts this field's value from a record.
    #[must_use]
    pub fn project<R: Record + ?Sized>(self, record: &R) -> Cow<'_, str> {
        match self {
            Self::Id => Cow::Owned(record.id().to_string()),
            Self::GivenName => Cow::Borrowed(record.given_name()),
            Self::FamilyName => Cow::Borrowed(record.family_name()),
            Self::Alias => Cow::Borrowed(record.alias()),
            Self::Phone => Cow::Borrowed(record.phone()),
            Self::Email => Cow::Borrowed(record.email()),
            Self::Address => Cow::Borrowed(record.address()),
            Self::BirthDate => Cow::Borrowed(record.birth_date()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts snake_case or kebab-case names; `identifier` is an alias of `id`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_");
        match normalized.as_str() {
            "id" | "identifier" => Ok(Self::Id),
            "given_name" => Ok(Self::GivenName),
            "family_name" => Ok(Self::FamilyName),
            "alias" => Ok(Self::Alias),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "address" => Ok(Self::Address),
            "birth_date" => Ok(Self::BirthDate),
            _ => Err(Error::InvalidField(s.to_string())),
        }
    }
}
