use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Longest accepted book name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Store-assigned identifier for a book.
///
/// Ids start at 1 and are never reused by a store. Serialized as a bare
/// integer so it binds directly from JSON and form fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i32);

impl BookId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookId({})", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

impl From<i32> for BookId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// A catalogue entry.
///
/// Field names serialize as `Id` and `Name`, matching the form field names
/// clients post; lower-case spellings are accepted on input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    #[serde(alias = "id")]
    pub id: BookId,
    #[serde(alias = "name")]
    pub name: String,
}

impl Book {
    /// Build a book, validating the name.
    pub fn new(id: BookId, name: &str) -> Result<Self, TypeError> {
        Ok(Self {
            id,
            name: validate_name(name)?,
        })
    }
}

/// Validated input for creating a book. The store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    name: String,
}

impl NewBook {
    pub fn new(name: &str) -> Result<Self, TypeError> {
        Ok(Self {
            name: validate_name(name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach the store-assigned id.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            name: self.name,
        }
    }
}

/// Trim a book name and check it is non-empty and at most [`MAX_NAME_LEN`]
/// characters.
pub fn validate_name(name: &str) -> Result<String, TypeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TypeError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(TypeError::NameTooLong {
            actual: len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
