//! Opaque store-assigned note identifier with serde support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier assigned to a note by the remote store.
///
/// The client never generates or interprets ids. Stores in the wild hand
/// them out as strings (document ids) or as integers, so both JSON forms
/// are accepted and kept as the same opaque string.
///
/// # Examples
///
/// ```
/// use notecard::domain::NoteId;
///
/// let id: NoteId = "64f1c2".parse().unwrap();
/// assert_eq!(id.as_str(), "64f1c2");
///
/// let numeric: NoteId = serde_json::from_str("3").unwrap();
/// assert_eq!(numeric.as_str(), "3");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(String);

impl NoteId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a shortened form for compact listings.
    ///
    /// Ids of 10 characters or fewer are returned unchanged.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(10) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an empty note identifier.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError;

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note id cannot be empty")
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseNoteIdError);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        let s = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        };
        s.parse().map_err(serde::de::Error::custom)
    }
}
