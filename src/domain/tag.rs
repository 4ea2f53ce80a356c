//! Case-sensitive tag label attached to notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A free-form label for categorizing notes.
///
/// Tags are compared by exact, case-sensitive string match: `Work` and
/// `work` are different tags. Tags received from the store are taken
/// verbatim, including the empty placeholder an editor appends before the
/// user types into it.
///
/// User input goes through [`Tag::parse`], which trims surrounding
/// whitespace and rejects empty input.
///
/// # Examples
///
/// ```
/// use notecard::domain::Tag;
///
/// let tag = Tag::parse("  work ").unwrap();
/// assert_eq!(tag.as_str(), "work");
/// assert_ne!(tag, Tag::parse("Work").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

/// Error returned when user input does not form a tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Wraps a label exactly as given.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the empty placeholder tag.
    pub fn placeholder() -> Self {
        Self(String::new())
    }

    /// Parses user input into a tag.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the input is empty or whitespace-only.
    pub fn parse(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parses a comma-separated list, trimming each entry.
    ///
    /// Entries are kept even when empty so that `"a, ,b"` yields three
    /// tags, matching how a tag list typed into a single field is split.
    pub fn split_list(s: &str) -> Vec<Self> {
        s.split(',').map(|part| Self(part.trim().to_string())).collect()
    }

    /// Returns the tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
