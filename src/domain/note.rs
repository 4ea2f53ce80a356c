//! Note entity, its editable fields, and the draft used to create one.

use crate::domain::{NoteId, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of validation failure for note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationErrorKind {
    EmptyTitle,
}

/// Error returned when note fields fail client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Returns true if the title was empty or whitespace-only.
    pub fn is_empty_title(&self) -> bool {
        self.kind == ValidationErrorKind::EmptyTitle
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// The user-editable part of a note.
///
/// This is also the request body for create and update: the store
/// replaces all three fields wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl NoteFields {
    /// Creates fields from title, content and tags.
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }

    /// Checks the fields before they are sent to the store.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError {
                kind: ValidationErrorKind::EmptyTitle,
            });
        }
        Ok(())
    }
}

/// A note as held by the remote store.
///
/// The `id` is assigned by the store and never changes. Everything else
/// can be replaced by an update.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(alias = "_id")]
    id: NoteId,
    #[serde(flatten)]
    fields: NoteFields,
}

impl Note {
    /// Creates a note from an id and its fields.
    pub fn new(id: NoteId, fields: NoteFields) -> Self {
        Self { id, fields }
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.fields.title
    }

    /// Returns the note's content.
    pub fn content(&self) -> &str {
        &self.fields.content
    }

    /// Returns the note's tags in stored order.
    pub fn tags(&self) -> &[Tag] {
        &self.fields.tags
    }

    /// Returns the editable fields.
    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    /// Returns true if any of the note's tags is in `tags`.
    pub fn has_any_tag<'a>(&self, mut tags: impl Iterator<Item = &'a Tag>) -> bool {
        tags.any(|t| self.fields.tags.contains(t))
    }

    /// Returns a note with the same id and replaced fields.
    pub fn with_fields(&self, fields: NoteFields) -> Self {
        Self {
            id: self.id.clone(),
            fields,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.fields.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.fields.title)
            .field("content", &self.fields.content)
            .field("tags", &self.fields.tags)
            .finish()
    }
}

/// Input for a note that has not been created yet.
///
/// The draft survives failed create attempts; only a successful create
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    fields: NoteFields,
}

impl NoteDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the draft title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields.title = title.into();
    }

    /// Sets the draft content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.fields.content = content.into();
    }

    /// Appends a tag typed by the user.
    ///
    /// Input is trimmed; empty input is ignored and `false` is returned.
    pub fn add_tag(&mut self, input: &str) -> bool {
        match Tag::parse(input) {
            Ok(tag) => {
                self.fields.tags.push(tag);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes the tag at `index`, returning it if the index was valid.
    pub fn remove_tag(&mut self, index: usize) -> Option<Tag> {
        (index < self.fields.tags.len()).then(|| self.fields.tags.remove(index))
    }

    /// Returns the drafted fields.
    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    /// Returns true if nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.fields == NoteFields::default()
    }

    /// Resets the draft to empty.
    pub fn clear(&mut self) {
        self.fields = NoteFields::default();
    }
}
