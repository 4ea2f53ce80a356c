//! Per-note edit buffer and its viewing/editing/saving lifecycle.

use crate::domain::{Note, NoteFields, Tag};
use std::fmt;

/// Where a note card is in its edit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Read-only display; the buffer mirrors the canonical note.
    Viewing,
    /// The buffer is mutable.
    Editing,
    /// A save is in flight.
    Saving,
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardState::Viewing => "viewing",
            CardState::Editing => "editing",
            CardState::Saving => "saving",
        };
        write!(f, "{}", s)
    }
}

/// Error returned for a transition the card's current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardError {
    action: &'static str,
    state: CardState,
}

impl CardError {
    /// Returns the state the card was in when the transition was attempted.
    pub fn state(&self) -> CardState {
        self.state
    }
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} a note while {}", self.action, self.state)
    }
}

impl std::error::Error for CardError {}

/// Transient copy of a note's fields while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    fields: NoteFields,
}

impl EditBuffer {
    fn from_note(note: &Note) -> Self {
        Self {
            fields: note.fields().clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn content(&self) -> &str {
        &self.fields.content
    }

    pub fn tags(&self) -> &[Tag] {
        &self.fields.tags
    }

    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.fields.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.fields.content = content.into();
    }

    /// Appends an empty placeholder tag and returns its index.
    pub fn add_tag(&mut self) -> usize {
        self.fields.tags.push(Tag::placeholder());
        self.fields.tags.len() - 1
    }

    /// Replaces the tag at `index`. Returns false if out of range.
    pub fn set_tag(&mut self, index: usize, tag: Tag) -> bool {
        match self.fields.tags.get_mut(index) {
            Some(slot) => {
                *slot = tag;
                true
            }
            None => false,
        }
    }

    /// Removes the tag at `index`, returning it if the index was valid.
    pub fn remove_tag(&mut self, index: usize) -> Option<Tag> {
        (index < self.fields.tags.len()).then(|| self.fields.tags.remove(index))
    }

    /// Replaces every tag from a comma-separated list.
    pub fn set_tags_from_list(&mut self, list: &str) {
        self.fields.tags = Tag::split_list(list);
    }
}

/// A note together with its edit buffer and lifecycle state.
///
/// ```text
/// Viewing --open--> Editing --begin_save--> Saving --ok--> Viewing
///                     ^  |                    |
///                     |  +--close--> Viewing  |
///                     +--------failed---------+
/// ```
#[derive(Debug, Clone)]
pub struct NoteCard {
    note: Note,
    buffer: EditBuffer,
    state: CardState,
}

impl NoteCard {
    /// Creates a card in the Viewing state for `note`.
    pub fn new(note: Note) -> Self {
        let buffer = EditBuffer::from_note(&note);
        Self {
            note,
            buffer,
            state: CardState::Viewing,
        }
    }

    /// Returns the last-synced note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Enters Editing. Opening a card that is already Editing is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CardError` while a save is in flight.
    pub fn open(&mut self) -> Result<&mut EditBuffer, CardError> {
        match self.state {
            CardState::Viewing | CardState::Editing => {
                self.state = CardState::Editing;
                Ok(&mut self.buffer)
            }
            CardState::Saving => Err(self.error("edit")),
        }
    }

    /// Returns the mutable buffer if the card is Editing.
    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        (self.state == CardState::Editing).then_some(&mut self.buffer)
    }

    /// Leaves Editing without saving; the buffer reverts to the note.
    ///
    /// # Errors
    ///
    /// Returns `CardError` while a save is in flight.
    pub fn close(&mut self) -> Result<(), CardError> {
        if self.state == CardState::Saving {
            return Err(self.error("close"));
        }
        self.state = CardState::Viewing;
        self.buffer = EditBuffer::from_note(&self.note);
        Ok(())
    }

    /// Moves Editing to Saving and returns the fields to send.
    ///
    /// # Errors
    ///
    /// Returns `CardError` unless the card is Editing.
    pub fn begin_save(&mut self) -> Result<NoteFields, CardError> {
        if self.state != CardState::Editing {
            return Err(self.error("save"));
        }
        self.state = CardState::Saving;
        Ok(self.buffer.fields.clone())
    }

    /// Completes a successful save with the server-confirmed note.
    pub fn save_succeeded(&mut self, confirmed: Note) {
        self.buffer = EditBuffer::from_note(&confirmed);
        self.note = confirmed;
        self.state = CardState::Viewing;
    }

    /// Returns to Editing after a failed save, keeping the buffer.
    pub fn save_failed(&mut self) {
        if self.state == CardState::Saving {
            self.state = CardState::Editing;
        }
    }

    /// Replaces the canonical note after a reload.
    ///
    /// Viewing cards reset their buffer from the new note. Editing and
    /// Saving cards keep the user's unsaved buffer.
    pub fn sync(&mut self, note: Note) {
        if self.state == CardState::Viewing {
            self.buffer = EditBuffer::from_note(&note);
        }
        self.note = note;
    }

    fn error(&self, action: &'static str) -> CardError {
        CardError {
            action,
            state: self.state,
        }
    }
}
