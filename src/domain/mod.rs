//! Core types: Note, NoteId, Tag, drafts, edit cards, and the session

mod card;
mod note;
mod note_id;
mod session;
mod tag;

pub use card::{CardError, CardState, EditBuffer, NoteCard};
pub use note::{Note, NoteDraft, NoteFields, ValidationError};
pub use note_id::{NoteId, ParseNoteIdError};
pub use session::{ParseUserIdError, Session, UserId};
pub use tag::{ParseTagError, Tag};
