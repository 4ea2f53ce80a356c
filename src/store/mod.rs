//! Remote note store: the NoteStore trait and its HTTP implementation

mod http;
mod repository;

#[cfg(test)]
pub(crate) mod mock;

pub use http::{DEFAULT_TIMEOUT, HttpNoteStore};
pub use repository::{NoteStore, StoreError, StoreResult};
