//! Note synchronization: controller, load sequencing, and search debouncing

mod controller;
mod debounce;
mod sequence;

pub use controller::{LoadOutcome, NoteController, SyncError};
pub use debounce::{DEFAULT_DEBOUNCE, SearchDebouncer};
pub use sequence::{LoadSequencer, LoadTicket};
