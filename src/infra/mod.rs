//! Infrastructure: session persistence and logging setup

mod logging;
mod session_file;

pub use logging::{init_logging, level_for_verbosity};
pub use session_file::{SessionFileError, read_session, remove_session, write_session};
