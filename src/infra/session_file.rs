//! Stored sign-in session with atomic writes.

use crate::domain::Session;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse session file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the stored session, or `None` if no session file exists.
///
/// # Errors
///
/// Returns `SessionFileError::Parse` if the file exists but is malformed.
pub fn read_session(path: &Path) -> Result<Option<Session>, SessionFileError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SessionFileError::Io {
                path: path.into(),
                source: e,
            });
        }
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| SessionFileError::Parse {
            path: path.into(),
            source: e,
        })
}

/// Writes the session atomically, creating parent directories as needed.
///
/// The content is written to a temporary file in the same directory and
/// renamed into place, so a crash never leaves a half-written session.
pub fn write_session(path: &Path, session: &Session) -> Result<(), SessionFileError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| SessionFileError::Io {
        path: parent.clone(),
        source: e,
    })?;

    let content = toml::to_string(session)?;
    let mut temp = NamedTempFile::new_in(&parent).map_err(|e| SessionFileError::Io {
        path: path.into(),
        source: e,
    })?;

    temp.write_all(content.as_bytes())
        .map_err(|e| SessionFileError::Io {
            path: path.into(),
            source: e,
        })?;

    temp.persist(path)
        .map_err(|e| SessionFileError::AtomicWrite {
            path: path.into(),
            source: e.error,
        })?;

    Ok(())
}

/// Deletes the stored session. Returns false if there was none.
pub fn remove_session(path: &Path) -> Result<bool, SessionFileError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SessionFileError::Io {
            path: path.into(),
            source: e,
        }),
    }
}
