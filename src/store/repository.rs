//! NoteStore trait and error types.

use crate::domain::{Note, NoteFields, NoteId, UserId};
use std::future::Future;
use thiserror::Error;

// ===========================================
// Errors
// ===========================================

/// Errors that can occur talking to the remote note store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request could not complete (connection, DNS, timeout).
    #[error("request {method} {url} failed: {reason}")]
    Network {
        method: &'static str,
        url: String,
        reason: String,
    },

    /// The store answered with a non-2xx status.
    #[error("store rejected {method} {url} with HTTP {status}")]
    Rejected {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// A 2xx response whose body could not be understood.
    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    /// The configured store URL cannot be used.
    #[error("invalid store URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl StoreError {
    /// Returns true if the request never got an answer.
    pub fn is_network(&self) -> bool {
        matches!(self, StoreError::Network { .. })
    }

    /// Returns the HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// NoteStore trait
// ===========================================

/// Per-user note collection held by a remote service.
///
/// Every call is scoped to a user id supplied by the caller. Futures are
/// `Send` so independent requests can run on separate tasks.
pub trait NoteStore {
    /// Lists the user's notes matching `search` (empty matches all).
    fn list(
        &self,
        user: &UserId,
        search: &str,
    ) -> impl Future<Output = StoreResult<Vec<Note>>> + Send;

    /// Creates a note. Returns the created note when the store echoes it.
    fn create(
        &self,
        user: &UserId,
        fields: &NoteFields,
    ) -> impl Future<Output = StoreResult<Option<Note>>> + Send;

    /// Replaces title, content and tags of an existing note.
    ///
    /// Returns the updated note when the store echoes it.
    fn update(
        &self,
        user: &UserId,
        id: &NoteId,
        fields: &NoteFields,
    ) -> impl Future<Output = StoreResult<Option<Note>>> + Send;

    /// Deletes a note.
    fn delete(&self, user: &UserId, id: &NoteId) -> impl Future<Output = StoreResult<()>> + Send;
}
