//! In-memory `NoteStore` for controller and handler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::repository::{NoteStore, StoreError, StoreResult};
use crate::domain::{Note, NoteFields, NoteId, UserId};

/// Which store operation a scripted failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
struct Inner {
    notes: Vec<(UserId, Note)>,
    next_id: u64,
    echo_bodies: bool,
    failures: VecDeque<(Op, StoreError)>,
    calls: Vec<(Op, String)>,
}

/// Shared in-memory store; clones see the same notes.
#[derive(Clone, Default)]
pub(crate) struct MockStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.next_id = 1;
            inner.echo_bodies = true;
        }
        store
    }

    /// Makes create/update answer with an empty 2xx body.
    pub(crate) fn without_bodies(self) -> Self {
        self.inner.lock().unwrap().echo_bodies = false;
        self
    }

    /// Seeds a note for `user`, returning its id.
    pub(crate) fn seed(&self, user: &UserId, title: &str, content: &str, tags: &[&str]) -> NoteId {
        let mut inner = self.inner.lock().unwrap();
        let id: NoteId = inner.next_id.to_string().parse().unwrap();
        inner.next_id += 1;
        let fields = NoteFields::new(title, content, tags.iter().copied().map(Into::into).collect());
        inner.notes.push((user.clone(), Note::new(id.clone(), fields)));
        id
    }

    /// Makes the next call of `op` fail with a network error.
    pub(crate) fn fail_next(&self, op: Op) {
        self.fail_next_with(
            op,
            StoreError::Network {
                method: "TEST",
                url: "mock://store".to_string(),
                reason: "connection refused".to_string(),
            },
        );
    }

    /// Makes the next call of `op` fail with `error`.
    pub(crate) fn fail_next_with(&self, op: Op, error: StoreError) {
        self.inner.lock().unwrap().failures.push_back((op, error));
    }

    /// Notes currently stored for `user`.
    pub(crate) fn notes(&self, user: &UserId) -> Vec<Note> {
        let inner = self.inner.lock().unwrap();
        inner
            .notes
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, note)| note.clone())
            .collect()
    }

    /// Every call made so far with its argument summary.
    pub(crate) fn calls(&self) -> Vec<(Op, String)> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn begin(&self, op: Op, detail: String) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push((op, detail));
        if let Some(pos) = inner.failures.iter().position(|(o, _)| *o == op) {
            let (_, err) = inner.failures.remove(pos).unwrap();
            return Err(err);
        }
        Ok(inner)
    }
}

fn not_found(method: &'static str, id: &NoteId) -> StoreError {
    StoreError::Rejected {
        method,
        url: format!("mock://store/{}", id),
        status: 404,
        body: "not found".to_string(),
    }
}

impl NoteStore for MockStore {
    async fn list(&self, user: &UserId, search: &str) -> StoreResult<Vec<Note>> {
        let inner = self.begin(Op::List, search.to_string())?;
        let needle = search.to_lowercase();
        Ok(inner
            .notes
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, note)| note)
            .filter(|note| {
                needle.is_empty()
                    || note.title().to_lowercase().contains(&needle)
                    || note.content().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, user: &UserId, fields: &NoteFields) -> StoreResult<Option<Note>> {
        let mut inner = self.begin(Op::Create, fields.title.clone())?;
        let id: NoteId = inner.next_id.to_string().parse().unwrap();
        inner.next_id += 1;
        let note = Note::new(id, fields.clone());
        inner.notes.push((user.clone(), note.clone()));
        Ok(inner.echo_bodies.then_some(note))
    }

    async fn update(
        &self,
        user: &UserId,
        id: &NoteId,
        fields: &NoteFields,
    ) -> StoreResult<Option<Note>> {
        let mut inner = self.begin(Op::Update, id.to_string())?;
        let echo = inner.echo_bodies;
        let slot = inner
            .notes
            .iter_mut()
            .find(|(owner, note)| owner == user && note.id() == id)
            .ok_or_else(|| not_found("PUT", id))?;
        slot.1 = slot.1.with_fields(fields.clone());
        Ok(echo.then(|| slot.1.clone()))
    }

    async fn delete(&self, user: &UserId, id: &NoteId) -> StoreResult<()> {
        let mut inner = self.begin(Op::Delete, id.to_string())?;
        let before = inner.notes.len();
        inner
            .notes
            .retain(|(owner, note)| !(owner == user && note.id() == id));
        if inner.notes.len() == before {
            return Err(not_found("DELETE", id));
        }
        Ok(())
    }
}
