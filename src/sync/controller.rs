//! Keeps the local note list consistent with the remote store.

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

use super::sequence::{LoadSequencer, LoadTicket};
use crate::domain::{
    CardError, EditBuffer, Note, NoteCard, NoteDraft, NoteFields, NoteId, Session, Tag,
    ValidationError,
};
use crate::filter::{FilterState, filter_by_tags, tag_universe};
use crate::store::{NoteStore, StoreError, StoreResult};

// ===========================================
// Errors
// ===========================================

/// Errors reported by controller operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The store could not be reached or rejected the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The input was refused before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The note is not in the local list.
    #[error("note not loaded: {0}")]
    UnknownNote(NoteId),

    /// The note card is in the wrong state for the request.
    #[error(transparent)]
    Card(#[from] CardError),
}

/// What happened to a load response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the local list, which now holds this many notes.
    Applied(usize),
    /// A newer load was issued meanwhile; the response was discarded.
    Stale,
}

// ===========================================
// NoteController
// ===========================================

/// Owns the local note list for one signed-in user.
///
/// The list is replaced by every applied load and patched by confirmed
/// updates and deletes. Each loaded note has a [`NoteCard`] carrying its
/// edit buffer. Failures leave drafts and buffers untouched so the user
/// can retry, are logged, and are kept in [`NoteController::last_error`].
pub struct NoteController<S> {
    store: S,
    session: Session,
    notes: Vec<Note>,
    cards: HashMap<NoteId, NoteCard>,
    filter: FilterState,
    draft: NoteDraft,
    sequencer: LoadSequencer,
    last_error: Option<String>,
}

impl<S: NoteStore> NoteController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            notes: Vec::new(),
            cards: HashMap::new(),
            filter: FilterState::new(),
            draft: NoteDraft::new(),
            sequencer: LoadSequencer::new(),
            last_error: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// All loaded notes in store order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Loaded notes narrowed by the selected tags.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_by_tags(&self.notes, self.filter.selected_tags())
    }

    /// Distinct tags across the loaded notes, in first-seen order.
    pub fn tag_universe(&self) -> Vec<&Tag> {
        tag_universe(&self.notes)
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn card(&self, id: &NoteId) -> Option<&NoteCard> {
        self.cards.get(id)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Sets the search term for subsequent loads. Returns true if it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        self.filter.set_search_term(term)
    }

    /// Toggles a tag filter. Returns true if the tag is now selected.
    pub fn toggle_tag(&mut self, tag: Tag) -> bool {
        self.filter.selected_tags_mut().toggle(tag)
    }

    pub fn clear_tag_filters(&mut self) {
        self.filter.selected_tags_mut().clear();
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    /// Message of the most recent failed operation, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ===========================================
    // Load
    // ===========================================

    /// Fetches the notes for the current search term and replaces the list.
    pub async fn load(&mut self) -> Result<LoadOutcome, SyncError> {
        let ticket = self.begin_load();
        let result = self
            .store
            .list(self.session.user_id(), ticket.search_term())
            .await;
        self.finish_load(ticket, result)
    }

    /// Issues a ticket for a load the caller will run itself.
    ///
    /// Issuing a ticket supersedes every earlier one.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.sequencer.issue(self.filter.search_term());
        debug!(seq = ticket.seq(), search = ticket.search_term(), "load issued");
        ticket
    }

    /// Applies the response for `ticket` unless a newer load was issued.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: StoreResult<Vec<Note>>,
    ) -> Result<LoadOutcome, SyncError> {
        if !self.sequencer.is_current(&ticket) {
            debug!(
                seq = ticket.seq(),
                latest = self.sequencer.latest(),
                "discarding stale load response"
            );
            return Ok(LoadOutcome::Stale);
        }
        let result = result.map(|notes| {
            let count = notes.len();
            self.replace_notes(notes);
            LoadOutcome::Applied(count)
        });
        self.record("load", result.map_err(SyncError::from))
    }

    fn replace_notes(&mut self, notes: Vec<Note>) {
        let mut cards = HashMap::with_capacity(notes.len());
        for note in &notes {
            let card = match self.cards.remove(note.id()) {
                Some(mut card) => {
                    card.sync(note.clone());
                    card
                }
                None => NoteCard::new(note.clone()),
            };
            cards.insert(note.id().clone(), card);
        }
        self.cards = cards;
        self.notes = notes;
    }

    // ===========================================
    // Create
    // ===========================================

    /// Sends the draft to the store, then reloads.
    ///
    /// The draft is cleared only once the store accepted it. Returns the
    /// new note's id when the store echoed the created note.
    ///
    /// Once the store has accepted the note the create has succeeded: a
    /// failed reload is recorded as a `load` failure in
    /// [`NoteController::last_error`] and does not turn this into an error.
    pub async fn create(&mut self) -> Result<Option<NoteId>, SyncError> {
        let result = self.post_draft().await;
        let id = self.record("create", result)?;

        // load() logs and records its own failure
        let _ = self.load().await;
        Ok(id)
    }

    async fn post_draft(&mut self) -> Result<Option<NoteId>, SyncError> {
        let fields = self.draft.fields().clone();
        fields.validate()?;

        let created = self
            .store
            .create(self.session.user_id(), &fields)
            .await?;
        self.draft.clear();

        let id = created.map(|note| note.id().clone());
        info!(id = ?id, title = %fields.title, "note created");
        Ok(id)
    }

    // ===========================================
    // Edit / update
    // ===========================================

    /// Puts a note's card into Editing and returns its buffer.
    pub fn open_editor(&mut self, id: &NoteId) -> Result<&mut EditBuffer, SyncError> {
        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| SyncError::UnknownNote(id.clone()))?;
        Ok(card.open()?)
    }

    /// Returns the buffer of a card that is Editing.
    pub fn edit_buffer_mut(&mut self, id: &NoteId) -> Option<&mut EditBuffer> {
        self.cards.get_mut(id).and_then(NoteCard::buffer_mut)
    }

    /// Leaves Editing without saving; the buffer reverts.
    pub fn close_editor(&mut self, id: &NoteId) -> Result<(), SyncError> {
        self.card_mut(id)?.close()?;
        Ok(())
    }

    /// Saves the card's buffer as a full replacement of the note.
    pub async fn update(&mut self, id: &NoteId) -> Result<(), SyncError> {
        let result = match self.begin_update(id) {
            Ok(fields) => {
                let response = self
                    .store
                    .update(self.session.user_id(), id, &fields)
                    .await;
                self.finish_update(id, fields, response)
            }
            Err(e) => Err(e),
        };
        self.record("update", result)
    }

    /// Moves the card to Saving and returns the fields to send.
    pub fn begin_update(&mut self, id: &NoteId) -> Result<NoteFields, SyncError> {
        Ok(self.card_mut(id)?.begin_save()?)
    }

    /// Completes a save started with [`NoteController::begin_update`].
    ///
    /// On success the card shows the confirmed values and the list entry
    /// is replaced. On failure the card returns to Editing unchanged.
    pub fn finish_update(
        &mut self,
        id: &NoteId,
        sent: NoteFields,
        response: StoreResult<Option<Note>>,
    ) -> Result<(), SyncError> {
        let card = self.card_mut(id)?;
        match response {
            Ok(echoed) => {
                let confirmed = match echoed {
                    Some(note) if note.id() == id => note,
                    _ => card.note().with_fields(sent),
                };
                card.save_succeeded(confirmed.clone());
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id() == id) {
                    *slot = confirmed;
                }
                info!(%id, "note updated");
                Ok(())
            }
            Err(e) => {
                card.save_failed();
                Err(e.into())
            }
        }
    }

    // ===========================================
    // Remove
    // ===========================================

    /// Deletes a note and drops it from the local list.
    pub async fn remove(&mut self, id: &NoteId) -> Result<(), SyncError> {
        let result = self.remove_inner(id).await;
        self.record("remove", result)
    }

    async fn remove_inner(&mut self, id: &NoteId) -> Result<(), SyncError> {
        if self.note(id).is_none() {
            return Err(SyncError::UnknownNote(id.clone()));
        }
        self.store.delete(self.session.user_id(), id).await?;
        self.notes.retain(|n| n.id() != id);
        self.cards.remove(id);
        info!(%id, "note removed");
        Ok(())
    }

    // ===========================================
    // Helpers
    // ===========================================

    fn card_mut(&mut self, id: &NoteId) -> Result<&mut NoteCard, SyncError> {
        self.cards
            .get_mut(id)
            .ok_or_else(|| SyncError::UnknownNote(id.clone()))
    }

    fn record<T>(&mut self, operation: &str, result: Result<T, SyncError>) -> Result<T, SyncError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                error!(operation, error = %e, "note operation failed");
                self.last_error = Some(format!("{} failed: {}", operation, e));
            }
        }
        result
    }
}
