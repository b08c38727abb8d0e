//! Note store: the in-memory collection mirrored to one persistence slot.
//!
//! # Responsibility
//! - Load the collection once at startup, failing soft to empty.
//! - Own the draft, the edit-mode flag and the active search term.
//! - Rewrite the whole collection to the slot after every mutation.
//!
//! # Invariants
//! - Collection order is newest-created first; edits keep position.
//! - `id` and `created_at` of a stored note never change.
//! - Every stored note has a unique id and a non-blank title.
//! - Edit mode is entered only by `begin_edit` and left only by a
//!   non-ignored `save`.

use crate::model::color::NoteColor;
use crate::model::note::{Draft, Note, NoteId, NoteValidationError};
use crate::repo::note_slot::{decode_notes, encode_notes, NOTES_SLOT_KEY};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use crate::search::filter::filter_notes;
use crate::service::identity::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for mutations that could not complete.
#[derive(Debug)]
pub enum StoreError {
    /// Slot write failed. The in-memory mutation is kept.
    Repo(RepoError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Id generator produced an id already present in the collection.
    DuplicateId(NoteId),
    /// Generated note failed record validation.
    Validation(NoteValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "failed to persist notes: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::DuplicateId(id) => write!(f, "generated note id already exists: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// What a `save` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new note was prepended to the collection.
    Created(Note),
    /// The edited note was updated in place.
    Updated(Note),
    /// Edit target was deleted before saving; nothing was replaced.
    EditTargetMissing(NoteId),
    /// Draft title was blank; nothing changed.
    Ignored,
}

/// Owned note collection plus draft/edit/search state.
pub struct NoteStore<S: SlotRepository, G: IdGenerator = UuidIdGenerator, C: Clock = SystemClock> {
    repo: S,
    ids: G,
    clock: C,
    notes: Vec<Note>,
    draft: Draft,
    editing: Option<NoteId>,
    search_term: String,
}

impl<S: SlotRepository> NoteStore<S> {
    /// Loads a store with random ids and the system clock.
    pub fn open(repo: S) -> Self {
        Self::load(repo, UuidIdGenerator, SystemClock)
    }
}

impl<S: SlotRepository, G: IdGenerator, C: Clock> NoteStore<S, G, C> {
    /// Loads the persisted collection.
    ///
    /// Never fails: a missing slot, an unreadable backend or a corrupt
    /// payload all start from an empty collection.
    pub fn load(repo: S, ids: G, clock: C) -> Self {
        let notes = match repo.read_slot(NOTES_SLOT_KEY) {
            Ok(Some(raw)) => match decode_notes(&raw) {
                Ok(decoded) => {
                    info!(
                        "event=store_load module=store status=ok count={} dropped={}",
                        decoded.notes.len(),
                        decoded.dropped
                    );
                    decoded.notes
                }
                Err(err) => {
                    warn!("event=store_load module=store status=fallback reason=corrupt error={err}");
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=store_load module=store status=ok count=0 reason=missing");
                Vec::new()
            }
            Err(err) => {
                warn!("event=store_load module=store status=fallback reason=read_failed error={err}");
                Vec::new()
            }
        };

        Self {
            repo,
            ids,
            clock,
            notes,
            draft: Draft::default(),
            editing: None,
            search_term: String::new(),
        }
    }

    /// Replaces the draft and saves it.
    pub fn save_draft(&mut self, draft: Draft) -> StoreResult<SaveOutcome> {
        self.draft = draft;
        self.save()
    }

    /// Saves the current draft.
    ///
    /// - Blank title: returns `Ignored`, state untouched.
    /// - Idle: creates a note with a fresh id and timestamp, prepended.
    /// - Editing: updates title/content/color of the edit target in place
    ///   and leaves edit mode.
    ///
    /// Otherwise the draft is reset and the collection persisted.
    ///
    /// # Errors
    /// - `DuplicateId` / `Validation` when the generated note is unusable;
    ///   nothing changes.
    /// - `Repo` / `Encode` when persisting fails; the in-memory mutation is
    ///   kept.
    pub fn save(&mut self) -> StoreResult<SaveOutcome> {
        if self.draft.has_blank_title() {
            debug!("event=note_save module=store status=ignored reason=blank_title");
            return Ok(SaveOutcome::Ignored);
        }

        let outcome = match self.editing.as_ref() {
            None => SaveOutcome::Created(self.create_from_draft()?),
            Some(target) => match self.notes.iter_mut().find(|note| &note.id == target) {
                Some(note) => {
                    note.title = self.draft.title.clone();
                    note.content = self.draft.content.clone();
                    note.color = self.draft.color;
                    SaveOutcome::Updated(note.clone())
                }
                None => {
                    warn!("event=note_save module=store status=skip mode=update reason=target_missing note_id={target}");
                    SaveOutcome::EditTargetMissing(target.clone())
                }
            },
        };

        self.editing = None;
        self.draft = Draft::default();
        self.persist()?;

        match &outcome {
            SaveOutcome::Created(note) => {
                info!("event=note_save module=store status=ok mode=create note_id={}", note.id)
            }
            SaveOutcome::Updated(note) => {
                info!("event=note_save module=store status=ok mode=update note_id={}", note.id)
            }
            SaveOutcome::EditTargetMissing(_) | SaveOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Removes the note with `id`, then persists.
    ///
    /// Returns whether a note was removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;

        self.persist()?;
        info!("event=note_delete module=store status=ok note_id={id} removed={removed}");
        Ok(removed)
    }

    /// Copies `note` into the draft and enters edit mode.
    ///
    /// The note stays in the collection until `save`.
    pub fn begin_edit(&mut self, note: &Note) {
        self.draft = Draft::from(note);
        self.editing = Some(note.id.clone());
        debug!("event=note_edit module=store status=start note_id={}", note.id);
    }

    /// Sets the active search term.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Notes matching the active search term, in storage order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search_term)
    }

    /// Full collection, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn set_draft_color(&mut self, color: NoteColor) {
        self.draft.color = color;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Borrows the underlying slot repository.
    pub fn repo(&self) -> &S {
        &self.repo
    }

    /// Consumes the store, returning the slot repository.
    pub fn into_repo(self) -> S {
        self.repo
    }

    fn create_from_draft(&mut self) -> StoreResult<Note> {
        let id = self.ids.next_id();
        if self.find(&id).is_some() {
            error!("event=note_save module=store status=error mode=create error_code=duplicate_id note_id={id}");
            return Err(StoreError::DuplicateId(id));
        }

        let note = Note {
            id,
            title: self.draft.title.clone(),
            content: self.draft.content.clone(),
            color: self.draft.color,
            created_at: self.clock.now(),
        };
        note.validate()?;
        self.notes.insert(0, note.clone());
        Ok(note)
    }

    fn persist(&mut self) -> StoreResult<()> {
        let payload = encode_notes(&self.notes)?;
        if let Err(err) = self.repo.write_slot(NOTES_SLOT_KEY, &payload) {
            error!(
                "event=store_persist module=store status=error count={} error={err}",
                self.notes.len()
            );
            return Err(err.into());
        }
        debug!("event=store_persist module=store status=ok count={}", self.notes.len());
        Ok(())
    }
}
