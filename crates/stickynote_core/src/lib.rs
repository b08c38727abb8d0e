//! Core domain logic for StickyNote.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::{ColorParseError, NoteColor};
pub use model::note::{Draft, Note, NoteId, NoteValidationError};
pub use repo::note_slot::{decode_notes, encode_notes, DecodedNotes, NOTES_SLOT_KEY};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use search::filter::{filter_notes, matches_term};
pub use service::identity::{
    Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidIdGenerator,
};
pub use service::note_store::{NoteStore, SaveOutcome, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
