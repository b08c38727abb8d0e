//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the note store persists through.
//! - Isolate SQLite query details and payload encoding from the store.
//!
//! # Invariants
//! - The whole notes collection lives in one slot and is rewritten whole.

pub mod note_slot;
pub mod slot_repo;
