//! Case-insensitive substring filter over title and content.
//!
//! # Invariants
//! - An empty term matches every note.
//! - Result order is the input order.
//! - The term is matched literally; it is not trimmed or tokenized.

use crate::model::note::Note;

/// Returns whether `note` title or content contains `term`, ignoring case.
pub fn matches_term(note: &Note, term: &str) -> bool {
    term.is_empty() || note.contains_lowercase(&term.to_lowercase())
}

/// Returns the subsequence of `notes` matching `term`.
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    if term.is_empty() {
        return notes.iter().collect();
    }

    let needle = term.to_lowercase();
    notes
        .iter()
        .filter(|note| note.contains_lowercase(&needle))
        .collect()
}
