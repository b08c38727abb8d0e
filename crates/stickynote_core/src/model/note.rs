//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and the transient draft.
//! - Provide the validation used by save and load paths.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - A persisted note has a non-blank `id` and a non-blank `title`.

use crate::model::color::NoteColor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque unique note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Persisted note record.
///
/// Field names follow the stored slot schema
/// (`{id, title, content, color, createdAt}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub color: NoteColor,
    /// Creation instant, stored as an RFC 3339 UTC string.
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Validates persisted-record invariants.
    ///
    /// # Errors
    /// - `BlankId` when `id` is empty or whitespace.
    /// - `BlankTitle` when `title` is empty or whitespace.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::BlankId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Returns whether title or content contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Transient note being composed or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Set only while the draft mirrors an existing note.
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub color: NoteColor,
}

impl Draft {
    /// Creates a new-note draft with the given fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>, color: NoteColor) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            color,
        }
    }

    /// Returns whether the title is empty after trimming.
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

impl From<&Note> for Draft {
    fn from(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color,
        }
    }
}

/// Validation failures for persisted note records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    BlankId,
    BlankTitle,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "note id cannot be blank"),
            Self::BlankTitle => write!(f, "note title cannot be blank"),
        }
    }
}

impl Error for NoteValidationError {}

#[cfg(test)]
mod tests {
    use super::{Draft, Note, NoteValidationError};
    use crate::model::color::NoteColor;
    use chrono::{TimeZone, Utc};

    fn sample_note() -> Note {
        Note {
            id: "n-1".to_string(),
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            color: NoteColor::Yellow,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn validate_rejects_blank_title_and_id() {
        let mut note = sample_note();
        note.title = "   ".to_string();
        assert_eq!(note.validate(), Err(NoteValidationError::BlankTitle));

        let mut note = sample_note();
        note.id = String::new();
        assert_eq!(note.validate(), Err(NoteValidationError::BlankId));

        assert!(sample_note().validate().is_ok());
    }

    #[test]
    fn serializes_with_camel_case_slot_fields() {
        let value = serde_json::to_value(sample_note()).unwrap();
        assert_eq!(value["id"], "n-1");
        assert_eq!(value["color"], "#fef3c7");
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn decodes_iso_timestamps_with_milliseconds() {
        let note: Note = serde_json::from_str(
            r##"{"id":"1714557600000","title":"A","content":"","color":"#f9fafb","createdAt":"2024-05-01T10:00:00.000Z"}"##,
        )
        .unwrap();
        assert_eq!(note.created_at, sample_note().created_at);
    }

    #[test]
    fn draft_from_note_copies_identity_and_fields() {
        let note = sample_note();
        let draft = Draft::from(&note);
        assert_eq!(draft.id.as_deref(), Some("n-1"));
        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.color, NoteColor::Yellow);
    }

    #[test]
    fn default_draft_is_empty_with_default_color() {
        let draft = Draft::default();
        assert!(draft.id.is_none());
        assert!(draft.has_blank_title());
        assert_eq!(draft.color, NoteColor::Gray);
    }
}
