//! Notes collection codec for the `notes` slot.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON array in storage order.
//! - Decode persisted payloads leniently, record by record.
//!
//! # Invariants
//! - Decoded collections never contain invalid or duplicate-id notes.
//! - Encoding preserves collection order exactly.

use crate::model::note::Note;
use log::warn;
use serde_json::Value;
use std::collections::HashSet;

/// Slot key holding the serialized notes collection.
pub const NOTES_SLOT_KEY: &str = "notes";

/// Result of decoding a persisted notes payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedNotes {
    /// Valid notes in storage order.
    pub notes: Vec<Note>,
    /// Number of records discarded as malformed, invalid or duplicate.
    pub dropped: usize,
}

/// Serializes the collection into the slot payload format.
pub fn encode_notes(notes: &[Note]) -> serde_json::Result<String> {
    serde_json::to_string(notes)
}

/// Decodes a slot payload.
///
/// # Errors
/// - Returns an error when the payload is not a JSON array.
///
/// Individual records that fail to decode or validate, and records whose
/// `id` was already seen, are skipped and counted in `dropped`.
pub fn decode_notes(raw: &str) -> serde_json::Result<DecodedNotes> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut seen_ids = HashSet::new();
    let mut decoded = DecodedNotes::default();

    for (index, record) in records.into_iter().enumerate() {
        let note = match serde_json::from_value::<Note>(record) {
            Ok(note) => note,
            Err(err) => {
                warn!("event=notes_decode module=repo status=skip index={index} reason=malformed error={err}");
                decoded.dropped += 1;
                continue;
            }
        };
        if let Err(err) = note.validate() {
            warn!("event=notes_decode module=repo status=skip index={index} reason=invalid error={err}");
            decoded.dropped += 1;
            continue;
        }
        if !seen_ids.insert(note.id.clone()) {
            warn!("event=notes_decode module=repo status=skip index={index} reason=duplicate_id");
            decoded.dropped += 1;
            continue;
        }
        decoded.notes.push(note);
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::{decode_notes, encode_notes};

    #[test]
    fn decode_rejects_non_array_payloads() {
        assert!(decode_notes("{not json").is_err());
        assert!(decode_notes(r#"{"id":"1"}"#).is_err());
        assert!(decode_notes("null").is_err());
    }

    #[test]
    fn decode_skips_invalid_and_duplicate_records() {
        let raw = r##"[
            {"id":"a","title":"First","content":"","color":"#f9fafb","createdAt":"2024-05-01T10:00:00Z"},
            {"id":"b","title":"   ","content":"","color":"#f9fafb","createdAt":"2024-05-01T10:00:00Z"},
            {"id":"a","title":"Dup","content":"","color":"#f9fafb","createdAt":"2024-05-01T10:00:00Z"},
            {"id":"c","content":"no title"},
            {"id":"d","title":"Kept","color":"#fee2e2","createdAt":"2024-05-02T10:00:00Z"}
        ]"##;
        let decoded = decode_notes(raw).unwrap();
        let ids: Vec<&str> = decoded.notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(decoded.dropped, 3);
        assert_eq!(decoded.notes[1].content, "");
    }

    #[test]
    fn encode_empty_collection_is_empty_array() {
        assert_eq!(encode_notes(&[]).unwrap(), "[]");
    }
}
