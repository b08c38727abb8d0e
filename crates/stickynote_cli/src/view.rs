//! Plain-text rendering of store state.

use chrono::Local;
use std::fmt::Write as _;
use stickynote_core::{Note, NoteColor};

const EMPTY_SEARCH_MESSAGE: &str = "No notes match your search";
const EMPTY_COLLECTION_MESSAGE: &str = "No notes yet. Create your first note!";

/// Renders the visible notes, or the empty-state message.
pub fn render_notes(notes: &[&Note], search_term: &str) -> String {
    if notes.is_empty() {
        return if search_term.is_empty() {
            EMPTY_COLLECTION_MESSAGE.to_string()
        } else {
            EMPTY_SEARCH_MESSAGE.to_string()
        };
    }

    notes
        .iter()
        .map(|note| render_note(note))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One note card: header line, title, then indented content.
pub fn render_note(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {} ({})",
        note.id,
        note.created_at.with_timezone(&Local).format("%Y-%m-%d"),
        note.color
    );
    let _ = writeln!(out, "  {}", note.title);
    for line in note.content.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out
}

/// Palette listing for the `colors` command.
pub fn render_palette() -> String {
    NoteColor::PALETTE
        .iter()
        .map(|color| format!("{:<7}{}", color.name(), color.hex()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{render_note, render_notes, render_palette};
    use chrono::{TimeZone, Utc};
    use stickynote_core::{Note, NoteColor};

    fn note() -> Note {
        Note {
            id: "n-1".to_string(),
            title: "Groceries".to_string(),
            content: "milk\neggs".to_string(),
            color: NoteColor::Yellow,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_state_depends_on_search_term() {
        assert_eq!(render_notes(&[], ""), "No notes yet. Create your first note!");
        assert_eq!(render_notes(&[], "milk"), "No notes match your search");
    }

    #[test]
    fn note_card_lists_header_title_and_content_lines() {
        let rendered = render_note(&note());
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("[n-1] "));
        assert!(lines[0].ends_with("(yellow)"));
        assert_eq!(lines[1], "  Groceries");
        assert_eq!(&lines[2..], &["    milk", "    eggs"]);
    }

    #[test]
    fn palette_lists_six_colors_default_first() {
        let palette = render_palette();
        assert_eq!(palette.lines().count(), 6);
        assert!(palette.lines().next().unwrap().starts_with("gray"));
    }
}
