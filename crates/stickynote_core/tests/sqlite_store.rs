use rusqlite::params;
use stickynote_core::db::{open_db, open_db_in_memory};
use stickynote_core::{
    Draft, NoteColor, NoteStore, SaveOutcome, SlotRepository, SqliteSlotRepository,
    NOTES_SLOT_KEY,
};

#[test]
fn file_backed_store_round_trips_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stickynote.sqlite3");

    let expected = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        let mut store = NoteStore::open(repo);
        store
            .save_draft(Draft::new("Groceries", "milk\neggs", NoteColor::Yellow))
            .unwrap();
        store
            .save_draft(Draft::new("Call mom", "", NoteColor::Red))
            .unwrap();
        store.notes().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = NoteStore::open(repo);
    assert_eq!(store.notes(), expected.as_slice());
    assert_eq!(store.notes()[0].title, "Call mom");
}

#[test]
fn generated_ids_are_unique_uuid_tokens() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut store = NoteStore::open(repo);

    let mut ids = Vec::new();
    for idx in 0..20 {
        match store
            .save_draft(Draft::new(format!("note {idx}"), "", NoteColor::default()))
            .unwrap()
        {
            SaveOutcome::Created(note) => ids.push(note.id),
            other => panic!("expected Created, got {other:?}"),
        }
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 20);
    assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
}

#[test]
fn corrupt_sqlite_slot_falls_back_to_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_slots (key, value) VALUES (?1, ?2);",
        params![NOTES_SLOT_KEY, "[{\"id\":"],
    )
    .unwrap();

    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = NoteStore::open(repo);
    assert!(store.is_empty());
}

#[test]
fn slot_holds_flat_json_array_in_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut store = NoteStore::open(repo);
    store
        .save_draft(Draft::new("older", "", NoteColor::Blue))
        .unwrap();
    store
        .save_draft(Draft::new("newer", "body", NoteColor::Green))
        .unwrap();

    let raw = store.repo().read_slot(NOTES_SLOT_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().expect("slot should hold an array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "newer");
    assert_eq!(records[0]["color"], "#dcfce7");
    assert_eq!(records[1]["title"], "older");
    for record in records {
        let keys: Vec<&str> = record
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for expected in ["id", "title", "content", "color", "createdAt"] {
            assert!(keys.contains(&expected), "missing key {expected}");
        }
    }
}
