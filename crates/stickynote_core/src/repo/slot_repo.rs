//! Key-value slot repository contracts and implementations.
//!
//! # Responsibility
//! - Read and write whole string values addressed by a slot key.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A write replaces the full slot value; there are no partial updates.
//! - Reading a missing slot is `Ok(None)`, never an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Non-SQLite backend failure.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "slot backend failure: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface over named string slots.
pub trait SlotRepository {
    /// Returns the stored value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the slot value.
    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

impl<S: SlotRepository + ?Sized> SlotRepository for &mut S {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }
}

/// SQLite-backed slot repository over the `kv_slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - Returns `Backend` when the `kv_slots` table is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::Backend(
                "missing required table `kv_slots`; open the database with `open_db`".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory slot repository.
///
/// Writes can be switched to fail to exercise error handling paths.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: HashMap<String, String>,
    fail_writes: bool,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut repo = Self::default();
        repo.slots.insert(key.into(), value.into());
        repo
    }

    /// When set, every subsequent `write_slot` returns `Backend`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Returns the raw stored value for inspection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes {
            return Err(RepoError::Backend(format!("write to slot `{key}` refused")));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotRepository, RepoError, SlotRepository, SqliteSlotRepository};
    use crate::db::open_db_in_memory;
    use rusqlite::Connection;

    #[test]
    fn sqlite_slot_read_missing_is_none_and_write_upserts() {
        let conn = open_db_in_memory().unwrap();
        let mut repo = SqliteSlotRepository::try_new(&conn).unwrap();

        assert_eq!(repo.read_slot("notes").unwrap(), None);
        repo.write_slot("notes", "[]").unwrap();
        repo.write_slot("notes", "[1]").unwrap();
        assert_eq!(repo.read_slot("notes").unwrap().as_deref(), Some("[1]"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn sqlite_slot_requires_migrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let result = SqliteSlotRepository::try_new(&conn);
        assert!(matches!(result, Err(RepoError::Backend(_))));
    }

    #[test]
    fn memory_slot_can_refuse_writes() {
        let mut repo = MemorySlotRepository::with_slot("notes", "[]");
        repo.set_fail_writes(true);
        let err = repo.write_slot("notes", "[1]").unwrap_err();
        assert!(err.to_string().contains("notes"));
        assert_eq!(repo.raw("notes"), Some("[]"));
    }
}
