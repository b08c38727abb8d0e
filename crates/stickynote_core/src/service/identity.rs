//! Identity and time sources injected into the note store.
//!
//! # Responsibility
//! - Produce unique note ids independent of wall-clock precision.
//! - Provide creation timestamps behind a replaceable clock.

use crate::model::note::NoteId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of new note ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> NoteId;
}

/// Random v4 UUID ids. Default for real stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> NoteId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `"{prefix}-{n}"` ids, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> NoteId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};

    #[test]
    fn sequential_ids_count_up_from_one() {
        let mut ids = SequentialIdGenerator::new("note");
        assert_eq!(ids.next_id(), "note-1");
        assert_eq!(ids.next_id(), "note-2");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
