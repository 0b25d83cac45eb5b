//! SQL schema for the feedback SQLite store.
//!
//! Executed once when the store is opened. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS feedback (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    incident_number TEXT NOT NULL,
    racf            TEXT NOT NULL,
    feedback_type   TEXT NOT NULL   -- 'like' | 'dislike', read case-insensitively
);

-- A pair may hold several rows. The highest id is current; cancel deletes all.
DROP INDEX IF EXISTS feedback_pair_idx;
CREATE INDEX IF NOT EXISTS feedback_pair_lookup_idx
    ON feedback(incident_number, racf, id);

PRAGMA user_version = 2;
";
