//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (name <> ''),
    age         REAL NOT NULL,
    kind        TEXT NOT NULL DEFAULT 'Person'
                CHECK (kind IN ('Person', 'Student', 'Teacher')),
    major       TEXT,
    subject     TEXT,
    created_at  TEXT NOT NULL     -- fixed-width RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS people_created_idx ON people(created_at);

PRAGMA user_version = 1;
";
