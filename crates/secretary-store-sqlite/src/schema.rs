//! SQL schema for the secretary SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS records (
    record_id       TEXT PRIMARY KEY,
    user_id         TEXT NOT NULL,
    kind            TEXT NOT NULL,              -- 'event' | 'task' | 'note'
    title           TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    start_at        TEXT,                       -- YYYY-MM-DDTHH:MM:SS, events only
    end_at          TEXT,
    due_at          TEXT,                       -- tasks only
    status          TEXT NOT NULL DEFAULT 'active',
    event_notified  INTEGER NOT NULL DEFAULT 0,
    due_notified    INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS records_owner_idx ON records(user_id, kind, status);
CREATE INDEX IF NOT EXISTS records_start_idx ON records(start_at);
CREATE INDEX IF NOT EXISTS records_due_idx   ON records(due_at);

PRAGMA user_version = 1;
";
