//! SQL schema for the Dossier SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per accepted document. Rows are never deleted; only `status`
-- changes after insert. (reference, kind) is deliberately NOT unique:
-- re-uploads insert fresh rows and the read path orders by recency.
CREATE TABLE IF NOT EXISTS documents (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    reference   TEXT NOT NULL,   -- 8-digit batch code
    purpose     TEXT NOT NULL,   -- 'study' | 'work'
    category    TEXT NOT NULL,
    kind        TEXT NOT NULL,   -- DocumentKind discriminant
    stored_name TEXT NOT NULL,   -- filename under the upload dir
    expiry      TEXT,            -- 'YYYY-MM-DD' or NULL
    status      TEXT NOT NULL DEFAULT 'pending',
    uploaded_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS documents_reference_idx ON documents(reference);
CREATE INDEX IF NOT EXISTS documents_status_idx    ON documents(status);

PRAGMA user_version = 1;
";
