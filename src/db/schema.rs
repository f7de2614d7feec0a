//! SQL DDL for the intake database. Tables are created if absent; there are no migrations.

/// SQLite schema with:
/// - `applications`: one row per submission, `submitted_at` stored as RFC3339 text
///   with fixed microsecond precision so lexical order equals time order
/// - `users`: admin credentials, `username` UNIQUE
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NULL,
    email TEXT NULL,
    mobile TEXT NULL,
    gender TEXT NULL,
    degree TEXT NULL,
    experience TEXT NULL,
    how_know TEXT NULL,
    resume TEXT NULL,
    position TEXT NULL,
    submitted_at TEXT NOT NULL -- RFC3339, UTC
);

CREATE INDEX IF NOT EXISTS idx_applications_submitted_at ON applications(submitted_at);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL, -- Argon2 PHC string
    created_at TEXT NOT NULL -- RFC3339, UTC
);
"#;
