//! SQLite schema for all inkwell tables
//!
//! Tables are created on connect when missing. Uniqueness lives here so it
//! holds under concurrent writers.

// ─── Table Names (constants) ───

pub const TABLE_USERS: &str = "users";
pub const TABLE_NOTES: &str = "notes";

// ─── Users Table ───

pub const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    email           TEXT    NOT NULL UNIQUE,
    hashed_password TEXT    NOT NULL,
    role            TEXT    NOT NULL CHECK (role IN ('user', 'admin'))
)";

// ─── Notes Table ───

pub const CREATE_NOTES: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    title   TEXT    NOT NULL,
    content TEXT    NOT NULL
)";

/// All DDL statements in creation order
pub fn all_tables() -> [(&'static str, &'static str); 2] {
    [(TABLE_USERS, CREATE_USERS), (TABLE_NOTES, CREATE_NOTES)]
}
