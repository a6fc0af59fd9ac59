//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database. Session, clock, and
//! snapshot code call store methods — they never execute SQL directly.

pub mod history;
pub mod team;

use crate::error::GameResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

/// The well-known singleton key for the one in-progress game.
pub const LIVE_SESSION_KEY: &str = "in-progress-game";

pub struct GameStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl GameStore {
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases this returns a fresh, isolated database.
    pub fn reopen(&self) -> GameResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ── Singleton in-progress session ──────────────────────────

    /// Write (or replace) the one in-progress-session payload.
    pub fn put_live_session(&self, payload: &str, saved_at: DateTime<Utc>) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO live_session (key, payload, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload,
                                            saved_at = excluded.saved_at",
            params![LIVE_SESSION_KEY, payload, saved_at.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn get_live_session(&self) -> GameResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM live_session WHERE key = ?1",
                params![LIVE_SESSION_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    pub fn delete_live_session(&self) -> GameResult<()> {
        self.conn.execute(
            "DELETE FROM live_session WHERE key = ?1",
            params![LIVE_SESSION_KEY],
        )?;
        Ok(())
    }
}
