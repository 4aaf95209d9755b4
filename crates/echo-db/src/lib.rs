//! Storage layer for the Echo task organizer.
//!
//! Persistence is a flat key-value store in SQLite: every value is a string
//! stored under a string key, mirroring the `getItem`/`setItem` contract the
//! board was originally written against. The task board and the notes pad are
//! stored as single values under [`TASKS_KEY`] and [`NOTES_KEY`].
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization (e.g. a `Mutex<Database>`).
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE kv (
//!     key TEXT PRIMARY KEY,
//!     value TEXT NOT NULL,
//!     updated_at TEXT NOT NULL  -- ISO 8601, UTC
//! );
//! ```
//!
//! The board is stored as a JSON object keyed by quadrant (`urgentImportant`,
//! ...). A value that fails to parse is logged and treated as an empty board,
//! so a corrupt entry never prevents the board from opening.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use echo_core::TaskBoard;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Key holding the serialized task board.
pub const TASKS_KEY: &str = "echo_tasks";

/// Key holding the notes pad text.
pub const NOTES_KEY: &str = "echo_notes";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to serialize a value for storage.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Removes `key`. Returns whether a value was present.
    pub fn remove_item(&self, key: &str) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?", params![key])?;
        Ok(removed > 0)
    }

    /// When `key` was last written, as an ISO 8601 string.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Loads the task board.
    ///
    /// A missing entry yields an empty board. An entry that does not parse is
    /// logged and also yields an empty board; it is overwritten on the next save.
    pub fn load_board(&self) -> Result<TaskBoard, DbError> {
        let Some(raw) = self.get_item(TASKS_KEY)? else {
            tracing::debug!("no stored board, starting empty");
            return Ok(TaskBoard::default());
        };
        match serde_json::from_str::<TaskBoard>(&raw) {
            Ok(board) => {
                tracing::debug!(tasks = board.total_tasks(), "loaded board");
                Ok(board)
            }
            Err(err) => {
                tracing::warn!(key = TASKS_KEY, error = %err, "stored board is corrupt, starting empty");
                Ok(TaskBoard::default())
            }
        }
    }

    /// Saves the task board, replacing the stored copy.
    pub fn save_board(&self, board: &TaskBoard) -> Result<(), DbError> {
        let raw = serde_json::to_string(board).map_err(|source| DbError::Encode {
            key: TASKS_KEY,
            source,
        })?;
        self.set_item(TASKS_KEY, &raw)?;
        tracing::debug!(tasks = board.total_tasks(), "saved board");
        Ok(())
    }

    /// Loads the notes pad text, empty if never written.
    pub fn load_notes(&self) -> Result<String, DbError> {
        Ok(self.get_item(NOTES_KEY)?.unwrap_or_default())
    }

    /// Replaces the notes pad text.
    pub fn save_notes(&self, notes: &str) -> Result<(), DbError> {
        self.set_item(NOTES_KEY, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use echo_core::Quadrant;

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_has_kv_table() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let mut stmt = db.conn.prepare("PRAGMA table_info(kv)").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(|row| row.unwrap())
            .collect();
        assert_eq!(columns, vec!["key", "value", "updated_at"]);
    }

    #[test]
    fn get_missing_item_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_item("absent").unwrap(), None);
        assert_eq!(db.updated_at("absent").unwrap(), None);
    }

    #[test]
    fn set_item_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "first").unwrap();
        db.set_item("k", "second").unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("second"));
        assert!(db.updated_at("k").unwrap().is_some());
    }

    #[test]
    fn remove_item_reports_presence() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "v").unwrap();
        assert!(db.remove_item("k").unwrap());
        assert!(!db.remove_item("k").unwrap());
        assert_eq!(db.get_item("k").unwrap(), None);
    }

    #[test]
    fn board_roundtrips_through_storage() {
        let db = Database::open_in_memory().unwrap();
        let mut board = TaskBoard::new();
        board
            .add_task(Quadrant::NotUrgentImportant, "review", "9:00 AM - 11:00 AM")
            .unwrap();
        db.save_board(&board).unwrap();

        let loaded = db.load_board().unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn missing_board_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_board().unwrap(), TaskBoard::default());
    }

    #[test]
    fn corrupt_board_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(TASKS_KEY, "{not json").unwrap();
        assert_eq!(db.load_board().unwrap(), TaskBoard::default());
    }

    #[test]
    fn notes_default_to_empty() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_notes().unwrap(), "");
        db.save_notes("call the dentist").unwrap();
        assert_eq!(db.load_notes().unwrap(), "call the dentist");
    }

    #[test]
    fn data_persists_across_connections() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("echo.db");
        {
            let db = Database::open(&path).unwrap();
            db.save_notes("persisted").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_notes().unwrap(), "persisted");
    }
}
