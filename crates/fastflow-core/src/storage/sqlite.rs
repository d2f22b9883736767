//! SQLite-backed record storage.
//!
//! Records live in a single `kv` table at `~/.config/fastflow/fastflow.db`,
//! one row per record key. I/O failures after open degrade to no-ops per the
//! gateway's best-effort policy.

use rusqlite::{params, Connection};
use std::sync::Mutex;
use tracing::warn;

use crate::error::StorageError;

use super::{data_dir, StoreBackend};

/// SQLite [`StoreBackend`].
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open the store at `~/.config/fastflow/fastflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("fastflow.db");
        let conn = Connection::open(&path).map_err(|source| StorageError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.migrate()?;
        Ok(backend)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let backend = Self {
            conn: Mutex::new(conn),
        };
        backend.migrate()?;
        Ok(backend)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl StoreBackend for SqliteBackend {
    fn load_raw(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().ok()?;
        let result = conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .and_then(|mut stmt| stmt.query_row(params![key], |row| row.get::<_, String>(0)));
        match result {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                warn!(key, error = %e, "store read failed, treating as absent");
                None
            }
        }
    }

    fn save_raw(&self, key: &str, json: &str) {
        let Ok(conn) = self.conn.lock() else { return };
        if let Err(e) = conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, json],
        ) {
            warn!(key, error = %e, "store write dropped");
        }
    }

    fn remove_raw(&self, key: &str) {
        let Ok(conn) = self.conn.lock() else { return };
        if let Err(e) = conn.execute("DELETE FROM kv WHERE key = ?1", params![key]) {
            warn!(key, error = %e, "store delete dropped");
        }
    }
}
