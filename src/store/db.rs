// File: src/store/db.rs
use rusqlite::{Connection, Row, ToSql};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, WordArtError};

/// One words table keyed by id; `text` carries the uniqueness constraint the
/// upsert path leans on. Timestamps are UTC ISO-8601 with milliseconds and
/// are assigned by the store itself.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS words (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    text             TEXT NOT NULL UNIQUE,
    rendering        TEXT NOT NULL,
    usage_count      INTEGER NOT NULL DEFAULT 1,
    created_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
    last_accessed_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
);";

/// Handle to the relational store, shareable across threads.
///
/// Exposes a small generic CRUD capability (execute / query-one / query-all /
/// count with row-mapper closures) that `WordStore` specializes through
/// composition. Driver errors are logged here with the operation name and
/// collapsed into `Unavailable`/`Conflict`; their raw text never reaches a
/// caller.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (creating if needed) a file-backed store and initializes the
    /// schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            log::error!("failed to open database at {}: {}", path.display(), e);
            WordArtError::Unavailable { operation: "open" }
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| Self::infra("open", e))?;
        Self::from_connection(conn)
    }

    /// In-memory store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Self::infra("open", e))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| Self::infra("schema init", e))?;
        log::debug!("database schema ready");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            log::error!("connection lock poisoned during {}", operation);
            WordArtError::Unavailable { operation }
        })
    }

    fn infra(operation: &'static str, e: rusqlite::Error) -> WordArtError {
        if let rusqlite::Error::SqliteFailure(ffi, _) = &e {
            if ffi.code == rusqlite::ErrorCode::ConstraintViolation {
                log::warn!("constraint violation during {}: {}", operation, e);
                return WordArtError::Conflict { operation };
            }
        }
        log::error!("query failed during {}: {}", operation, e);
        WordArtError::Unavailable { operation }
    }

    /// Runs a mutating statement, returning the number of affected rows.
    pub fn execute(
        &self,
        operation: &'static str,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<usize> {
        let conn = self.lock(operation)?;
        conn.execute(sql, params)
            .map_err(|e| Self::infra(operation, e))
    }

    /// Runs a statement expected to yield at most one row. `Ok(None)` means
    /// no row matched; that is for the caller to interpret (usually as
    /// NotFound with its own context).
    pub fn query_one<T>(
        &self,
        operation: &'static str,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        use rusqlite::OptionalExtension;
        let conn = self.lock(operation)?;
        let mut stmt = conn.prepare(sql).map_err(|e| Self::infra(operation, e))?;
        stmt.query_row(params, map)
            .optional()
            .map_err(|e| Self::infra(operation, e))
    }

    /// Runs a multi-row query, collecting mapped rows in statement order.
    pub fn query_all<T>(
        &self,
        operation: &'static str,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.lock(operation)?;
        let mut stmt = conn.prepare(sql).map_err(|e| Self::infra(operation, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| Self::infra(operation, e))?;
        rows.collect::<rusqlite::Result<Vec<T>>>()
            .map_err(|e| Self::infra(operation, e))
    }

    /// Runs an aggregate query whose first column is a single integer.
    pub fn count(&self, operation: &'static str, sql: &str, params: &[&dyn ToSql]) -> Result<i64> {
        let conn = self.lock(operation)?;
        let mut stmt = conn.prepare(sql).map_err(|e| Self::infra(operation, e))?;
        stmt.query_row(params, |row| row.get(0))
            .map_err(|e| Self::infra(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_initializes_on_open() {
        let db = Database::open_in_memory().unwrap();
        let total = db.count("count", "SELECT COUNT(*) FROM words", &[]).unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn unique_text_constraint_reports_conflict() {
        let db = Database::open_in_memory().unwrap();
        let insert = "INSERT INTO words (text, rendering) VALUES (?1, ?2)";
        db.execute("insert", insert, &[&"HOLA", &"art"]).unwrap();
        let err = db.execute("insert", insert, &[&"HOLA", &"art"]).unwrap_err();
        assert!(matches!(err, WordArtError::Conflict { .. }));
    }

    #[test]
    fn timestamps_default_to_now_in_iso_order() {
        let db = Database::open_in_memory().unwrap();
        db.execute(
            "insert",
            "INSERT INTO words (text, rendering) VALUES ('A', 'x')",
            &[],
        )
        .unwrap();
        let pair = db
            .query_one(
                "select",
                "SELECT created_at, last_accessed_at FROM words WHERE text = 'A'",
                &[],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .unwrap()
            .unwrap();
        assert!(pair.0 <= pair.1);
        assert!(pair.0.ends_with('Z'));
    }
}
