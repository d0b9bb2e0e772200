//! SQLite-backed document storage.
//!
//! # Responsibility
//! - Persist the serialized record list under a document key, one row per
//!   tree.
//! - Bootstrap the schema before any application data is touched.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - The stored payload is the same JSON wire shape used by import/export.

use crate::model::member::Member;
use crate::storage::{StorageAdapter, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

const LATEST_SCHEMA_VERSION: u32 = 1;

const INIT_SQL: &str = "CREATE TABLE tree_documents (
    doc_key TEXT PRIMARY KEY NOT NULL,
    payload TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key/value document store over one SQLite database.
///
/// Each tree lives in a single row keyed by `doc_key`, holding the whole
/// collection as one JSON payload.
pub struct SqliteStorage {
    conn: Connection,
    doc_key: String,
}

impl SqliteStorage {
    /// Opens (or creates) a database file and bootstraps the schema.
    pub fn open(path: impl AsRef<Path>, doc_key: impl Into<String>) -> StorageResult<Self> {
        info!("event=storage_open module=storage status=start mode=file");
        let conn = Connection::open(path).map_err(|err| {
            error!("event=storage_open module=storage status=error mode=file error={err}");
            StorageError::from(err)
        })?;
        Self::from_connection(conn, doc_key, "file")
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory(doc_key: impl Into<String>) -> StorageResult<Self> {
        info!("event=storage_open module=storage status=start mode=memory");
        let conn = Connection::open_in_memory().map_err(|err| {
            error!("event=storage_open module=storage status=error mode=memory error={err}");
            StorageError::from(err)
        })?;
        Self::from_connection(conn, doc_key, "memory")
    }

    fn from_connection(
        conn: Connection,
        doc_key: impl Into<String>,
        mode: &str,
    ) -> StorageResult<Self> {
        match bootstrap_schema(&conn) {
            Ok(()) => {
                info!("event=storage_open module=storage status=ok mode={mode}");
                Ok(Self {
                    conn,
                    doc_key: doc_key.into(),
                })
            }
            Err(err) => {
                error!("event=storage_open module=storage status=error mode={mode} error={err}");
                Err(err)
            }
        }
    }
}

impl StorageAdapter for SqliteStorage {
    fn load(&self) -> StorageResult<Option<Vec<Member>>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM tree_documents WHERE doc_key = ?1;",
                [self.doc_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        let members = serde_json::from_str(&payload).map_err(|err| {
            StorageError::InvalidPayload(format!(
                "document `{}` does not decode to a member list: {err}",
                self.doc_key
            ))
        })?;
        Ok(Some(members))
    }

    fn save(&self, members: &[Member]) -> StorageResult<()> {
        let payload = serde_json::to_string(members)
            .map_err(|err| StorageError::InvalidPayload(err.to_string()))?;
        self.conn.execute(
            "INSERT INTO tree_documents (doc_key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(doc_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![self.doc_key.as_str(), payload],
        )?;
        Ok(())
    }
}

fn bootstrap_schema(conn: &Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version > LATEST_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: LATEST_SCHEMA_VERSION,
        });
    }
    if db_version == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(INIT_SQL)?;
    conn.execute_batch(&format!("PRAGMA user_version = {LATEST_SCHEMA_VERSION};"))?;
    Ok(())
}
