pub mod models;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use crier_config::DatabaseSettings;
use rusqlite::{Connection, Transaction};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Handle to the SQLite database behind the engine.
///
/// Writes serialize on the connection mutex; SQLite's own locking covers
/// any readers on other handles to the same file.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(settings: &DatabaseSettings) -> Result<Self> {
        let conn = Connection::open(Path::new(&settings.path))?;
        configure(&conn, settings.busy_timeout_ms)?;
        schema::migrate(&conn)?;

        info!(path = %settings.path, "SQLite database ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database with the full schema applied (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn, 5000)?;
        schema::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Connection) -> std::result::Result<T, E>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        f(&conn)
    }

    /// Run `f` inside a transaction, committing on `Ok` and rolling back
    /// on `Err`.
    pub fn with_tx<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Transaction<'_>) -> std::result::Result<T, E>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        let tx = conn.transaction().map_err(DbError::from)?;
        let value = f(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

fn configure(conn: &Connection, busy_timeout_ms: u32) -> Result<()> {
    conn.execute_batch(&format!(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {busy_timeout_ms};
         PRAGMA synchronous = NORMAL;"
    ))?;
    Ok(())
}
