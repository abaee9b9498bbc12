//! Explicit store handle owning the SQLite connection (lightweight for CLI usage).
//!
//! Lifecycle is `open → use → drop`; nothing is kept in process-wide state.

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, Transaction};
use std::path::Path;

pub struct Store {
    pub conn: Connection,
}

impl Store {
    /// Open an existing database and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        if !Path::new(path).exists() {
            return Err(AppError::NotFound(format!(
                "database '{}' is not initialized, run 'torego init' first",
                path
            )));
        }
        Self::create(path)
    }

    /// Open (creating the file if needed) and run all pending migrations.
    pub fn create(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Run `func` inside a single transaction; commit on `Ok`, roll back on `Err`.
    pub fn in_transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
