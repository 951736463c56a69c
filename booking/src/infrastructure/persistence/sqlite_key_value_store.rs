use crate::application::repositories::KeyValueStore;
use crate::domain::base::DomainError;
use crate::domain::DomainResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(error: StoreError) -> Self {
        DomainError::InvalidOperation(error.to_string())
    }
}

/// SQLite-based implementation of the KeyValueStore trait
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wrap a connection, creating the schema if needed
    pub fn new(conn: Connection) -> StoreResult<Self> {
        super::schema::initialize_database(&conn)?;
        Ok(SqliteKeyValueStore { conn })
    }

    /// Create a new in-memory store (useful for testing)
    pub fn new_in_memory() -> StoreResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Create a new file-based store
    pub fn new_with_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(Connection::open(path)?)
    }

    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM key_values WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO key_values (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM key_values WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.read(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        Ok(self.write(key, value)?)
    }

    fn clear(&mut self, key: &str) -> DomainResult<()> {
        Ok(self.remove(key)?)
    }
}
