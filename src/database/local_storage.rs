//! Durable key-value storage with `localStorage` semantics.
//!
//! Values are opaque strings replaced whole on every write. [`SqliteStorage`]
//! persists them in the `local_storage` table; [`MemoryStorage`] keeps them in
//! process memory for tests and throwaway sessions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use super::connection::Database;
use crate::types::errors::StorageError;

/// Storage key of the serialized history list.
pub const HISTORY_KEY: &str = "browseHistory";
/// Storage key of the theme name.
pub const THEME_KEY: &str = "theme";
/// Storage key of the accent color.
pub const ACCENT_COLOR_KEY: &str = "accentColor";

/// Key-value storage shared by the history store and the theme engine.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage backed by the SQLite `local_storage` table.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = Database::open(path).map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = Database::open_in_memory().map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

impl LocalStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    /// Upserts a single row, so each write replaces the previous value atomically.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute(
                "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Self::now()],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

/// Non-durable storage held in a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
