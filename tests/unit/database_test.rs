//! Unit tests for the DarkProxy storage layer (connection, migrations, local storage).

use darkproxy::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use darkproxy::database::{Database, LocalStorage, SqliteStorage};
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_local_storage_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='local_storage'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Table 'local_storage' should exist after migrations");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopen_runs_migrations_once() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("test.db");

    drop(Database::open(&path).expect("first open failed"));
    let db = Database::open(&path).expect("second open failed");

    let rows: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_values_survive_reopen() {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let path = tmp.path().join("test.db");

    {
        let storage = SqliteStorage::open(&path).unwrap();
        storage.set_item("accentColor", "#ff7b72").unwrap();
    }

    let storage = SqliteStorage::open(&path).unwrap();
    assert_eq!(storage.get_item("accentColor").unwrap().as_deref(), Some("#ff7b72"));
    assert_eq!(storage.get_item("theme").unwrap(), None);
}
