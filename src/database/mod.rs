//! DarkProxy storage layer.
//!
//! Provides SQLite connection management, schema migrations, and the
//! key-value [`LocalStorage`] used for all persisted state.
//!
//! # Usage
//!
//! ```no_run
//! use darkproxy::database::{LocalStorage, SqliteStorage};
//!
//! let storage = SqliteStorage::open("darkproxy.db").expect("failed to open storage");
//! storage.set_item("theme", "light").expect("write failed");
//! ```

pub mod connection;
pub mod local_storage;
pub mod migrations;

pub use connection::Database;
pub use local_storage::{LocalStorage, MemoryStorage, SqliteStorage};
