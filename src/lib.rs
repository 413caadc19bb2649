//! DarkProxy: a minimal proxy front end.
//!
//! Records submitted URLs in a bounded local history and renders them
//! through an ordered chain of public CORS proxies, falling back to the next
//! endpoint whenever one fails to load.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
