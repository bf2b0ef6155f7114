//! spaceremit-log-listener library entrypoint.
//!
//! Modules:
//! - `app`: configuration, shared state, install/uninstall and serving
//! - `http`: Axum router and the listener handler
//! - `normalizer`: turns a received request into a log entry candidate
//! - `db`: SQLite pool setup and the append-only log store
//! - `models`: typed records used across layers
//! - `util`: tracing setup and text sanitization

pub mod app;
pub mod db;
pub mod http;
pub mod models;
pub mod normalizer;
pub mod util;
