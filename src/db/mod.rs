//! Database helpers: pool setup and path handling.

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;

pub mod log_store;

pub use log_store::{InvalidTablePrefix, LogStore};

/// Open a SQLite pool, creating the database file when needed.
pub async fn connect(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let db_url = ensure_sqlite_path(db_url);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
    if !db_url.starts_with("sqlite:") {
        return db_url.to_string();
    }
    let path_part = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if path_part.starts_with(":memory:") {
        return db_url.to_string();
    }
    let path_only = match path_part.split_once('?') {
        Some((p, _)) => p,
        None => path_part,
    };
    if !path_only.is_empty() {
        let p = Path::new(path_only);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(p);
    }
    db_url.to_string()
}
