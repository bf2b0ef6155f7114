//! Append-only store for received requests.

use crate::models::log::log_entry::{LogEntry, NewLogEntry};
use chrono::Utc;
use sqlx::{SqlitePool, types::Json};

/// Table name without the configurable prefix.
pub const TABLE_BASE_NAME: &str = "spaceremit_logs";

#[derive(Debug, thiserror::Error)]
#[error("invalid table prefix '{0}': only ASCII letters, digits and '_' are allowed")]
pub struct InvalidTablePrefix(pub String);

/// Handle to the `{prefix}spaceremit_logs` table.
///
/// The table name is interpolated into SQL, so the prefix is restricted to
/// `[A-Za-z0-9_]` when the store is built.
#[derive(Debug, Clone)]
pub struct LogStore {
    pool: SqlitePool,
    table: String,
}

impl LogStore {
    pub fn new(pool: SqlitePool, table_prefix: &str) -> Result<Self, InvalidTablePrefix> {
        if !table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(InvalidTablePrefix(table_prefix.to_string()));
        }
        Ok(LogStore {
            pool,
            table: format!("{table_prefix}{TABLE_BASE_NAME}"),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the log table if absent. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let sql = format!(
            r#"CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                level TEXT NOT NULL DEFAULT 'info',
                message TEXT NOT NULL,
                context TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                "type" TEXT NOT NULL DEFAULT '',
                data TEXT NOT NULL,
                order_id TEXT NOT NULL DEFAULT ''
            )"#,
            self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert one entry and return the stored row.
    pub async fn append(&self, entry: &NewLogEntry) -> Result<LogEntry, sqlx::Error> {
        let sql = format!(
            r#"INSERT INTO {} (level, message, context, created_at, "type", data, order_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING id, level, message, context, created_at, "type", data, order_id"#,
            self.table
        );
        sqlx::query_as::<_, LogEntry>(&sql)
            .bind(&entry.level)
            .bind(&entry.message)
            .bind(&entry.context)
            .bind(Utc::now())
            .bind(&entry.kind)
            .bind(Json(&entry.data))
            .bind(&entry.order_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Drop the table and everything in it. Only meant for uninstall.
    pub async fn teardown(&self) -> Result<(), sqlx::Error> {
        let sql = format!("DROP TABLE IF EXISTS {}", self.table);
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}
