//! Log entry stored in SQLite, one per received request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{FromRow, types::Json};
use std::collections::BTreeMap;

/// Contents of the `data` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    pub headers: BTreeMap<String, String>,
    pub payload: Map<String, Value>,
}

/// Entry built from a request, before the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub level: String,
    pub message: String,
    pub context: String,
    /// Stored in the `type` column.
    pub kind: String,
    pub data: LogData,
    pub order_id: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct LogEntry {
    pub id: i64,
    pub level: String,
    pub message: String,
    pub context: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub data: Json<LogData>,
    pub order_id: String,
}
