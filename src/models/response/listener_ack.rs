//! Acknowledgment returned for every stored request.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct ListenerAck<'a> {
    pub status: &'static str,
    pub message: &'static str,
    pub received: &'a Map<String, Value>,
}

impl<'a> ListenerAck<'a> {
    pub fn saved(received: &'a Map<String, Value>) -> Self {
        ListenerAck {
            status: "ok",
            message: "Log saved successfully",
            received,
        }
    }
}
