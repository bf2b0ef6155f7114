//! Request normalization: turns a [`RawRequest`] into a [`NewLogEntry`].
//!
//! Malformed input never fails here. A body that is not a JSON object is kept
//! verbatim under `raw_body`.

use crate::{
  models::{
    log::log_entry::{LogData, NewLogEntry},
    request::raw_request::RawRequest,
  },
  util::sanitize_text_field,
};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

pub const LOG_LEVEL: &str = "info";
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// Build the log entry candidate for a request.
pub fn normalize(req: &RawRequest) -> NewLogEntry {
  let headers = collect_headers(&req.headers);
  let payload = extract_payload(req);
  let order_id = payload.get("order_id").map(order_id_text).unwrap_or_default();

  let kind = headers
    .get("User-Agent")
    .map(|ua| sanitize_text_field(ua))
    .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
  let context = req
    .remote_addr
    .as_deref()
    .map(sanitize_text_field)
    .unwrap_or_default();

  NewLogEntry {
    level: LOG_LEVEL.to_string(),
    message: format!("Incoming {} request", req.method),
    context,
    kind,
    data: LogData { headers, payload },
    order_id,
  }
}

/// Entity headers the host kept apart from the client-sent ones.
const ENTITY_HEADERS: [&str; 2] = ["content-type", "content-length"];

/// Collect headers under their canonical names; a repeated header keeps its last value.
/// `Content-Type` and `Content-Length` describe the body and are not collected.
pub fn collect_headers(raw: &[(String, String)]) -> BTreeMap<String, String> {
  raw
    .iter()
    .filter(|(name, _)| {
      !ENTITY_HEADERS
        .iter()
        .any(|entity| name.replace('_', "-").eq_ignore_ascii_case(entity))
    })
    .map(|(name, value)| (canonical_header_name(name), value.clone()))
    .collect()
}

/// `user-agent` -> `User-Agent`. Underscores count as word separators.
pub fn canonical_header_name(name: &str) -> String {
  name
    .split(['-', '_'])
    .map(|word| {
      let lower = word.to_ascii_lowercase();
      let mut chars = lower.chars();
      match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join("-")
}

/// Pick the payload: JSON object body, else `raw_body`; with no body, form
/// fields, else query parameters.
pub fn extract_payload(req: &RawRequest) -> Map<String, Value> {
  if !req.body.is_empty() {
    return match serde_json::from_slice::<Value>(&req.body) {
      Ok(Value::Object(map)) => map,
      _ => {
        let mut map = Map::new();
        map.insert(
          "raw_body".to_string(),
          Value::String(String::from_utf8_lossy(&req.body).into_owned()),
        );
        map
      }
    };
  }

  let fields = if req.form.is_empty() {
    &req.query
  } else {
    &req.form
  };
  let mut map = Map::new();
  for (key, value) in fields {
    map.insert(key.clone(), Value::String(value.clone()));
  }
  map
}

fn order_id_text(value: &Value) -> String {
  match value {
    Value::String(s) => sanitize_text_field(s),
    Value::Number(n) => number_text(n),
    Value::Bool(true) => "1".to_string(),
    Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
  }
}

/// Integral floats such as `1e3` or `10.0` print without a fractional part.
fn number_text(n: &Number) -> String {
  match n.as_f64() {
    Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
    _ => n.to_string(),
  }
}
