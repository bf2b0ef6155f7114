//! Webhook listener: store whatever arrives and acknowledge it.

use crate::{
  app::AppState,
  models::{request::raw_request::RawRequest, response::listener_ack::ListenerAck},
  normalizer::normalize,
};
use axum::{
  Json,
  body::Bytes,
  extract::{ConnectInfo, FromRequest, Multipart, Query, Request, State},
  http::{StatusCode, header},
  response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::{error, info, warn};

pub async fn handle_listener(State(state): State<AppState>, req: Request) -> impl IntoResponse {
  let raw = match read_request(req).await {
    Ok(raw) => raw,
    Err(rejection) => return rejection,
  };
  let entry = normalize(&raw);

  match state.store.append(&entry).await {
    Ok(stored) => {
      info!(
        id = stored.id,
        method = %raw.method,
        remote = %stored.context,
        "stored listener log"
      );
      Json(ListenerAck::saved(&entry.data.payload)).into_response()
    }
    Err(e) => {
      error!("handle_listener db error: {e}");
      (StatusCode::INTERNAL_SERVER_ERROR, "db error").into_response()
    }
  }
}

/// Copy the parts of an axum request the normalizer looks at.
///
/// Multipart bodies are decoded into form fields and the raw body is left
/// empty; any other body is taken as-is.
async fn read_request(req: Request) -> Result<RawRequest, Response> {
  let method = req.method().to_string();
  let headers = req
    .headers()
    .iter()
    .map(|(name, value)| {
      (
        name.as_str().to_string(),
        String::from_utf8_lossy(value.as_bytes()).into_owned(),
      )
    })
    .collect();
  let remote_addr = req
    .extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip().to_string());
  let query = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
    .map(|Query(params)| params)
    .unwrap_or_default();

  let (body, form) = if is_multipart(&req) {
    (Vec::new(), read_form_fields(req).await)
  } else {
    let bytes = Bytes::from_request(req, &())
      .await
      .map_err(IntoResponse::into_response)?;
    (bytes.to_vec(), Vec::new())
  };

  Ok(RawRequest {
    method,
    headers,
    body,
    query,
    form,
    remote_addr,
  })
}

fn is_multipart(req: &Request) -> bool {
  req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .map(str::to_ascii_lowercase)
    .is_some_and(|ct| ct.starts_with("multipart/form-data") && ct.contains("boundary="))
}

/// Text fields of a multipart form. File parts are skipped; a broken stream
/// keeps what was read before the error.
async fn read_form_fields(req: Request) -> Vec<(String, String)> {
  let mut multipart = match Multipart::from_request(req, &()).await {
    Ok(m) => m,
    Err(e) => {
      warn!("multipart form rejected: {e}");
      return Vec::new();
    }
  };

  let mut fields = Vec::new();
  loop {
    match multipart.next_field().await {
      Ok(Some(field)) => {
        if field.file_name().is_some() {
          continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
          continue;
        };
        match field.text().await {
          Ok(text) => fields.push((name, text)),
          Err(e) => {
            warn!("multipart field '{name}' unreadable: {e}");
            break;
          }
        }
      }
      Ok(None) => break,
      Err(e) => {
        warn!("multipart form truncated: {e}");
        break;
      }
    }
  }
  fields
}
