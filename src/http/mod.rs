//! HTTP router and handlers.

use crate::app::AppState;
use axum::{Router, routing::get};

pub mod listener;

/// Path of the webhook endpoint.
pub const LISTENER_PATH: &str = "/spaceremit-log-listener/";

/// Assemble the HTTP router. The listener accepts GET and POST, with or
/// without the trailing slash.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            LISTENER_PATH,
            get(listener::handle_listener).post(listener::handle_listener),
        )
        .route(
            LISTENER_PATH.trim_end_matches('/'),
            get(listener::handle_listener).post(listener::handle_listener),
        )
        .with_state(state)
}
