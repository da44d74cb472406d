//! HTTP transport — maps HTTP requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:command` — dispatch a command. Body = JSON input; the caller's
//!   identity arrives as `x-user-id` / `x-user-role` headers forwarded by
//!   the authenticating proxy in front of this service.
//! - `GET /health` — health check returning `{ "ok": true, "commands": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront::{storefront_service, InMemoryStore};
//! use storefront::service::serve;
//!
//! let service = Arc::new(storefront_service(InMemoryStore::new()));
//! serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::service::Service;
use super::session::Session;
use crate::domain::Role;

/// Build an axum `Router` that dispatches commands via the given service.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:command", axum::routing::post(command_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: Send + Sync + 'static>(
    service: Arc<Service<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "commands": [...] }`.
async fn health_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> impl IntoResponse {
    let commands: Vec<&str> = service.commands();
    Json(json!({ "ok": true, "commands": commands }))
}

/// `POST /:command` — dispatch a command with JSON body and headers as session.
async fn command_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(command): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Value>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    match service.dispatch(&command, input, session) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = json!({ "error": e.to_string() });
            (status, Json(body)).into_response()
        }
    }
}

/// Build the request session from forwarded identity headers.
///
/// A request is only authenticated when both `x-user-id` and a recognized
/// `x-user-role` are present; anything else dispatches as anonymous.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let user_id = headers.get("x-user-id").and_then(|v| v.to_str().ok());
    let role = headers
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .and_then(Role::parse);

    match (user_id, role) {
        (Some(user_id), Some(role)) => Session::with_role(user_id, role),
        _ => Session::anonymous(),
    }
}
