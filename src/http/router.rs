//! Webhook router for inbound email delivery.
//!
//! Mounts `POST /inbox` for the mail provider's webhook and `GET /health`
//! for liveness probes. The webhook authenticates with a shared secret
//! passed as a `key` query parameter; the response status tells the
//! provider whether to retry (5xx) or drop the message (2xx/4xx).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::mail::{InboundEmail, InboundPayload};
use crate::service::{InboxOutcome, InboxService};
use crate::{AppError, GlobalConfig, Result};

/// Shared state for all webhook handlers.
pub struct AppState {
    /// Loaded configuration, including the webhook security key.
    pub config: Arc<GlobalConfig>,
    /// The inbox service applying parsed emails to lists.
    pub service: InboxService,
}

/// Handler for `GET /health` - returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

/// Extract `key` from a URI query string.
///
/// Returns `None` when the parameter is absent or empty.
fn extract_key(uri: &Uri) -> Option<String> {
    uri.query().and_then(|q| {
        q.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "key")
            .map(|(_, v)| v.to_owned())
            .filter(|v| !v.is_empty())
    })
}

/// Handler for `POST /inbox`: the mail provider's delivery webhook.
///
/// Returns 401 on a missing or wrong security key, 400 on payloads the
/// service cannot act on (so the provider stops retrying them), and 500
/// only for persistence failures where a retry can help.
async fn inbox(State(state): State<Arc<AppState>>, uri: Uri, body: Bytes) -> Response {
    let expected = &state.config.security_key;
    if !expected.is_empty() && extract_key(&uri).as_deref() != Some(expected.as_str()) {
        let err = AppError::Unauthorized("bad or missing security key".to_owned());
        warn!(%err, "webhook rejected");
        return error_response(StatusCode::UNAUTHORIZED, &err.to_string());
    }

    let payload: InboundPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%err, "webhook rejected: malformed payload");
            return error_response(StatusCode::BAD_REQUEST, &format!("malformed payload: {err}"));
        }
    };

    let email = match InboundEmail::from_payload(payload) {
        Ok(email) => email,
        Err(err) => {
            warn!(%err, "webhook rejected: incomplete email");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    match state.service.handle(email).await {
        Ok(InboxOutcome::Created { list_id }) => {
            (StatusCode::CREATED, Json(json!({ "status": "created", "list_id": list_id })))
                .into_response()
        }
        Ok(InboxOutcome::Updated { list_id }) => {
            (StatusCode::OK, Json(json!({ "status": "updated", "list_id": list_id })))
                .into_response()
        }
        Ok(InboxOutcome::NoSuchTask { list_id, num }) => (
            StatusCode::OK,
            Json(json!({ "status": "no such task", "list_id": list_id, "num": num })),
        )
            .into_response(),
        Err(err) => {
            let status = match err {
                AppError::NotFound(_) | AppError::Payload(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(%err, %status, "webhook processing failed");
            error_response(status, &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Build the webhook router over the shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/inbox", post(inbox))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the webhook on `config.http_port` until cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the server fails to bind or exits with
/// an error.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let port = state.config.http_port;
    let bind = SocketAddr::from(([0, 0, 0, 0], port));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind webhook on {bind}: {err}")))?;

    info!(%bind, "starting inbound email webhook");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            ct.cancelled().await;
        })
        .await
        .map_err(|err| AppError::Config(format!("webhook server error: {err}")))?;

    info!("inbound email webhook shut down");
    Ok(())
}
