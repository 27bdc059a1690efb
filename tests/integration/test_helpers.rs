//! Shared helpers for webhook-level integration tests.
//!
//! Provides reusable construction of the application state, router, and
//! provider-shaped JSON payloads so individual test modules can focus on
//! behaviour rather than boilerplate.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use inbox_todo::config::GlobalConfig;
use inbox_todo::http::{build_router, AppState};
use inbox_todo::persistence::db::{self, Database};
use inbox_todo::service::InboxService;

pub const CREATE_ADDRESS: &str = "create@todo.example.com";
pub const UPDATE_ADDRESS: &str = "update@todo.example.com";
pub const SECURITY_KEY: &str = "s3cret";

/// Build a test configuration with the shared inbound addresses and a
/// known security key, no mail API key (notifications disabled).
pub fn test_config() -> GlobalConfig {
    let toml = format!(
        r#"
http_port = 0

[inbound]
create_address = "{CREATE_ADDRESS}"
update_address = "{UPDATE_ADDRESS}"

[mailer]
api_url = "https://api.example.com/messages"
sender = "Todo <noreply@todo.example.com>"
"#
    );
    let mut config = GlobalConfig::from_toml_str(&toml).expect("valid test config");
    config.security_key = SECURITY_KEY.to_owned();
    config
}

/// Build the full application state over an in-memory database.
///
/// Returns the router's state and the database handle so tests can
/// inspect persistence directly.
pub async fn test_state(config: GlobalConfig) -> (Arc<AppState>, Arc<Database>) {
    let database = Arc::new(db::connect_memory().await.expect("db connect"));
    let config = Arc::new(config);
    let service = InboxService::new(Arc::clone(&config), Arc::clone(&database), None);
    let state = Arc::new(AppState { config, service });
    (state, database)
}

/// Build the default state and router pair used by most tests.
pub async fn test_router() -> (Router, Arc<Database>) {
    let (state, database) = test_state(test_config()).await;
    (build_router(state), database)
}

/// Provider-shaped JSON payload for one inbound email.
pub fn inbound_json(to: &str, from: &str, subject: &str, plain: &str) -> Value {
    json!({
        "headers": {
            "To": to,
            "From": from,
            "Subject": subject,
            "Message-ID": "<test-msg@example.com>",
            "Cc": ""
        },
        "plain": plain
    })
}

/// POST a JSON payload to `/inbox`, optionally with a `?key=` parameter.
pub async fn post_inbox(router: &Router, key: Option<&str>, payload: &Value) -> Response {
    let uri = match key {
        Some(key) => format!("/inbox?key={key}"),
        None => "/inbox".to_owned(),
    };
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("valid request");

    router.clone().oneshot(request).await.expect("response")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
