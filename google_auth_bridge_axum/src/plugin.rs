use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use google_auth_bridge::{GoogleAuth, OpenUrlNotification, PluginCall};
use http::StatusCode;
use serde_json::{Map, Value};

use super::error::IntoResponseError;

/// Body as JSON; empty or unparsable bodies read as `None`.
fn lenient_json(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring body that is not JSON: {}", e);
            None
        }
    }
}

pub(super) async fn invoke_method(
    State(bridge): State<GoogleAuth>,
    Path(method): Path<String>,
    body: Bytes,
) -> Result<Json<Map<String, Value>>, (StatusCode, Json<Value>)> {
    let options = match lenient_json(&body) {
        Some(Value::Object(options)) => options,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            tracing::debug!("Ignoring non-object options for {}: {}", method, other);
            Map::new()
        }
    };

    let (call, pending) = PluginCall::new(method, options);
    tracing::debug!("Dispatching {} as call {}", call.method(), call.callback_id());
    bridge.call(call);

    pending.response().await.map(Json).into_response_error()
}

pub(super) async fn open_url(State(bridge): State<GoogleAuth>, body: Bytes) -> StatusCode {
    bridge.handle_open_url(&OpenUrlNotification::new(lenient_json(&body)));
    StatusCode::ACCEPTED
}
