use axum::{Router, routing::post};
use google_auth_bridge::GoogleAuth;

use super::plugin::{invoke_method, open_url};

/// Routes exposing the bridge to a host shell.
///
/// - `POST /plugin/{method}`: JSON object body as call options
/// - `POST /open-url`: URL-activation notification payload
pub fn google_auth_router(bridge: GoogleAuth) -> Router {
    Router::new()
        .route("/plugin/{method}", post(invoke_method))
        .route("/open-url", post(open_url))
        .with_state(bridge)
}
