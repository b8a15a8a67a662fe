use axum::Json;
use google_auth_bridge::{CallRejection, UNIMPLEMENTED_CODE};
use http::StatusCode;
use serde_json::{Value, json};

/// Helper trait for converting call rejections to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, Json<Value>)>;
}

impl<T> IntoResponseError<T> for Result<T, CallRejection> {
    fn into_response_error(self) -> Result<T, (StatusCode, Json<Value>)> {
        self.map_err(|rejection| {
            let status = match rejection.code.as_deref() {
                Some(UNIMPLEMENTED_CODE) => StatusCode::NOT_IMPLEMENTED,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(json!({
                    "message": rejection.message,
                    "code": rejection.code,
                })),
            )
        })
    }
}
