use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use common::WatchError;

/// Maps the library error taxonomy onto the HTTP surface: missing or invalid
/// configuration is the caller's problem (400), upstream failures pass
/// through as 502 with the upstream detail, everything else is a 500.
pub struct ApiError(pub WatchError);

impl From<WatchError> for ApiError {
    fn from(e: WatchError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            WatchError::MissingConfig(var) => (
                StatusCode::BAD_REQUEST,
                format!("missing configuration: {var}"),
            ),
            WatchError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            WatchError::Upstream { status, body } => (
                StatusCode::BAD_GATEWAY,
                format!("upstream returned {status}: {body}"),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        (
            status,
            Json(serde_json::json!({"ok": false, "error": detail})),
        )
            .into_response()
    }
}
