use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error envelope returned for every rejected request.
///
/// ```json
/// {"success": false, "error": {"code": "INVALID_SIGNATURE", "message": "..."}}
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable error code (e.g. "UNSUPPORTED_PROVIDER").
    pub code: &'static str,
    /// Human-friendly error message.
    pub message: String,
    /// Optional hint to help the sender fix its webhook setup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl ApiResponse {
    /// Build an error envelope.
    pub fn error(code: &'static str, message: impl Into<String>, hint: Option<&'static str>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code,
                message: message.into(),
                hint,
            },
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_shape() {
        let v = serde_json::to_value(ApiResponse::error("BAD_REQUEST", "nope", None)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"success": false, "error": {"code": "BAD_REQUEST", "message": "nope"}})
        );
    }
}
