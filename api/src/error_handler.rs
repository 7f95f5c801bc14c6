use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mr_reviewer::errors::{Error as RelayError, PayloadError};
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot ---
    #[error("invalid listen address {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Webhook ---
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Relay(e) => match e {
                RelayError::UnsupportedProvider => StatusCode::BAD_REQUEST,
                RelayError::InvalidSignature { .. } => StatusCode::FORBIDDEN,
                RelayError::Payload(PayloadError::InvalidJson(_)) => StatusCode::BAD_REQUEST,
                RelayError::Payload(PayloadError::Shape { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
                RelayError::Provider(_) | RelayError::Config(_) | RelayError::Llm(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Bind { .. } | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Relay(e) => match e {
                RelayError::UnsupportedProvider => "UNSUPPORTED_PROVIDER",
                RelayError::InvalidSignature { .. } => "INVALID_SIGNATURE",
                RelayError::Payload(PayloadError::InvalidJson(_)) => "INVALID_JSON",
                RelayError::Payload(PayloadError::Shape { .. }) => "INVALID_PAYLOAD",
                RelayError::Provider(_) => "PROVIDER_ERROR",
                RelayError::Config(_) => "CONFIG_ERROR",
                RelayError::Llm(_) => "LLM_ERROR",
            },
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Relay(RelayError::UnsupportedProvider) => {
                Some("Expected X-GitHub-Event, X-Gitlab-Event, or X-Hub-Signature with a Bitbucket User-Agent.")
            }
            AppError::Relay(RelayError::InvalidSignature { .. }) => {
                Some("Check that the webhook secret matches the relay's WEBHOOK_SECRET.")
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        ApiResponse::error(self.error_code(), self.to_string(), self.hint()).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mr_reviewer::ProviderKind;

    #[test]
    fn relay_errors_map_to_http_statuses() {
        let cases = [
            (AppError::from(RelayError::UnsupportedProvider), StatusCode::BAD_REQUEST),
            (
                AppError::from(RelayError::InvalidSignature {
                    provider: ProviderKind::GitLab,
                }),
                StatusCode::FORBIDDEN,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }

        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(RelayError::Payload(PayloadError::InvalidJson(bad_json)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_JSON");

        let shape = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let err = AppError::from(RelayError::Payload(PayloadError::Shape {
            provider: ProviderKind::GitHub,
            source: shape,
        }));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
