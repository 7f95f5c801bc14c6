//! Crate-wide error hierarchy for mr-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Routing and authentication failures are distinct variants so the HTTP
//!   layer can map them to 400/403 without string matching.
//! - Provider-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - No dynamic dispatch, no async-trait, ergonomic `?` via `From` impls.

use ai_llm_service::AiLlmError;
use thiserror::Error;

use crate::git_providers::ProviderKind;

/// Convenient alias for crate-wide results.
pub type MrResult<T> = Result<T, Error>;

/// Root error type for the mr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// No adapter recognised the webhook headers.
    #[error("unsupported git server")]
    UnsupportedProvider,

    /// Signature missing or not matching the shared secret.
    #[error("invalid webhook signature for {provider}")]
    InvalidSignature { provider: ProviderKind },

    /// Webhook body could not be interpreted.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Provider (GitLab/GitHub/Bitbucket) related failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration problems (missing secret, bad numbers).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// LLM client construction or call failure.
    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Problems with the inbound webhook payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Body is not valid JSON.
    #[error("webhook body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// JSON is valid but lacks a field the adapter needs.
    #[error("{provider} payload does not match the expected shape: {source}")]
    Shape {
        provider: ProviderKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Detailed provider-specific error used inside the provider layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429). Carries `Retry-After` when it was given in seconds.
    #[error("rate limited{}", .retry_after_secs.map(|s| format!(" (retry after {s}s)")).unwrap_or_default())]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),
}

/// Configuration and setup errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A numeric variable failed to parse or is zero.
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            return ProviderError::from_status(status.as_u16(), None);
        }
        ProviderError::Network(e.to_string())
    }
}

impl ProviderError {
    /// Classifies a non-success HTTP status code. `retry_after_secs` is only
    /// kept for 429.
    pub fn from_status(code: u16, retry_after_secs: Option<u64>) -> Self {
        match code {
            401 => ProviderError::Unauthorized,
            403 => ProviderError::Forbidden,
            404 => ProviderError::NotFound,
            429 => ProviderError::RateLimited { retry_after_secs },
            500..=599 => ProviderError::Server(code),
            _ => ProviderError::HttpStatus(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_provider_errors() {
        assert!(matches!(ProviderError::from_status(401, None), ProviderError::Unauthorized));
        assert!(matches!(ProviderError::from_status(403, None), ProviderError::Forbidden));
        assert!(matches!(ProviderError::from_status(404, Some(5)), ProviderError::NotFound));
        assert!(matches!(
            ProviderError::from_status(429, Some(30)),
            ProviderError::RateLimited { retry_after_secs: Some(30) }
        ));
        assert!(matches!(ProviderError::from_status(502, None), ProviderError::Server(502)));
        assert!(matches!(ProviderError::from_status(422, None), ProviderError::HttpStatus(422)));
    }

    #[test]
    fn rate_limit_message_mentions_retry_delay_when_known() {
        assert_eq!(
            ProviderError::RateLimited { retry_after_secs: Some(30) }.to_string(),
            "rate limited (retry after 30s)"
        );
        assert_eq!(ProviderError::RateLimited { retry_after_secs: None }.to_string(), "rate limited");
    }
}
