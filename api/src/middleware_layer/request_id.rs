use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info_span};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Returns the caller's `X-Request-Id` if it is usable, otherwise a fresh one.
fn resolve_request_id(headers: &HeaderMap) -> String {
    if let Some(v) = headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.trim().to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Tags every request's span and response with an `X-Request-Id`.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = resolve_request_id(req.headers());
    let span = info_span!("http", request_id = %id, method = %req.method(), path = %req.uri().path());

    let mut res = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_id_is_kept() {
        let mut h = HeaderMap::new();
        h.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" abc-123 "));
        assert_eq!(resolve_request_id(&h), "abc-123");
    }

    #[test]
    fn missing_id_is_generated() {
        let id = resolve_request_id(&HeaderMap::new());
        assert!(id.starts_with("req-"));
    }
}
