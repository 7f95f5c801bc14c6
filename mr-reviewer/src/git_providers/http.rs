//! Outbound request helpers shared by the adapters.
//!
//! Requests arrive fully built (URL, auth, Accept); these helpers only decide
//! what counts as success. No retries.

use reqwest::{RequestBuilder, StatusCode, header::RETRY_AFTER};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{MrResult, ProviderError};

/// Sends a diff GET and returns the body text. Non-2xx is an error.
pub(crate) async fn fetch_text(req: RequestBuilder, url: &str) -> MrResult<String> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let retry_after_secs = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        warn!(%url, %status, ?retry_after_secs, "diff fetch returned non-success status");
        return Err(ProviderError::from_status(status.as_u16(), retry_after_secs).into());
    }

    let text = resp.text().await?;
    debug!(%url, diff_len = text.len(), "diff fetched");
    Ok(text)
}

/// POSTs a JSON body. Only `201 Created` counts as success; everything else
/// is logged and reported as `false`.
pub(crate) async fn post_created<B: Serialize + ?Sized>(req: RequestBuilder, url: &str, body: &B) -> bool {
    match req.json(body).send().await {
        Ok(resp) if resp.status() == StatusCode::CREATED => {
            debug!(%url, "comment posted");
            true
        }
        Ok(resp) => {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!(%url, %status, %snippet, "comment post was not accepted");
            false
        }
        Err(e) => {
            warn!(%url, error = %e, "comment post failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use reqwest::Client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn rate_limited_diff_keeps_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pr.diff"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
            .mount(&server)
            .await;

        let url = format!("{}/pr.diff", server.uri());
        let err = fetch_text(Client::new().get(&url), &url).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Provider(ProviderError::RateLimited { retry_after_secs: Some(30) })
        ));
    }

    #[tokio::test]
    async fn http_date_retry_after_is_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "Wed, 21 Oct 2026 07:28:00 GMT"))
            .mount(&server)
            .await;

        let url = format!("{}/pr.diff", server.uri());
        let err = fetch_text(Client::new().get(&url), &url).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Provider(ProviderError::RateLimited { retry_after_secs: None })
        ));
    }
}
