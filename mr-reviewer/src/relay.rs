//! Webhook orchestration: route → verify → parse → review.

use std::sync::Arc;
use std::time::Duration;

use ai_llm_service::{LlmModelConfig, OpenAiService};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::RelayConfig;
use crate::dispatch::select_adapter;
use crate::errors::{Error, MrResult};
use crate::git_providers::WebhookRequest;
use crate::review::ReviewGenerator;
use crate::signature::{supplied_signature, verify};

const USER_AGENT: &str = "review-relay/0.1";

/// Everything needed to handle a webhook delivery. Cheap to clone; holds no
/// per-request state.
#[derive(Debug, Clone)]
pub struct ReviewRelay {
    config: Arc<RelayConfig>,
    http: Client,
    generator: ReviewGenerator,
}

impl ReviewRelay {
    /// Builds the shared provider HTTP client and the LLM client.
    pub fn new(config: RelayConfig, llm: LlmModelConfig) -> MrResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        let generator = ReviewGenerator::new(OpenAiService::new(llm)?, config.max_diff_chars);

        Ok(Self::from_parts(Arc::new(config), http, generator))
    }

    pub fn from_parts(config: Arc<RelayConfig>, http: Client, generator: ReviewGenerator) -> Self {
        Self { config, http, generator }
    }

    /// Handles one delivery and returns the adapter's result message.
    ///
    /// # Errors
    /// - [`Error::UnsupportedProvider`] when no adapter matches the headers
    /// - [`Error::InvalidSignature`] when the signature is missing or wrong
    /// - [`Error::Payload`] when the verified body is not the expected JSON
    ///
    /// Nothing is fetched or posted before all three checks pass.
    #[instrument(skip_all, fields(body_len = request.body().len()))]
    pub async fn process(&self, request: &WebhookRequest) -> MrResult<String> {
        let Some(adapter) = select_adapter(request.headers(), &self.http, &self.config) else {
            warn!("no provider matched webhook headers");
            return Err(Error::UnsupportedProvider);
        };
        let provider = adapter.server_type();
        debug!(%provider, "provider selected");

        let supplied = supplied_signature(request.headers());
        if !verify(request.body(), supplied, provider, self.config.webhook_secret.as_bytes()) {
            warn!(%provider, has_signature = supplied.is_some(), "webhook signature rejected");
            return Err(Error::InvalidSignature { provider });
        }

        let payload = request.payload()?;
        let message = adapter.handle_webhook(&payload, &self.generator).await?;
        info!(%provider, %message, "webhook processed");
        Ok(message)
    }
}
