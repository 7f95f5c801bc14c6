//! Review model config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_API_KEY` (or legacy `GROQ_API_KEY`) = bearer key (mandatory)
//! - `LLM_PROVIDER`     = `groq` (default) or `openai`
//! - `LLM_ENDPOINT`     = API base; defaults per provider
//! - `LLM_MODEL`        = model id (default `llama-3.1-8b-instant`)
//! - `LLM_MAX_TOKENS`   = completion budget (default 3000)
//! - `LLM_TIMEOUT_SECS` = request timeout (default 30)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, env_opt_u64, must_env, validate_http_endpoint,
    },
};

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_MAX_TOKENS: u32 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REVIEW_TEMPERATURE: f32 = 0.1;

/// Resolves the API key, preferring `LLM_API_KEY` over `GROQ_API_KEY`.
fn api_key() -> Result<String, AiLlmError> {
    must_env("LLM_API_KEY")
        .or_else(|_| must_env("GROQ_API_KEY"))
        .map_err(|_| ConfigError::MissingVar("LLM_API_KEY or GROQ_API_KEY").into())
}

/// Constructs the config for the model that writes code reviews.
///
/// # Defaults
/// - `temperature = Some(0.1)`
/// - `max_tokens = Some(3000)`
/// - `timeout_secs = Some(30)`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if no API key is set
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
/// - [`ConfigError::InvalidFormat`] if `LLM_ENDPOINT` is not http(s)
/// - [`ConfigError::InvalidNumber`] for malformed numeric variables
pub fn config_review_model() -> Result<LlmModelConfig, AiLlmError> {
    let provider = match std::env::var("LLM_PROVIDER") {
        Ok(name) if !name.trim().is_empty() => LlmProvider::from_name(&name)
            .ok_or_else(|| ConfigError::UnsupportedProvider(name.clone()))?,
        _ => LlmProvider::Groq,
    };

    let endpoint = std::env::var("LLM_ENDPOINT")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let model = std::env::var("LLM_MODEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: Some(api_key()?),
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(REVIEW_TEMPERATURE),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}
