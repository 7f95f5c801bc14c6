use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which OpenAI-compatible backend to use.
/// - `model`: The model identifier (e.g., `"llama-3.1-8b-instant"`).
/// - `endpoint`: API base URL; `/v1/chat/completions` is appended.
/// - `api_key`: Bearer key for the API.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Request timeout in seconds. Always finite; `None`
///   falls back to 60 seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Groq,
///     model: "llama-3.1-8b-instant".to_string(),
///     endpoint: "https://api.groq.com/openai".to_string(),
///     api_key: Some("gsk-...".to_string()),
///     max_tokens: Some(3000),
///     temperature: Some(0.1),
///     top_p: None,
///     timeout_secs: Some(30),
/// };
/// assert_eq!(cfg.provider, LlmProvider::Groq);
/// ```
#[derive(Clone)]
pub struct LlmModelConfig {
    /// The LLM backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Groq,
            model: "m".into(),
            endpoint: "http://localhost".into(),
            api_key: Some("super-secret-key".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };

        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
