//! Shared LLM client for the review relay.
//!
//! Exposes a single OpenAI-compatible chat completion client
//! ([`services::open_ai_service::OpenAiService`]), its env-driven model
//! configuration, a unified error type and the tracing formatting layer used
//! by the binary.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::config_review_model, llm_model_config::LlmModelConfig,
    llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, Result};
pub use services::open_ai_service::OpenAiService;
