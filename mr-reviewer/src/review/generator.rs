//! LLM-backed review generator.

use ai_llm_service::OpenAiService;
use tracing::{info, instrument, warn};

use crate::review::{ERROR_MARKER, prompt::build_review_prompt};

const SYSTEM_PROMPT: &str =
    "You are a senior software engineer performing a code review. Follow the requested output format exactly.";

/// Turns a diff into review markdown.
///
/// Never fails: transport and provider errors are rendered as
/// `❌ Error: LLM API call failed. <cause>` so the failure reaches the
/// change request as a visible comment.
#[derive(Debug, Clone)]
pub struct ReviewGenerator {
    llm: OpenAiService,
    max_diff_chars: usize,
}

impl ReviewGenerator {
    pub fn new(llm: OpenAiService, max_diff_chars: usize) -> Self {
        Self { llm, max_diff_chars }
    }

    #[instrument(skip_all, fields(model = %self.llm.model(), diff_len = diff.len()))]
    pub async fn generate(&self, diff: &str) -> String {
        let prompt = build_review_prompt(diff, self.max_diff_chars);

        match self.llm.generate(&prompt, Some(SYSTEM_PROMPT)).await {
            Ok(text) => {
                info!(output_len = text.len(), "review generated");
                text
            }
            Err(e) => {
                warn!(error = %e, "review generation failed");
                format!("{ERROR_MARKER}: LLM API call failed. {e}")
            }
        }
    }
}
