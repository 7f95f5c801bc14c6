use std::fmt;

/// Backend serving the chat completion API.
///
/// Every supported backend speaks the OpenAI wire format
/// (`POST {endpoint}/v1/chat/completions`); the variant only changes defaults
/// and how errors are attributed in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Groq's OpenAI-compatible endpoint (`https://api.groq.com/openai`).
    Groq,
    /// OpenAI's own API.
    OpenAI,
}

impl LlmProvider {
    /// Parses a provider name as used in `LLM_PROVIDER`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "openai" | "chatgpt" => Some(Self::OpenAI),
            _ => None,
        }
    }

    /// Default API base for this provider.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai",
            Self::OpenAI => "https://api.openai.com",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groq => f.write_str("groq"),
            Self::OpenAI => f.write_str("openai"),
        }
    }
}
