//! Process-wide relay configuration.
//!
//! Loaded once at startup and shared read-only (behind `Arc`) by the
//! dispatcher, the signature verifier and every adapter.

use std::fmt;

use crate::errors::{ConfigError, MrResult};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_DIFF_CHARS: usize = 6000;

/// Secrets, provider credentials and limits for a running relay.
#[derive(Clone)]
pub struct RelayConfig {
    /// Shared HMAC key used to authenticate every provider.
    pub webhook_secret: String,
    /// GitHub token, sent as `Authorization: token <t>`.
    pub github_token: Option<String>,
    /// GitLab token, sent as `Private-Token`.
    pub gitlab_token: Option<String>,
    /// Bitbucket access token (Bearer) or username (Basic, with `bitbucket_secret`).
    pub bitbucket_key: Option<String>,
    /// Bitbucket app password.
    pub bitbucket_secret: Option<String>,
    /// Timeout for diff downloads and comment posts.
    pub http_timeout_secs: u64,
    /// Diff truncation budget for the review prompt, in characters.
    pub max_diff_chars: usize,
}

impl RelayConfig {
    /// Config with only the webhook secret set and defaults elsewhere.
    pub fn with_secret(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            github_token: None,
            gitlab_token: None,
            bitbucket_key: None,
            bitbucket_secret: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
        }
    }

    /// Load from environment variables.
    ///
    /// `WEBHOOK_SECRET` is required; provider credentials are optional so a
    /// deployment can serve a single provider.
    pub fn from_env() -> MrResult<Self> {
        let webhook_secret = opt_env("WEBHOOK_SECRET").ok_or(ConfigError::MissingVar("WEBHOOK_SECRET"))?;

        Ok(Self {
            webhook_secret,
            github_token: opt_env("GITHUB_TOKEN"),
            gitlab_token: opt_env("GITLAB_TOKEN"),
            bitbucket_key: opt_env("BITBUCKET_KEY"),
            bitbucket_secret: opt_env("BITBUCKET_SECRET"),
            http_timeout_secs: positive_env("HTTP_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            max_diff_chars: positive_env("REVIEW_MAX_DIFF_CHARS")?
                .map(|n| n as usize)
                .unwrap_or(DEFAULT_MAX_DIFF_CHARS),
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("RelayConfig")
            .field("webhook_secret", &"<redacted>")
            .field("github_token", &redact(&self.github_token))
            .field("gitlab_token", &redact(&self.gitlab_token))
            .field("bitbucket_key", &redact(&self.bitbucket_key))
            .field("bitbucket_secret", &redact(&self.bitbucket_secret))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("max_diff_chars", &self.max_diff_chars)
            .finish()
    }
}

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn positive_env(name: &'static str) -> MrResult<Option<u64>> {
    match opt_env(name) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber {
                var: name,
                reason: "expected a positive integer",
            }
            .into()),
        },
    }
}
