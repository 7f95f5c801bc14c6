//! Provider adapters w/o async-trait or dynamic trait objects.
//!
//! We expose an enum `ProviderAdapter` with one concrete adapter per provider.
//! Each adapter knows its payload shape, diff/comment endpoints and auth; the
//! review flow itself (fetch → generate → parse → post) lives here once.

pub mod types;
pub use types::*;

pub mod bitbucket;
pub mod github;
pub mod gitlab;
mod http;

use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::RelayConfig;
use crate::errors::MrResult;
use crate::review::{ERROR_MARKER, InlineCommentDirective, ReviewGenerator, ReviewResult, extract_inline_directives};

/// Suffix appended to every summary comment.
pub const ATTRIBUTION: &str = "*Automated review by review-relay*";

/// Concrete provider adapter (enum-dispatch).
#[derive(Debug, Clone)]
pub enum ProviderAdapter {
    GitHub(github::GitHubAdapter),
    GitLab(gitlab::GitLabAdapter),
    Bitbucket(bitbucket::BitbucketAdapter),
}

impl ProviderAdapter {
    /// Builds the adapter for `kind` over a shared HTTP client.
    pub fn for_kind(kind: ProviderKind, http: Client, config: &RelayConfig) -> Self {
        match kind {
            ProviderKind::GitHub => Self::GitHub(github::GitHubAdapter::new(http, config.github_token.clone())),
            ProviderKind::GitLab => Self::GitLab(gitlab::GitLabAdapter::new(http, config.gitlab_token.clone())),
            ProviderKind::Bitbucket => Self::Bitbucket(bitbucket::BitbucketAdapter::new(
                http,
                bitbucket::BitbucketAuth::from_parts(config.bitbucket_key.clone(), config.bitbucket_secret.clone()),
            )),
        }
    }

    pub fn server_type(&self) -> ProviderKind {
        match self {
            Self::GitHub(_) => ProviderKind::GitHub,
            Self::GitLab(_) => ProviderKind::GitLab,
            Self::Bitbucket(_) => ProviderKind::Bitbucket,
        }
    }

    /// Reads the payload into an ignore/review decision. Pure; no I/O.
    pub fn classify(&self, payload: &Value) -> MrResult<WebhookEvent> {
        match self {
            Self::GitHub(_) => github::GitHubAdapter::classify(payload),
            Self::GitLab(_) => gitlab::GitLabAdapter::classify(payload),
            Self::Bitbucket(_) => bitbucket::BitbucketAdapter::classify(payload),
        }
    }

    /// Runs the full review for one verified delivery and returns the reply
    /// message.
    ///
    /// Only payload shape errors propagate. Diff and LLM failures are posted
    /// as the review text; comment-post failures are logged.
    #[instrument(skip_all, fields(provider = %self.server_type()))]
    pub async fn handle_webhook(&self, payload: &Value, generator: &ReviewGenerator) -> MrResult<String> {
        let cr = match self.classify(payload)? {
            WebhookEvent::Ignored(message) => {
                info!(reason = message, "webhook event ignored");
                return Ok(message.to_string());
            }
            WebhookEvent::Review(cr) => cr,
        };
        let label = self.server_type().request_label();
        info!(number = %cr.number, "reviewing {label}");

        let review = match self.fetch_diff(&cr.diff_url).await {
            Ok(diff) => ReviewResult::parse(&generator.generate(&diff).await),
            Err(e) => {
                warn!(number = %cr.number, error = %e, "diff fetch failed; posting error instead of review");
                ReviewResult::parse(&format!("{ERROR_MARKER}: failed to fetch diff. {e}"))
            }
        };
        info!(number = %cr.number, rating = %review.rating, "review ready");

        if review.is_error() {
            warn!(number = %cr.number, "review carries an error marker; skipping inline comments");
        } else if let Some(review_url) = &cr.review_url {
            let directives = extract_inline_directives(&review.feedback);
            if !directives.is_empty() {
                let ok = self.post_inline_comments(review_url, &directives).await;
                info!(number = %cr.number, count = directives.len(), ok, "inline review posted");
            }
        }

        let posted = self.post_comment(&cr.comment_url, &with_attribution(&review.feedback)).await;
        if !posted {
            warn!(number = %cr.number, "summary comment was not posted");
        }

        Ok(format!("Posted review for {label} #{}", cr.number))
    }

    pub async fn fetch_diff(&self, url: &str) -> MrResult<String> {
        match self {
            Self::GitHub(a) => a.fetch_diff(url).await,
            Self::GitLab(a) => a.fetch_diff(url).await,
            Self::Bitbucket(a) => a.fetch_diff(url).await,
        }
    }

    /// Posts a summary comment. `true` only on HTTP 201.
    pub async fn post_comment(&self, url: &str, body: &str) -> bool {
        match self {
            Self::GitHub(a) => a.post_comment(url, body).await,
            Self::GitLab(a) => a.post_comment(url, body).await,
            Self::Bitbucket(a) => a.post_comment(url, body).await,
        }
    }

    /// Posts line-anchored comments. Only GitHub supports this; the others
    /// return `false` without any request.
    pub async fn post_inline_comments(&self, url: &str, directives: &[InlineCommentDirective]) -> bool {
        match self {
            Self::GitHub(a) => a.post_inline_comments(url, directives).await,
            Self::GitLab(_) | Self::Bitbucket(_) => {
                warn!(provider = %self.server_type(), "inline comments are not supported");
                false
            }
        }
    }
}

/// Summary body with the attribution suffix.
pub fn with_attribution(feedback: &str) -> String {
    format!("{feedback}\n\n{ATTRIBUTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_reports_its_kind() {
        let cfg = RelayConfig::with_secret("s");
        for kind in [ProviderKind::GitHub, ProviderKind::GitLab, ProviderKind::Bitbucket] {
            let adapter = ProviderAdapter::for_kind(kind, Client::new(), &cfg);
            assert_eq!(adapter.server_type(), kind);
        }
    }

    #[test]
    fn attribution_is_appended_after_blank_line() {
        assert_eq!(with_attribution("body"), format!("body\n\n{ATTRIBUTION}"));
    }

    #[tokio::test]
    async fn inline_comments_are_a_no_op_outside_github() {
        let cfg = RelayConfig::with_secret("s");
        let adapter = ProviderAdapter::for_kind(ProviderKind::GitLab, Client::new(), &cfg);
        assert!(!adapter.post_inline_comments("http://127.0.0.1:9/never", &[]).await);
    }
}
