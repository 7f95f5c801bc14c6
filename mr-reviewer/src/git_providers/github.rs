//! GitHub adapter (`pull_request` webhooks, REST v3).
//!
//! Only `action == "opened"` is reviewed. URLs come straight from the
//! payload's `pull_request` object:
//! - `diff_url` (fetched as `application/vnd.github.v3.diff`)
//! - `comments_url` (summary comment)
//! - `url` + `/reviews` (batched inline review)

use reqwest::{Client, RequestBuilder, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MrResult, PayloadError};
use crate::git_providers::http::{fetch_text, post_created};
use crate::git_providers::types::{ChangeRequestRef, ProviderKind, WebhookEvent};
use crate::review::InlineCommentDirective;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_DIFF: &str = "application/vnd.github.v3.diff";
const REVIEW_BODY: &str = "Automated AI PR Review";

#[derive(Debug, Clone)]
pub struct GitHubAdapter {
    http: Client,
    token: Option<String>,
}

impl GitHubAdapter {
    pub fn new(http: Client, token: Option<String>) -> Self {
        Self { http, token }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(header::AUTHORIZATION, format!("token {token}")),
            None => req,
        }
    }

    /// Classifies a `pull_request` delivery.
    pub fn classify(payload: &Value) -> MrResult<WebhookEvent> {
        if payload.get("action").and_then(Value::as_str) != Some("opened") {
            return Ok(WebhookEvent::Ignored("Only processing opened PRs"));
        }

        let event = PullRequestEvent::deserialize(payload).map_err(|source| PayloadError::Shape {
            provider: ProviderKind::GitHub,
            source,
        })?;
        let pr = event.pull_request;

        Ok(WebhookEvent::Review(ChangeRequestRef {
            review_url: Some(format!("{}/reviews", pr.url.trim_end_matches('/'))),
            diff_url: pr.diff_url,
            comment_url: pr.comments_url,
            number: pr.number.to_string(),
        }))
    }

    pub async fn fetch_diff(&self, url: &str) -> MrResult<String> {
        let req = self.authorize(self.http.get(url)).header(header::ACCEPT, ACCEPT_DIFF);
        fetch_text(req, url).await
    }

    pub async fn post_comment(&self, url: &str, body: &str) -> bool {
        let req = self.authorize(self.http.post(url)).header(header::ACCEPT, ACCEPT_JSON);
        post_created(req, url, &CommentBody { body }).await
    }

    /// Posts all directives as one `COMMENT` review.
    pub async fn post_inline_comments(&self, url: &str, directives: &[InlineCommentDirective]) -> bool {
        let req = self.authorize(self.http.post(url)).header(header::ACCEPT, ACCEPT_JSON);
        let review = ReviewBody {
            body: REVIEW_BODY,
            event: "COMMENT",
            comments: directives,
        };
        post_created(req, url, &review).await
    }
}

/* ===== payloads ===== */

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pull_request: PullRequest,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    number: u64,
    url: String,
    diff_url: String,
    comments_url: String,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct ReviewBody<'a> {
    body: &'a str,
    event: &'a str,
    comments: &'a [InlineCommentDirective],
}
