//! Bitbucket Cloud adapter (`pullrequest:*` webhooks).
//!
//! No event filter: every delivery routed here is reviewed. Links are read
//! from `pullrequest.links.{diff,comments}.href` and the summary is posted as
//! `{"content":{"raw": ...}}`.

use reqwest::{Client, RequestBuilder, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{MrResult, PayloadError};
use crate::git_providers::http::{fetch_text, post_created};
use crate::git_providers::types::{ChangeRequestRef, ProviderKind, WebhookEvent};

/// How requests to Bitbucket are authenticated.
#[derive(Clone)]
pub enum BitbucketAuth {
    Anonymous,
    /// Repository/workspace access token.
    Bearer(String),
    /// Username + app password.
    Basic { username: String, password: String },
}

impl BitbucketAuth {
    /// Basic when both parts are set, Bearer with only the key.
    pub fn from_parts(key: Option<String>, secret: Option<String>) -> Self {
        match (key, secret) {
            (Some(username), Some(password)) => Self::Basic { username, password },
            (Some(token), None) => Self::Bearer(token),
            (None, _) => Self::Anonymous,
        }
    }
}

impl std::fmt::Debug for BitbucketAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Anonymous => "Anonymous",
            Self::Bearer(_) => "Bearer(<redacted>)",
            Self::Basic { .. } => "Basic(<redacted>)",
        })
    }
}

#[derive(Debug, Clone)]
pub struct BitbucketAdapter {
    http: Client,
    auth: BitbucketAuth,
}

impl BitbucketAdapter {
    pub fn new(http: Client, auth: BitbucketAuth) -> Self {
        Self { http, auth }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(header::ACCEPT, "application/json");
        match &self.auth {
            BitbucketAuth::Anonymous => req,
            BitbucketAuth::Bearer(token) => req.bearer_auth(token),
            BitbucketAuth::Basic { username, password } => req.basic_auth(username, Some(password)),
        }
    }

    pub fn classify(payload: &Value) -> MrResult<WebhookEvent> {
        let event = PullRequestEvent::deserialize(payload).map_err(|source| PayloadError::Shape {
            provider: ProviderKind::Bitbucket,
            source,
        })?;
        let pr = event.pullrequest;

        Ok(WebhookEvent::Review(ChangeRequestRef {
            diff_url: pr.links.diff.href,
            comment_url: pr.links.comments.href,
            review_url: None,
            number: pr.id.to_string(),
        }))
    }

    pub async fn fetch_diff(&self, url: &str) -> MrResult<String> {
        fetch_text(self.authorize(self.http.get(url)), url).await
    }

    pub async fn post_comment(&self, url: &str, body: &str) -> bool {
        let comment = CommentBody {
            content: CommentContent { raw: body },
        };
        post_created(self.authorize(self.http.post(url)), url, &comment).await
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pullrequest: PullRequest,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    id: u64,
    links: PullRequestLinks,
}

#[derive(Debug, Deserialize)]
struct PullRequestLinks {
    diff: Link,
    comments: Link,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    content: CommentContent<'a>,
}

#[derive(Debug, Serialize)]
struct CommentContent<'a> {
    raw: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn links_are_read_from_pullrequest() {
        let payload = json!({
            "pullrequest": {
                "id": 5,
                "links": {
                    "diff": {"href": "https://api.bitbucket.org/2.0/repositories/w/r/pullrequests/5/diff"},
                    "comments": {"href": "https://api.bitbucket.org/2.0/repositories/w/r/pullrequests/5/comments"}
                }
            }
        });
        let WebhookEvent::Review(cr) = BitbucketAdapter::classify(&payload).unwrap() else {
            panic!("expected review");
        };
        assert_eq!(cr.number, "5");
        assert!(cr.diff_url.ends_with("/5/diff"));
        assert!(cr.comment_url.ends_with("/5/comments"));
    }

    #[test]
    fn missing_links_is_a_shape_error() {
        assert!(BitbucketAdapter::classify(&json!({"pullrequest": {"id": 1}})).is_err());
    }

    #[test]
    fn comment_uses_content_raw_shape() {
        let v = serde_json::to_value(CommentBody {
            content: CommentContent { raw: "hi" },
        })
        .unwrap();
        assert_eq!(v, json!({"content": {"raw": "hi"}}));
    }

    #[test]
    fn auth_mode_follows_configured_parts() {
        assert!(matches!(
            BitbucketAuth::from_parts(Some("k".into()), Some("s".into())),
            BitbucketAuth::Basic { .. }
        ));
        assert!(matches!(
            BitbucketAuth::from_parts(Some("k".into()), None),
            BitbucketAuth::Bearer(_)
        ));
        assert!(matches!(BitbucketAuth::from_parts(None, None), BitbucketAuth::Anonymous));
        assert!(!format!("{:?}", BitbucketAuth::Bearer("tok".into())).contains("tok"));
    }
}
